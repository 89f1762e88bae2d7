//! Report rendering.
//!
//! A [`RendererRegistry`] maps each report section kind to exactly one
//! [`SectionRenderer`]; the [`ReportAssembler`] brackets the sections with a
//! document head and a heading naming the two builds, and writes the whole
//! Markdown document to its sink in one write.

pub mod archive_render;
pub mod context;
pub mod parts;
pub mod registry;
pub mod report;
pub mod unassociated_render;
pub mod unknown_render;

pub use archive_render::ArchiveSectionRenderer;
pub use context::{BuildDescriptor, RenderContext};
pub use parts::{ComparisonHeadingRenderer, HeadRenderer, PartRenderer};
pub use registry::{RendererRegistry, SectionKind, SectionRenderer};
pub use report::ReportAssembler;
pub use unassociated_render::UnassociatedSectionRenderer;
pub use unknown_render::UnknownSectionRenderer;

/// Wrap a value in an inline code span on a single line. The fence is one
/// backtick longer than the longest backtick run inside the value.
pub(crate) fn code(value: &str) -> String {
    let value = value.replace(['\r', '\n'], " ");
    let longest_run = value
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest_run == 0 {
        format!("`{}`", value)
    } else {
        let fence = "`".repeat(longest_run + 1);
        format!("{fence} {value} {fence}")
    }
}

/// Escape characters that would break a Markdown table cell.
pub(crate) fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Abbreviate a hex digest for display
pub(crate) fn short(digest: &str) -> &str {
    match digest.char_indices().nth(12) {
        Some((idx, _)) => &digest[..idx],
        None => digest,
    }
}
