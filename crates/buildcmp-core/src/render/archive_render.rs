//! Section renderer for compared archive pairs.

use crate::compare::{
    ArchiveAvailability, ArchiveComparison, ComparisonBasis, ComparisonEntry, EntryChange,
    OutcomeComparison,
};
use crate::errors::Result;
use crate::outcome::{ArchiveEntry, ArchiveOutcome};
use crate::render::context::RenderContext;
use crate::render::registry::{unexpected_entry, SectionKind, SectionRenderer};
use crate::render::{cell, code, short};

/// Renders archive comparisons, equal or different.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveSectionRenderer;

impl SectionRenderer for ArchiveSectionRenderer {
    fn sections(&self) -> Vec<SectionKind> {
        vec![SectionKind::Archive]
    }

    fn render(&self, entry: &ComparisonEntry, ctx: &RenderContext, out: &mut String) -> Result<()> {
        match entry {
            ComparisonEntry::Compared {
                comparison: OutcomeComparison::Archive(comparison),
            } => {
                render_archive(comparison, ctx, out);
                Ok(())
            }
            other => Err(unexpected_entry("render_archive_section", other)),
        }
    }
}

fn render_archive(comparison: &ArchiveComparison, ctx: &RenderContext, out: &mut String) {
    out.push_str(&format!("## Archive: {}\n\n", code(&comparison.source.name)));
    out.push_str(&format!(
        "- **Result**: {}\n",
        if comparison.classification.is_equal() {
            "Equal"
        } else {
            "Different"
        }
    ));
    out.push_str(&format!(
        "- **Task**: {} ({})\n",
        code(&comparison.source.task_path),
        ctx.source.label
    ));
    if comparison.target.task_path != comparison.source.task_path {
        out.push_str(&format!(
            "- **Task**: {} ({})\n",
            code(&comparison.target.task_path),
            ctx.target.label
        ));
    }
    out.push_str(&format!(
        "- **{}**: {}\n",
        ctx.source.label,
        describe_archive(&comparison.source, ctx)
    ));
    out.push_str(&format!(
        "- **{}**: {}\n\n",
        ctx.target.label,
        describe_archive(&comparison.target, ctx)
    ));

    match comparison.availability {
        ArchiveAvailability::NeitherProduced => {
            out.push_str("Neither build produced this archive.\n\n");
            return;
        }
        ArchiveAvailability::OnlySourceProduced => {
            out.push_str(&format!(
                "Only the {} produced this archive.\n\n",
                ctx.source.label
            ));
            return;
        }
        ArchiveAvailability::OnlyTargetProduced => {
            out.push_str(&format!(
                "Only the {} produced this archive.\n\n",
                ctx.target.label
            ));
            return;
        }
        ArchiveAvailability::BothProduced => {}
    }

    match comparison.basis {
        ComparisonBasis::ArchiveDigest => {
            out.push_str(if comparison.classification.is_equal() {
                "Entry listings were unavailable; the archive files have the same digest.\n\n"
            } else {
                "Entry listings were unavailable; the archive files differ.\n\n"
            });
        }
        ComparisonBasis::Availability => {}
        ComparisonBasis::Entries => {
            if comparison.entries.is_empty() {
                out.push_str(&format!(
                    "All {} entries are identical.\n\n",
                    comparison.unchanged_entries
                ));
                return;
            }
            out.push_str(&format!(
                "{} added, {} removed, {} changed, {} unchanged.\n\n",
                comparison.with_change(EntryChange::Added).count(),
                comparison.with_change(EntryChange::Removed).count(),
                comparison.with_change(EntryChange::Changed).count(),
                comparison.unchanged_entries
            ));
            out.push_str(&format!(
                "| Entry | Change | {} | {} |\n",
                ctx.source.label, ctx.target.label
            ));
            out.push_str("|---|---|---|---|\n");
            for diff in &comparison.entries {
                out.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    code(&cell(&diff.path)),
                    change_label(diff.change),
                    describe_entry(diff.source.as_ref()),
                    describe_entry(diff.target.as_ref()),
                ));
            }
            out.push('\n');
        }
    }
}

fn change_label(change: EntryChange) -> &'static str {
    match change {
        EntryChange::Added => "added",
        EntryChange::Removed => "removed",
        EntryChange::Changed => "changed",
    }
}

fn describe_archive(archive: &ArchiveOutcome, ctx: &RenderContext) -> String {
    match &archive.file {
        Some(file) => format!(
            "[{}]({}) ({} bytes, sha256 {})",
            cell(&file.relative_path),
            ctx.file_link(&file.relative_path),
            file.size,
            code(short(&file.digest))
        ),
        None if archive.entries.is_some() => "listing only".to_string(),
        None => "not produced".to_string(),
    }
}

fn describe_entry(entry: Option<&ArchiveEntry>) -> String {
    match entry {
        None => "-".to_string(),
        Some(e) if e.directory => "directory".to_string(),
        Some(e) if e.content_digest.is_empty() => format!("{} bytes", e.size),
        Some(e) => format!("{} bytes, {}", e.size, code(short(&e.content_digest))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_archives;
    use crate::errors::ExErrorKind;
    use crate::outcome::{StoredFile, UnknownOutcome};
    use crate::render::BuildDescriptor;
    use buildcmp_core_types::RunId;

    fn ctx() -> RenderContext {
        RenderContext::new(
            RunId::from_string("run-1".to_string()),
            BuildDescriptor::new("Source Build"),
            BuildDescriptor::new("Target Build"),
        )
    }

    fn render(source: ArchiveOutcome, target: ArchiveOutcome) -> String {
        let comparison = compare_archives(&source, &target).unwrap();
        let entry = ComparisonEntry::Compared {
            comparison: OutcomeComparison::Archive(comparison),
        };
        let mut out = String::new();
        ArchiveSectionRenderer.render(&entry, &ctx(), &mut out).unwrap();
        out
    }

    #[test]
    fn test_equal_archive_section() {
        let entries = vec![ArchiveEntry::file("a.txt", 1, "d-a")];
        let out = render(
            ArchiveOutcome::new("app.zip", ":zip", "zip").with_entries(entries.clone()),
            ArchiveOutcome::new("app.zip", ":zip", "zip").with_entries(entries),
        );
        assert!(out.starts_with("## Archive: `app.zip`\n"));
        assert!(out.contains("- **Result**: Equal"));
        assert!(out.contains("All 1 entries are identical."));
    }

    #[test]
    fn test_different_archive_lists_entries() {
        let out = render(
            ArchiveOutcome::new("app.zip", ":zip", "zip")
                .with_entries(vec![ArchiveEntry::file("b.txt", 2, "d-b")]),
            ArchiveOutcome::new("app.zip", ":zip", "zip")
                .with_entries(vec![ArchiveEntry::file("c.txt", 2, "d-c")]),
        );
        assert!(out.contains("- **Result**: Different"));
        assert!(out.contains("1 added, 1 removed, 0 changed, 0 unchanged."));
        assert!(out.contains("| `b.txt` | removed | 2 bytes, `d-b` | - |"));
        assert!(out.contains("| `c.txt` | added | - | 2 bytes, `d-c` |"));
    }

    #[test]
    fn test_awkward_name_keeps_heading_intact() {
        let name = "dist/app``\n## v2.zip";
        let out = render(
            ArchiveOutcome::new(name, ":zip", "zip").with_entries(Vec::new()),
            ArchiveOutcome::new(name, ":zip", "zip").with_entries(Vec::new()),
        );
        let heading = out.lines().next().unwrap();
        assert_eq!(heading, "## Archive: ``` dist/app`` ## v2.zip ```");
        assert!(!out.lines().any(|line| line == "## v2.zip"));
    }

    #[test]
    fn test_stored_file_is_linked() {
        let file = StoredFile {
            relative_path: "source/ab/abcdef.zip".to_string(),
            digest: "abcdef".to_string(),
            size: 3,
        };
        let out = render(
            ArchiveOutcome::new("app.zip", ":zip", "zip").with_file(file),
            ArchiveOutcome::new("app.zip", ":zip", "zip"),
        );
        assert!(out.contains("[source/ab/abcdef.zip](files/source/ab/abcdef.zip)"));
        assert!(out.contains("Only the Source Build produced this archive."));
    }

    #[test]
    fn test_wrong_entry_is_render_error() {
        let entry = ComparisonEntry::SourceOnly {
            outcome: UnknownOutcome::new("x", ":x", "?").into(),
        };
        let mut out = String::new();
        let err = ArchiveSectionRenderer
            .render(&entry, &ctx(), &mut out)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::RenderFailed);
        assert!(out.is_empty());
    }
}
