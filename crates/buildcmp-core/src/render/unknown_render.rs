//! Section renderer for compared outcomes of unknown kind.

use crate::compare::{ComparisonEntry, OutcomeComparison};
use crate::errors::Result;
use crate::render::context::RenderContext;
use crate::render::registry::{unexpected_entry, SectionKind, SectionRenderer};
use crate::render::{cell, code};

#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownSectionRenderer;

impl SectionRenderer for UnknownSectionRenderer {
    fn sections(&self) -> Vec<SectionKind> {
        vec![SectionKind::Unknown]
    }

    fn render(&self, entry: &ComparisonEntry, ctx: &RenderContext, out: &mut String) -> Result<()> {
        let comparison = match entry {
            ComparisonEntry::Compared {
                comparison: OutcomeComparison::Unknown(comparison),
            } => comparison,
            other => return Err(unexpected_entry("render_unknown_section", other)),
        };

        out.push_str(&format!(
            "## Unknown outcome: {}\n\n",
            code(&comparison.source.name)
        ));
        out.push_str("- **Result**: Different\n");
        out.push_str(&format!(
            "- **{}**: {} from {}\n",
            ctx.source.label,
            cell(&comparison.source.description),
            code(&comparison.source.task_path)
        ));
        out.push_str(&format!(
            "- **{}**: {} from {}\n\n",
            ctx.target.label,
            cell(&comparison.target.description),
            code(&comparison.target.task_path)
        ));
        out.push_str(&format!("{}\n\n", comparison.reason));
        Ok(())
    }
}
