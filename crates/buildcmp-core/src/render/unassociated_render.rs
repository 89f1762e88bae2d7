//! Section renderer for outcomes only one build produced.

use crate::compare::ComparisonEntry;
use crate::errors::Result;
use crate::outcome::Outcome;
use crate::render::context::RenderContext;
use crate::render::registry::{unexpected_entry, SectionKind, SectionRenderer};
use crate::render::{cell, code};

/// Renders both source-only and target-only entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnassociatedSectionRenderer;

impl SectionRenderer for UnassociatedSectionRenderer {
    fn sections(&self) -> Vec<SectionKind> {
        vec![SectionKind::SourceOnly, SectionKind::TargetOnly]
    }

    fn render(&self, entry: &ComparisonEntry, ctx: &RenderContext, out: &mut String) -> Result<()> {
        let (outcome, present, absent) = match entry {
            ComparisonEntry::SourceOnly { outcome } => {
                (outcome, &ctx.source.label, &ctx.target.label)
            }
            ComparisonEntry::TargetOnly { outcome } => {
                (outcome, &ctx.target.label, &ctx.source.label)
            }
            other => return Err(unexpected_entry("render_unassociated_section", other)),
        };

        out.push_str(&format!(
            "## Unmatched {}: {}\n\n",
            outcome.kind(),
            code(outcome.name())
        ));
        out.push_str("- **Result**: Different\n");
        out.push_str(&format!("- **Task**: {}\n", code(outcome.task_path())));
        if let Outcome::Unknown(unknown) = outcome {
            out.push_str(&format!("- **Description**: {}\n", cell(&unknown.description)));
        }
        out.push_str(&format!(
            "\nOnly produced by the {}; the {} has no matching outcome.\n\n",
            present, absent
        ));
        Ok(())
    }
}
