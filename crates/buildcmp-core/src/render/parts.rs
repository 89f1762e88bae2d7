//! Document-level renderers that sit outside the section registry.

use crate::compare::BuildComparisonResult;
use crate::errors::Result;
use crate::render::context::{BuildDescriptor, RenderContext};
use crate::render::{cell, code};

/// Renders a document-level part (head or heading) of the report.
pub trait PartRenderer: Send + Sync {
    /// Append the part to `out`.
    ///
    /// # Errors
    ///
    /// `RenderFailed` if the part cannot be produced.
    fn render(
        &self,
        result: &BuildComparisonResult,
        ctx: &RenderContext,
        out: &mut String,
    ) -> Result<()>;
}

/// Metadata block at the very top of the report.
#[derive(Debug, Clone)]
pub struct HeadRenderer {
    title: String,
    charset: String,
}

impl HeadRenderer {
    pub fn new(title: impl Into<String>, charset: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            charset: charset.into(),
        }
    }
}

impl PartRenderer for HeadRenderer {
    fn render(
        &self,
        _result: &BuildComparisonResult,
        ctx: &RenderContext,
        out: &mut String,
    ) -> Result<()> {
        out.push_str("---\n");
        out.push_str(&format!("title: \"{}\"\n", self.title.replace('"', "'")));
        out.push_str(&format!("charset: {}\n", self.charset));
        out.push_str(&format!(
            "generator: buildcmp {}\n",
            env!("CARGO_PKG_VERSION")
        ));
        out.push_str(&format!("run_id: {}\n", ctx.run_id));
        if !ctx.generated_at.is_empty() {
            out.push_str(&format!("generated_at: {}\n", ctx.generated_at));
        }
        out.push_str("---\n\n");
        Ok(())
    }
}

/// Heading naming both builds and summarizing the verdict.
#[derive(Debug, Clone)]
pub struct ComparisonHeadingRenderer {
    title: String,
}

impl ComparisonHeadingRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

fn build_row(build: &BuildDescriptor) -> String {
    let or_default = |s: &str| {
        if s.is_empty() {
            "-".to_string()
        } else {
            code(&cell(s))
        }
    };
    let list = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items
                .iter()
                .map(|i| code(&cell(i)))
                .collect::<Vec<_>>()
                .join(" ")
        }
    };
    format!(
        "| {} | {} | {} | {} | {} |\n",
        cell(&build.label),
        or_default(&build.project_dir),
        or_default(&build.tool_version),
        list(&build.tasks),
        list(&build.arguments),
    )
}

impl PartRenderer for ComparisonHeadingRenderer {
    fn render(
        &self,
        result: &BuildComparisonResult,
        ctx: &RenderContext,
        out: &mut String,
    ) -> Result<()> {
        out.push_str(&format!("# {}\n\n", self.title));

        out.push_str("| Build | Project | Version | Tasks | Arguments |\n");
        out.push_str("|---|---|---|---|---|\n");
        out.push_str(&build_row(&ctx.source));
        out.push_str(&build_row(&ctx.target));
        out.push('\n');

        if result.builds_are_identical() {
            out.push_str(&format!(
                "**Verdict**: Identical ({} outcomes compared)\n\n",
                result.len()
            ));
        } else {
            out.push_str(&format!(
                "**Verdict**: Different ({} of {} outcomes differ; {} only in {}, {} only in {})\n\n",
                result.difference_count(),
                result.len(),
                result.source_only_count(),
                ctx.source.label,
                result.target_only_count(),
                ctx.target.label,
            ));
        }
        if result.is_empty() {
            out.push_str("_Neither build produced any outcomes._\n\n");
        }
        Ok(())
    }
}
