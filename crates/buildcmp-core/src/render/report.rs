//! Report assembly.

use crate::compare::BuildComparisonResult;
use crate::errors::{ExError, ExErrorKind, Result, Stage};
use crate::render::context::RenderContext;
use crate::render::parts::PartRenderer;
use crate::render::registry::RendererRegistry;
use crate::{log_op_end, log_op_error, log_op_start};
use std::io::Write;
use std::time::Instant;

/// Assembles head, heading, and one section per result entry into a single
/// Markdown document.
pub struct ReportAssembler {
    renderers: RendererRegistry,
    head: Box<dyn PartRenderer>,
    heading: Box<dyn PartRenderer>,
}

impl ReportAssembler {
    pub fn new(
        renderers: RendererRegistry,
        head: impl PartRenderer + 'static,
        heading: impl PartRenderer + 'static,
    ) -> Self {
        Self {
            renderers,
            head: Box::new(head),
            heading: Box::new(heading),
        }
    }

    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    /// Render the full report into memory.
    ///
    /// # Errors
    ///
    /// `NoRenderer` if any entry's section has no renderer, or the first
    /// error raised by a part or section renderer. Nothing is returned in
    /// that case.
    pub fn render_to_string(
        &self,
        result: &BuildComparisonResult,
        ctx: &RenderContext,
    ) -> Result<String> {
        let mut out = String::new();
        self.head
            .render(result, ctx, &mut out)
            .map_err(|e| e.or_stage(Stage::Rendering))?;
        self.heading
            .render(result, ctx, &mut out)
            .map_err(|e| e.or_stage(Stage::Rendering))?;
        for entry in result.entries() {
            self.renderers.render_entry(entry, ctx, &mut out)?;
        }
        Ok(out)
    }

    /// Render the full report and write it to `sink` in one write.
    ///
    /// The sink receives nothing unless every section rendered.
    ///
    /// # Errors
    ///
    /// See [`render_to_string`](Self::render_to_string); `Io` if the sink
    /// rejects the write.
    pub fn render<W: Write>(
        &self,
        result: &BuildComparisonResult,
        ctx: &RenderContext,
        sink: &mut W,
    ) -> Result<()> {
        let start = Instant::now();
        log_op_start!(
            "render_report",
            run_id = ctx.run_id.as_str(),
            entries = result.len()
        );

        let written = self.render_to_string(result, ctx).and_then(|document| {
            sink.write_all(document.as_bytes())
                .and_then(|_| sink.flush())
                .map_err(|e| {
                    ExError::new(ExErrorKind::Io)
                        .with_op("render_report")
                        .with_stage(Stage::Rendering)
                        .with_message(format!("Failed to write report: {}", e))
                })
                .map(|_| document.len())
        });

        match written {
            Ok(bytes) => {
                log_op_end!(
                    "render_report",
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = ctx.run_id.as_str(),
                    bytes = bytes
                );
                Ok(())
            }
            Err(err) => {
                log_op_error!(
                    "render_report",
                    &err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for ReportAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportAssembler")
            .field("renderers", &self.renderers)
            .finish_non_exhaustive()
    }
}
