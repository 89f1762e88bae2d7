//! One comparison run.
//!
//! A run moves through `Initialized -> Associating -> Comparing -> Rendering
//! -> Done`. Any error moves it to `Failed`. Both terminal states are final;
//! a new comparison needs a new run.

use crate::compare::BuildComparisonResult;
use crate::errors::{ExError, ExErrorKind, Result, Stage};
use crate::orchestrator::BuildComparator;
use crate::outcome::OutcomeSet;
use crate::render::{RenderContext, ReportAssembler};
use crate::{log_op_end, log_op_error, log_op_start};
use buildcmp_core_types::schema::EVENT_TRANSITION;
use buildcmp_core_types::RunId;
use std::io::Write;
use std::time::Instant;

/// Lifecycle state of a [`ComparisonRun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Associating,
    Comparing,
    Rendering,
    Done,
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Initialized => "initialized",
            RunState::Associating => "associating",
            RunState::Comparing => "comparing",
            RunState::Rendering => "rendering",
            RunState::Done => "done",
            RunState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-use driver for association, comparison, and rendering.
#[derive(Debug)]
pub struct ComparisonRun<'a> {
    comparator: &'a BuildComparator,
    assembler: &'a ReportAssembler,
    ctx: RenderContext,
    state: RunState,
}

impl<'a> ComparisonRun<'a> {
    /// Create a run. The run id is taken from `ctx`.
    pub fn new(
        comparator: &'a BuildComparator,
        assembler: &'a ReportAssembler,
        ctx: RenderContext,
    ) -> Self {
        Self {
            comparator,
            assembler,
            ctx,
            state: RunState::Initialized,
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.ctx.run_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    fn transition(&mut self, to: RunState) {
        tracing::debug!(
            component = module_path!(),
            op = "comparison_run",
            event = EVENT_TRANSITION,
            run_id = self.ctx.run_id.as_str(),
            from = self.state.as_str(),
            to = to.as_str(),
        );
        self.state = to;
    }

    /// Associate, compare, and render `source` against `target`, writing the
    /// report to `sink`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the run was already executed
    /// - the first association, comparison, or rendering error, tagged with
    ///   the run id. The sink receives nothing in that case.
    pub fn execute<W: Write>(
        &mut self,
        source: &OutcomeSet,
        target: &OutcomeSet,
        sink: &mut W,
    ) -> Result<BuildComparisonResult> {
        if self.state != RunState::Initialized {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("comparison_run")
                .with_run_id(self.ctx.run_id.clone())
                .with_message(format!(
                    "Run is already {}; start a new run to compare again",
                    self.state
                )));
        }

        let start = Instant::now();
        log_op_start!(
            "comparison_run",
            run_id = self.ctx.run_id.as_str(),
            source_len = source.len(),
            target_len = target.len()
        );

        match self.drive(source, target, sink) {
            Ok(result) => {
                self.transition(RunState::Done);
                log_op_end!(
                    "comparison_run",
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = self.ctx.run_id.as_str(),
                    builds_are_identical = result.builds_are_identical()
                );
                Ok(result)
            }
            Err(err) => {
                let stage = match self.state {
                    RunState::Associating => Some(Stage::Association),
                    RunState::Comparing => Some(Stage::Comparison),
                    RunState::Rendering => Some(Stage::Rendering),
                    _ => None,
                };
                let err = match stage {
                    Some(stage) => err.or_stage(stage),
                    None => err,
                }
                .with_run_id(self.ctx.run_id.clone());
                self.transition(RunState::Failed);
                log_op_error!(
                    "comparison_run",
                    &err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn drive<W: Write>(
        &mut self,
        source: &OutcomeSet,
        target: &OutcomeSet,
        sink: &mut W,
    ) -> Result<BuildComparisonResult> {
        self.transition(RunState::Associating);
        let spec = self.comparator.associate(source, target);

        self.transition(RunState::Comparing);
        let result = self.comparator.compare_spec(spec)?;

        self.transition(RunState::Rendering);
        self.assembler.render(&result, &self.ctx, sink)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{ArchiveEntry, ArchiveOutcome};
    use crate::render::BuildDescriptor;
    use crate::standard::{standard_build_comparator, standard_report_assembler};

    fn ctx(run_id: &str) -> RenderContext {
        RenderContext::new(
            RunId::from_string(run_id.to_string()),
            BuildDescriptor::new("Source Build"),
            BuildDescriptor::new("Target Build"),
        )
    }

    #[test]
    fn test_successful_run_ends_done() {
        let comparator = standard_build_comparator().unwrap();
        let assembler = standard_report_assembler("Build Comparison").unwrap();
        let set = OutcomeSet::new(
            "source",
            vec![ArchiveOutcome::new("app.zip", ":zip", "zip").into()],
        )
        .unwrap();
        let mut run = ComparisonRun::new(&comparator, &assembler, ctx("run-ok"));
        let mut sink: Vec<u8> = Vec::new();

        let result = run.execute(&set, &set, &mut sink).unwrap();

        assert!(result.builds_are_identical());
        assert_eq!(run.state(), RunState::Done);
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_run_cannot_be_reused() {
        let comparator = standard_build_comparator().unwrap();
        let assembler = standard_report_assembler("Build Comparison").unwrap();
        let mut run = ComparisonRun::new(&comparator, &assembler, ctx("run-reuse"));
        let mut sink: Vec<u8> = Vec::new();
        run.execute(&OutcomeSet::empty(), &OutcomeSet::empty(), &mut sink)
            .unwrap();

        let err = run
            .execute(&OutcomeSet::empty(), &OutcomeSet::empty(), &mut sink)
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(run.state(), RunState::Done);
    }

    #[test]
    fn test_comparator_failure_ends_run_without_report() {
        let comparator = standard_build_comparator().unwrap();
        let assembler = standard_report_assembler("Build Comparison").unwrap();
        let broken = OutcomeSet::new(
            "source",
            vec![ArchiveOutcome::new("build/libs/app.zip", ":zip", "zip")
                .with_entries(vec![
                    ArchiveEntry::file("a.txt", 1, "d-a"),
                    ArchiveEntry::file("a.txt", 1, "d-a"),
                ])
                .into()],
        )
        .unwrap();
        let target = OutcomeSet::new(
            "target",
            vec![ArchiveOutcome::new("build/libs/app.zip", ":zip", "zip")
                .with_entries(vec![ArchiveEntry::file("a.txt", 1, "d-a")])
                .into()],
        )
        .unwrap();
        let mut run = ComparisonRun::new(&comparator, &assembler, ctx("run-broken"));
        let mut sink: Vec<u8> = Vec::new();

        let err = run.execute(&broken, &target, &mut sink).unwrap_err();

        assert_eq!(err.code(), "ERR_COMPARISON_FAILED");
        assert_eq!(err.stage(), Some(Stage::Comparison));
        assert_eq!(err.outcome_kind(), Some("archive"));
        assert_eq!(err.outcome_name(), Some("build/libs/app.zip"));
        assert_eq!(err.run_id().map(|id| id.as_str()), Some("run-broken"));
        assert_eq!(run.state(), RunState::Failed);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunState::Done.is_terminal());
        assert!(RunState::Failed.is_terminal());
        assert!(!RunState::Comparing.is_terminal());
    }
}
