//! Compare-builds front end
//!
//! Ties the pieces together for one comparison: version gate, build
//! execution, outcome extraction, comparison, rendering, and report writing.

use crate::archive_content::stored_build_comparator;
use crate::config::{BuildInvocationSpec, ComparisonConfig};
use crate::errors::Result;
use crate::execution::{BuildExecutor, OUTCOME_MODEL_MINIMUM_VERSION};
use crate::extraction::OutcomeSetTransformer;
use crate::filestore::OutcomeFileStore;
use crate::report::{ReportLocation, ReportWriter, FILES_DIR_NAME};
use buildcmp_core::errors::{ExError, ExErrorKind};
use buildcmp_core::outcome::OutcomeSet;
use buildcmp_core::render::{BuildDescriptor, RenderContext};
use buildcmp_core::standard::{standard_report_assembler, DEFAULT_REPORT_TITLE};
use buildcmp_core::{BuildComparator, BuildComparisonResult, ComparisonRun, ReportAssembler};
use buildcmp_core::{log_op_end, log_op_error, log_op_start};
use buildcmp_core_types::RunId;
use std::path::PathBuf;
use std::time::Instant;

pub const SOURCE_LABEL: &str = "Source Build";
pub const TARGET_LABEL: &str = "Target Build";
const SOURCE_NAMESPACE: &str = "source";
const TARGET_NAMESPACE: &str = "target";

/// What a successful comparison produced.
#[derive(Debug, Clone)]
pub struct CompareBuildsOutcome {
    pub run_id: RunId,
    pub result: BuildComparisonResult,
    pub report: ReportLocation,
    /// Warnings raised along the way, also logged
    pub warnings: Vec<String>,
}

/// Compares two builds end to end.
pub struct CompareBuilds<E: BuildExecutor> {
    executor: E,
    /// Fixed comparator; when unset each run uses the standard comparators
    /// reading archive listings from its own file store
    comparator: Option<BuildComparator>,
    assembler: ReportAssembler,
    scratch_dir: PathBuf,
}

impl<E: BuildExecutor> CompareBuilds<E> {
    /// Front end with the standard comparators and renderers. Scratch files
    /// go under the system temp directory.
    ///
    /// # Errors
    ///
    /// `DuplicateRegistration` if the standard registries are inconsistent.
    pub fn new(executor: E) -> Result<Self> {
        Ok(Self {
            executor,
            comparator: None,
            assembler: standard_report_assembler(DEFAULT_REPORT_TITLE)?,
            scratch_dir: std::env::temp_dir(),
        })
    }

    pub fn with_parts(
        executor: E,
        comparator: BuildComparator,
        assembler: ReportAssembler,
    ) -> Self {
        Self {
            executor,
            comparator: Some(comparator),
            assembler,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Directory holding the temporary file store until the report is written
    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// Run the comparison described by `config`.
    ///
    /// `generated_at` is stamped into the report head.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` / `InvalidVersion` for a bad configuration
    /// - `NoOutcomeModel` if neither tool version can produce an outcome model
    /// - any execution, extraction, comparison, rendering, or IO error; the
    ///   report directory is left untouched in that case
    pub fn execute(
        &self,
        config: &ComparisonConfig,
        generated_at: &str,
    ) -> Result<CompareBuildsOutcome> {
        let run_id = RunId::new();
        let start = Instant::now();
        log_op_start!("compare_builds", run_id = run_id.as_str());

        let store = OutcomeFileStore::new(
            self.scratch_dir
                .join(format!("buildcmp-filestore-{}", run_id)),
        );
        let result = self.execute_with_store(config, generated_at, &run_id, store.clone());

        match result {
            Ok(outcome) => {
                log_op_end!(
                    "compare_builds",
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = run_id.as_str(),
                    builds_are_identical = outcome.result.builds_are_identical()
                );
                Ok(outcome)
            }
            Err(err) => {
                if let Err(cleanup) = store.discard() {
                    tracing::warn!(error = %cleanup, "failed to discard temporary file store");
                }
                let err = err.with_run_id(run_id.clone());
                log_op_error!(
                    "compare_builds",
                    &err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn execute_with_store(
        &self,
        config: &ComparisonConfig,
        generated_at: &str,
        run_id: &RunId,
        store: OutcomeFileStore,
    ) -> Result<CompareBuildsOutcome> {
        config.validate()?;
        let mut warnings = Vec::new();

        if config.source.same_invocation(&config.target) {
            let warning =
                "The source build and target build are identical; the comparison is unlikely to find differences"
                    .to_string();
            tracing::warn!(run_id = run_id.as_str(), "{}", warning);
            warnings.push(warning);
        }

        let source_capable = config.source.version()?.can_produce_outcome_model();
        let target_capable = config.target.version()?.can_produce_outcome_model();

        if !source_capable && !target_capable {
            return Err(ExError::new(ExErrorKind::NoOutcomeModel)
                .with_op("compare_builds")
                .with_version(OUTCOME_MODEL_MINIMUM_VERSION)
                .with_message(format!(
                    "Builds must be executed with tool version {} or newer (source is {}, target is {})",
                    OUTCOME_MODEL_MINIMUM_VERSION,
                    config.source.tool_version,
                    config.target.tool_version
                )));
        }

        let source = self.outcomes_for(
            &config.source,
            SOURCE_LABEL,
            SOURCE_NAMESPACE,
            source_capable,
            &store,
            run_id,
            &mut warnings,
        )?;
        let target = self.outcomes_for(
            &config.target,
            TARGET_LABEL,
            TARGET_NAMESPACE,
            target_capable,
            &store,
            run_id,
            &mut warnings,
        )?;

        let ctx = RenderContext::new(
            run_id.clone(),
            descriptor(SOURCE_LABEL, &config.source),
            descriptor(TARGET_LABEL, &config.target),
        )
        .with_generated_at(generated_at)
        .with_files_base(FILES_DIR_NAME);

        let run_comparator;
        let comparator = match &self.comparator {
            Some(comparator) => comparator,
            None => {
                run_comparator = stored_build_comparator(&store)?;
                &run_comparator
            }
        };

        let mut document: Vec<u8> = Vec::new();
        let result = ComparisonRun::new(comparator, &self.assembler, ctx).execute(
            &source,
            &target,
            &mut document,
        )?;

        let report = ReportWriter::new(&config.report_dir).write(store, &document, &result)?;

        Ok(CompareBuildsOutcome {
            run_id: run_id.clone(),
            result,
            report,
            warnings,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn outcomes_for(
        &self,
        spec: &BuildInvocationSpec,
        label: &str,
        namespace: &str,
        capable: bool,
        store: &OutcomeFileStore,
        run_id: &RunId,
        warnings: &mut Vec<String>,
    ) -> Result<OutcomeSet> {
        if !capable {
            let warning = format!(
                "The {} uses tool version {}, which cannot produce an outcome model (requires {} or newer); it is compared as producing no outcomes",
                label, spec.tool_version, OUTCOME_MODEL_MINIMUM_VERSION
            );
            tracing::warn!(run_id = run_id.as_str(), "{}", warning);
            warnings.push(warning);
            return Ok(OutcomeSet::empty());
        }

        let model = self.executor.execute(spec)?;
        OutcomeSetTransformer::new(store, namespace).transform(&model)
    }
}

fn descriptor(label: &str, spec: &BuildInvocationSpec) -> BuildDescriptor {
    let mut descriptor = BuildDescriptor::new(label);
    descriptor.project_dir = spec.project_dir.display().to_string();
    descriptor.tool_version = spec.tool_version.clone();
    descriptor.tasks = spec.tasks.clone();
    descriptor.arguments = spec.implied_arguments();
    descriptor
}

impl<E: BuildExecutor + std::fmt::Debug> std::fmt::Debug for CompareBuilds<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareBuilds")
            .field("executor", &self.executor)
            .field("comparator", &self.comparator)
            .field("assembler", &self.assembler)
            .field("scratch_dir", &self.scratch_dir)
            .finish()
    }
}
