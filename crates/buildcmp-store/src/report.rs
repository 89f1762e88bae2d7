//! Report persistence
//!
//! Lays out a finished comparison on disk:
//!
//! ```text
//! <report_dir>/
//!   index.md       rendered report
//!   result.json    serialized comparison result
//!   files/         outcome file store, linked from index.md
//! ```

use crate::errors::{io_error, Result};
use crate::filestore::{atomic_write, OutcomeFileStore};
use buildcmp_core::BuildComparisonResult;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "index.md";
pub const RESULT_FILE_NAME: &str = "result.json";
/// Directory under the report directory holding stored outcome files; also
/// the link prefix used in the report
pub const FILES_DIR_NAME: &str = "files";

/// Paths of a written report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    pub report_dir: PathBuf,
    pub index: PathBuf,
    pub result_json: PathBuf,
    pub files: PathBuf,
}

/// Writes a rendered report and its supporting files.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    report_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(report_dir: impl Into<PathBuf>) -> Self {
        Self {
            report_dir: report_dir.into(),
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Empty the report directory, creating it if needed
    ///
    /// # Errors
    ///
    /// `Io` if the directory cannot be cleared or created.
    pub fn prepare(&self) -> Result<()> {
        if self.report_dir.exists() {
            fs::remove_dir_all(&self.report_dir).map_err(|e| io_error("clear_report_dir", e))?;
        }
        fs::create_dir_all(&self.report_dir).map_err(|e| io_error("create_report_dir", e))
    }

    /// Sibling of the report directory holding the file store while the
    /// report directory is cleared
    fn staging_dir(&self) -> PathBuf {
        let name = self
            .report_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());
        let parent = self.report_dir.parent().unwrap_or_else(|| Path::new(""));
        parent.join(format!(".{}.{}-staging", name, FILES_DIR_NAME))
    }

    /// Replace the report directory's content with `document`, `result`, and
    /// the file store.
    ///
    /// The store is staged outside the report directory before it is
    /// cleared, so a store located under the report directory survives.
    /// `document` is written to `index.md` in a single write.
    ///
    /// # Errors
    ///
    /// `Serialization` if the result cannot be serialized, `FileStoreMissing`
    /// if the store lost its files, `Io` on any filesystem failure.
    pub fn write(
        &self,
        store: OutcomeFileStore,
        document: &[u8],
        result: &BuildComparisonResult,
    ) -> Result<ReportLocation> {
        let result_json = serde_json::to_vec_pretty(result)?;

        let staged = store.move_to(self.staging_dir())?;
        if let Err(err) = self.prepare() {
            if let Err(cleanup) = staged.discard() {
                tracing::warn!(error = %cleanup, "failed to discard staged file store");
            }
            return Err(err);
        }
        let files = self.report_dir.join(FILES_DIR_NAME);
        staged.move_to(&files)?;

        let index = self.report_dir.join(REPORT_FILE_NAME);
        atomic_write(&index, document)?;
        let result_path = self.report_dir.join(RESULT_FILE_NAME);
        atomic_write(&result_path, &result_json)?;

        tracing::info!(
            report = %index.display(),
            builds_are_identical = result.builds_are_identical(),
            "report written"
        );

        Ok(ReportLocation {
            report_dir: self.report_dir.clone(),
            index,
            result_json: result_path,
            files,
        })
    }
}
