//! Outcome extraction
//!
//! Transforms a [`ProjectOutcomes`] model into an [`OutcomeSet`], copying
//! produced archives into the outcome file store.

use crate::errors::Result;
use crate::filestore::OutcomeFileStore;
use crate::model::{FileOutcome, ProjectOutcomes};
use buildcmp_core::outcome::{ArchiveOutcome, Outcome, OutcomeSet, UnknownOutcome};
use buildcmp_core::{log_op_end, log_op_error, log_op_start};
use std::path::{Component, Path};
use std::time::Instant;

/// Type identifiers treated as archives, with their archive kind
const ARCHIVE_TYPES: &[(&str, &str)] = &[
    ("artifact.type.zip", "zip"),
    ("artifact.type.jar", "jar"),
    ("artifact.type.war", "war"),
    ("artifact.type.ear", "ear"),
    ("artifact.type.tar", "tar"),
];

/// Archive kind for a type identifier, if it names an archive
pub fn archive_kind(type_identifier: &str) -> Option<&'static str> {
    ARCHIVE_TYPES
        .iter()
        .find(|(id, _)| *id == type_identifier)
        .map(|(_, kind)| *kind)
}

/// Builds one side's outcome set from its project model.
#[derive(Debug)]
pub struct OutcomeSetTransformer<'a> {
    store: &'a OutcomeFileStore,
    namespace: String,
}

impl<'a> OutcomeSetTransformer<'a> {
    /// `namespace` names the side ("source" or "target") and is the file
    /// store namespace its archives are copied into.
    pub fn new(store: &'a OutcomeFileStore, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Transform the model rooted at `root`, walking child projects.
    ///
    /// # Errors
    ///
    /// - `DuplicateOutcome` if two file outcomes resolve to the same name and kind
    /// - `Io` / `FileStoreCollision` if a produced archive cannot be stored
    pub fn transform(&self, root: &ProjectOutcomes) -> Result<OutcomeSet> {
        let start = Instant::now();
        log_op_start!("extract_outcomes", side = self.namespace.as_str());

        let result = self.collect(root).and_then(|outcomes| {
            OutcomeSet::new(&self.namespace, outcomes).map_err(Into::into)
        });

        match result {
            Ok(set) => {
                log_op_end!(
                    "extract_outcomes",
                    duration_ms = start.elapsed().as_millis() as u64,
                    side = self.namespace.as_str(),
                    outcomes = set.len()
                );
                Ok(set)
            }
            Err(err) => {
                log_op_error!(
                    "extract_outcomes",
                    &err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn collect(&self, root: &ProjectOutcomes) -> Result<Vec<Outcome>> {
        let root_dir = root.project_dir.as_path();
        let mut outcomes = Vec::new();
        for project in root.walk() {
            for file_outcome in &project.file_outcomes {
                outcomes.push(self.transform_file(root_dir, file_outcome)?);
            }
        }
        Ok(outcomes)
    }

    fn transform_file(&self, root_dir: &Path, file_outcome: &FileOutcome) -> Result<Outcome> {
        let absolute = if file_outcome.file.is_absolute() {
            file_outcome.file.clone()
        } else {
            root_dir.join(&file_outcome.file)
        };
        let name = relative_name(root_dir, &absolute);

        let Some(kind) = archive_kind(&file_outcome.type_identifier) else {
            return Ok(UnknownOutcome::new(
                name,
                file_outcome.task_path.clone(),
                format!(
                    "Outcome of type '{}' produced by task {}",
                    file_outcome.type_identifier, file_outcome.task_path
                ),
            )
            .into());
        };

        let mut archive = ArchiveOutcome::new(name, file_outcome.task_path.clone(), kind);
        if absolute.is_file() {
            archive = archive.with_file(self.store.store_file(&self.namespace, &absolute)?);
        } else {
            tracing::debug!(
                file = %absolute.display(),
                task_path = file_outcome.task_path.as_str(),
                "archive file not present"
            );
        }
        if let Some(entries) = &file_outcome.archive_entries {
            archive = archive.with_entries(entries.clone());
        }
        Ok(archive.into())
    }
}

/// Path of `file` relative to `root_dir` with `/` separators, or the full
/// path when the file lies outside the root directory
fn relative_name(root_dir: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root_dir).unwrap_or(file);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
