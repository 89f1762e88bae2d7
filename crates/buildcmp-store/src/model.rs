//! Project outcomes model
//!
//! JSON description of what a build produced: one node per project, each
//! with its file outcomes and child projects.

use crate::errors::{model_invalid, Result};
use buildcmp_core::outcome::ArchiveEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcomes of one project and, recursively, of its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOutcomes {
    /// Logical project path, ":" for the root project
    pub project_path: String,
    /// Project directory; relative paths resolve against the model file
    #[serde(default)]
    pub project_dir: PathBuf,
    #[serde(default)]
    pub file_outcomes: Vec<FileOutcome>,
    #[serde(default)]
    pub children: Vec<ProjectOutcomes>,
}

/// One file produced by a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path of the producing task, e.g. ":app:distZip"
    pub task_path: String,
    /// Type of the produced file, e.g. "artifact.type.zip"
    pub type_identifier: String,
    /// Location of the produced file; relative paths resolve against the
    /// root project directory
    pub file: PathBuf,
    /// Entry listing of the archive, when the build recorded one
    #[serde(default)]
    pub archive_entries: Option<Vec<ArchiveEntry>>,
}

impl ProjectOutcomes {
    /// Depth-first iteration over this project and all descendants
    pub fn walk(&self) -> Vec<&ProjectOutcomes> {
        let mut projects = vec![self];
        for child in &self.children {
            projects.extend(child.walk());
        }
        projects
    }
}

/// Parse a project outcomes model from a file
///
/// A relative root `project_dir` is resolved against the file's directory;
/// an absent one is left empty for the caller to fill in.
///
/// # Errors
///
/// `InvalidModel` if the file cannot be read, parsed, or validated.
pub fn parse_model_file(path: &Path) -> Result<ProjectOutcomes> {
    let content = fs::read_to_string(path).map_err(|e| {
        model_invalid(&format!(
            "Failed to read outcome model {}: {}",
            path.display(),
            e
        ))
    })?;
    let mut model = parse_model_str(&content)?;
    if !model.project_dir.as_os_str().is_empty() && model.project_dir.is_relative() {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        model.project_dir = base.join(&model.project_dir);
    }
    Ok(model)
}

/// Parse a project outcomes model from a string
///
/// # Errors
///
/// `InvalidModel` on malformed JSON, an empty or duplicate project path,
/// or a file outcome without task path or file.
pub fn parse_model_str(content: &str) -> Result<ProjectOutcomes> {
    let model: ProjectOutcomes = serde_json::from_str(content)
        .map_err(|e| model_invalid(&format!("JSON parse error: {}", e)))?;

    validate_model(&model)?;

    Ok(model)
}

fn validate_model(model: &ProjectOutcomes) -> Result<()> {
    let mut project_paths = HashSet::new();
    for project in model.walk() {
        if project.project_path.is_empty() {
            return Err(model_invalid("Project with empty project_path"));
        }
        if !project_paths.insert(project.project_path.as_str()) {
            return Err(model_invalid(&format!(
                "Duplicate project path {}",
                project.project_path
            )));
        }
        for outcome in &project.file_outcomes {
            if outcome.task_path.is_empty() {
                return Err(model_invalid(&format!(
                    "File outcome {} in project {} has no task_path",
                    outcome.file.display(),
                    project.project_path
                )));
            }
            if outcome.file.as_os_str().is_empty() {
                return Err(model_invalid(&format!(
                    "File outcome of task {} has no file",
                    outcome.task_path
                )));
            }
        }
    }
    Ok(())
}
