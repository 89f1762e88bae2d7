//! Data shared by every renderer of one report.

use buildcmp_core_types::RunId;
use serde::Serialize;

/// Human-facing description of one of the two compared builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildDescriptor {
    /// Display label, e.g. "Source Build"
    pub label: String,
    pub project_dir: String,
    pub tool_version: String,
    pub tasks: Vec<String>,
    pub arguments: Vec<String>,
}

impl BuildDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            project_dir: String::new(),
            tool_version: String::new(),
            tasks: Vec::new(),
            arguments: Vec::new(),
        }
    }
}

/// Context passed to every part and section renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub run_id: RunId,
    /// Report timestamp, supplied by the caller so rendering stays pure
    pub generated_at: String,
    pub source: BuildDescriptor,
    pub target: BuildDescriptor,
    /// Link prefix for stored files, relative to the report document
    pub files_base: String,
}

impl RenderContext {
    pub fn new(run_id: RunId, source: BuildDescriptor, target: BuildDescriptor) -> Self {
        Self {
            run_id,
            generated_at: String::new(),
            source,
            target,
            files_base: "files".to_string(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = generated_at.into();
        self
    }

    pub fn with_files_base(mut self, files_base: impl Into<String>) -> Self {
        self.files_base = files_base.into();
        self
    }

    /// Relative link to a file in the outcome file store
    pub fn file_link(&self, relative_path: &str) -> String {
        if self.files_base.is_empty() {
            relative_path.to_string()
        } else {
            format!("{}/{}", self.files_base.trim_end_matches('/'), relative_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_link_joins_base() {
        let ctx = RenderContext::new(
            RunId::from_string("r".to_string()),
            BuildDescriptor::new("Source Build"),
            BuildDescriptor::new("Target Build"),
        );
        assert_eq!(ctx.file_link("source/ab/x.zip"), "files/source/ab/x.zip");
        let ctx = ctx.with_files_base("");
        assert_eq!(ctx.file_link("source/ab/x.zip"), "source/ab/x.zip");
    }
}
