//! Comparison configuration
//!
//! Describes the two build invocations and where the report goes. Loaded
//! from YAML and validated before any build is touched.

use crate::errors::{config_invalid, Result};
use crate::execution::ToolVersion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tasks run when an invocation names none
pub const DEFAULT_TASKS: &[&str] = &["clean", "assemble"];

/// Argument stopping the build tool from searching parent directories for
/// settings
pub const NO_SEARCH_UPWARD: &str = "--no-search-upward";
const NO_SEARCH_UPWARD_SHORT: &str = "-u";

fn default_tasks() -> Vec<String> {
    DEFAULT_TASKS.iter().map(|t| t.to_string()).collect()
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

/// One side of the comparison: how its build is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInvocationSpec {
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,
    #[serde(default = "default_tasks")]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Build tool version, e.g. "1.2" or "1.2-rc-1"
    pub tool_version: String,
    /// Project outcomes model left by a build that already ran
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl BuildInvocationSpec {
    pub fn new(project_dir: impl Into<PathBuf>, tool_version: impl Into<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            tasks: default_tasks(),
            arguments: Vec::new(),
            tool_version: tool_version.into(),
            model_path: None,
        }
    }

    /// Arguments the build actually receives: `--no-search-upward` is
    /// prepended unless the arguments already disable upward search.
    pub fn implied_arguments(&self) -> Vec<String> {
        let already_set = self
            .arguments
            .iter()
            .any(|a| a == NO_SEARCH_UPWARD || a == NO_SEARCH_UPWARD_SHORT);
        if already_set {
            return self.arguments.clone();
        }
        let mut arguments = Vec::with_capacity(self.arguments.len() + 1);
        arguments.push(NO_SEARCH_UPWARD.to_string());
        arguments.extend(self.arguments.iter().cloned());
        arguments
    }

    /// Parsed tool version
    ///
    /// # Errors
    ///
    /// `InvalidVersion` if `tool_version` does not parse.
    pub fn version(&self) -> Result<ToolVersion> {
        ToolVersion::parse(&self.tool_version)
    }

    /// True if both specs would run the same build
    pub fn same_invocation(&self, other: &BuildInvocationSpec) -> bool {
        self.project_dir == other.project_dir
            && self.tasks == other.tasks
            && self.implied_arguments() == other.implied_arguments()
            && self.tool_version == other.tool_version
    }
}

/// Complete configuration of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub source: BuildInvocationSpec,
    pub target: BuildInvocationSpec,
    pub report_dir: PathBuf,
}

impl ComparisonConfig {
    /// Validate the configuration
    ///
    /// Checks both tool versions parse, tasks are non-empty, and a report
    /// directory is named.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending side or field.
    pub fn validate(&self) -> Result<()> {
        for (label, spec) in [("source", &self.source), ("target", &self.target)] {
            if spec.tool_version.trim().is_empty() {
                return Err(config_invalid(&format!(
                    "The {} build has no tool_version",
                    label
                )));
            }
            spec.version().map_err(|e| {
                config_invalid(&format!(
                    "The {} build has an invalid tool_version: {}",
                    label,
                    e.message()
                ))
                .with_version(spec.tool_version.clone())
            })?;
            if spec.tasks.iter().any(|t| t.trim().is_empty()) {
                return Err(config_invalid(&format!(
                    "The {} build lists an empty task name",
                    label
                )));
            }
        }
        if self.report_dir.as_os_str().is_empty() {
            return Err(config_invalid("report_dir is required"));
        }
        Ok(())
    }
}

/// Parse a comparison config from a file
///
/// Relative paths in the config resolve against the file's directory.
///
/// # Errors
///
/// `InvalidConfig` if the file cannot be read, parsed, or validated.
pub fn parse_config_file(path: &Path) -> Result<ComparisonConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        config_invalid(&format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let mut config = parse_config_str(&content)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let resolve = |p: &mut PathBuf| {
        if p.is_relative() {
            *p = base.join(&*p);
        }
    };
    for spec in [&mut config.source, &mut config.target] {
        resolve(&mut spec.project_dir);
        if let Some(model_path) = spec.model_path.as_mut() {
            resolve(model_path);
        }
    }
    resolve(&mut config.report_dir);

    Ok(config)
}

/// Parse a comparison config from a string
///
/// # Errors
///
/// `InvalidConfig` on malformed YAML or failed validation.
pub fn parse_config_str(content: &str) -> Result<ComparisonConfig> {
    let config: ComparisonConfig = serde_yaml::from_str(content)
        .map_err(|e| config_invalid(&format!("YAML parse error: {}", e)))?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildcmp_core::errors::ExErrorKind;

    const CONFIG: &str = "
source:
  project_dir: app
  tool_version: '1.2'
  model_path: source.json
target:
  project_dir: app
  tool_version: 1.3-rc-1
  tasks: [build]
  arguments: [--offline]
report_dir: out/report
";

    #[test]
    fn test_defaults_applied() {
        let config = parse_config_str(CONFIG).unwrap();
        assert_eq!(config.source.tasks, vec!["clean", "assemble"]);
        assert_eq!(config.target.tasks, vec!["build"]);
        assert_eq!(config.target.model_path, None);
    }

    #[test]
    fn test_implied_arguments_prepend_no_search_upward() {
        let mut spec = BuildInvocationSpec::new("app", "1.2");
        spec.arguments = vec!["--offline".to_string()];
        assert_eq!(spec.implied_arguments(), vec!["--no-search-upward", "--offline"]);
    }

    #[test]
    fn test_implied_arguments_respect_existing_flag() {
        let mut spec = BuildInvocationSpec::new("app", "1.2");
        spec.arguments = vec!["-u".to_string()];
        assert_eq!(spec.implied_arguments(), vec!["-u"]);
        spec.arguments = vec!["--no-search-upward".to_string()];
        assert_eq!(spec.implied_arguments(), vec!["--no-search-upward"]);
    }

    #[test]
    fn test_same_invocation_ignores_model_path() {
        let a = BuildInvocationSpec::new("app", "1.2");
        let mut b = BuildInvocationSpec::new("app", "1.2");
        b.model_path = Some(PathBuf::from("other.json"));
        assert!(a.same_invocation(&b));
        b.tool_version = "1.3".to_string();
        assert!(!a.same_invocation(&b));
    }

    #[test]
    fn test_reject_invalid_version() {
        let err = parse_config_str(&CONFIG.replace("'1.2'", "banana")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert_eq!(err.version(), Some("banana"));
    }

    #[test]
    fn test_reject_missing_report_dir() {
        let err = parse_config_str(&CONFIG.replace("report_dir: out/report", "report_dir: ''"))
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_reject_malformed_yaml() {
        let err = parse_config_str("source: [").unwrap_err();
        assert!(err.message().contains("YAML parse error"));
    }
}
