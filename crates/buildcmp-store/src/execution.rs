//! Build execution facade
//!
//! The comparison engine never runs builds itself. A [`BuildExecutor`] turns
//! an invocation spec into a project outcomes model; [`ToolVersion`] decides
//! whether a build tool version can produce that model at all.

use crate::config::BuildInvocationSpec;
use crate::errors::{config_invalid, execution_failed, version_invalid, Result};
use crate::model::{parse_model_file, ProjectOutcomes};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Oldest tool version able to produce a project outcomes model
pub const OUTCOME_MODEL_MINIMUM_VERSION: &str = "1.2";

/// Pre-release stage of a tool version, ordered oldest first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Milestone(u32),
    ReleaseCandidate(u32),
    /// Nightly snapshot, `YYYYMMDDhhmmss+zzzz`
    Snapshot(String),
}

/// Parsed build tool version, e.g. `1.2`, `1.2-rc-1`, `1.0-milestone-9`,
/// `1.2-20120814120000+0000`.
///
/// Equality and ordering ignore trailing zero components (`1.2 == 1.2.0`).
#[derive(Debug, Clone)]
pub struct ToolVersion {
    raw: String,
    base: Vec<u32>,
    pre_release: Option<PreRelease>,
}

impl ToolVersion {
    /// # Errors
    ///
    /// `InvalidVersion` if `version` is not a recognized version string.
    pub fn parse(version: &str) -> Result<Self> {
        let (base_str, suffix) = match version.split_once('-') {
            Some((base, suffix)) => (base, Some(suffix)),
            None => (version, None),
        };

        let base = base_str
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| version_invalid(version)))
            .collect::<Result<Vec<u32>>>()?;
        if base.len() < 2 || base.len() > 3 {
            return Err(version_invalid(version));
        }

        let pre_release = match suffix {
            None => None,
            Some(suffix) => {
                Some(parse_pre_release(suffix).ok_or_else(|| version_invalid(version))?)
            }
        };

        Ok(Self {
            raw: version.to_string(),
            base,
            pre_release,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// The release this version leads up to, e.g. `1.2` for `1.2-rc-1`
    pub fn base_version(&self) -> ToolVersion {
        ToolVersion {
            raw: self
                .base
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join("."),
            base: self.base.clone(),
            pre_release: None,
        }
    }

    /// True if this version can produce a project outcomes model. Pre-releases
    /// of the minimum version qualify.
    pub fn can_produce_outcome_model(&self) -> bool {
        match ToolVersion::parse(OUTCOME_MODEL_MINIMUM_VERSION) {
            Ok(minimum) => self.base_version() >= minimum,
            Err(_) => false,
        }
    }

    fn padded_base(&self) -> [u32; 3] {
        let mut padded = [0; 3];
        for (slot, value) in padded.iter_mut().zip(&self.base) {
            *slot = *value;
        }
        padded
    }
}

fn parse_pre_release(suffix: &str) -> Option<PreRelease> {
    if let Some(n) = suffix.strip_prefix("rc-") {
        return n.parse().ok().map(PreRelease::ReleaseCandidate);
    }
    if let Some(n) = suffix.strip_prefix("milestone-") {
        return n.parse().ok().map(PreRelease::Milestone);
    }
    let (timestamp, zone) = suffix.split_once('+')?;
    let is_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if is_digits(timestamp, 14) && is_digits(zone, 4) {
        Some(PreRelease::Snapshot(suffix.to_string()))
    } else {
        None
    }
}

impl Ord for ToolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.padded_base()
            .cmp(&other.padded_base())
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialEq for ToolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToolVersion {}

impl PartialOrd for ToolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ToolVersion {
    type Err = buildcmp_core::ExError;

    fn from_str(s: &str) -> Result<Self> {
        ToolVersion::parse(s)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Runs (or stands in for) one build invocation.
pub trait BuildExecutor {
    /// Produce the project outcomes model for `spec`.
    ///
    /// # Errors
    ///
    /// `BuildExecutionFailed` or `InvalidModel` if no model can be produced.
    fn execute(&self, spec: &BuildInvocationSpec) -> Result<ProjectOutcomes>;
}

/// Executor for builds already run elsewhere: reads the model JSON the build
/// left at the invocation's `model_path`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelFileExecutor;

impl BuildExecutor for ModelFileExecutor {
    fn execute(&self, spec: &BuildInvocationSpec) -> Result<ProjectOutcomes> {
        let model_path = spec.model_path.as_ref().ok_or_else(|| {
            config_invalid(&format!(
                "No outcome model path for the build at {}",
                spec.project_dir.display()
            ))
        })?;
        if !model_path.is_file() {
            return Err(execution_failed(
                &spec.project_dir.display().to_string(),
                &format!("outcome model {} does not exist", model_path.display()),
            ));
        }

        let mut model = parse_model_file(model_path)?;
        if model.project_dir.as_os_str().is_empty() {
            model.project_dir = spec.project_dir.clone();
        }
        Ok(model)
    }
}
