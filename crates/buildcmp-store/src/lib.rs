//! buildcmp store - everything around the comparison engine that touches disk
//!
//! Provides:
//! - Content-addressed outcome file store
//! - Project outcomes model parsing and outcome extraction
//! - Archive listings read from stored zip and tar files
//! - Build execution facade and tool version gate
//! - Comparison configuration (YAML)
//! - Report writing and the compare-builds front end

pub mod archive_content;
pub mod compare_builds;
pub mod config;
pub mod errors;
pub mod execution;
pub mod extraction;
pub mod filestore;
pub mod model;
pub mod report;

// Re-export key types
pub use archive_content::StoredArchiveReader;
pub use compare_builds::{CompareBuilds, CompareBuildsOutcome};
pub use config::{BuildInvocationSpec, ComparisonConfig};
pub use errors::Result;
pub use execution::{BuildExecutor, ModelFileExecutor, ToolVersion};
