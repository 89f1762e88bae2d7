//! buildcmp core - build outcome comparison engine
//!
//! Compares the outcomes of two build invocations (a source build and a
//! target build) and renders a report of the differences:
//! - Outcome model: typed, named outcomes grouped into per-build sets
//! - Association: pairing source and target outcomes by kind and name
//! - Comparison: per-kind comparators producing a classified result
//! - Rendering: a Markdown report assembled from per-section renderers
//!
//! Outcome extraction from build models, the file store, and report
//! persistence live in `buildcmp-store`.

pub mod associate;
pub mod compare;
pub mod errors;
pub mod logging_facility;
pub mod orchestrator;
pub mod outcome;
pub mod render;
pub mod run;
pub mod standard;

// Re-export commonly used types
pub use compare::{BuildComparisonResult, Classification, ComparisonEntry};
pub use errors::{BuildCompareError, ExError, ExErrorKind, Result, Stage};
pub use orchestrator::BuildComparator;
pub use outcome::{Outcome, OutcomeKind, OutcomeSet};
pub use render::{BuildDescriptor, RenderContext, ReportAssembler};
pub use run::{ComparisonRun, RunState};
