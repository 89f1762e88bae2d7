//! Build outcome model.
//!
//! An outcome is one observable, named, typed result of a build. Outcomes
//! are immutable once constructed and are grouped into an [`OutcomeSet`] per
//! build invocation.

pub mod model;
pub mod set;

pub use model::{
    ArchiveEntry, ArchiveOutcome, Outcome, OutcomeKey, OutcomeKind, StoredFile, UnknownOutcome,
};
pub use set::OutcomeSet;
