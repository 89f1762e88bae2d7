//! Outcome comparison.
//!
//! A [`ComparatorRegistry`] maps each outcome kind to exactly one
//! [`OutcomeComparator`]. Comparing a pair whose kind has no comparator is a
//! configuration error, never a silent skip.

pub mod archive;
pub mod model;
pub mod registry;
pub mod unknown;

pub use archive::{compare_archives, ArchiveComparator, ArchiveContentReader};
pub use model::{
    ArchiveAvailability, ArchiveComparison, BuildComparisonResult, Classification,
    ComparisonBasis, ComparisonEntry, EntryChange, EntryComparison, OutcomeComparison,
    UnknownComparison,
};
pub use registry::{ComparatorRegistry, OutcomeComparator};
pub use unknown::UnknownComparator;
