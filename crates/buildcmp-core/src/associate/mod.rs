//! Outcome association.
//!
//! Pairs outcomes of the source build with outcomes of the target build.
//! Association is purely structural: it never inspects outcome content.
//!
//! ## Entry point
//!
//! ```ignore
//! use buildcmp_core::associate::{create_spec, CompositeAssociator, ByKindAndNameAssociator};
//!
//! let spec = create_spec(&associator, &source, &target);
//! ```
//!
//! ## Guarantees
//!
//! - **Totality**: every outcome of both sets appears in exactly one association.
//! - **Determinism**: associations are ordered by (kind, name).
//! - **No silent drops**: an outcome whose kind has no associator is reported
//!   as source-only or target-only.

pub mod associator;
pub mod spec;

pub use associator::{ByKindAndNameAssociator, CompositeAssociator, OutcomeAssociator};
pub use spec::{create_spec, Association, ComparisonSpec};
