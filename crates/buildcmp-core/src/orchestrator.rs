//! Comparison orchestrator.
//!
//! Drives association then comparison over two full outcome sets and
//! produces one [`BuildComparisonResult`]. The first comparator error aborts
//! the whole comparison; no partial result is returned.

use crate::associate::{create_spec, Association, ComparisonSpec, CompositeAssociator};
use crate::compare::{BuildComparisonResult, ComparatorRegistry, ComparisonEntry};
use crate::errors::{Result, Stage};
use crate::outcome::OutcomeSet;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Associates and compares two outcome sets.
#[derive(Debug)]
pub struct BuildComparator {
    associator: CompositeAssociator,
    comparators: ComparatorRegistry,
}

impl BuildComparator {
    pub fn new(associator: CompositeAssociator, comparators: ComparatorRegistry) -> Self {
        Self {
            associator,
            comparators,
        }
    }

    pub fn associator(&self) -> &CompositeAssociator {
        &self.associator
    }

    pub fn comparators(&self) -> &ComparatorRegistry {
        &self.comparators
    }

    /// Build the comparison specification for two outcome sets
    pub fn associate(&self, source: &OutcomeSet, target: &OutcomeSet) -> ComparisonSpec {
        create_spec(&self.associator, source, target)
    }

    /// Compare every association of `spec`, preserving its order.
    ///
    /// # Errors
    ///
    /// The first error raised while comparing an associated pair, tagged with
    /// the comparison stage and the pair's kind and name.
    pub fn compare_spec(&self, spec: ComparisonSpec) -> Result<BuildComparisonResult> {
        let mut entries = Vec::with_capacity(spec.len());
        for association in spec {
            let entry = match association {
                Association::Associated {
                    kind,
                    source,
                    target,
                } => ComparisonEntry::Compared {
                    comparison: self
                        .comparators
                        .compare(kind, &source, &target)
                        .map_err(|e| e.or_stage(Stage::Comparison))?,
                },
                Association::SourceOnly { source } => {
                    ComparisonEntry::SourceOnly { outcome: source }
                }
                Association::TargetOnly { target } => {
                    ComparisonEntry::TargetOnly { outcome: target }
                }
            };
            entries.push(entry);
        }
        Ok(BuildComparisonResult::new(entries))
    }

    /// Associate and compare two outcome sets.
    ///
    /// # Errors
    ///
    /// See [`compare_spec`](Self::compare_spec).
    pub fn compare(
        &self,
        source: &OutcomeSet,
        target: &OutcomeSet,
    ) -> Result<BuildComparisonResult> {
        let start = Instant::now();
        log_op_start!(
            "compare_outcome_sets",
            source_len = source.len(),
            target_len = target.len()
        );

        let spec = self.associate(source, target);
        let association_len = spec.len();
        match self.compare_spec(spec) {
            Ok(result) => {
                log_op_end!(
                    "compare_outcome_sets",
                    duration_ms = start.elapsed().as_millis() as u64,
                    association_len = association_len,
                    builds_are_identical = result.builds_are_identical()
                );
                Ok(result)
            }
            Err(err) => {
                log_op_error!(
                    "compare_outcome_sets",
                    &err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }
}
