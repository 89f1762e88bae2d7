//! Comparator trait and kind-keyed registry.

use crate::compare::model::OutcomeComparison;
use crate::errors::{BuildCompareError, ExError, Result, Stage};
use crate::outcome::{Outcome, OutcomeKind};
use std::collections::BTreeMap;

/// Comparison logic for one outcome kind.
pub trait OutcomeComparator: Send + Sync {
    /// The outcome kind this comparator handles
    fn kind(&self) -> OutcomeKind;

    /// Classify an associated pair.
    ///
    /// # Errors
    ///
    /// - `OutcomeKindMismatch` if either outcome is not of [`kind`](Self::kind)
    /// - `ComparisonFailed` if the outcome content cannot be inspected
    fn compare(&self, source: &Outcome, target: &Outcome) -> Result<OutcomeComparison>;
}

/// At most one comparator per outcome kind.
#[derive(Default)]
pub struct ComparatorRegistry {
    comparators: BTreeMap<OutcomeKind, Box<dyn OutcomeComparator>>,
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a comparator for its kind.
    ///
    /// # Errors
    ///
    /// `DuplicateComparator` if the kind already has a comparator.
    pub fn register(
        &mut self,
        comparator: Box<dyn OutcomeComparator>,
    ) -> std::result::Result<(), BuildCompareError> {
        let kind = comparator.kind();
        if self.comparators.contains_key(&kind) {
            return Err(BuildCompareError::DuplicateComparator {
                kind: kind.to_string(),
            });
        }
        self.comparators.insert(kind, comparator);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn with(
        mut self,
        comparator: impl OutcomeComparator + 'static,
    ) -> std::result::Result<Self, BuildCompareError> {
        self.register(Box::new(comparator))?;
        Ok(self)
    }

    pub fn supports(&self, kind: OutcomeKind) -> bool {
        self.comparators.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<OutcomeKind> {
        self.comparators.keys().copied().collect()
    }

    /// Compare an associated pair with the comparator registered for `kind`.
    ///
    /// Errors raised by the comparator are tagged with the comparison stage
    /// and the identity of the failing pair.
    ///
    /// # Errors
    ///
    /// - `NoComparator` if `kind` has no registered comparator
    /// - any error raised by the comparator itself
    pub fn compare(
        &self,
        kind: OutcomeKind,
        source: &Outcome,
        target: &Outcome,
    ) -> Result<OutcomeComparison> {
        let comparator = self.comparators.get(&kind).ok_or_else(|| {
            ExError::from(BuildCompareError::NoComparator {
                kind: kind.to_string(),
                name: source.name().to_string(),
            })
        })?;

        comparator.compare(source, target).map_err(|e| {
            let e = e.or_stage(Stage::Comparison).with_op("compare_outcome");
            if e.outcome_name().is_some() {
                e
            } else {
                e.with_outcome_kind(kind.to_string())
                    .with_outcome_name(source.name())
            }
        })
    }
}

impl std::fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
