//! Per-kind matching strategies and their ordered composite.

use crate::errors::BuildCompareError;
use crate::outcome::{Outcome, OutcomeKind};

/// Matching strategy for one outcome kind.
pub trait OutcomeAssociator: Send + Sync {
    /// The outcome kind this associator is responsible for
    fn claims(&self) -> OutcomeKind;

    /// Decide whether `source` and `target` are the same logical outcome.
    ///
    /// Returns the kind under which they are associated, or `None` if they
    /// are not a pair.
    fn associate(&self, source: &Outcome, target: &Outcome) -> Option<OutcomeKind>;
}

/// Associates two outcomes of one kind when their names are identical.
#[derive(Debug, Clone, Copy)]
pub struct ByKindAndNameAssociator {
    kind: OutcomeKind,
}

impl ByKindAndNameAssociator {
    pub fn new(kind: OutcomeKind) -> Self {
        Self { kind }
    }
}

impl OutcomeAssociator for ByKindAndNameAssociator {
    fn claims(&self) -> OutcomeKind {
        self.kind
    }

    fn associate(&self, source: &Outcome, target: &Outcome) -> Option<OutcomeKind> {
        if source.kind() == self.kind
            && target.kind() == self.kind
            && source.name() == target.name()
        {
            Some(self.kind)
        } else {
            None
        }
    }
}

/// Ordered list of associators, tried in registration order.
///
/// Only one associator may claim a given kind.
#[derive(Default)]
pub struct CompositeAssociator {
    associators: Vec<Box<dyn OutcomeAssociator>>,
}

impl CompositeAssociator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an associator.
    ///
    /// # Errors
    ///
    /// `DuplicateAssociator` if another associator already claims the same kind.
    pub fn register(
        &mut self,
        associator: Box<dyn OutcomeAssociator>,
    ) -> Result<(), BuildCompareError> {
        let kind = associator.claims();
        if self.associators.iter().any(|a| a.claims() == kind) {
            return Err(BuildCompareError::DuplicateAssociator {
                kind: kind.to_string(),
            });
        }
        self.associators.push(associator);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn with(
        mut self,
        associator: impl OutcomeAssociator + 'static,
    ) -> Result<Self, BuildCompareError> {
        self.register(Box::new(associator))?;
        Ok(self)
    }

    /// Kinds claimed, in registration order
    pub fn claimed_kinds(&self) -> Vec<OutcomeKind> {
        self.associators.iter().map(|a| a.claims()).collect()
    }

    /// First association decision made by any registered associator
    pub fn associate(&self, source: &Outcome, target: &Outcome) -> Option<OutcomeKind> {
        self.associators
            .iter()
            .find_map(|a| a.associate(source, target))
    }
}

impl std::fmt::Debug for CompositeAssociator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeAssociator")
            .field("claimed_kinds", &self.claimed_kinds())
            .finish()
    }
}
