//! Comparison specification: the full set of associations for one run.

use crate::associate::associator::CompositeAssociator;
use crate::outcome::{Outcome, OutcomeKey, OutcomeKind, OutcomeSet};
use serde::Serialize;

/// Pairing decision for one outcome across the two builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Association {
    /// Both builds produced the outcome
    Associated {
        /// Kind under which the pair was matched
        kind: OutcomeKind,
        source: Outcome,
        target: Outcome,
    },
    /// Only the source build produced the outcome
    SourceOnly { source: Outcome },
    /// Only the target build produced the outcome
    TargetOnly { target: Outcome },
}

impl Association {
    /// Ordering key (kind, name) taken from the source side when present
    pub fn key(&self) -> OutcomeKey {
        match self {
            Association::Associated { source, .. } | Association::SourceOnly { source } => {
                source.key()
            }
            Association::TargetOnly { target } => target.key(),
        }
    }

    pub fn source(&self) -> Option<&Outcome> {
        match self {
            Association::Associated { source, .. } | Association::SourceOnly { source } => {
                Some(source)
            }
            Association::TargetOnly { .. } => None,
        }
    }

    pub fn target(&self) -> Option<&Outcome> {
        match self {
            Association::Associated { target, .. } | Association::TargetOnly { target } => {
                Some(target)
            }
            Association::SourceOnly { .. } => None,
        }
    }

    pub fn is_associated(&self) -> bool {
        matches!(self, Association::Associated { .. })
    }

    /// Tie-break for equal keys: associated, then source-only, then target-only
    fn shape_rank(&self) -> u8 {
        match self {
            Association::Associated { .. } => 0,
            Association::SourceOnly { .. } => 1,
            Association::TargetOnly { .. } => 2,
        }
    }
}

/// All associations of one comparison run, ordered by (kind, name).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSpec {
    associations: Vec<Association>,
}

impl ComparisonSpec {
    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub fn len(&self) -> usize {
        self.associations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Association> {
        self.associations.iter()
    }

    /// Number of matched pairs
    pub fn associated_count(&self) -> usize {
        self.associations.iter().filter(|a| a.is_associated()).count()
    }
}

impl IntoIterator for ComparisonSpec {
    type Item = Association;
    type IntoIter = std::vec::IntoIter<Association>;

    fn into_iter(self) -> Self::IntoIter {
        self.associations.into_iter()
    }
}

/// Associate every outcome of `source` with at most one outcome of `target`.
///
/// Each source outcome is offered to the unclaimed target outcomes in key
/// order; the first target the associator accepts becomes its pair. Source
/// outcomes left without a pair are source-only, target outcomes never
/// claimed are target-only. The result is sorted by (kind, name).
pub fn create_spec(
    associator: &CompositeAssociator,
    source: &OutcomeSet,
    target: &OutcomeSet,
) -> ComparisonSpec {
    let mut unclaimed: Vec<&Outcome> = target.iter().collect();
    let mut associations = Vec::with_capacity(source.len() + target.len());

    for source_outcome in source {
        let matched = unclaimed.iter().enumerate().find_map(|(idx, candidate)| {
            associator
                .associate(source_outcome, candidate)
                .map(|kind| (idx, kind))
        });

        match matched {
            Some((idx, kind)) => {
                let target_outcome = unclaimed.remove(idx);
                associations.push(Association::Associated {
                    kind,
                    source: source_outcome.clone(),
                    target: target_outcome.clone(),
                });
            }
            None => associations.push(Association::SourceOnly {
                source: source_outcome.clone(),
            }),
        }
    }

    associations.extend(unclaimed.into_iter().map(|target_outcome| {
        Association::TargetOnly {
            target: target_outcome.clone(),
        }
    }));

    associations.sort_by(|a, b| {
        a.key()
            .cmp(&b.key())
            .then_with(|| a.shape_rank().cmp(&b.shape_rank()))
    });

    ComparisonSpec { associations }
}
