//! Outcome sets.

use crate::errors::BuildCompareError;
use crate::outcome::model::{Outcome, OutcomeKey, OutcomeKind};
use std::collections::BTreeMap;

/// The complete collection of outcomes produced by one build invocation.
///
/// Construction fails fast when two outcomes share both kind and name.
/// Iteration is always in key order (kind, then name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeSet {
    outcomes: BTreeMap<OutcomeKey, Outcome>,
}

impl OutcomeSet {
    /// Build a set, rejecting duplicate (kind, name) pairs.
    ///
    /// `side` names the build the outcomes came from and is only used in the
    /// error message.
    ///
    /// # Errors
    ///
    /// `DuplicateOutcome` if two outcomes share kind and name.
    pub fn new(
        side: &str,
        outcomes: impl IntoIterator<Item = Outcome>,
    ) -> Result<Self, BuildCompareError> {
        let mut map = BTreeMap::new();
        for outcome in outcomes {
            let key = outcome.key();
            if map.contains_key(&key) {
                return Err(BuildCompareError::DuplicateOutcome {
                    side: side.to_string(),
                    kind: key.kind.to_string(),
                    name: key.name,
                });
            }
            map.insert(key, outcome);
        }
        Ok(Self { outcomes: map })
    }

    /// An empty outcome set
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, kind: OutcomeKind, name: &str) -> Option<&Outcome> {
        self.outcomes.get(&OutcomeKey {
            kind,
            name: name.to_string(),
        })
    }

    /// Iterate outcomes in (kind, name) order
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.values()
    }

    /// Distinct kinds present in this set, in order
    pub fn kinds(&self) -> Vec<OutcomeKind> {
        let mut kinds: Vec<OutcomeKind> = self.outcomes.keys().map(|k| k.kind).collect();
        kinds.dedup();
        kinds
    }
}

impl<'a> IntoIterator for &'a OutcomeSet {
    type Item = &'a Outcome;
    type IntoIter = std::collections::btree_map::Values<'a, OutcomeKey, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::model::{ArchiveOutcome, UnknownOutcome};

    #[test]
    fn test_rejects_duplicate_kind_and_name() {
        let result = OutcomeSet::new(
            "source",
            vec![
                ArchiveOutcome::new("app.zip", ":zip", "zip").into(),
                ArchiveOutcome::new("app.zip", ":otherZip", "zip").into(),
            ],
        );
        assert_eq!(
            result,
            Err(BuildCompareError::DuplicateOutcome {
                side: "source".to_string(),
                kind: "archive".to_string(),
                name: "app.zip".to_string(),
            })
        );
    }

    #[test]
    fn test_same_name_different_kind_is_allowed() {
        let set = OutcomeSet::new(
            "target",
            vec![
                ArchiveOutcome::new("out", ":zip", "zip").into(),
                UnknownOutcome::new("out", ":thing", "not an archive").into(),
            ],
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.kinds(), vec![OutcomeKind::Archive, OutcomeKind::Unknown]);
    }

    #[test]
    fn test_iterates_in_key_order() {
        let set = OutcomeSet::new(
            "source",
            vec![
                UnknownOutcome::new("a", ":a", "?").into(),
                ArchiveOutcome::new("z.zip", ":z", "zip").into(),
                ArchiveOutcome::new("b.zip", ":b", "zip").into(),
            ],
        )
        .unwrap();
        let names: Vec<&str> = set.iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["b.zip", "z.zip", "a"]);
    }
}
