//! Comparator for outcomes of unknown kind.
//!
//! Unknown outcomes cannot be inspected, so a pair is always classified as
//! different. Missing comparison capability is never reported as "no
//! difference".

use crate::compare::model::{OutcomeComparison, UnknownComparison};
use crate::compare::registry::OutcomeComparator;
use crate::errors::{BuildCompareError, Result};
use crate::outcome::{Outcome, OutcomeKind, UnknownOutcome};

/// Compares [`UnknownOutcome`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownComparator;

impl UnknownComparator {
    fn as_unknown(outcome: &Outcome) -> std::result::Result<&UnknownOutcome, BuildCompareError> {
        match outcome {
            Outcome::Unknown(unknown) => Ok(unknown),
            other => Err(BuildCompareError::KindMismatch {
                expected: OutcomeKind::Unknown.to_string(),
                actual: other.kind().to_string(),
                name: other.name().to_string(),
            }),
        }
    }
}

impl OutcomeComparator for UnknownComparator {
    fn kind(&self) -> OutcomeKind {
        OutcomeKind::Unknown
    }

    fn compare(&self, source: &Outcome, target: &Outcome) -> Result<OutcomeComparison> {
        let source = Self::as_unknown(source)?;
        let target = Self::as_unknown(target)?;
        Ok(OutcomeComparison::Unknown(UnknownComparison {
            source: source.clone(),
            target: target.clone(),
            reason: format!(
                "Outcome '{}' is of a kind that cannot be compared; it is reported as different",
                source.name
            ),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::model::Classification;

    #[test]
    fn test_identical_payload_is_still_different() {
        let outcome: Outcome = UnknownOutcome::new("x", ":x", "reason A").into();
        let result = UnknownComparator.compare(&outcome, &outcome.clone()).unwrap();
        assert_eq!(result.classification(), Classification::Different);
        assert_eq!(result.kind(), OutcomeKind::Unknown);
    }
}
