#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use buildcmp_core::associate::Association;
use buildcmp_core::compare::{Classification, ComparisonEntry};
use buildcmp_core::outcome::{Outcome, OutcomeKey};
use buildcmp_core::standard::standard_build_comparator;
use common::{archive, source_set, target_set, unknown};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    let name = "[a-e]{1,2}";
    prop_oneof![
        (name, prop::collection::btree_set("[a-d]", 0..4)).prop_map(|(n, paths)| {
            let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
            archive(&n, &paths)
        }),
        (name, "[a-z ]{0,8}").prop_map(|(n, d)| unknown(&n, &d)),
    ]
}

/// Outcomes with unique (kind, name) keys
fn arb_outcomes() -> impl Strategy<Value = Vec<Outcome>> {
    prop::collection::vec(arb_outcome(), 0..8).prop_map(|outcomes| {
        let mut unique: BTreeMap<OutcomeKey, Outcome> = BTreeMap::new();
        for outcome in outcomes {
            unique.entry(outcome.key()).or_insert(outcome);
        }
        unique.into_values().collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every outcome of both sets appears in exactly one association.
    #[test]
    fn prop_association_is_total(a in arb_outcomes(), b in arb_outcomes()) {
        let comparator = standard_build_comparator().unwrap();
        let spec = comparator.associate(&source_set(a.clone()), &target_set(b.clone()));

        let mut seen_source = Vec::new();
        let mut seen_target = Vec::new();
        for association in spec.iter() {
            if let Some(s) = association.source() {
                seen_source.push(s.key());
            }
            if let Some(t) = association.target() {
                seen_target.push(t.key());
            }
        }
        seen_source.sort();
        seen_target.sort();

        let mut expected_source: Vec<OutcomeKey> = a.iter().map(Outcome::key).collect();
        let mut expected_target: Vec<OutcomeKey> = b.iter().map(Outcome::key).collect();
        expected_source.sort();
        expected_target.sort();

        prop_assert_eq!(seen_source, expected_source);
        prop_assert_eq!(seen_target, expected_target);
    }

    /// Swapping the sets swaps source-only and target-only.
    #[test]
    fn prop_unmatched_classification_is_symmetric(a in arb_outcomes(), b in arb_outcomes()) {
        let comparator = standard_build_comparator().unwrap();
        let forward = comparator.associate(&source_set(a.clone()), &target_set(b.clone()));
        let backward = comparator.associate(&source_set(b), &target_set(a));

        let keys = |spec: &buildcmp_core::associate::ComparisonSpec, want_source: bool| {
            spec.iter()
                .filter(|assoc| match assoc {
                    Association::SourceOnly { .. } => want_source,
                    Association::TargetOnly { .. } => !want_source,
                    Association::Associated { .. } => false,
                })
                .map(|assoc| assoc.key())
                .collect::<BTreeSet<_>>()
        };

        prop_assert_eq!(keys(&forward, true), keys(&backward, false));
        prop_assert_eq!(keys(&forward, false), keys(&backward, true));
    }

    /// Identical inputs give identical results, down to serialization.
    #[test]
    fn prop_compare_is_deterministic(a in arb_outcomes(), b in arb_outcomes()) {
        let comparator = standard_build_comparator().unwrap();
        let source = source_set(a);
        let target = target_set(b);

        let first = comparator.compare(&source, &target).unwrap();
        let second = comparator.compare(&source, &target).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// An archive compared with a copy of itself is equal.
    #[test]
    fn prop_archive_equality_is_reflexive(paths in prop::collection::btree_set("[a-z]{1,4}", 0..6)) {
        let comparator = standard_build_comparator().unwrap();
        let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
        let outcome = archive("app.zip", &paths);

        let result = comparator
            .compare(&source_set(vec![outcome.clone()]), &target_set(vec![outcome]))
            .unwrap();

        prop_assert!(result.builds_are_identical());
    }

    /// Unknown outcomes never compare equal.
    #[test]
    fn prop_unknown_is_always_different(description in "[a-z ]{0,12}") {
        let comparator = standard_build_comparator().unwrap();
        let outcome = unknown("x", &description);

        let result = comparator
            .compare(&source_set(vec![outcome.clone()]), &target_set(vec![outcome]))
            .unwrap();

        let classified_different = matches!(
            &result.entries()[0],
            ComparisonEntry::Compared { comparison } if comparison.classification() == Classification::Different
        );
        prop_assert!(classified_different);
    }

    /// The overall flag holds iff nothing is unmatched or different.
    #[test]
    fn prop_overall_flag_is_correct(a in arb_outcomes(), b in arb_outcomes()) {
        let comparator = standard_build_comparator().unwrap();
        let result = comparator.compare(&source_set(a), &target_set(b)).unwrap();

        let expected = result.entries().iter().all(|entry| match entry {
            ComparisonEntry::Compared { comparison } => {
                comparison.classification() == Classification::Equal
            }
            ComparisonEntry::SourceOnly { .. } | ComparisonEntry::TargetOnly { .. } => false,
        });
        prop_assert_eq!(result.builds_are_identical(), expected);
    }
}
