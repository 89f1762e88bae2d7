#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use buildcmp_core::associate::Association;
use buildcmp_core::compare::{Classification, ComparisonEntry, OutcomeComparison};
use buildcmp_core::standard::standard_build_comparator;
use common::{archive, source_set, target_set, unknown};

#[test]
fn scenario_01_identical_archives_are_equal() {
    let comparator = standard_build_comparator().unwrap();
    let source = source_set(vec![archive("app.zip", &["a", "b"])]);
    let target = target_set(vec![archive("app.zip", &["a", "b"])]);

    let result = comparator.compare(&source, &target).unwrap();

    assert_eq!(result.len(), 1);
    match &result.entries()[0] {
        ComparisonEntry::Compared { comparison } => {
            assert_eq!(comparison.classification(), Classification::Equal)
        }
        other => panic!("expected compared entry, got {:?}", other),
    }
    assert!(result.builds_are_identical());
}

#[test]
fn scenario_02_changed_listing_is_different() {
    let comparator = standard_build_comparator().unwrap();
    let source = source_set(vec![archive("app.zip", &["a", "b"])]);
    let target = target_set(vec![archive("app.zip", &["a", "c"])]);

    let result = comparator.compare(&source, &target).unwrap();

    assert_eq!(result.len(), 1);
    match &result.entries()[0] {
        ComparisonEntry::Compared {
            comparison: OutcomeComparison::Archive(archive),
        } => {
            assert_eq!(archive.classification, Classification::Different);
            assert_eq!(archive.removed(), vec!["b"]);
            assert_eq!(archive.added(), vec!["c"]);
            assert!(archive.changed().is_empty());
        }
        other => panic!("expected archive comparison, got {:?}", other),
    }
    assert!(!result.builds_are_identical());
}

#[test]
fn scenario_03_missing_target_outcome_is_source_only() {
    let comparator = standard_build_comparator().unwrap();
    let source = source_set(vec![archive("lib.jar", &["x"])]);
    let target = target_set(Vec::new());

    let spec = comparator.associate(&source, &target);
    assert_eq!(spec.len(), 1);
    match &spec.associations()[0] {
        Association::SourceOnly { source } => assert_eq!(source.name(), "lib.jar"),
        other => panic!("expected source-only association, got {:?}", other),
    }

    let result = comparator.compare(&source, &target).unwrap();
    assert_eq!(result.source_only_count(), 1);
    assert!(!result.builds_are_identical());
}

#[test]
fn scenario_04_unknown_outcomes_are_always_different() {
    let comparator = standard_build_comparator().unwrap();
    let source = source_set(vec![unknown("x", "reason A")]);
    let target = target_set(vec![unknown("x", "reason A")]);

    let result = comparator.compare(&source, &target).unwrap();

    assert_eq!(result.len(), 1);
    match &result.entries()[0] {
        ComparisonEntry::Compared { comparison } => {
            assert_eq!(comparison.classification(), Classification::Different)
        }
        other => panic!("expected compared entry, got {:?}", other),
    }
    assert!(!result.builds_are_identical());
}

#[test]
fn scenario_05_empty_builds_are_identical() {
    let comparator = standard_build_comparator().unwrap();
    let result = comparator
        .compare(&source_set(Vec::new()), &target_set(Vec::new()))
        .unwrap();
    assert!(result.is_empty());
    assert!(result.builds_are_identical());
}

#[test]
fn scenario_06_same_name_different_kind_is_not_associated() {
    let comparator = standard_build_comparator().unwrap();
    let source = source_set(vec![archive("out", &["a"])]);
    let target = target_set(vec![unknown("out", "folder")]);

    let result = comparator.compare(&source, &target).unwrap();

    assert_eq!(result.source_only_count(), 1);
    assert_eq!(result.target_only_count(), 1);
}
