#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use buildcmp_core::errors::{ExError, ExErrorKind};
use buildcmp_core::logging_facility::test_capture::init_test_capture;
use buildcmp_core::run::{ComparisonRun, RunState};
use buildcmp_core::standard::{standard_build_comparator, standard_report_assembler};
use buildcmp_core::{log_op_end, log_op_error, log_op_start};
use buildcmp_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, EVENT_TRANSITION, FIELD_DURATION_MS, FIELD_ERR_CODE,
};
use common::{archive, fixed_context, source_set, target_set, unknown};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1);
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";
    let err = ExError::new(ExErrorKind::NoComparator);

    log_op_error!(op_name, &err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_NO_COMPARATOR"));
}

#[test]
fn test_run_logs_every_transition_with_run_id() {
    let capture = init_test_capture();
    let comparator = standard_build_comparator().unwrap();
    let assembler = standard_report_assembler("Build Comparison").unwrap();
    let set = vec![archive("app.zip", &["a"])];
    let mut run = ComparisonRun::new(
        &comparator,
        &assembler,
        fixed_context("run-transitions-unique"),
    );

    run.execute(&source_set(set.clone()), &target_set(set), &mut Vec::<u8>::new())
        .unwrap();

    let transitions: Vec<String> = capture
        .events_for_run("run-transitions-unique")
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_TRANSITION))
        .filter_map(|e| e.field("to").map(str::to_string))
        .collect();
    assert_eq!(
        transitions,
        vec!["associating", "comparing", "rendering", "done"]
    );
}

#[test]
fn test_failed_run_logs_failure_and_tags_error() {
    let capture = init_test_capture();
    let comparator = standard_build_comparator().unwrap();
    // No section renderers at all
    let assembler = buildcmp_core::ReportAssembler::new(
        buildcmp_core::render::RendererRegistry::new(),
        buildcmp_core::render::HeadRenderer::new("t", "UTF-8"),
        buildcmp_core::render::ComparisonHeadingRenderer::new("t"),
    );
    let mut run = ComparisonRun::new(&comparator, &assembler, fixed_context("run-failed-unique"));
    let mut sink: Vec<u8> = Vec::new();

    let err = run
        .execute(
            &source_set(vec![unknown("x", "?")]),
            &target_set(Vec::new()),
            &mut sink,
        )
        .unwrap_err();

    assert_eq!(run.state(), RunState::Failed);
    assert_eq!(err.kind(), ExErrorKind::NoRenderer);
    assert_eq!(err.run_id().map(|r| r.as_str()), Some("run-failed-unique"));
    assert!(sink.is_empty());

    let events = capture.events_for_run("run-failed-unique");
    assert!(events
        .iter()
        .any(|e| e.event.as_deref() == Some(EVENT_TRANSITION) && e.field("to") == Some("failed")));
}
