#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{complete_params, sample_catalog};
use eavsearch_core::eavsearch_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
};
use eavsearch_core::logging_facility::test_capture::init_test_capture;
use eavsearch_core::prompt::ScriptedPrompter;
use eavsearch_core::resolver::resolve;
use eavsearch_core::{log_op_end, log_op_error, log_op_start, ExErrorKind, SearchError};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, scope = "category");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("scope"), Some("category"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, SearchError::UserCancelled, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        events[0].field(FIELD_ERR_CODE),
        Some(ExErrorKind::UserCancelled.code())
    );
}

#[test]
fn test_resolve_logs_boundary_events() {
    let capture = init_test_capture();

    let mut params = complete_params();
    params.attribute = Some("logging_capture_attribute".to_string());
    let mut prompter = ScriptedPrompter::default();
    let mut catalog = sample_catalog();
    resolve(&params, &mut prompter, &mut catalog).unwrap();

    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some("resolve_parameters")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("attribute") == Some("logging_capture_attribute")
    });
    assert_eq!(ends, 1);
    capture.assert_event_exists("resolve_parameters", EVENT_START);
}

#[test]
fn test_automated_failure_logs_error_kind() {
    let capture = init_test_capture();

    let mut params = complete_params();
    params.scope = Some("logging_capture_scope".to_string());
    params.automated = true;
    let mut prompter = ScriptedPrompter::default();
    let mut catalog = sample_catalog();
    resolve(&params, &mut prompter, &mut catalog).unwrap_err();

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("resolve_parameters")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_INVALID_PARAMETER")
    });
    assert!(errors >= 1);
}
