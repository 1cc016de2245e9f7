#![allow(clippy::unwrap_used, clippy::expect_used)]

use gshot_core::errors::GshotError;
use gshot_core::logging_facility::test_capture::init_test_capture;
use gshot_core::{log_op_end, log_op_error, log_op_start};
use gshot_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_carries_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42u64);

    let ends: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(ends.len(), 1, "Should have exactly one end event");
    assert_eq!(ends[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = GshotError::BlobNotFound {
        digest: "0".repeat(64),
    };
    log_op_error!(op_name, err, duration_ms = 10u64);

    let errors: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err_code"), Some("ERR_MISSING_BLOB"));
}

#[test]
fn test_boundary_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_4";

    log_op_start!(op_name, commit_id = 3u64);
    log_op_end!(op_name, duration_ms = 1u64);

    let events = capture.events_for_op(op_name);
    let starts = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    let ends = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .count();

    assert_eq!(starts, 1);
    assert_eq!(ends, 1);
    assert_eq!(events[0].field("commit_id"), Some("3"));
}

#[test]
fn test_log_op_error_carries_error_context() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_context_unique_5";

    log_op_error!(
        op_name,
        GshotError::CommitNotFound { id: 9 },
        duration_ms = 3u64,
        root = "/tmp/work"
    );

    let errors = capture.events_for_op(op_name);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is(op_name, EVENT_END_ERROR));
    assert_eq!(errors[0].field("commit_id"), Some("9"));
    assert_eq!(errors[0].field("root"), Some("/tmp/work"));
    assert_eq!(errors[0].field("digest"), None);
}
