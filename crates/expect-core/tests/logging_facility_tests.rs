#![allow(clippy::unwrap_used, clippy::expect_used)]

use expect_core::errors::{ExError, ExErrorKind};
use expect_core::logging_facility::test_capture::init_test_capture;
use expect_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DIFF_COUNT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_MATCHER,
};
use expect_core::{is, log_op_end, log_op_error, log_op_start, RecordingReporter};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert_eq!(capture.events_for(op_name, EVENT_START).len(), 1);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::InvalidFieldPath).with_path(".items[");
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(FIELD_ERR_CODE, "err.code");
    assert_eq!(
        error_events[0].field(FIELD_ERR_CODE),
        Some("ERR_INVALID_FIELD_PATH")
    );
    assert_eq!(error_events[0].field(FIELD_ERR_KIND), Some("InvalidFieldPath"));
}

#[test]
fn test_log_macros_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_extra_fields_unique_4";

    log_op_start!(op_name, { FIELD_MATCHER } = "custom");
    log_op_end!(op_name, duration_ms = 1, diff_count = 3usize);

    let start = &capture.events_for(op_name, EVENT_START)[0];
    assert_eq!(start.field("matcher"), Some("custom"));
    let end = &capture.events_for(op_name, EVENT_END)[0];
    assert_eq!(end.field(FIELD_DIFF_COUNT), Some("3"));
}

#[test]
fn test_deep_equal_matcher_logs_one_boundary_pair() {
    let capture = init_test_capture();
    let before_start = capture.events_for("deep_equal_to", EVENT_START).len();
    let before_end = capture.events_for("deep_equal_to", EVENT_END).len();

    let mut reporter = RecordingReporter::new();
    expect_core::that(&mut reporter, &[&is::deep_equal_to(&vec![1, 2], &vec![1, 3])]);

    // Only this test completes the matcher without error, so the end count is exact.
    let starts = capture.events_for("deep_equal_to", EVENT_START);
    let ends = capture.events_for("deep_equal_to", EVENT_END);
    assert!(starts.len() > before_start);
    assert!(starts
        .iter()
        .any(|e| e.field(FIELD_MATCHER) == Some("deep_equal_to")));
    assert_eq!(ends.len(), before_end + 1);
    assert_eq!(ends.last().unwrap().field(FIELD_DIFF_COUNT), Some("1"));
    assert!(reporter.failed);
}

#[test]
fn test_deep_equal_matcher_logs_end_error() {
    let capture = init_test_capture();
    let before = capture.events_for("deep_equal_to", EVENT_END_ERROR).len();

    let mut reporter = RecordingReporter::new();
    let options = expect_core::Options::new().exclude_field_path("]");
    expect_core::that(
        &mut reporter,
        &[&is::deep_equal_to_with(&1, &1, options)],
    );

    let errors = capture.events_for("deep_equal_to", EVENT_END_ERROR);
    assert_eq!(errors.len(), before + 1);
    assert_eq!(
        errors.last().unwrap().field(FIELD_ERR_CODE),
        Some("ERR_INVALID_FIELD_PATH")
    );
    capture.assert_event_exists("deep_equal_to", EVENT_START);
    assert!(capture
        .events_for("deep_equal_to", EVENT_START)
        .iter()
        .any(|e| e.field(FIELD_MATCHER) == Some("deep_equal_to_with")));
}
