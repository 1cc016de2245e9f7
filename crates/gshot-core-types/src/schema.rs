//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Operation context
pub const FIELD_ROOT: &str = "root";
pub const FIELD_COMMIT_ID: &str = "commit_id";

// Operation counts
pub const FIELD_SCANNED: &str = "scanned";
pub const FIELD_SKIPPED: &str = "skipped";
pub const FIELD_RESTORED: &str = "restored";
pub const FIELD_FAILED: &str = "failed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_field_keys_are_snake_case() {
        for key in [
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_ROOT,
            FIELD_COMMIT_ID,
            FIELD_SCANNED,
            FIELD_SKIPPED,
            FIELD_RESTORED,
            FIELD_FAILED,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ] {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
