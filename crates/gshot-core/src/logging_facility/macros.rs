//! Operation boundary macros
//!
//! Every engine operation emits one `start` event and then exactly one of
//! `end` or `end_error`. Extra `key = value` fields pass straight through to
//! `tracing`.

/// Log the start of an operation
///
/// ```
/// # use gshot_core::log_op_start;
/// log_op_start!("commit");
/// log_op_start!("restore", commit_id = 3u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = gshot_core_types::schema::EVENT_START
            $(, $($field)+)?
        );
    };
}

/// Log the successful end of an operation; `duration_ms` is mandatory.
///
/// ```
/// # use gshot_core::log_op_end;
/// log_op_end!("commit", duration_ms = 42u64, commit_id = 1u64, scanned = 2u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = gshot_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)+)?
        );
    };
}

/// Log the failed end of an operation.
///
/// `$err` is anything convertible into `ExError`. Its commit id, path and
/// digest context become event fields when set, so a failed restore of
/// commit 9 carries `commit_id = 9` without the caller repeating it.
///
/// ```
/// # use gshot_core::{log_op_error, errors::GshotError};
/// let err = GshotError::CommitNotFound { id: 9 };
/// log_op_error!("restore", err, duration_ms = 10u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = gshot_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            commit_id = ex_err.commit_id(),
            path = ex_err.path(),
            digest = ex_err.digest(),
            message = %ex_err
            $(, $($field)+)?
        );
    }};
}
