//! Command orchestration layer.
//!
//! Each engine command runs one repository operation and brackets it with
//! operation-boundary log events.

pub mod engine_command;
pub mod snapshot;
