//! Data model for the snapshot engine
//!
//! The history is a flat list of path→digest pairs per commit; there is no
//! tree object.

pub mod branch;
pub mod commit;
pub mod file_record;

pub use branch::Branch;
pub use commit::{Commit, CommitId};
pub use file_record::FileRecord;

use chrono::{SecondsFormat, Utc};

/// Current time as an RFC 3339 / ISO-8601 string with second precision
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
