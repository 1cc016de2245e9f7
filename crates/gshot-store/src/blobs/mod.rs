//! Content-addressable blob store
//!
//! Provides:
//! - One flat file per unique digest under `blobs/`
//! - Deduplication: identical content is stored once
//! - Atomic, verified writes (a blob's bytes always hash to its name)

mod fs_store;

pub use fs_store::{is_source_error, BlobStore};
