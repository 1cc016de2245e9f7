//! Filesystem-based blob store

use crate::atomic::write_with;
use crate::errors::{blob_missing, invalid_input, io_error, Result};
use gshot_core::errors::{ExError, ExErrorKind};
use gshot_core::hash::{hash_file, is_valid_digest, HashingReader};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const OP_OPEN_SOURCE: &str = "open_source";
const OP_HASH_SOURCE: &str = "hash_source";
const OP_READ_SOURCE: &str = "read_source";
const OP_VERIFY_SOURCE: &str = "verify_source";

/// Whether a `put` failure came from the source file rather than the store.
///
/// Source-side failures are the ones a commit may tolerate per file; a store
/// that cannot be written always aborts.
pub fn is_source_error(err: &ExError) -> bool {
    err.kind() == ExErrorKind::Io
        && matches!(
            err.op(),
            Some(OP_OPEN_SOURCE | OP_HASH_SOURCE | OP_READ_SOURCE | OP_VERIFY_SOURCE)
        )
}

/// Filesystem-based blob store
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a blob store rooted at `root`; the directory is created lazily
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the blob for `digest` lives
    pub fn blob_path(&self, digest: &str) -> PathBuf {
        self.root.join(digest)
    }

    /// Whether a blob for `digest` is stored
    pub fn contains(&self, digest: &str) -> bool {
        is_valid_digest(digest) && self.blob_path(digest).is_file()
    }

    /// Store the file at `source` and return its digest.
    ///
    /// - Hashes the source in streaming fashion
    /// - Returns immediately if the blob already exists
    /// - Otherwise copies the source through a hashing reader into a temp
    ///   file and renames it into place only if the copy hashes to the same
    ///   digest; a file modified mid-copy fails instead of storing bytes
    ///   under the wrong name
    ///
    /// # Errors
    ///
    /// `Io` if the source cannot be read or the store cannot be written.
    pub fn put(&self, source: &Path) -> Result<String> {
        let digest = hash_file(source).map_err(ExError::from)?;
        let target = self.blob_path(&digest);

        if target.is_file() {
            tracing::trace!(digest = %digest, path = %source.display(), "Blob already stored");
            return Ok(digest);
        }

        let file = File::open(source).map_err(|e| io_error(OP_OPEN_SOURCE, source, e))?;

        write_with(&target, |temp| {
            let mut reader = HashingReader::new(file);
            io::copy(&mut reader, temp).map_err(|e| io_error(OP_READ_SOURCE, source, e))?;
            if reader.finalize() != digest {
                return Err(ExError::new(ExErrorKind::Io)
                    .with_op(OP_VERIFY_SOURCE)
                    .with_path(source.display().to_string())
                    .with_digest(digest.as_str())
                    .with_message("Source changed while being stored"));
            }
            Ok(())
        })?;

        tracing::debug!(digest = %digest, path = %source.display(), "Stored new blob");
        Ok(digest)
    }

    /// Open the stored content for `digest` as a byte stream.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed digest, `MissingBlob` if no blob is
    /// stored under it, `Io` if it exists but cannot be opened.
    pub fn open(&self, digest: &str) -> Result<File> {
        if !is_valid_digest(digest) {
            return Err(invalid_input(
                "blob_open",
                format!("Malformed digest {:?}", digest),
            ));
        }
        let path = self.blob_path(digest);
        File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => blob_missing(digest),
            _ => io_error("blob_open", &path, e),
        })
    }

    /// Read the whole blob for `digest` into memory
    pub fn read(&self, digest: &str) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        self.open(digest)?
            .read_to_end(&mut content)
            .map_err(|e| io_error("blob_read", &self.blob_path(digest), e))?;
        Ok(content)
    }

    /// Number of blobs currently stored
    pub fn count(&self) -> Result<usize> {
        match fs::read_dir(&self.root) {
            Ok(entries) => Ok(entries
                .filter_map(|e| e.ok())
                .filter(|e| is_valid_digest(&e.file_name().to_string_lossy()))
                .count()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(io_error("blob_count", &self.root, e)),
        }
    }
}
