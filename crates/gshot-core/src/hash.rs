//! Content hasher.
//!
//! Digests are lowercase hex SHA-256 over the raw byte stream. Input is
//! consumed through a fixed buffer so arbitrarily large files hash in
//! constant memory.

use crate::errors::{GshotError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Size of the read buffer for streaming hashing
const HASH_BUFFER_SIZE: usize = 8192;

/// Length of a hex-encoded digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash everything `reader` yields until EOF.
///
/// # Errors
///
/// Propagates the first read error other than `Interrupted`.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; HASH_BUFFER_SIZE];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash the file at `path`.
///
/// # Errors
///
/// `GshotError::Io` if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| GshotError::io("open_source", path, e))?;
    hash_reader(file).map_err(|e| GshotError::io("hash_source", path, e))
}

/// Hash an in-memory byte slice.
pub fn hash_bytes(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Reader adapter that hashes every byte passed through it.
///
/// Lets a copy and its digest come from the same single read of the source.
pub struct HashingReader<R> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Hex digest of everything read so far
    pub fn finalize(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.hasher.update(&buf[..read]);
        Ok(read)
    }
}

/// Whether `digest` has the shape of a hex SHA-256 digest.
///
/// Blob lookups use the digest as a file name, so anything else is refused
/// before it reaches the filesystem.
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == DIGEST_HEX_LEN
        && digest
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_known_vector() {
        assert_eq!(
            hash_bytes(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_reader_matches_bytes_across_buffer_boundary() {
        let content = vec![7u8; HASH_BUFFER_SIZE * 3 + 17];
        let streamed = hash_reader(Cursor::new(&content)).unwrap();
        assert_eq!(streamed, hash_bytes(&content));
    }

    #[test]
    fn test_hashing_reader_matches_while_copying() {
        let content = b"copy me once".to_vec();
        let mut reader = HashingReader::new(Cursor::new(&content));
        let mut sink = Vec::new();
        io::copy(&mut reader, &mut sink).unwrap();

        assert_eq!(sink, content);
        assert_eq!(reader.finalize(), hash_bytes(&content));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(hash_reader(Cursor::new(Vec::new())).unwrap(), hash_bytes(b""));
    }

    #[test]
    fn test_hash_file_missing_is_io_error() {
        let err = hash_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, GshotError::Io { .. }));
    }

    #[test]
    fn test_is_valid_digest() {
        assert!(is_valid_digest(&hash_bytes(b"x")));
        assert!(!is_valid_digest("../../etc/passwd"));
        assert!(!is_valid_digest("abc"));
        assert!(!is_valid_digest(&hash_bytes(b"x").to_uppercase()));
    }
}
