use std::path::Path;
use thiserror::Error;

/// Result type alias using GshotError
pub type Result<T> = std::result::Result<T, GshotError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in gshot. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    /// A digest referenced by a commit has no blob in the store
    MissingBlob,
    /// The working copy has no `.gshot` directory
    NotARepository,
    /// `.gshot/config.toml` exists but cannot be parsed
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MissingBlob => "ERR_MISSING_BLOB",
            ExErrorKind::NotARepository => "ERR_NOT_A_REPOSITORY",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    commit_id: Option<u64>,
    digest: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            commit_id: None,
            digest: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add commit id context
    pub fn with_commit_id(mut self, id: u64) -> Self {
        self.commit_id = Some(id);
        self
    }

    /// Add content digest context
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the commit id context, if any
    pub fn commit_id(&self) -> Option<u64> {
        self.commit_id
    }

    /// Get the digest context, if any
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(id) = self.commit_id {
            write!(f, " (commit_id: {})", id)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, " (digest: {})", digest)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for snapshot engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GshotError {
    /// No commit with this id exists in the log
    #[error("Commit not found: {id}")]
    CommitNotFound { id: u64 },

    /// A digest has no blob in the store
    #[error("Blob not found: {digest}")]
    BlobNotFound { digest: String },

    /// Filesystem read/write/traversal failure
    #[error("IO error during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },

    /// History, branch, or blob metadata could not be (de)serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Caller supplied something unusable
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A commit identifier that does not parse as a positive integer
    #[error("Invalid commit id: {input:?}")]
    InvalidCommitId { input: String },

    /// Operation requires an initialised repository
    #[error("Not a gshot repository: {path}")]
    NotARepository { path: String },

    /// `.gshot/config.toml` is present but unusable
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl GshotError {
    /// Build an `Io` error from a `std::io::Error` and the path it concerned
    pub fn io(op: &str, path: &Path, err: std::io::Error) -> Self {
        GshotError::Io {
            op: op.to_string(),
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from GshotError to ExError
///
/// Maps the domain taxonomy onto the canonical ExErrorKind codes.
impl From<GshotError> for ExError {
    fn from(err: GshotError) -> Self {
        match err {
            GshotError::CommitNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_commit_id(id)
                .with_message("Commit not found"),

            GshotError::BlobNotFound { digest } => ExError::new(ExErrorKind::MissingBlob)
                .with_digest(digest)
                .with_message("Blob not found"),

            GshotError::Io { op, path, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_path(path)
                .with_message(message),

            GshotError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            GshotError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            GshotError::InvalidCommitId { input } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid commit id: {:?}", input)),

            GshotError::NotARepository { path } => ExError::new(ExErrorKind::NotARepository)
                .with_path(path)
                .with_message("Not a gshot repository (run `gshot init` first)"),

            GshotError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }
        }
    }
}

/// Conversion from serde_json::Error to GshotError
impl From<serde_json::Error> for GshotError {
    fn from(err: serde_json::Error) -> Self {
        GshotError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to GshotError
impl From<toml::de::Error> for GshotError {
    fn from(err: toml::de::Error) -> Self {
        GshotError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
