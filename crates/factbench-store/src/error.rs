//! Error types for factbench-store

use thiserror::Error;

/// Errors that can occur in the registry persistence layer
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Underlying filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry or record serialization error
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Index or record file exists but cannot be decoded
    #[error("registry corrupt at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// Stored record bytes do not match the digest in the index
    #[error("record digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    /// No entry for the requested run id
    #[error("run not found: {run_id}")]
    NotFound { run_id: String },

    /// Run id is empty or not usable as a record key
    #[error("invalid run id: {run_id:?}")]
    InvalidRunId { run_id: String },

    /// Digest string is not 64 lowercase hex chars
    #[error("invalid digest: {digest}")]
    InvalidDigest { digest: String },
}

/// Result type for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
