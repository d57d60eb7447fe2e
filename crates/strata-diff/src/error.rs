//! Error types for the diff crate.

use strata_types::TypeError;

/// Errors that end a snapshot scan without a difference count.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The tolerance failed validation; nothing was scanned.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(#[from] TypeError),

    /// Per-entry errors occurred during the scan. The difference count is
    /// withheld because skipped entries make it unreliable.
    #[error("scan completed with {errors} per-entry error(s)")]
    ScanFailed { errors: usize },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

/// Error returned by a sink method. The driver tallies it and the scan
/// continues.
#[derive(Debug, thiserror::Error)]
#[error("sink error: {message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result alias for sink methods.
pub type SinkResult = Result<(), SinkError>;
