//! Error types for the merge engine.

use thiserror::Error;

use strata_types::TypeError;

pub use strata_diff::{SinkError, SinkResult};

/// Errors surfaced by three-way merge operations.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The supplied tolerance fails validation.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(#[from] TypeError),

    /// The scan ran to completion but some entries could not be
    /// processed.
    #[error("merge scan completed with {errors} per-entry error(s)")]
    ScanFailed { errors: usize },
}

pub type MergeResult<T> = Result<T, MergeError>;
