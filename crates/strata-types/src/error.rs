use thiserror::Error;

/// Errors produced by type validation.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid tolerance distance: {dist}")]
    InvalidTolerance { dist: f64 },
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
