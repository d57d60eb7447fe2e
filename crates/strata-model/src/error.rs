/// Errors from object model operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The entry is listed in the directory but its object cannot be read.
    #[error("cannot read object {name}: {reason}")]
    UnreadableObject { name: String, reason: String },

    /// No entry with this name exists in the snapshot.
    #[error("no such entry: {name}")]
    UnknownEntry { name: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
