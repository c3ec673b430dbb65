use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded { key: String },

    #[error("invalid store key: {key:?}")]
    InvalidKey { key: String },
}

impl StoreError {
    /// Whether retrying the operation could plausibly succeed (after the
    /// user frees space, fixes permissions, ...). In-memory state stays
    /// authoritative either way.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::QuotaExceeded { .. } => true,
            StoreError::Serialization(_) => false,
            StoreError::InvalidKey { .. } => false,
        }
    }
}
