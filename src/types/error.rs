use thiserror::Error;

/// awsprice error types
#[derive(Error, Debug)]
pub enum SyncError {
    /// Document fetch failed
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Document failed to decode as valid JSON
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Storage operation failed
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Fetch(err.to_string())
    }
}

/// Result type alias for awsprice
pub type Result<T> = std::result::Result<T, SyncError>;
