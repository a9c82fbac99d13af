use thiserror::Error;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(String),
    /// The object key is malformed.
    #[error("invalid object key: {0}")]
    InvalidKey(String),
    /// The backend cannot be constructed from the supplied settings.
    #[error("object storage misconfigured: {0}")]
    Config(String),
    /// The backend rejected the request with a non-success HTTP status.
    #[error("object storage returned HTTP {status} for '{key}'")]
    Status { status: u16, key: String },
    /// Transport or signing failure talking to the backend.
    #[error("object storage request failed: {0}")]
    Backend(String),
}
