//! Error types for the translation clients.

use thiserror::Error;

/// Result type for translation client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Translation client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, quota exceeded, invalid request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether the provider rejected the request for quota or rate reasons.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ClientError::Api { status: 429, .. } | ClientError::Api { status: 403, .. })
    }
}
