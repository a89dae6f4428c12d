//! Typed errors for the harvest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the pipeline can
//! decide recovery per stage instead of catching everything at the top.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning a loaded document for comments.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A configured CSS selector could not be parsed
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The scanner failed while walking the document
    #[error("document scan failed: {0}")]
    Scan(String),
}

/// Errors raised by a translation strategy.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The provider call failed (network, quota, malformed response)
    #[error("{provider} translation failed: {source}")]
    Provider {
        provider: String,
        #[source]
        source: translation_client::ClientError,
    },

    /// The provider needs credentials that were not configured
    #[error("{provider} requires credentials: {reason}")]
    MissingCredentials { provider: String, reason: String },

    /// Every provider in a fallback chain failed
    #[error("all translation providers failed: {0}")]
    Exhausted(String),

    /// Anything else, mostly from test doubles
    #[error("translation error: {0}")]
    Other(String),
}

impl TranslationError {
    /// Whether a provider refused the call for quota or rate reasons.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            TranslationError::Provider { source, .. } => source.is_rate_limited(),
            _ => false,
        }
    }
}

/// Errors raised while writing output artifacts.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem failure (directory creation, file write)
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Some artifacts were written before a later one failed
    #[error("partial write ({} artifact(s) written): {source}", written.len())]
    Partial {
        written: Vec<PathBuf>,
        #[source]
        source: Box<PersistenceError>,
    },
}

impl PersistenceError {
    /// Artifacts that made it to disk before the failure.
    pub fn written(&self) -> &[PathBuf] {
        match self {
            PersistenceError::Partial { written, .. } => written,
            _ => &[],
        }
    }
}

/// Errors raised while acquiring or loading the report document.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading a snapshot failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Login was rejected or did not establish a session
    #[error("login failed: {0}")]
    Login(String),

    /// The report view answered with a non-success status
    #[error("loading {url} returned HTTP {status}")]
    Load { url: String, status: u16 },

    /// A required credential was not provided
    #[error("missing credential: {0}")]
    MissingCredentials(&'static str),

    /// Invalid URL configured for the source
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The session was used after it was closed
    #[error("session already closed")]
    Closed,
}

/// Errors that end a pipeline run without a report.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document could not be acquired or loaded
    #[error("document source failed: {0}")]
    Source(#[from] SourceError),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value could not be parsed
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A required value was not provided
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Result type alias for extraction operations.
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Result type alias for document source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Result type alias for pipeline runs.
pub type Result<T> = std::result::Result<T, PipelineError>;
