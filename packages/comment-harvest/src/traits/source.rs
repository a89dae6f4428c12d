//! Document source traits.
//!
//! A source knows how to reach the report view (login, navigation, waiting
//! for dynamic content). The pipeline only asks it for a session, asks the
//! session for the loaded report, and closes the session when done.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut session = source.open().await?;
//! let page = session.load_report().await;
//! session.close().await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SourceResult;

/// A report document positioned on the target view.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Where the document came from (URL or file path)
    pub location: String,

    /// Rendered HTML
    pub html: String,

    /// When the document was loaded
    pub loaded_at: DateTime<Utc>,
}

impl LoadedPage {
    pub fn new(location: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            html: html.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Check if this page has any content.
    pub fn has_content(&self) -> bool {
        !self.html.trim().is_empty()
    }
}

/// An acquired connection to the document (browser tab, HTTP session).
///
/// Must be closed exactly once; the pipeline does so on every exit path.
#[async_trait]
pub trait DocumentSession: Send {
    /// Navigate to the report view and return its document.
    async fn load_report(&mut self) -> SourceResult<LoadedPage>;

    /// Release the underlying resource.
    async fn close(&mut self) -> SourceResult<()>;
}

/// Factory for document sessions.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Acquire a session.
    async fn open(&self) -> SourceResult<Box<dyn DocumentSession>>;

    /// Get the source name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}
