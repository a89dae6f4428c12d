//! Pure translation REST clients.
//!
//! Minimal clients for two translation providers, with no pipeline or
//! domain-specific logic:
//!
//! - [`GoogleTranslateClient`] - Google Cloud Translation v2 (API key, detection)
//! - [`LibreTranslateClient`] - LibreTranslate (public or self-hosted)
//!
//! # Example
//!
//! ```rust,ignore
//! use translation_client::{GoogleTranslateClient, LibreTranslateClient};
//!
//! let google = GoogleTranslateClient::new(api_key);
//! let result = google.translate_with_detection("Bài làm rất tốt", "en").await?;
//! println!("{} (from {:?})", result.text, result.detected_source);
//!
//! let libre = LibreTranslateClient::new().with_base_url("http://localhost:5000");
//! let result = libre.translate("Bài làm rất tốt", "en").await?;
//! ```

pub mod error;
pub mod google;
pub mod libre;
pub mod types;

pub use error::{ClientError, Result};
pub use google::GoogleTranslateClient;
pub use libre::LibreTranslateClient;
pub use types::Translated;
