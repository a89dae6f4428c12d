//! Translator trait for pluggable translation providers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::TranslationError;
use crate::types::{language::Language, record::TranslationResult};

/// Text-to-text translation strategy.
///
/// Implementations wrap a specific provider and report failures as
/// [`TranslationError`]. Deciding what a failure means for the run is the
/// caller's job; the pipeline degrades to the original text.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`.
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError>;

    /// Provider name (for logging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Arc<T> {
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError> {
        (**self).translate(text, target).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Translator + ?Sized> Translator for Box<T> {
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError> {
        (**self).translate(text, target).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
