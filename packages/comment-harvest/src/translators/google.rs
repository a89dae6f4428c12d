//! Google Cloud Translation strategy.

use async_trait::async_trait;
use translation_client::GoogleTranslateClient;

use crate::error::TranslationError;
use crate::traits::translator::Translator;
use crate::types::{language::Language, record::TranslationResult};

/// Paid, authoritative translation with source-language detection.
pub struct GoogleTranslator {
    client: GoogleTranslateClient,
}

impl GoogleTranslator {
    pub fn new(client: GoogleTranslateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError> {
        let translated = self
            .client
            .translate_with_detection(text, target.code())
            .await
            .map_err(|source| TranslationError::Provider {
                provider: self.name().to_string(),
                source,
            })?;

        let mut result = TranslationResult::new(text, translated.text);
        if let Some(language) = translated.detected_source {
            result = result.with_detected_language(language);
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "google"
    }
}
