//! LibreTranslate strategy.

use async_trait::async_trait;
use translation_client::LibreTranslateClient;

use crate::error::TranslationError;
use crate::traits::translator::Translator;
use crate::types::{language::Language, record::TranslationResult};

/// Free, best-effort translation with `source=auto` and no detection.
pub struct LibreTranslator {
    client: LibreTranslateClient,
}

impl LibreTranslator {
    pub fn new(client: LibreTranslateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError> {
        let translated = self
            .client
            .translate(text, target.code())
            .await
            .map_err(|source| TranslationError::Provider {
                provider: self.name().to_string(),
                source,
            })?;

        Ok(TranslationResult::new(text, translated.text))
    }

    fn name(&self) -> &str {
        "libre"
    }
}
