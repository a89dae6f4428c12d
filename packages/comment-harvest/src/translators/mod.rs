//! Translator implementations.
//!
//! - [`GoogleTranslator`] - Google Cloud Translation (API key required)
//! - [`LibreTranslator`] - LibreTranslate (public or self-hosted)
//! - [`FallbackTranslator`] - primary provider with a secondary on failure

pub mod fallback;
pub mod google;
pub mod libre;

pub use fallback::FallbackTranslator;
pub use google::GoogleTranslator;
pub use libre::LibreTranslator;

use translation_client::{GoogleTranslateClient, LibreTranslateClient};

use crate::error::TranslationError;
use crate::security::ProviderSettings;
use crate::traits::translator::Translator;
use crate::types::config::{HarvestConfig, TranslationService};

/// Build the translator for one service.
pub fn build_translator(
    service: TranslationService,
    settings: &ProviderSettings,
) -> Result<Box<dyn Translator>, TranslationError> {
    match service {
        TranslationService::Google => {
            let key = settings.google_api_key.as_ref().ok_or_else(|| {
                TranslationError::MissingCredentials {
                    provider: "google".to_string(),
                    reason: "GOOGLE_TRANSLATE_API_KEY is not set".to_string(),
                }
            })?;

            let mut client = GoogleTranslateClient::new(key.expose());
            if let Some(url) = &settings.google_base_url {
                client = client.with_base_url(url.as_str());
            }
            Ok(Box::new(GoogleTranslator::new(client)))
        }
        TranslationService::Libre => {
            let mut client = LibreTranslateClient::new();
            if let Some(url) = &settings.libre_base_url {
                client = client.with_base_url(url.as_str());
            }
            if let Some(key) = &settings.libre_api_key {
                client = client.with_api_key(key.expose());
            }
            Ok(Box::new(LibreTranslator::new(client)))
        }
    }
}

/// Build the configured translator, chaining the fallback service if set.
pub fn translator_for(
    config: &HarvestConfig,
    settings: &ProviderSettings,
) -> Result<Box<dyn Translator>, TranslationError> {
    let primary = build_translator(config.translation_service, settings)?;

    match config.fallback_service {
        Some(fallback) if fallback != config.translation_service => {
            let secondary = build_translator(fallback, settings)?;
            Ok(Box::new(FallbackTranslator::new(primary, secondary)))
        }
        _ => Ok(primary),
    }
}
