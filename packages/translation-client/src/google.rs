//! Google Cloud Translation (v2, Basic) client.
//!
//! Authenticates with an API key passed as the `key` query parameter.

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::types::{
    GoogleDetectRequest, GoogleDetections, GoogleResponse, GoogleTranslateRequest,
    GoogleTranslations, Translated,
};

const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Minimal Google Cloud Translation REST client.
#[derive(Clone)]
pub struct GoogleTranslateClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleTranslateClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (proxy, test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate `text` into `target`.
    pub async fn translate(&self, text: &str, target: &str) -> Result<Translated> {
        let request = GoogleTranslateRequest {
            q: text.to_string(),
            target: target.to_string(),
            format: "text".to_string(),
        };

        let response: GoogleResponse<GoogleTranslations> =
            self.post(&self.base_url, &request).await?;

        let translation = response
            .data
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Parse("No translations in response".into()))?;

        Ok(Translated {
            text: translation.translated_text,
            detected_source: translation.detected_source_language,
        })
    }

    /// Detect the language of `text`, returning the most likely language code.
    pub async fn detect(&self, text: &str) -> Result<String> {
        let request = GoogleDetectRequest { q: text.to_string() };
        let url = format!("{}/detect", self.base_url);

        let response: GoogleResponse<GoogleDetections> = self.post(&url, &request).await?;

        response
            .data
            .detections
            .into_iter()
            .next()
            .and_then(|candidates| candidates.into_iter().next())
            .map(|d| d.language)
            .ok_or_else(|| ClientError::Parse("No detections in response".into()))
    }

    /// Translate and detect concurrently.
    ///
    /// A failed detection is not an error: the translation's own
    /// `detectedSourceLanguage` is used instead, if any.
    pub async fn translate_with_detection(&self, text: &str, target: &str) -> Result<Translated> {
        let (translated, detected) = tokio::join!(self.translate(text, target), self.detect(text));

        let mut translated = translated?;
        match detected {
            Ok(language) => translated.detected_source = Some(language),
            Err(e) => warn!(error = %e, "Language detection failed"),
        }

        Ok(translated)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        debug!(url = %url, "Google Translate request");

        let response = self
            .http_client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Google Translate request failed");
                ClientError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Google Translate API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

impl std::fmt::Debug for GoogleTranslateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_not_in_debug() {
        let client = GoogleTranslateClient::new("AIza-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("AIza-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
