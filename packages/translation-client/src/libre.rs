//! LibreTranslate client.
//!
//! Talks to any LibreTranslate-compatible server. The public instances accept
//! unauthenticated requests; self-hosted or paid instances may need an API key.

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::types::{LibreErrorResponse, LibreTranslateRequest, LibreTranslateResponse, Translated};

const DEFAULT_BASE_URL: &str = "https://libretranslate.com";

/// Minimal LibreTranslate REST client.
#[derive(Clone)]
pub struct LibreTranslateClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl Default for LibreTranslateClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LibreTranslateClient {
    /// Create a client pointing at the public LibreTranslate instance.
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Set a custom base URL (self-hosted instance, mirror, test server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key sent with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate `text` into `target`, letting the server detect the source.
    pub async fn translate(&self, text: &str, target: &str) -> Result<Translated> {
        let request = LibreTranslateRequest {
            q: text.to_string(),
            source: "auto".to_string(),
            target: target.to_string(),
            format: "text".to_string(),
            api_key: self.api_key.clone(),
        };

        let url = format!("{}/translate", self.base_url);
        debug!(url = %url, target, chars = text.len(), "LibreTranslate request");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "LibreTranslate request failed");
                ClientError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<LibreErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!(status = %status, error = %message, "LibreTranslate API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: LibreTranslateResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        Ok(Translated {
            text: parsed.translated_text,
            detected_source: parsed.detected_language.map(|d| d.language),
        })
    }
}
