use serde::{Deserialize, Serialize};

/// Request body for LibreTranslate `POST /translate`.
#[derive(Debug, Clone, Serialize)]
pub struct LibreTranslateRequest {
    pub q: String,
    pub source: String,
    pub target: String,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Response body for LibreTranslate `POST /translate`.
#[derive(Debug, Clone, Deserialize)]
pub struct LibreTranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    #[serde(rename = "detectedLanguage")]
    pub detected_language: Option<LibreDetectedLanguage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibreDetectedLanguage {
    pub language: String,
    pub confidence: Option<f64>,
}

/// Error body returned by LibreTranslate on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct LibreErrorResponse {
    pub error: String,
}

/// Request body for Google Cloud Translation v2 `translate`.
#[derive(Debug, Clone, Serialize)]
pub struct GoogleTranslateRequest {
    pub q: String,
    pub target: String,
    pub format: String,
}

/// Request body for Google Cloud Translation v2 `detect`.
#[derive(Debug, Clone, Serialize)]
pub struct GoogleDetectRequest {
    pub q: String,
}

/// Wrapper for Google Translation v2 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTranslations {
    pub translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTranslation {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
    #[serde(rename = "detectedSourceLanguage")]
    pub detected_source_language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleDetections {
    /// One list of candidate detections per input string.
    pub detections: Vec<Vec<GoogleDetection>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleDetection {
    pub language: String,
    pub confidence: Option<f64>,
    #[serde(rename = "isReliable")]
    pub is_reliable: Option<bool>,
}

/// A translated string with the provider's view of the source language.
#[derive(Debug, Clone, PartialEq)]
pub struct Translated {
    pub text: String,
    pub detected_source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libre_request_omits_missing_api_key() {
        let request = LibreTranslateRequest {
            q: "Xin chào".into(),
            source: "auto".into(),
            target: "en".into(),
            format: "text".into(),
            api_key: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"q": "Xin chào", "source": "auto", "target": "en", "format": "text"})
        );
    }

    #[test]
    fn test_google_detections_parse() {
        let body = r#"{"data":{"detections":[[{"language":"vi","confidence":0.98,"isReliable":false}]]}}"#;
        let parsed: GoogleResponse<GoogleDetections> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.detections[0][0].language, "vi");
        assert_eq!(parsed.data.detections[0][0].is_reliable, Some(false));
    }
}
