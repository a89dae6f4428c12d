//! Comment records and translation results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One student-feedback comment with its metadata.
///
/// Records are created by an extraction pass, enriched once by the
/// translation stage, and serialized once. The original text and capture
/// time cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    student_name: String,
    original_comment: String,
    #[serde(default)]
    translated_comment: Option<String>,
    timestamp: DateTime<Utc>,
}

impl CommentRecord {
    /// Create a record captured now.
    ///
    /// Both values are trimmed. Returns `None` when the comment is empty
    /// after trimming, since such records are never emitted.
    pub fn new(student_name: impl AsRef<str>, comment: impl AsRef<str>) -> Option<Self> {
        let original_comment = comment.as_ref().trim();
        if original_comment.is_empty() {
            return None;
        }

        Some(Self {
            student_name: student_name.as_ref().trim().to_string(),
            original_comment: original_comment.to_string(),
            translated_comment: None,
            timestamp: Utc::now(),
        })
    }

    /// Override the capture time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the translated text.
    pub fn with_translation(mut self, translated: impl Into<String>) -> Self {
        self.translated_comment = Some(translated.into());
        self
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn original_comment(&self) -> &str {
        &self.original_comment
    }

    pub fn translated_comment(&self) -> Option<&str> {
        self.translated_comment.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The text that goes to the output: the translation, or the original
    /// when no translation was recorded.
    pub fn output_comment(&self) -> &str {
        self.translated_comment
            .as_deref()
            .unwrap_or(&self.original_comment)
    }

    /// Whether a translation has been recorded (real or fallback).
    pub fn is_translated(&self) -> bool {
        self.translated_comment.is_some()
    }

    /// Fold a translation result into this record.
    pub fn apply_translation(&mut self, result: TranslationResult) {
        self.translated_comment = Some(result.translated);
    }

    /// Record the original text as the translation.
    pub fn fall_back_to_original(&mut self) {
        self.translated_comment = Some(self.original_comment.clone());
    }

    /// Copy with the translation slot guaranteed to be filled.
    pub fn finalized(&self) -> Self {
        let mut record = self.clone();
        if record.translated_comment.is_none() {
            record.fall_back_to_original();
        }
        record
    }

    /// Key used when duplicate records are collapsed.
    pub(crate) fn dedupe_key(&self) -> (&str, &str) {
        (&self.student_name, &self.original_comment)
    }
}

/// Outcome of translating one piece of text. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    pub detected_language: Option<String>,
}

impl TranslationResult {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            detected_language: None,
        }
    }

    /// A result that carries the original text through unchanged.
    pub fn untranslated(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            translated: text,
            detected_language: None,
        }
    }

    /// Set the detected source language.
    pub fn with_detected_language(mut self, language: impl Into<String>) -> Self {
        self.detected_language = Some(language.into());
        self
    }

    /// Whether the provider returned something different from the input.
    pub fn changed(&self) -> bool {
        self.original != self.translated
    }
}
