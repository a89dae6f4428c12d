//! Supported target languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target languages the tool can translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Vi,
    Es,
    Fr,
    De,
    Ja,
    Ko,
    Zh,
    Th,
    Id,
}

impl Language {
    const ALL: [Language; 10] = [
        Language::En,
        Language::Vi,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Ja,
        Language::Ko,
        Language::Zh,
        Language::Th,
        Language::Id,
    ];

    /// Every supported language, in display order.
    pub fn all() -> &'static [Language] {
        &Self::ALL
    }

    /// ISO 639-1 code sent to the translation providers.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Th => "th",
            Language::Id => "id",
        }
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Vi => "Vietnamese",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Zh => "Chinese",
            Language::Th => "Thai",
            Language::Id => "Indonesian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for codes outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code {0:?} (expected one of: en, vi, es, fr, de, ja, ko, zh, th, id)")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}
