//! Configuration types for extraction, translation, and output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::language::Language;

/// Selectors that commonly wrap feedback text in gradebook reports.
pub const DEFAULT_COMMENT_SELECTORS: [&str; 6] = [
    ".comment-section",
    ".student-feedback",
    "[data-testid*=\"comment\"]",
    ".feedback-text",
    ".comment-text",
    ".student-comment",
];

/// Which translation provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationService {
    /// Google Cloud Translation (API key, source detection)
    Google,
    /// LibreTranslate (free, `source=auto`)
    #[default]
    Libre,
}

impl TranslationService {
    pub fn as_str(self) -> &'static str {
        match self {
            TranslationService::Google => "google",
            TranslationService::Libre => "libre",
        }
    }
}

impl fmt::Display for TranslationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(TranslationService::Google),
            "libre" => Ok(TranslationService::Libre),
            other => Err(format!("expected \"google\" or \"libre\", got {other:?}")),
        }
    }
}

/// Which artifacts the writer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn includes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "both" => Ok(OutputFormat::Both),
            other => Err(format!("expected \"json\", \"csv\" or \"both\", got {other:?}")),
        }
    }
}

/// Configuration for the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// CSS selectors for the selector-based pass, queried in order.
    pub comment_selectors: Vec<String>,

    /// Collapse records with the same (student name, comment).
    ///
    /// Off by default: the selector and table passes may both pick up the
    /// same comment and both records are kept.
    #[serde(default)]
    pub deduplicate: bool,

    /// Table-pass comments must be strictly longer than this (in chars).
    pub min_table_comment_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            comment_selectors: DEFAULT_COMMENT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            deduplicate: false,
            min_table_comment_chars: 10,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the comment selectors.
    pub fn with_selectors(mut self, selectors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.comment_selectors = selectors.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Enable or disable deduplication.
    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }
}

/// Top-level configuration for a harvest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Language comments are translated into. Default: English.
    pub target_language: Language,

    /// Primary translation provider. Default: LibreTranslate.
    pub translation_service: TranslationService,

    /// Provider consulted when the primary one fails.
    pub fallback_service: Option<TranslationService>,

    /// Artifacts to write. Default: JSON and CSV.
    pub output_format: OutputFormat,

    /// Directory for output artifacts, created if missing. Default: `./output`.
    pub output_directory: PathBuf,

    /// Extraction settings.
    pub extractor: ExtractorConfig,

    /// Pause between successive translation calls. Default: 1s.
    pub translation_delay: Duration,

    /// Wait after triggering the report load. Default: 3s.
    pub settle_delay: Duration,

    /// Browser visibility toggles. Not used by the pipeline itself.
    pub headless: bool,
    pub devtools: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            target_language: Language::En,
            translation_service: TranslationService::Libre,
            fallback_service: None,
            output_format: OutputFormat::Both,
            output_directory: PathBuf::from("./output"),
            extractor: ExtractorConfig::default(),
            translation_delay: Duration::from_secs(1),
            settle_delay: Duration::from_secs(3),
            headless: false,
            devtools: true,
        }
    }
}

impl HarvestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from `HARVEST_*` environment variables (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("HARVEST_LANGUAGE") {
            config.target_language =
                value.parse().map_err(|e: crate::types::language::UnsupportedLanguage| {
                    ConfigError::InvalidValue {
                        key: "HARVEST_LANGUAGE",
                        value: value.clone(),
                        reason: e.to_string(),
                    }
                })?;
        }

        if let Some(value) = lookup("HARVEST_TRANSLATION_SERVICE") {
            config.translation_service =
                value.parse().map_err(|reason| ConfigError::InvalidValue {
                    key: "HARVEST_TRANSLATION_SERVICE",
                    value: value.clone(),
                    reason,
                })?;
        }

        if let Some(value) = lookup("HARVEST_FALLBACK_SERVICE") {
            config.fallback_service =
                Some(value.parse().map_err(|reason| ConfigError::InvalidValue {
                    key: "HARVEST_FALLBACK_SERVICE",
                    value: value.clone(),
                    reason,
                })?);
        }

        if let Some(value) = lookup("HARVEST_OUTPUT_FORMAT") {
            config.output_format = value.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "HARVEST_OUTPUT_FORMAT",
                value: value.clone(),
                reason,
            })?;
        }

        if let Some(value) = lookup("HARVEST_OUTPUT_DIR") {
            config.output_directory = PathBuf::from(value);
        }

        if let Some(value) = lookup("HARVEST_TRANSLATION_DELAY_MS") {
            let ms: u64 = value.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "HARVEST_TRANSLATION_DELAY_MS",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.translation_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Set the target language.
    pub fn with_target_language(mut self, language: Language) -> Self {
        self.target_language = language;
        self
    }

    /// Set the primary translation service.
    pub fn with_translation_service(mut self, service: TranslationService) -> Self {
        self.translation_service = service;
        self
    }

    /// Set a fallback translation service.
    pub fn with_fallback_service(mut self, service: TranslationService) -> Self {
        self.fallback_service = Some(service);
        self
    }

    /// Set the output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the output directory.
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = dir.into();
        self
    }

    /// Set the extractor configuration.
    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the pause between translation calls.
    pub fn with_translation_delay(mut self, delay: Duration) -> Self {
        self.translation_delay = delay;
        self
    }

    /// Set the settle delay after report load.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}
