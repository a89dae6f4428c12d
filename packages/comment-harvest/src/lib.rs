//! Student Feedback Comment Harvester
//!
//! Pulls teacher-written feedback out of a gradebook report view, translates
//! each comment into a target language, and saves the results as JSON and
//! CSV artifacts.
//!
//! # Design Philosophy
//!
//! - Extraction is heuristic and runs over an abstract document, so it can be
//!   tested without a browser
//! - Translation is best-effort: a failed call keeps the original text
//! - Runs report typed outcomes instead of swallowing errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use comment_harvest::{HarvestConfig, Pipeline, SnapshotSource};
//! use comment_harvest::testing::MockTranslator;
//!
//! let pipeline = Pipeline::with_config(MockTranslator::suffix(" [vi]"), HarvestConfig::default());
//! let report = pipeline.run(&SnapshotSource::new("report.html")).await?;
//!
//! for record in &report.records {
//!     println!("{}: {}", record.student_name(), record.output_comment());
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (DocumentScanner, Translator, DocumentSource)
//! - [`types`] - Records, languages, configuration, run outcomes
//! - [`extract`] - Selector and table extraction passes
//! - [`translators`] - Google, LibreTranslate, and fallback strategies
//! - [`persist`] - JSON and CSV writers
//! - [`sources`] - Snapshot and HTTP document sources
//! - [`pipeline`] - Run orchestration
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod extract;
pub mod persist;
pub mod pipeline;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod translators;
pub mod types;

// Re-export core types at crate root
pub use error::{
    ConfigError, ExtractionError, PersistenceError, PipelineError, SourceError, TranslationError,
};
pub use traits::{
    scanner::{DocumentScanner, SelectorMatch},
    source::{DocumentSession, DocumentSource, LoadedPage},
    translator::Translator,
};
pub use types::{
    config::{
        ExtractorConfig, HarvestConfig, OutputFormat, TranslationService,
        DEFAULT_COMMENT_SELECTORS,
    },
    language::{Language, UnsupportedLanguage},
    outcome::{RunReport, RunStatus, Stage},
    record::{CommentRecord, TranslationResult},
};

pub use extract::{Extractor, HtmlScanner};
pub use persist::{artifact_base, unused_artifact_base, ReportWriter};
pub use pipeline::Pipeline;
pub use security::{LoginCredentials, ProviderSettings, SecretString};
pub use sources::{HttpSource, HttpSourceConfig, SnapshotSource};
pub use translators::{
    build_translator, translator_for, FallbackTranslator, GoogleTranslator, LibreTranslator,
};

// Re-export testing utilities
pub use testing::{FakeScanner, MockSource, MockTranslator};
