//! The Pipeline - main entry point for a harvest run.
//!
//! One run visits `Navigate → Extract → Translate → Persist → Done`, with an
//! early exit from `Extract` straight to `Done` when the report holds no
//! comments. Only a failure to acquire the document is returned as an error;
//! every other failure is folded into the [`RunReport`].
//!
//! The document session is closed exactly once on every path.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::Extractor;
use crate::persist::{unused_artifact_base, ReportWriter};
use crate::traits::{
    source::{DocumentSession, DocumentSource},
    translator::Translator,
};
use crate::types::{
    config::HarvestConfig,
    outcome::{RunReport, RunStatus, Stage},
    record::CommentRecord,
};

/// Orchestrates extraction, translation, and persistence.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::with_config(translator, HarvestConfig::from_env()?);
/// let report = pipeline.run(&SnapshotSource::new("report.html")).await?;
/// println!("{} comments, status {:?}", report.comment_count(), report.status);
/// ```
pub struct Pipeline<T: Translator> {
    translator: T,
    extractor: Extractor,
    writer: ReportWriter,
    config: HarvestConfig,
}

impl<T: Translator> Pipeline<T> {
    /// Create a pipeline with the default configuration.
    pub fn new(translator: T) -> Self {
        Self::with_config(translator, HarvestConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(translator: T, config: HarvestConfig) -> Self {
        Self {
            translator,
            extractor: Extractor::new(config.extractor.clone()),
            writer: ReportWriter::new(config.output_format),
            config,
        }
    }

    /// Run once against `source`.
    pub async fn run(&self, source: &dyn DocumentSource) -> Result<RunReport> {
        let mut report = RunReport::new(Utc::now());
        report.enter(Stage::Navigate);

        info!(source = source.name(), "Opening document source");
        let mut session = source.open().await?;

        let outcome = self.run_session(session.as_mut(), report).await;

        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close document session");
        }

        outcome
    }

    async fn run_session(
        &self,
        session: &mut dyn DocumentSession,
        mut report: RunReport,
    ) -> Result<RunReport> {
        // 1. Load the report view
        let page = session.load_report().await?;
        if !page.has_content() {
            warn!(location = %page.location, "Loaded report view is empty");
        }

        // 2. Extract
        report.enter(Stage::Extract);
        let mut records = match self.extractor.extract_html(&page.html) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Extraction failed");
                return Ok(report.finish(RunStatus::ExtractionFailed {
                    reason: e.to_string(),
                }));
            }
        };

        if records.is_empty() {
            info!(location = %page.location, "No comments found, nothing to translate or save");
            return Ok(report.finish(RunStatus::NoComments));
        }

        // 3. Translate
        report.enter(Stage::Translate);
        let (translated, fallbacks) = self.translate_all(&mut records).await;
        report.translated = translated;
        report.fallbacks = fallbacks;

        // 4. Persist
        report.enter(Stage::Persist);
        let captured_at = Utc::now();
        let base = unused_artifact_base(&self.config.output_directory, captured_at);
        debug!(base = %base.display(), format = ?self.writer.format(), "Saving results");
        let status = match self.writer.save_at(&records, &base, captured_at) {
            Ok(artifacts) => {
                report.artifacts = artifacts;
                RunStatus::Completed
            }
            Err(e) => {
                warn!(error = %e, "Failed to save results");
                report.artifacts = e.written().to_vec();
                RunStatus::PersistenceFailed {
                    reason: e.to_string(),
                    written: e.written().to_vec(),
                }
            }
        };

        report.records = records;
        info!(
            comments = report.records.len(),
            translated = report.translated,
            fallbacks = report.fallbacks,
            artifacts = report.artifacts.len(),
            "Harvest run finished"
        );

        Ok(report.finish(status))
    }

    /// Translate every record in order, one call at a time.
    ///
    /// Returns `(translated, fallbacks)`. A failed record keeps its original
    /// text and never affects the next one.
    async fn translate_all(&self, records: &mut [CommentRecord]) -> (usize, usize) {
        let target = self.config.target_language;
        let delay = self.config.translation_delay;
        let total = records.len();
        let mut translated = 0;
        let mut fallbacks = 0;

        info!(
            count = total,
            target = %target,
            provider = self.translator.name(),
            "Translating comments"
        );

        for (i, record) in records.iter_mut().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let outcome = self
                .translator
                .translate(record.original_comment(), target)
                .await;

            match outcome {
                Ok(result) => {
                    debug!(
                        index = i + 1,
                        total,
                        student = record.student_name(),
                        detected = result.detected_language.as_deref().unwrap_or("unknown"),
                        changed = result.changed(),
                        "Comment translated"
                    );
                    record.apply_translation(result);
                    translated += 1;
                }
                Err(e) => {
                    warn!(
                        index = i + 1,
                        total,
                        student = record.student_name(),
                        error = %e,
                        rate_limited = e.is_rate_limited(),
                        "Translation failed, keeping original text"
                    );
                    record.fall_back_to_original();
                    fallbacks += 1;
                }
            }
        }

        (translated, fallbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::testing::{MockSource, MockTranslator};
    use crate::types::{config::OutputFormat, language::Language};
    use std::time::Duration;
    use tokio::time::Instant;

    const JANE_DOE: &str = r#"
        <html><body>
          <div class="student-row">
            <span class="student-name">Jane Doe</span>
            <p class="comment-text">Excellent work!</p>
          </div>
        </body></html>
    "#;

    const THREE_COMMENTS: &str = r#"
        <div class="student-row"><span class="student-name">An</span><p class="comment-text">First comment</p></div>
        <div class="student-row"><span class="student-name">Binh</span><p class="comment-text">Second comment</p></div>
        <div class="student-row"><span class="student-name">Chi</span><p class="comment-text">Third comment</p></div>
    "#;

    fn config(dir: &std::path::Path) -> HarvestConfig {
        HarvestConfig::default()
            .with_target_language(Language::Vi)
            .with_output_directory(dir)
            .with_translation_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_single_comment_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let translator = MockTranslator::suffix(" [vi]");
        let source = MockSource::with_html(JANE_DOE);

        let pipeline = Pipeline::with_config(translator.clone(), config(dir.path()));
        let report = pipeline.run(&source).await.unwrap();

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.comment_count(), 1);
        assert_eq!(report.records[0].student_name(), "Jane Doe");
        assert_eq!(report.records[0].translated_comment(), Some("Excellent work! [vi]"));
        assert_eq!(report.translated, 1);
        assert_eq!(translator.calls()[0].target, Language::Vi);

        assert_eq!(report.artifacts.len(), 2);
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report.artifacts[0]).unwrap()).unwrap();
        assert_eq!(json["totalComments"], 1);
        assert_eq!(json["comments"][0]["translatedComment"], "Excellent work! [vi]");

        assert_eq!(
            report.stages,
            vec![Stage::Navigate, Stage::Extract, Stage::Translate, Stage::Persist, Stage::Done]
        );
        assert_eq!(source.state().closed, 1);
    }

    #[tokio::test]
    async fn test_failed_translation_degrades_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let translator = MockTranslator::suffix(" [vi]").fail_on("Second comment");
        let source = MockSource::with_html(THREE_COMMENTS);

        let report = Pipeline::with_config(translator, config(dir.path()))
            .run(&source)
            .await
            .unwrap();

        let outputs: Vec<_> = report.records.iter().map(|r| r.output_comment()).collect();
        assert_eq!(
            outputs,
            vec!["First comment [vi]", "Second comment", "Third comment [vi]"]
        );
        assert_eq!((report.translated, report.fallbacks), (2, 1));
        assert_eq!(report.status, RunStatus::Completed);
    }

    #[tokio::test]
    async fn test_every_translation_failing_still_completes() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource::with_html(THREE_COMMENTS);

        let report = Pipeline::with_config(MockTranslator::failing(), config(dir.path()))
            .run(&source)
            .await
            .unwrap();

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.fallbacks, 3);
        for record in &report.records {
            assert_eq!(record.translated_comment(), Some(record.original_comment()));
        }
    }

    #[tokio::test]
    async fn test_no_comments_skips_translation_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        let translator = MockTranslator::suffix(" [vi]");
        let source = MockSource::with_html("<html><body><h1>Report</h1></body></html>");

        let report = Pipeline::with_config(translator.clone(), config(&out))
            .run(&source)
            .await
            .unwrap();

        assert_eq!(report.status, RunStatus::NoComments);
        assert_eq!(report.stages, vec![Stage::Navigate, Stage::Extract, Stage::Done]);
        assert_eq!(translator.call_count(), 0);
        assert!(!out.exists());
        assert_eq!(source.state().closed, 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_error_and_session_closed() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource::with_html(JANE_DOE).failing_load();

        let err = Pipeline::with_config(MockTranslator::suffix(""), config(dir.path()))
            .run(&source)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Source(_)));
        let state = source.state();
        assert_eq!((state.opened, state.closed), (1, 1));
    }

    #[tokio::test]
    async fn test_open_failure_is_error() {
        let source = MockSource::with_html(JANE_DOE).failing_open();
        let result = Pipeline::new(MockTranslator::suffix("")).run(&source).await;

        assert!(result.is_err());
        assert_eq!(source.state().closed, 0);
    }

    #[tokio::test]
    async fn test_invalid_selector_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.extractor.comment_selectors = vec!["div[[".to_string()];
        let source = MockSource::with_html(JANE_DOE);

        let report = Pipeline::with_config(MockTranslator::suffix(""), cfg)
            .run(&source)
            .await
            .unwrap();

        assert!(matches!(report.status, RunStatus::ExtractionFailed { .. }));
        assert!(!report.visited(Stage::Translate));
        assert_eq!(source.state().closed, 1);
    }

    #[tokio::test]
    async fn test_persistence_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();
        let source = MockSource::with_html(JANE_DOE);

        let report = Pipeline::with_config(MockTranslator::suffix(" [vi]"), config(&blocked))
            .run(&source)
            .await
            .unwrap();

        assert!(matches!(report.status, RunStatus::PersistenceFailed { .. }));
        assert!(!report.is_success());
        assert_eq!(report.records.len(), 1);
        assert_eq!(source.state().closed, 1);
    }

    #[tokio::test]
    async fn test_json_only_format() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path()).with_output_format(OutputFormat::Json);

        let report = Pipeline::with_config(MockTranslator::suffix(" [vi]"), cfg)
            .run(&MockSource::with_html(JANE_DOE))
            .await
            .unwrap();

        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].extension().unwrap(), "json");
    }

    #[tokio::test]
    async fn test_back_to_back_runs_keep_both_artifact_sets() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource::with_html(JANE_DOE);

        let pipeline = Pipeline::with_config(MockTranslator::suffix(" [vi]"), config(dir.path()));
        let first = pipeline.run(&source).await.unwrap();
        let second = pipeline.run(&source).await.unwrap();

        assert_eq!(first.artifacts.len(), 2);
        assert_eq!(second.artifacts.len(), 2);
        assert!(first.artifacts.iter().all(|p| !second.artifacts.contains(p)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_translation_calls_are_paced() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path()).with_translation_delay(Duration::from_secs(1));
        let translator = MockTranslator::suffix(" [vi]");
        let start = Instant::now();

        Pipeline::with_config(translator.clone(), cfg)
            .run(&MockSource::with_html(THREE_COMMENTS))
            .await
            .unwrap();

        let calls = translator.calls();
        assert_eq!(calls.len(), 3);
        // No delay before the first call
        assert!(calls[0].at.duration_since(start) < Duration::from_secs(1));
        for pair in calls.windows(2) {
            assert!(pair[1].at.duration_since(pair[0].at) >= Duration::from_secs(1));
        }
    }
}
