//! End-to-end pipeline runs against a saved report and mock providers.

use std::path::PathBuf;
use std::time::Duration;

use comment_harvest::persist::{CommentsDocument, CSV_HEADERS};
use comment_harvest::testing::{MockSource, MockTranslator};
use comment_harvest::{
    FallbackTranslator, HarvestConfig, Language, Pipeline, RunStatus, SnapshotSource, Stage,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn config(output: &std::path::Path) -> HarvestConfig {
    HarvestConfig::default()
        .with_target_language(Language::Vi)
        .with_output_directory(output)
        .with_translation_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_snapshot_report_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let translator = MockTranslator::suffix(" [vi]");
    let source = SnapshotSource::new(fixture("gradebook_report.html"));

    let report = Pipeline::with_config(translator.clone(), config(dir.path()))
        .run(&source)
        .await
        .unwrap();

    assert_eq!(report.status, RunStatus::Completed);
    assert!(report.visited(Stage::Persist));

    // Selector pass in selector order, then table rows
    let names: Vec<_> = report.records.iter().map(|r| r.student_name()).collect();
    assert_eq!(
        names,
        vec!["Tran Thi Binh", "Student 1", "Nguyen Van An", "Le Van Cuong"]
    );
    assert_eq!(
        report.records[2].original_comment(),
        "Excellent progress in reading comprehension this term."
    );
    assert_eq!(translator.call_count(), 4);
    assert_eq!(report.translated, 4);
}

#[tokio::test]
async fn test_artifacts_match_records() {
    let dir = tempfile::tempdir().unwrap();
    let source = SnapshotSource::new(fixture("gradebook_report.html"));

    let report = Pipeline::with_config(MockTranslator::suffix(" [vi]"), config(dir.path()))
        .run(&source)
        .await
        .unwrap();

    let json_path = report
        .artifacts
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "json"))
        .unwrap();
    let csv_path = report
        .artifacts
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "csv"))
        .unwrap();

    assert_eq!(json_path.file_stem(), csv_path.file_stem());
    assert!(json_path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("translated-comments-"));

    let document: CommentsDocument =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(document.total_comments, document.comments.len());
    assert_eq!(document.comments, report.records);

    let mut reader = csv::Reader::from_path(csv_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), report.records.len());
    assert_eq!(&rows[0][0], "Tran Thi Binh");
    assert_eq!(&rows[0][2], "Needs to review multiplication tables. [vi]");
}

#[tokio::test]
async fn test_duplicates_kept_unless_deduplicated() {
    let html = r#"
        <table>
          <tr><td class="student-name">Jane Doe</td><td class="comment-text">Consistently strong essays</td></tr>
        </table>
    "#;
    let dir = tempfile::tempdir().unwrap();

    let report = Pipeline::with_config(MockTranslator::suffix(""), config(dir.path()))
        .run(&MockSource::with_html(html))
        .await
        .unwrap();
    assert_eq!(report.comment_count(), 2);

    let mut deduped = config(dir.path());
    deduped.extractor.deduplicate = true;
    let report = Pipeline::with_config(MockTranslator::suffix(""), deduped)
        .run(&MockSource::with_html(html))
        .await
        .unwrap();
    assert_eq!(report.comment_count(), 1);
    assert_eq!(report.records[0].student_name(), "Jane Doe");
}

#[tokio::test]
async fn test_fallback_provider_used_when_primary_down() {
    let dir = tempfile::tempdir().unwrap();
    let primary = MockTranslator::failing().named("google");
    let secondary = MockTranslator::suffix(" [libre]").named("libre");
    let translator = FallbackTranslator::new(primary.clone(), secondary.clone());

    let report = Pipeline::with_config(translator, config(dir.path()))
        .run(&SnapshotSource::new(fixture("gradebook_report.html")))
        .await
        .unwrap();

    assert_eq!(report.fallbacks, 0);
    assert!(report
        .records
        .iter()
        .all(|r| r.output_comment().ends_with(" [libre]")));
    assert_eq!(primary.call_count(), 4);
    assert_eq!(secondary.call_count(), 4);
}

#[tokio::test]
async fn test_missing_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Pipeline::with_config(MockTranslator::suffix(""), config(dir.path()))
        .run(&SnapshotSource::new(fixture("does_not_exist.html")))
        .await;

    assert!(result.is_err());
}
