//! Persistence of result sets.
//!
//! One in-memory result set is written to up to two sibling artifacts that
//! share a base name: `<base>.json` and `<base>.csv`. Writes are not
//! transactional. JSON goes first; if CSV then fails, the JSON file stays on
//! disk and the error reports it.

pub mod csv;
pub mod json;

pub use self::csv::{write_csv, write_records, CSV_HEADERS};
pub use self::json::{write_json, CommentsDocument};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{PersistenceError, PersistenceResult};
use crate::types::{config::OutputFormat, record::CommentRecord};

/// Writes result sets in the configured formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    format: OutputFormat,
}

impl ReportWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write `records` next to `base`, returning the artifacts written.
    ///
    /// The parent directory of `base` is created if missing.
    pub fn save(&self, records: &[CommentRecord], base: &Path) -> PersistenceResult<Vec<PathBuf>> {
        self.save_at(records, base, Utc::now())
    }

    /// Like [`save`](Self::save) with an explicit capture timestamp.
    pub fn save_at(
        &self,
        records: &[CommentRecord],
        base: &Path,
        captured_at: DateTime<Utc>,
    ) -> PersistenceResult<Vec<PathBuf>> {
        if let Some(dir) = base.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| PersistenceError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut written = Vec::new();

        if self.format.includes_json() {
            let path = base.with_extension("json");
            let document = CommentsDocument::new(records, captured_at);
            write_json(&path, &document).map_err(|e| partial(&written, e))?;
            info!(path = %path.display(), comments = records.len(), "JSON written");
            written.push(path);
        }

        if self.format.includes_csv() {
            let path = base.with_extension("csv");
            write_csv(&path, records).map_err(|e| partial(&written, e))?;
            info!(path = %path.display(), comments = records.len(), "CSV written");
            written.push(path);
        }

        Ok(written)
    }
}

fn partial(written: &[PathBuf], error: PersistenceError) -> PersistenceError {
    if written.is_empty() {
        return error;
    }
    warn!(written = written.len(), error = %error, "Write failed after earlier artifacts");
    PersistenceError::Partial {
        written: written.to_vec(),
        source: Box::new(error),
    }
}

/// Base path for a run's artifacts:
/// `<dir>/translated-comments-<YYYYMMDD-HHMMSS-mmm>`.
pub fn artifact_base(dir: &Path, captured_at: DateTime<Utc>) -> PathBuf {
    dir.join(format!(
        "translated-comments-{}",
        captured_at.format("%Y%m%d-%H%M%S-%3f")
    ))
}

/// Like [`artifact_base`], with a `-N` suffix when an artifact of that name
/// is already on disk, so back-to-back runs never overwrite each other.
pub fn unused_artifact_base(dir: &Path, captured_at: DateTime<Utc>) -> PathBuf {
    let base = artifact_base(dir, captured_at);
    let taken = |b: &Path| b.with_extension("json").exists() || b.with_extension("csv").exists();
    if !taken(&base) {
        return base;
    }

    let stem = base.to_string_lossy().into_owned();
    (1..)
        .map(|n| PathBuf::from(format!("{}-{}", stem, n)))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}
