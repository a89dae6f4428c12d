//! Run outcomes reported by the pipeline.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

use crate::types::record::CommentRecord;

/// Pipeline stages, in the order a full run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Navigate,
    Extract,
    Translate,
    Persist,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Navigate => "navigate",
            Stage::Extract => "extract",
            Stage::Translate => "translate",
            Stage::Persist => "persist",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Comments were extracted, translated, and written.
    Completed,

    /// The document was scanned and held no comments.
    NoComments,

    /// Scanning the document failed; nothing was translated or written.
    ExtractionFailed { reason: String },

    /// Writing artifacts failed; `written` lists what reached disk anyway.
    PersistenceFailed {
        reason: String,
        written: Vec<PathBuf>,
    },
}

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,

    /// Final records, in extraction order, with translations applied.
    pub records: Vec<CommentRecord>,

    /// Records whose translation came from a provider.
    pub translated: usize,

    /// Records that fell back to their original text.
    pub fallbacks: usize,

    /// Artifacts written to disk.
    pub artifacts: Vec<PathBuf>,

    /// Stages visited, in order.
    pub stages: Vec<Stage>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub(crate) fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            status: RunStatus::NoComments,
            records: Vec::new(),
            translated: 0,
            fallbacks: 0,
            artifacts: Vec::new(),
            stages: Vec::new(),
            started_at,
            finished_at: started_at,
        }
    }

    pub(crate) fn enter(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub(crate) fn finish(mut self, status: RunStatus) -> Self {
        self.status = status;
        self.stages.push(Stage::Done);
        self.finished_at = Utc::now();
        self
    }

    /// Whether the run wrote its artifacts, or legitimately had nothing to write.
    pub fn is_success(&self) -> bool {
        matches!(self.status, RunStatus::Completed | RunStatus::NoComments)
    }

    pub fn comment_count(&self) -> usize {
        self.records.len()
    }

    /// Whether a stage was visited.
    pub fn visited(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }
}
