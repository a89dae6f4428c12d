//! JSON artifact: `{ timestamp, totalComments, comments: [...] }`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PersistenceError, PersistenceResult};
use crate::types::record::CommentRecord;

/// Top-level JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsDocument {
    /// When the result set was captured
    pub timestamp: DateTime<Utc>,

    /// Always equal to `comments.len()`
    pub total_comments: usize,

    pub comments: Vec<CommentRecord>,
}

impl CommentsDocument {
    /// Build a document, filling any missing translation with the original.
    pub fn new(records: &[CommentRecord], timestamp: DateTime<Utc>) -> Self {
        let comments: Vec<CommentRecord> = records.iter().map(CommentRecord::finalized).collect();
        Self {
            timestamp,
            total_comments: comments.len(),
            comments,
        }
    }
}

/// Write `document` as pretty-printed JSON to `path`.
pub fn write_json(path: &Path, document: &CommentsDocument) -> PersistenceResult<()> {
    let file = File::create(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.flush().map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_matches_comments_and_translations_filled() {
        let records = vec![
            CommentRecord::new("A", "One").unwrap().with_translation("Một"),
            CommentRecord::new("B", "Two").unwrap(),
        ];
        let document = CommentsDocument::new(&records, Utc::now());

        assert_eq!(document.total_comments, 2);
        assert_eq!(document.comments[0].translated_comment(), Some("Một"));
        assert_eq!(document.comments[1].translated_comment(), Some("Two"));
    }

    #[test]
    fn test_top_level_keys() {
        let document = CommentsDocument::new(&[], Utc::now());
        let json = serde_json::to_value(&document).unwrap();

        assert!(json.get("timestamp").is_some());
        assert_eq!(json["totalComments"], 0);
        assert!(json["comments"].as_array().unwrap().is_empty());
    }
}
