//! Tabular fallback extraction pass.
//!
//! Treats the first cell of a row as the name and the last cell as the
//! comment. Short and purely numeric comment cells are rejected so grade
//! columns are not mistaken for feedback.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::error::ExtractionResult;
use crate::traits::scanner::DocumentScanner;
use crate::types::record::CommentRecord;

lazy_static! {
    static ref NUMERIC: Regex =
        Regex::new(r"^[+-]?\d+(?:[.,]\d+)*%?$").expect("numeric pattern is valid");
}

/// Whether `text` is a bare number such as `87.5`, `1,000` or `92%`.
pub fn is_numeric(text: &str) -> bool {
    NUMERIC.is_match(text.trim())
}

/// Emit one record per table row that looks like (name, ..., comment).
pub fn table_pass<S: DocumentScanner + ?Sized>(
    scanner: &S,
    min_comment_chars: usize,
) -> ExtractionResult<Vec<CommentRecord>> {
    let rows = scanner.table_rows()?;
    let mut records = Vec::new();

    for (index, cells) in rows.iter().enumerate() {
        if cells.len() < 2 {
            continue;
        }

        let name = cells[0].trim();
        let comment = cells[cells.len() - 1].trim();

        if name.is_empty() || comment.chars().count() <= min_comment_chars || is_numeric(comment) {
            trace!(row = index, "Row rejected");
            continue;
        }

        if let Some(record) = CommentRecord::new(name, comment) {
            records.push(record);
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeScanner;

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("87.5"));
        assert!(is_numeric(" 100 "));
        assert!(is_numeric("-3"));
        assert!(is_numeric("1,234.50"));
        assert!(is_numeric("92%"));
        assert!(!is_numeric("Great improvement, 87.5% overall"));
        assert!(!is_numeric("A+"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn test_accepts_name_and_long_comment() {
        let scanner = FakeScanner::new().with_row(["Jane Doe", "9", "Great improvement, 87.5% overall"]);
        let records = table_pass(&scanner, 10).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_name(), "Jane Doe");
        assert_eq!(records[0].original_comment(), "Great improvement, 87.5% overall");
    }

    #[test]
    fn test_rejects_numeric_short_and_nameless_rows() {
        let scanner = FakeScanner::new()
            .with_row(["Jane Doe", "87.5"])
            .with_row(["Jane Doe", "12345678.901"])
            .with_row(["Jane Doe", "Good work"])
            .with_row(["   ", "A perfectly long comment"])
            .with_row(["Single cell with a long comment"]);

        let records = table_pass(&scanner, 10).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_length_threshold_is_strict() {
        let scanner = FakeScanner::new()
            .with_row(["A", "exactly10!"])
            .with_row(["B", "eleven char"]);

        let records = table_pass(&scanner, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_name(), "B");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 9 characters, 27 bytes
        let scanner = FakeScanner::new().with_row(["Yuki", "とても良い努力です"]);
        let records = table_pass(&scanner, 10).unwrap();
        assert!(records.is_empty());
    }
}
