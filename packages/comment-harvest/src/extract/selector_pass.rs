//! Selector-based extraction pass.

use tracing::debug;

use crate::error::ExtractionResult;
use crate::traits::scanner::DocumentScanner;
use crate::types::record::CommentRecord;

/// Emit one record per selector match with non-empty text.
///
/// Unnamed matches get `Student {n}`, where `n` is the match's 1-based
/// position within its selector.
pub fn selector_pass<S: DocumentScanner + ?Sized>(
    scanner: &S,
    selectors: &[String],
) -> ExtractionResult<Vec<CommentRecord>> {
    let matches = scanner.query_selectors(selectors)?;
    let mut records = Vec::with_capacity(matches.len());

    for found in matches {
        let name = found
            .student_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| placeholder_name(found.position));

        match CommentRecord::new(&name, &found.text) {
            Some(record) => records.push(record),
            None => debug!(selector = %found.selector, position = found.position, "Skipping empty match"),
        }
    }

    Ok(records)
}

/// Placeholder used when no name element is found.
pub fn placeholder_name(position: usize) -> String {
    format!("Student {}", position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeScanner;
    use crate::traits::scanner::SelectorMatch;

    #[test]
    fn test_placeholder_for_unnamed_matches() {
        let scanner = FakeScanner::new()
            .with_match(SelectorMatch::new(".comment-text", 1, "Well done").with_student_name("Jane Doe"))
            .with_match(SelectorMatch::new(".comment-text", 2, "Needs revision"));

        let records = selector_pass(&scanner, &[".comment-text".to_string()]).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].student_name(), "Jane Doe");
        assert_eq!(records[1].student_name(), "Student 2");
    }

    #[test]
    fn test_blank_name_falls_back_to_placeholder() {
        let scanner = FakeScanner::new()
            .with_match(SelectorMatch::new(".x", 3, "Text").with_student_name("   "));

        let records = selector_pass(&scanner, &[".x".to_string()]).unwrap();
        assert_eq!(records[0].student_name(), "Student 3");
    }

    #[test]
    fn test_empty_text_dropped_and_text_trimmed() {
        let scanner = FakeScanner::new()
            .with_match(SelectorMatch::new(".x", 1, "   \n\t "))
            .with_match(SelectorMatch::new(".x", 2, "\n  Tries hard  \n"));

        let records = selector_pass(&scanner, &[".x".to_string()]).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original_comment(), "Tries hard");
        assert_eq!(records[0].student_name(), "Student 2");
    }
}
