//! Comment extraction.
//!
//! Two independent passes run over the same document and their results are
//! concatenated, selector pass first:
//!
//! 1. [`selector_pass`] - configured CSS selectors, names resolved from the
//!    enclosing row/item.
//! 2. [`table_pass`] - every table row, first cell as name, last cell as
//!    comment.
//!
//! Both passes may report the same comment. Duplicates are kept unless
//! [`ExtractorConfig::deduplicate`] is set.

pub mod html;
pub mod selector_pass;
pub mod table_pass;

pub use html::HtmlScanner;
pub use selector_pass::{placeholder_name, selector_pass};
pub use table_pass::{is_numeric, table_pass};

use std::collections::HashSet;
use tracing::info;

use crate::error::ExtractionResult;
use crate::traits::scanner::DocumentScanner;
use crate::types::{config::ExtractorConfig, record::CommentRecord};

/// Runs both extraction passes over a document.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract comment records from any scanner.
    pub fn extract<S: DocumentScanner + ?Sized>(
        &self,
        scanner: &S,
    ) -> ExtractionResult<Vec<CommentRecord>> {
        let mut records = selector_pass(scanner, &self.config.comment_selectors)?;
        let selector_count = records.len();

        let table_records = table_pass(scanner, self.config.min_table_comment_chars)?;
        let table_count = table_records.len();
        records.extend(table_records);

        if self.config.deduplicate {
            records = dedupe(records);
        }

        info!(
            selector_records = selector_count,
            table_records = table_count,
            total = records.len(),
            deduplicated = self.config.deduplicate,
            "Extraction complete"
        );

        Ok(records)
    }

    /// Parse `html` and extract from it.
    pub fn extract_html(&self, html: &str) -> ExtractionResult<Vec<CommentRecord>> {
        let scanner = HtmlScanner::parse(html)?;
        self.extract(&scanner)
    }
}

/// Keep the first record for each (student name, comment) pair.
fn dedupe(records: Vec<CommentRecord>) -> Vec<CommentRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let (name, comment) = record.dedupe_key();
            seen.insert((name.to_string(), comment.to_string()))
        })
        .collect()
}
