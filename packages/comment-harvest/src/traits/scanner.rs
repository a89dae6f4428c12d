//! Document scanning abstraction.
//!
//! The extractor's heuristics never touch a DOM directly. They see a
//! [`DocumentScanner`], which answers two questions about a loaded page:
//! which elements match a set of selectors, and what text sits in each
//! table row. `HtmlScanner` answers them for parsed HTML; the testing module
//! has an in-memory fake.

use crate::error::ExtractionResult;

/// One element matched by the selector pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorMatch {
    /// The selector that matched this element.
    pub selector: String,

    /// 1-based position of the element in its selector's match list.
    pub position: usize,

    /// Raw text content of the element (untrimmed).
    pub text: String,

    /// Name found in the nearest enclosing row/item, if any.
    pub student_name: Option<String>,
}

impl SelectorMatch {
    pub fn new(selector: impl Into<String>, position: usize, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            position,
            text: text.into(),
            student_name: None,
        }
    }

    pub fn with_student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }
}

/// Read-only view of a rendered document.
pub trait DocumentScanner {
    /// Every element matching each selector, selector by selector, in
    /// document order within a selector.
    fn query_selectors(&self, selectors: &[String]) -> ExtractionResult<Vec<SelectorMatch>>;

    /// Cell texts of every table row, in document order.
    fn table_rows(&self) -> ExtractionResult<Vec<Vec<String>>>;
}
