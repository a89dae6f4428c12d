//! `DocumentScanner` over parsed HTML, using the scraper crate.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ExtractionError, ExtractionResult};
use crate::traits::scanner::{DocumentScanner, SelectorMatch};

/// Ancestors that group one student's data (table row, list item, card).
const ROW_SELECTOR: &str =
    "tr, li, [role=\"row\"], [class*=\"row\"], [class*=\"item\"], [class*=\"student\"]";

/// Elements that hold a student's name inside a row.
const NAME_SELECTOR: &str = ".student-name, .name, [class*=\"name\"], [data-testid*=\"name\"]";

/// Scanner over a parsed HTML document.
///
/// `scraper::Html` is not `Send`, so build the scanner, scan, and drop it
/// without holding it across an `.await`.
pub struct HtmlScanner {
    document: Html,
    row_selector: Selector,
    name_selector: Selector,
}

impl HtmlScanner {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> ExtractionResult<Self> {
        Ok(Self {
            document: Html::parse_document(html),
            row_selector: compile(ROW_SELECTOR)?,
            name_selector: compile(NAME_SELECTOR)?,
        })
    }

    /// Find a name for `element` in its row/item ancestors, nearest first.
    ///
    /// Layout wrappers such as `flex-row` or `items-center` also match the
    /// row selector, so an ancestor without a name does not end the search.
    fn resolve_name(&self, element: ElementRef<'_>) -> Option<String> {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .filter(|ancestor| self.row_selector.matches(ancestor))
            .find_map(|row| self.name_within(row, element))
    }

    fn name_within(&self, row: ElementRef<'_>, element: ElementRef<'_>) -> Option<String> {
        row.select(&self.name_selector)
            .filter(|candidate| {
                candidate.id() != element.id()
                    && !is_ancestor_of(*candidate, element)
                    && !is_ancestor_of(element, *candidate)
            })
            .map(|candidate| collapse_whitespace(&candidate.text().collect::<String>()))
            .find(|name| !name.is_empty())
    }
}

impl DocumentScanner for HtmlScanner {
    fn query_selectors(&self, selectors: &[String]) -> ExtractionResult<Vec<SelectorMatch>> {
        let mut matches = Vec::new();

        for selector_str in selectors {
            let selector = compile(selector_str)?;
            let before = matches.len();

            for (index, element) in self.document.select(&selector).enumerate() {
                let mut found = SelectorMatch::new(
                    selector_str.as_str(),
                    index + 1,
                    element.text().collect::<String>(),
                );
                if let Some(name) = self.resolve_name(element) {
                    found = found.with_student_name(name);
                }
                matches.push(found);
            }

            debug!(
                selector = %selector_str,
                matched = matches.len() - before,
                "Selector scanned"
            );
        }

        Ok(matches)
    }

    fn table_rows(&self) -> ExtractionResult<Vec<Vec<String>>> {
        let row_selector = compile("tr")?;

        let rows = self
            .document
            .select(&row_selector)
            .map(|row| {
                // Direct cells only, so nested tables are scanned as their own rows
                row.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                    .map(|cell| cell.text().collect::<String>())
                    .collect()
            })
            .collect();

        Ok(rows)
    }
}

fn compile(selector: &str) -> ExtractionResult<Selector> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn is_ancestor_of(ancestor: ElementRef<'_>, node: ElementRef<'_>) -> bool {
    node.ancestors().any(|a| a.id() == ancestor.id())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
