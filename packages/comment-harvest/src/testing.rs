//! Testing utilities including mock implementations.
//!
//! These let applications and tests drive the pipeline without a browser,
//! a network connection, or a translation provider.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tokio::time::Instant;

use crate::error::{ExtractionError, ExtractionResult, SourceError, SourceResult, TranslationError};
use crate::traits::{
    scanner::{DocumentScanner, SelectorMatch},
    source::{DocumentSession, DocumentSource, LoadedPage},
    translator::Translator,
};
use crate::types::{language::Language, record::TranslationResult};

/// A mock translator for testing.
///
/// Appends a fixed suffix to the input, or fails for configured inputs.
/// Clones share call history, so a clone handed to the pipeline can be
/// inspected afterwards.
#[derive(Clone)]
pub struct MockTranslator {
    suffix: String,
    name: String,
    fail_all: bool,
    fail_texts: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<MockTranslatorCall>>>,
}

/// Record of a call made to the mock translator.
#[derive(Debug, Clone)]
pub struct MockTranslatorCall {
    pub text: String,
    pub target: Language,
    pub at: Instant,
}

impl MockTranslator {
    /// Translate by appending `suffix`.
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            name: "mock".to_string(),
            fail_all: false,
            fail_texts: Arc::new(RwLock::new(HashSet::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fail every call, like a provider that is down.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::suffix("")
        }
    }

    /// Fail calls for this exact input text.
    pub fn fail_on(self, text: impl Into<String>) -> Self {
        self.fail_texts.write().unwrap().insert(text.into());
        self
    }

    /// Override the reported provider name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockTranslatorCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<TranslationResult, TranslationError> {
        self.calls.write().unwrap().push(MockTranslatorCall {
            text: text.to_string(),
            target,
            at: Instant::now(),
        });

        if self.fail_all || self.fail_texts.read().unwrap().contains(text) {
            return Err(TranslationError::Other(
                "mock network error: connection reset".to_string(),
            ));
        }

        Ok(TranslationResult::new(text, format!("{}{}", text, self.suffix)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An in-memory document for exercising extraction heuristics.
#[derive(Default)]
pub struct FakeScanner {
    matches: Vec<SelectorMatch>,
    rows: Vec<Vec<String>>,
    failure: Option<String>,
}

impl FakeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scanner whose every query fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Add a selector match.
    pub fn with_match(mut self, found: SelectorMatch) -> Self {
        self.matches.push(found);
        self
    }

    /// Add a table row.
    pub fn with_row(mut self, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.rows.push(cells.into_iter().map(|c| c.into()).collect());
        self
    }

    fn check(&self) -> ExtractionResult<()> {
        match &self.failure {
            Some(reason) => Err(ExtractionError::Scan(reason.clone())),
            None => Ok(()),
        }
    }
}

impl DocumentScanner for FakeScanner {
    fn query_selectors(&self, selectors: &[String]) -> ExtractionResult<Vec<SelectorMatch>> {
        self.check()?;
        Ok(selectors
            .iter()
            .flat_map(|selector| self.matches.iter().filter(move |m| &m.selector == selector))
            .cloned()
            .collect())
    }

    fn table_rows(&self) -> ExtractionResult<Vec<Vec<String>>> {
        self.check()?;
        Ok(self.rows.clone())
    }
}

/// A mock document source serving a canned page.
///
/// Tracks how many sessions were opened and closed so tests can assert the
/// resource is always released.
#[derive(Clone, Default)]
pub struct MockSource {
    html: String,
    fail_open: bool,
    fail_load: bool,
    state: Arc<RwLock<MockSourceState>>,
}

#[derive(Debug, Default, Clone)]
pub struct MockSourceState {
    pub opened: usize,
    pub closed: usize,
    pub loads: usize,
}

impl MockSource {
    /// Serve `html` as the report view.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    /// Make `open` fail, like a login that is rejected.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make `load_report` fail after the session is open.
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    pub fn state(&self) -> MockSourceState {
        self.state.read().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for MockSource {
    async fn open(&self) -> SourceResult<Box<dyn DocumentSession>> {
        if self.fail_open {
            return Err(SourceError::Login("mock login rejected".to_string()));
        }
        self.state.write().unwrap().opened += 1;
        Ok(Box::new(MockSession {
            source: self.clone(),
        }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct MockSession {
    source: MockSource,
}

#[async_trait]
impl DocumentSession for MockSession {
    async fn load_report(&mut self) -> SourceResult<LoadedPage> {
        self.source.state.write().unwrap().loads += 1;
        if self.source.fail_load {
            return Err(SourceError::Load {
                url: "mock://report".to_string(),
                status: 504,
            });
        }
        Ok(LoadedPage::new("mock://report", self.source.html.clone()))
    }

    async fn close(&mut self) -> SourceResult<()> {
        self.source.state.write().unwrap().closed += 1;
        Ok(())
    }
}
