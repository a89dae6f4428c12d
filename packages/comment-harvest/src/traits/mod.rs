//! Core trait abstractions for the harvest pipeline.
//!
//! These traits are the seams between the pipeline and the outside world:
//! the document it reads, the provider that translates, and the scanner
//! the extractor queries.

pub mod scanner;
pub mod source;
pub mod translator;
