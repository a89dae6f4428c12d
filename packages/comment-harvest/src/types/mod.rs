//! Data types for the harvest pipeline.

pub mod config;
pub mod language;
pub mod outcome;
pub mod record;
