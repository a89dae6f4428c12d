//! Document sources.
//!
//! - [`SnapshotSource`] - saved HTML report on disk
//! - [`HttpSource`] - HTTP login + report load with a cookie session

pub mod http;
pub mod snapshot;

pub use http::{HttpSource, HttpSourceConfig};
pub use snapshot::SnapshotSource;
