//! Curated in-memory directory of qualifying hospitals.
//!
//! Rows from the national hospital directory CSV are normalized, filtered by
//! the qualification rules in [`pipeline::processing::quality_gate`], and
//! published once as an immutable [`Directory`]. Queries are plain methods on
//! that directory (see [`query`]).

pub mod common;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod query;
pub mod server;

pub use domain::HospitalRecord;
pub use error::{DirectoryError, Result};
pub use pipeline::ingestion::{CsvFileSource, MemoryRowSource, RowSource};
pub use pipeline::storage::{Directory, SharedDirectory};
pub use pipeline::{Pipeline, PipelineResult};
pub use query::{QueryResult, SearchQuery};
