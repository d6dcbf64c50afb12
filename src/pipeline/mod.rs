// Ingestion pipeline: row sources, processing, and in-memory storage

pub mod ingestion;
pub mod loader;
pub mod processing;
pub mod storage;

pub use loader::{Pipeline, PipelineResult};
