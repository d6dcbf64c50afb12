// Pipeline ingestion: row sources feeding the normalizer

pub mod csv_source;

use async_trait::async_trait;

use crate::error::Result;
use crate::pipeline::processing::normalize::RawRow;

pub use csv_source::CsvFileSource;

/// Rows in source order. A row that cannot be read is an `Err` item; the
/// stream continues after it.
pub type RowIter = Box<dyn Iterator<Item = Result<RawRow>> + Send>;

/// A readable source of column-keyed rows.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable description used in logs and results
    fn name(&self) -> String;

    /// Opens the source. Fails with `SourceUnavailable` if it cannot be read.
    async fn open(&self) -> Result<RowIter>;
}

/// Serves rows that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    rows: Vec<RawRow>,
}

impl MemoryRowSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RowSource for MemoryRowSource {
    fn name(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }

    async fn open(&self) -> Result<RowIter> {
        Ok(Box::new(self.rows.clone().into_iter().map(Ok)))
    }
}
