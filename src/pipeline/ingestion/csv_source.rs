use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{RowIter, RowSource};
use crate::error::{DirectoryError, Result};
use crate::pipeline::processing::normalize::RawRow;

/// Reads the hospital directory from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, reason: impl ToString) -> DirectoryError {
        DirectoryError::SourceUnavailable {
            source_name: self.name(),
            reason: reason.to_string(),
        }
    }
}

fn to_raw_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
    // Short rows leave trailing columns absent; extra cells are dropped
    headers
        .iter()
        .zip(record.iter())
        .map(|(column, value)| (column.trim().to_string(), Some(value.to_string())))
        .collect()
}

#[async_trait]
impl RowSource for CsvFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn open(&self) -> Result<RowIter> {
        let path = self.path.clone();
        let file = tokio::task::spawn_blocking(move || File::open(path))
            .await
            .map_err(|e| DirectoryError::Task(e.to_string()))?
            .map_err(|e| self.unavailable(e))?;

        // Cell trimming is the normalizer's job
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::None)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.unavailable(format!("unreadable header row: {e}")))?
            .clone();
        debug!("Opened {} with {} columns", self.name(), headers.len());

        let rows = reader
            .into_records()
            .enumerate()
            .map(move |(index, result)| match result {
                Ok(record) => Ok(to_raw_row(&headers, &record)),
                Err(e) => Err(DirectoryError::RowProcessing {
                    // Line the record starts on; quoted fields may span lines
                    row: e
                        .position()
                        .map_or(index + 2, |position| position.line() as usize),
                    reason: e.to_string(),
                }),
            });
        Ok(Box::new(rows))
    }
}
