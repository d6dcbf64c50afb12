use metrics::{counter, histogram};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::error::{DirectoryError, Result};
use crate::metrics::{
    LOAD_DURATION_SECONDS, ROWS_ACCEPTED_TOTAL, ROWS_REJECTED_TOTAL, ROWS_TOTAL, ROW_ERRORS_TOTAL,
};
use crate::pipeline::ingestion::{RowIter, RowSource};
use crate::pipeline::processing::normalize::{DefaultNormalizer, Normalizer, RawRow};
use crate::pipeline::processing::quality_gate::{
    DefaultQualityGate, QualityCheck, QualityDecision, QualityGate, QualityGateConfig,
};
use crate::pipeline::storage::{Directory, DirectoryBuilder, SharedDirectory};

/// Result of a complete ingestion pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineResult {
    pub source: String,
    pub total_rows: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Rejections keyed by the first check each row failed
    pub rejections: BTreeMap<&'static str, usize>,
    pub errors: Vec<String>,
    pub elapsed_ms: u128,
}

/// Normalizes, classifies and accumulates rows into a [`Directory`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    normalizer: DefaultNormalizer,
    gate: DefaultQualityGate,
}

impl Pipeline {
    pub fn new(config: QualityGateConfig) -> Self {
        Self {
            normalizer: DefaultNormalizer,
            gate: DefaultQualityGate::with_config(config),
        }
    }

    /// The qualification checks this pipeline applies, in evaluation order.
    pub fn checks(&self) -> &'static [QualityCheck] {
        self.gate.checks()
    }

    /// Classifies one raw row. Accepted rows are appended to `builder`.
    fn process_row(&self, row: &RawRow, builder: &mut DirectoryBuilder) -> QualityDecision {
        let record = self.normalizer.to_record(&self.normalizer.normalize(row));
        let decision = self.gate.assess(&record);
        match decision {
            QualityDecision::Accept => builder.push(record),
            QualityDecision::Reject { check } => {
                debug!("Rejected '{}' ({}): {}", record.name, record.id, check);
            }
        }
        decision
    }

    /// Drains `rows` into a builder. Row errors are counted and skipped.
    fn ingest(&self, rows: RowIter, result: &mut PipelineResult) -> DirectoryBuilder {
        let mut builder = DirectoryBuilder::new();

        for row in rows {
            result.total_rows += 1;
            counter!(ROWS_TOTAL).increment(1);

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping row: {}", e);
                    counter!(ROW_ERRORS_TOTAL).increment(1);
                    result.errors.push(e.to_string());
                    continue;
                }
            };

            match self.process_row(&row, &mut builder) {
                QualityDecision::Accept => {
                    result.accepted += 1;
                    counter!(ROWS_ACCEPTED_TOTAL).increment(1);
                }
                QualityDecision::Reject { check } => {
                    result.rejected += 1;
                    *result.rejections.entry(check).or_default() += 1;
                    counter!(ROWS_REJECTED_TOTAL, "check" => check).increment(1);
                }
            }
        }

        builder
    }

    /// Runs one full pass over `source` and returns the finished directory.
    ///
    /// Fails only if the source cannot be opened; nothing partial is returned.
    #[instrument(skip(self, source), fields(source = %source.name()))]
    pub async fn load_directory(
        &self,
        source: &dyn RowSource,
    ) -> Result<(Directory, PipelineResult)> {
        let started = Instant::now();
        let mut result = PipelineResult {
            source: source.name(),
            ..Default::default()
        };
        info!("Loading hospital directory from {}", result.source);

        let rows = source.open().await?;

        let pipeline = self.clone();
        let (builder, mut result) = tokio::task::spawn_blocking(move || {
            let builder = pipeline.ingest(rows, &mut result);
            (builder, result)
        })
        .await
        .map_err(|e| DirectoryError::Task(e.to_string()))?;

        let elapsed = started.elapsed();
        result.elapsed_ms = elapsed.as_millis();
        histogram!(LOAD_DURATION_SECONDS).record(elapsed.as_secs_f64());

        info!(
            "Loaded {} hospitals from {} rows ({} rejected, {} errors) in {}ms",
            result.accepted,
            result.total_rows,
            result.rejected,
            result.errors.len(),
            result.elapsed_ms
        );
        if !result.errors.is_empty() {
            warn!("{} rows could not be read", result.errors.len());
        }

        Ok((builder.finish(), result))
    }

    /// Loads `source` and publishes the result. On failure nothing is
    /// published and readers keep whatever directory they already had.
    pub async fn load_into(
        &self,
        source: &dyn RowSource,
        shared: &SharedDirectory,
    ) -> Result<PipelineResult> {
        let (directory, result) = self.load_directory(source).await?;
        shared.publish(directory);
        Ok(result)
    }
}
