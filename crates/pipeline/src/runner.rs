//! Batch sequencing: validate, then write, then report.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use norma_core::record::RawRecord;
use norma_core::validation::evaluator::validate_batch;
use norma_core::validation::rules::RuleSet;

use crate::report::PipelineReport;
use crate::writer::IdempotentWriter;

/// A batch-level pipeline failure. Per-record validation and persistence
/// issues never surface here; they live in the report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Runs one extracted batch through validation and persistence.
pub struct PipelineRunner;

impl PipelineRunner {
    /// Process a batch in extraction order. No retries, no reordering;
    /// re-running the same batch is additive only for unseen natural keys
    /// and link pairs.
    pub async fn run(
        pool: &PgPool,
        rules: &RuleSet,
        records: &[RawRecord],
    ) -> Result<PipelineReport, PipelineError> {
        let outcome = validate_batch(records, rules);
        info!(
            total = outcome.counts.total,
            accepted = outcome.counts.accepted,
            rejected = outcome.counts.rejected,
            "validation complete"
        );

        let write = IdempotentWriter::write(pool, &outcome.accepted).await?;
        let report = PipelineReport::from_stages(&outcome, write);

        info!(
            written = report.written,
            write_skipped = report.write_skipped,
            link_written = report.link_written,
            link_skipped = report.link_skipped,
            errors = report.errors.len(),
            "write complete"
        );
        Ok(report)
    }
}
