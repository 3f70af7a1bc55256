//! Pipeline reports — the single source of truth for what a run did.

use serde::{Deserialize, Serialize};

use norma_core::validation::evaluator::BatchOutcome;

/// A store-level failure recorded against one record. The batch continues
/// past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordError {
    pub title: String,
    pub external_link: String,
    pub message: String,
}

/// Outcome of one write batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteReport {
    /// New regulation rows.
    pub inserted: u64,
    /// Records whose natural key already existed; the rows were left alone.
    pub skipped_existing: u64,
    /// New (regulation, component) link rows.
    pub links_inserted: u64,
    /// Link pairs that already existed.
    pub links_skipped: u64,
    /// Per-record store failures; never raised, always surfaced here.
    pub errors: Vec<RecordError>,
}

/// Full run report handed to the orchestration collaborator.
///
/// Sufficient to reconcile extracted vs. accepted vs. written counts without
/// inspecting logs: `extracted == validated_accepted + validated_rejected`
/// and, absent errors, `written + write_skipped == validated_accepted`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineReport {
    pub extracted: u64,
    pub validated_accepted: u64,
    pub validated_rejected: u64,
    pub written: u64,
    pub write_skipped: u64,
    pub link_written: u64,
    pub link_skipped: u64,
    pub errors: Vec<RecordError>,
}

impl PipelineReport {
    pub fn from_stages(outcome: &BatchOutcome, write: WriteReport) -> Self {
        Self {
            extracted: outcome.counts.total as u64,
            validated_accepted: outcome.counts.accepted as u64,
            validated_rejected: outcome.counts.rejected as u64,
            written: write.inserted,
            write_skipped: write.skipped_existing,
            link_written: write.links_inserted,
            link_skipped: write.links_skipped,
            errors: write.errors,
        }
    }
}
