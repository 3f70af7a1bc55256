//! Batch worker: reads an extracted batch file, validates it against the
//! configured ruleset, and persists accepted records idempotently.
//!
//! Extraction and scheduling live with external collaborators; this binary
//! covers one batch, start to finish, and logs the reconciliation report.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use norma_core::validation::loader;
use norma_core::RawRecord;
use norma_pipeline::PipelineRunner;

mod config;

use config::WorkerConfig;

/// Keeps the pipeline stage summaries visible without RUST_LOG.
const DEFAULT_LOG_FILTER: &str = "norma_worker=debug,norma_pipeline=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env()?;

    // Fail fast: a broken ruleset aborts before any record is touched.
    let rules = loader::load(&config.rules_path)
        .with_context(|| format!("loading ruleset from {}", config.rules_path))?;

    let batch = std::fs::read_to_string(&config.batch_path)
        .with_context(|| format!("reading batch file {}", config.batch_path))?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&batch).context("parsing batch file as a JSON record array")?;
    tracing::info!(records = records.len(), path = %config.batch_path, "batch loaded");

    let pool = norma_db::create_pool(&config.database_url)
        .await
        .context("connecting to the database")?;

    // Ensure-schema step: idempotent, runs before any write.
    sqlx::migrate!("../../db/migrations")
        .run(&pool)
        .await
        .context("applying database migrations")?;

    let report = PipelineRunner::run(&pool, &rules, &records).await?;

    tracing::info!(
        extracted = report.extracted,
        accepted = report.validated_accepted,
        rejected = report.validated_rejected,
        written = report.written,
        write_skipped = report.write_skipped,
        link_written = report.link_written,
        link_skipped = report.link_skipped,
        errors = report.errors.len(),
        "pipeline run complete"
    );
    for error in &report.errors {
        tracing::warn!(title = %error.title, message = %error.message, "record failed to persist");
    }

    Ok(())
}
