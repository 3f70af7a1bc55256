//! Write-once persistence of accepted records.

use sqlx::{Connection, PgPool};
use tracing::{debug, warn};

use norma_core::record::AcceptedRecord;
use norma_db::models::NewRegulation;
use norma_db::repositories::{InsertOutcome, RegulationRepo};

use crate::report::{RecordError, WriteReport};

/// Inserts accepted records and their component links, skipping anything the
/// store has already seen.
pub struct IdempotentWriter;

impl IdempotentWriter {
    /// Write a batch of accepted records.
    ///
    /// One connection is acquired for the whole batch; each record gets its
    /// own transaction on it, committed before the next record, so no
    /// transaction ever spans two regulations and an interruption leaves
    /// every committed row valid.
    ///
    /// Returns `Err` only when the batch connection cannot be acquired.
    /// Store failures after that are recorded per record in the report and
    /// the batch continues.
    pub async fn write(
        pool: &PgPool,
        records: &[AcceptedRecord],
    ) -> Result<WriteReport, sqlx::Error> {
        let mut report = WriteReport::default();
        if records.is_empty() {
            return Ok(report);
        }

        let mut conn = pool.acquire().await?;

        for record in records {
            match Self::write_one(&mut conn, record, &mut report).await {
                Ok(()) => {}
                Err(error) => {
                    warn!(
                        title = %record.title,
                        %error,
                        "record write failed, continuing with remaining records"
                    );
                    report.errors.push(RecordError {
                        title: record.title.clone(),
                        external_link: record.external_link.clone(),
                        message: error.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Insert one record and resolve its links inside a single transaction.
    /// A rollback here never affects previously committed records.
    async fn write_one(
        conn: &mut sqlx::PgConnection,
        record: &AcceptedRecord,
        report: &mut WriteReport,
    ) -> Result<(), sqlx::Error> {
        let mut tx = conn.begin().await?;

        let input = NewRegulation::from(record);
        let outcome = RegulationRepo::insert_if_absent(&mut *tx, &input).await?;
        let regulations_id = outcome.id();

        let mut links_inserted = 0;
        let mut links_skipped = 0;
        for &component in &record.components {
            if RegulationRepo::link_component(&mut *tx, regulations_id, component).await? {
                links_inserted += 1;
            } else {
                links_skipped += 1;
            }
        }

        tx.commit().await?;

        match outcome {
            InsertOutcome::Inserted(_) => {
                debug!(title = %record.title, id = regulations_id, "regulation inserted");
                report.inserted += 1;
            }
            InsertOutcome::Existing(_) => {
                debug!(title = %record.title, id = regulations_id, "natural key exists, skipped");
                report.skipped_existing += 1;
            }
        }
        report.links_inserted += links_inserted;
        report.links_skipped += links_skipped;

        Ok(())
    }
}
