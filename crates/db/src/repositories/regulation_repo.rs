//! Repository for the `regulations` and `regulations_component` tables.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use norma_core::types::DbId;

use crate::models::regulation::{NewRegulation, Regulation, RegulationComponent};

/// Column list for `regulations` queries.
const COLUMNS: &str = "id, created_at, update_at, is_active, title, gtype, entity, \
    external_link, rtype_id, summary, classification_id";

/// Outcome of an insert-or-skip attempt. Both variants carry the row id so
/// the caller can resolve component links either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(DbId),
    Existing(DbId),
}

impl InsertOutcome {
    pub fn id(&self) -> DbId {
        match self {
            Self::Inserted(id) | Self::Existing(id) => *id,
        }
    }
}

/// Write-once access to regulations and their component links.
pub struct RegulationRepo;

impl RegulationRepo {
    /// Insert a regulation unless its natural key already exists.
    ///
    /// The anticipated unique-key conflict is not an error: the insert uses
    /// `ON CONFLICT DO NOTHING` and the existing row's id is looked up, so a
    /// re-run over overlapping data is a no-op on already-seen keys. The
    /// existing row is never touched.
    pub async fn insert_if_absent(
        conn: &mut PgConnection,
        input: &NewRegulation,
    ) -> Result<InsertOutcome, sqlx::Error> {
        let inserted: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO regulations \
                (created_at, update_at, is_active, title, gtype, entity, \
                 external_link, rtype_id, summary, classification_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (title, created_at, external_link) DO NOTHING \
             RETURNING id",
        )
        .bind(input.created_at)
        .bind(input.update_at)
        .bind(input.is_active)
        .bind(&input.title)
        .bind(&input.gtype)
        .bind(&input.entity)
        .bind(&input.external_link)
        .bind(input.rtype_id)
        .bind(&input.summary)
        .bind(input.classification_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some((id,)) = inserted {
            return Ok(InsertOutcome::Inserted(id));
        }

        let (id,): (DbId,) = sqlx::query_as(
            "SELECT id FROM regulations \
             WHERE title = $1 AND created_at = $2 AND external_link = $3",
        )
        .bind(&input.title)
        .bind(input.created_at)
        .bind(&input.external_link)
        .fetch_one(&mut *conn)
        .await?;

        Ok(InsertOutcome::Existing(id))
    }

    /// Link a component to a regulation unless the pair already exists.
    /// Returns `true` when a new link row was inserted.
    pub async fn link_component(
        conn: &mut PgConnection,
        regulations_id: DbId,
        components_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let inserted: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO regulations_component (regulations_id, components_id) \
             VALUES ($1, $2) \
             ON CONFLICT (regulations_id, components_id) DO NOTHING \
             RETURNING id",
        )
        .bind(regulations_id)
        .bind(components_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(inserted.is_some())
    }

    /// Find a regulation by its natural key.
    pub async fn find_by_natural_key(
        pool: &PgPool,
        title: &str,
        created_at: NaiveDate,
        external_link: &str,
    ) -> Result<Option<Regulation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM regulations \
             WHERE title = $1 AND created_at = $2 AND external_link = $3"
        );
        sqlx::query_as::<_, Regulation>(&query)
            .bind(title)
            .bind(created_at)
            .bind(external_link)
            .fetch_optional(pool)
            .await
    }

    /// Component links owned by a regulation, ordered by component id.
    pub async fn components_for(
        pool: &PgPool,
        regulations_id: DbId,
    ) -> Result<Vec<RegulationComponent>, sqlx::Error> {
        sqlx::query_as::<_, RegulationComponent>(
            "SELECT id, regulations_id, components_id FROM regulations_component \
             WHERE regulations_id = $1 ORDER BY components_id",
        )
        .bind(regulations_id)
        .fetch_all(pool)
        .await
    }

    /// Total regulation rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM regulations")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
