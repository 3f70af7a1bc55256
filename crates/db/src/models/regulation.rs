//! Models for the `regulations` and `regulations_component` tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use norma_core::record::AcceptedRecord;
use norma_core::types::{DbId, Timestamp};

/// A row from the `regulations` table.
///
/// Rows are write-once: the pipeline inserts them and never updates or
/// deletes them. Removal happens only through operational cascade deletion,
/// which also removes the owned component links.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Regulation {
    pub id: DbId,
    pub created_at: NaiveDate,
    pub update_at: Option<Timestamp>,
    pub is_active: bool,
    pub title: String,
    pub gtype: Option<String>,
    pub entity: Option<String>,
    pub external_link: String,
    pub rtype_id: Option<DbId>,
    pub summary: Option<String>,
    pub classification_id: Option<DbId>,
}

/// DTO for inserting a regulation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRegulation {
    pub created_at: NaiveDate,
    pub update_at: Option<Timestamp>,
    pub is_active: bool,
    pub title: String,
    pub gtype: Option<String>,
    pub entity: Option<String>,
    pub external_link: String,
    pub rtype_id: Option<DbId>,
    pub summary: Option<String>,
    pub classification_id: Option<DbId>,
}

impl From<&AcceptedRecord> for NewRegulation {
    fn from(record: &AcceptedRecord) -> Self {
        Self {
            created_at: record.created_at,
            update_at: record.update_at,
            is_active: record.is_active,
            title: record.title.clone(),
            gtype: record.gtype.clone(),
            entity: record.entity.clone(),
            external_link: record.external_link.clone(),
            rtype_id: record.rtype_id,
            summary: record.summary.clone(),
            classification_id: record.classification_id,
        }
    }
}

/// A row from the `regulations_component` join table, unique per
/// (regulations_id, components_id) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegulationComponent {
    pub id: DbId,
    pub regulations_id: DbId,
    pub components_id: DbId,
}
