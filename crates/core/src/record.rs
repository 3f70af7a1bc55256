//! Raw and typed record forms for the regulation schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::text;
use crate::types::{DbId, Timestamp};

/// A record as handed over by the extraction collaborator.
///
/// Every scalar field is the raw text scraped from the source, untrimmed and
/// untyped. Component ids are already numeric at extraction time and are
/// never rule-validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: Option<String>,
    pub created_at: Option<String>,
    pub update_at: Option<String>,
    pub is_active: Option<String>,
    pub gtype: Option<String>,
    pub entity: Option<String>,
    pub external_link: Option<String>,
    pub rtype_id: Option<String>,
    pub summary: Option<String>,
    pub classification_id: Option<String>,
    #[serde(default)]
    pub components: Vec<DbId>,
}

impl RawRecord {
    /// Look up a scalar field by schema name. Blank values count as absent.
    pub fn scalar(&self, field: &str) -> Option<&str> {
        let value = match field {
            "title" => &self.title,
            "created_at" => &self.created_at,
            "update_at" => &self.update_at,
            "is_active" => &self.is_active,
            "gtype" => &self.gtype,
            "entity" => &self.entity,
            "external_link" => &self.external_link,
            "rtype_id" => &self.rtype_id,
            "summary" => &self.summary,
            "classification_id" => &self.classification_id,
            _ => &None,
        };
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Copy of the record with quote-stripped, whitespace-collapsed `title`
    /// and `summary`, so natural keys compare stably across runs.
    pub fn normalized(&self) -> RawRecord {
        let mut copy = self.clone();
        copy.title = text::normalize_opt(self.title.as_deref());
        copy.summary = text::normalize_opt(self.summary.as_deref());
        copy
    }
}

/// A fully coerced record, ready for persistence.
///
/// Produced only by the validator; a record is either accepted in full or
/// rejected in full, never partially typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedRecord {
    pub title: String,
    pub created_at: NaiveDate,
    pub update_at: Option<Timestamp>,
    pub is_active: bool,
    pub gtype: Option<String>,
    pub entity: Option<String>,
    /// An absent link canonicalizes to the empty string so the natural-key
    /// unique index treats absence consistently across runs.
    pub external_link: String,
    pub rtype_id: Option<DbId>,
    pub summary: Option<String>,
    pub classification_id: Option<DbId>,
    /// Deduplicated and sorted.
    pub components: Vec<DbId>,
}

impl AcceptedRecord {
    /// The (title, created_at, external_link) tuple that identifies a
    /// regulation across all runs.
    pub fn natural_key(&self) -> (&str, NaiveDate, &str) {
        (&self.title, self.created_at, &self.external_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_treats_blank_as_absent() {
        let record = RawRecord {
            title: Some("  ".to_string()),
            entity: Some(" ANI ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.scalar("title"), None);
        assert_eq!(record.scalar("entity"), Some("ANI"));
        assert_eq!(record.scalar("summary"), None);
    }

    #[test]
    fn unknown_field_is_absent() {
        let record = RawRecord::default();
        assert_eq!(record.scalar("no_such_field"), None);
    }

    #[test]
    fn normalized_cleans_title_and_summary_only() {
        let record = RawRecord {
            title: Some("\u{201C}Decreto  123\u{201D}".to_string()),
            summary: Some("'resumen'".to_string()),
            entity: Some("\"ANI\"".to_string()),
            ..Default::default()
        };
        let normalized = record.normalized();
        assert_eq!(normalized.title.as_deref(), Some("Decreto 123"));
        assert_eq!(normalized.summary.as_deref(), Some("resumen"));
        assert_eq!(normalized.entity.as_deref(), Some("\"ANI\""));
    }
}
