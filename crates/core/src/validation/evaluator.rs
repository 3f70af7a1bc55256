//! Record validation against a loaded ruleset — pure logic, no I/O.
//!
//! A record is either accepted in full (every declared field present where
//! required, coercible to its declared type, and pattern-conformant) or
//! rejected with the complete list of violations. Rules are evaluated
//! independently; nothing short-circuits, so one rejected record reports
//! every rule it violated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::coerce;
use super::rules::{FieldRule, FieldViolation, RejectionReason, RuleSet};
use crate::record::{AcceptedRecord, RawRecord};

/// A record excluded from persistence, with the reasons why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub record: RawRecord,
    pub violations: Vec<FieldViolation>,
}

/// Batch-level tallies. `total == accepted + rejected` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCounts {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Result of validating one batch. Input order is preserved in both
/// sequences; every input record appears in exactly one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub accepted: Vec<AcceptedRecord>,
    pub rejected: Vec<RejectedRecord>,
    pub counts: BatchCounts,
}

/// Validate a single raw record against the ruleset.
pub fn validate(raw: &RawRecord, rules: &RuleSet) -> Result<AcceptedRecord, Vec<FieldViolation>> {
    let raw = raw.normalized();
    let mut violations = Vec::new();

    for rule in rules.rules() {
        check_rule(rule, raw.scalar(&rule.field), &mut violations);
    }

    // title and created_at are NOT NULL in the persisted schema, so they are
    // structurally required even when the ruleset does not declare them.
    let title = structural_title(&raw, &mut violations);
    let created_at = structural_created_at(&raw, &mut violations);

    match (title, created_at) {
        (Some(title), Some(created_at)) if violations.is_empty() => {
            Ok(assemble(title, created_at, &raw, rules))
        }
        _ => Err(violations),
    }
}

/// Validate a batch, partitioning it into accepted and rejected sequences.
pub fn validate_batch(records: &[RawRecord], rules: &RuleSet) -> BatchOutcome {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for record in records {
        match validate(record, rules) {
            Ok(typed) => accepted.push(typed),
            Err(violations) => rejected.push(RejectedRecord {
                record: record.clone(),
                violations,
            }),
        }
    }

    let counts = BatchCounts {
        total: records.len(),
        accepted: accepted.len(),
        rejected: rejected.len(),
    };
    BatchOutcome {
        accepted,
        rejected,
        counts,
    }
}

fn check_rule(rule: &FieldRule, value: Option<&str>, out: &mut Vec<FieldViolation>) {
    let Some(value) = value else {
        if rule.required {
            out.push(FieldViolation {
                field: rule.field.clone(),
                reason: RejectionReason::MissingRequired,
                value: None,
            });
        }
        return;
    };

    if coerce::coerce(value, rule.field_type).is_none() {
        out.push(FieldViolation {
            field: rule.field.clone(),
            reason: RejectionReason::TypeMismatch,
            value: Some(value.to_string()),
        });
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            out.push(FieldViolation {
                field: rule.field.clone(),
                reason: RejectionReason::PatternMismatch,
                value: Some(value.to_string()),
            });
        }
    }
}

/// Push a violation unless the declared rules already flagged the field.
fn note_once(out: &mut Vec<FieldViolation>, field: &str, reason: RejectionReason, value: Option<&str>) {
    if !out.iter().any(|v| v.field == field) {
        out.push(FieldViolation {
            field: field.to_string(),
            reason,
            value: value.map(str::to_string),
        });
    }
}

fn structural_title(raw: &RawRecord, out: &mut Vec<FieldViolation>) -> Option<String> {
    match raw.scalar("title") {
        Some(value) => Some(value.to_string()),
        None => {
            note_once(out, "title", RejectionReason::MissingRequired, None);
            None
        }
    }
}

fn structural_created_at(raw: &RawRecord, out: &mut Vec<FieldViolation>) -> Option<NaiveDate> {
    match raw.scalar("created_at") {
        Some(value) => match coerce::parse_date(value) {
            Some(date) => Some(date),
            None => {
                note_once(out, "created_at", RejectionReason::TypeMismatch, Some(value));
                None
            }
        },
        None => {
            note_once(out, "created_at", RejectionReason::MissingRequired, None);
            None
        }
    }
}

/// Build the typed record from a raw one with zero violations.
///
/// Fields not covered by a declared rule are coerced leniently: a value that
/// does not parse as its schema type is nulled rather than rejecting the
/// record.
fn assemble(
    title: String,
    created_at: NaiveDate,
    raw: &RawRecord,
    rules: &RuleSet,
) -> AcceptedRecord {
    let rtype_id = raw
        .scalar("rtype_id")
        .and_then(|v| v.parse().ok())
        .or_else(|| rules.classify_rtype(&title));

    let mut components = raw.components.clone();
    components.sort_unstable();
    components.dedup();

    AcceptedRecord {
        update_at: raw.scalar("update_at").and_then(coerce::parse_datetime),
        is_active: raw
            .scalar("is_active")
            .and_then(coerce::parse_bool)
            .unwrap_or(true),
        gtype: raw.scalar("gtype").map(str::to_string),
        entity: raw.scalar("entity").map(str::to_string),
        external_link: raw
            .scalar("external_link")
            .and_then(|v| coerce::parse_url(v))
            .unwrap_or_default(),
        summary: raw.scalar("summary").map(str::to_string),
        classification_id: raw.scalar("classification_id").and_then(|v| v.parse().ok()),
        title,
        created_at,
        rtype_id,
        components,
    }
}
