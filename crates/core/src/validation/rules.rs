//! Rule set and violation types.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Scalar fields of the regulation schema and their persisted types.
///
/// Ruleset loading rejects any field name outside this list; the evaluator
/// uses the schema type for lenient pass-through coercion of undeclared
/// fields.
pub const SCHEMA_FIELDS: &[(&str, FieldType)] = &[
    ("title", FieldType::String),
    ("created_at", FieldType::Date),
    ("update_at", FieldType::DateTime),
    ("is_active", FieldType::Boolean),
    ("gtype", FieldType::String),
    ("entity", FieldType::String),
    ("external_link", FieldType::Url),
    ("rtype_id", FieldType::Integer),
    ("summary", FieldType::String),
    ("classification_id", FieldType::Integer),
];

/// Look up the persisted type of a schema field.
pub fn schema_type(field: &str) -> Option<FieldType> {
    SCHEMA_FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, ty)| *ty)
}

/// The declared type of a rule-validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Date,
    DateTime,
    Url,
}

impl FieldType {
    pub fn parse(name: &str) -> Option<FieldType> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::DateTime),
            "url" => Some(Self::Url),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Url => "url",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field's validation contract, loaded from configuration.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Compiled once at load time.
    pub pattern: Option<Regex>,
}

/// The immutable, loaded validation configuration for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
    rtype_keywords: Vec<(String, DbId)>,
    default_rtype_id: Option<DbId>,
}

impl RuleSet {
    pub(crate) fn new(
        rules: Vec<FieldRule>,
        rtype_keywords: Vec<(String, DbId)>,
        default_rtype_id: Option<DbId>,
    ) -> Self {
        Self {
            rules,
            rtype_keywords,
            default_rtype_id,
        }
    }

    /// Declared rules in configuration order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// The rule declared for a field, if any.
    pub fn rule_for(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Derive an rtype id from the first keyword matching the lowercased
    /// title, falling back to the configured default.
    pub fn classify_rtype(&self, title: &str) -> Option<DbId> {
        let title = title.to_lowercase();
        self.rtype_keywords
            .iter()
            .find(|(keyword, _)| title.contains(keyword.as_str()))
            .map(|(_, id)| *id)
            .or(self.default_rtype_id)
    }
}

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    MissingRequired,
    TypeMismatch,
    PatternMismatch,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::PatternMismatch => "PATTERN_MISMATCH",
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: RejectionReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
