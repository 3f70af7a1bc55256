//! Ruleset loading from YAML configuration.
//!
//! Loading fails fast: a broken ruleset aborts the run before any record is
//! validated against it. Expected file shape:
//!
//! ```yaml
//! fields:
//!   title: { type: string, required: true }
//!   external_link: { type: url, required: true, pattern: "^https?://" }
//!   created_at: { type: date, required: true }
//! rtype_keywords:
//!   decreto: 15
//!   resolucion: 16
//! default_rtype_id: 14
//! ```

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::rules::{schema_type, FieldRule, FieldType, RuleSet};
use crate::types::DbId;

/// A malformed ruleset source. Fatal; nothing is validated against it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read ruleset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse ruleset YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("ruleset declares unknown field `{field}`")]
    UnknownField { field: String },
    #[error("field `{field}` declares unsupported type `{name}`")]
    UnknownType { field: String, name: String },
    #[error("field `{field}` has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    fields: serde_yaml::Mapping,
    #[serde(default)]
    rtype_keywords: serde_yaml::Mapping,
    #[serde(default)]
    default_rtype_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFieldRule {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    pattern: Option<String>,
}

/// Load a ruleset from a YAML file.
pub fn load(path: impl AsRef<Path>) -> Result<RuleSet, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_str(&source)
}

/// Load a ruleset from YAML source text.
pub fn load_str(source: &str) -> Result<RuleSet, ConfigError> {
    let file: RulesFile = serde_yaml::from_str(source)?;

    let mut rules = Vec::with_capacity(file.fields.len());

    for (key, value) in &file.fields {
        let field: String = serde_yaml::from_value(key.clone())?;
        if schema_type(&field).is_none() {
            return Err(ConfigError::UnknownField { field });
        }
        let raw: RawFieldRule = serde_yaml::from_value(value.clone())?;
        let field_type =
            FieldType::parse(&raw.type_name).ok_or_else(|| ConfigError::UnknownType {
                field: field.clone(),
                name: raw.type_name.clone(),
            })?;
        let pattern = match &raw.pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| {
                ConfigError::InvalidPattern {
                    field: field.clone(),
                    source,
                }
            })?),
            None => None,
        };
        rules.push(FieldRule {
            field,
            field_type,
            required: raw.required,
            pattern,
        });
    }

    let mut rtype_keywords = Vec::with_capacity(file.rtype_keywords.len());
    for (key, value) in &file.rtype_keywords {
        let keyword: String = serde_yaml::from_value(key.clone())?;
        let rtype_id: DbId = serde_yaml::from_value(value.clone())?;
        rtype_keywords.push((keyword.to_lowercase(), rtype_id));
    }

    Ok(RuleSet::new(rules, rtype_keywords, file.default_rtype_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    const VALID: &str = "\
fields:
  title: { type: string, required: true }
  external_link: { type: url, required: true, pattern: \"^https?://\" }
  created_at: { type: date, required: true }
  rtype_id: { type: integer }
rtype_keywords:
  decreto: 15
default_rtype_id: 14
";

    #[test]
    fn loads_valid_ruleset_in_order() {
        let rules = load_str(VALID).unwrap();
        let fields: Vec<&str> = rules.rules().iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, ["title", "external_link", "created_at", "rtype_id"]);

        let link = rules.rule_for("external_link").unwrap();
        assert_eq!(link.field_type, FieldType::Url);
        assert!(link.required);
        assert!(link.pattern.as_ref().unwrap().is_match("https://x"));
        assert!(!link.pattern.as_ref().unwrap().is_match("ftp://x"));

        assert_eq!(rules.classify_rtype("Decreto 9"), Some(15));
        assert_eq!(rules.classify_rtype("Circular 9"), Some(14));
    }

    #[test]
    fn load_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let rules = load(file.path()).unwrap();
        assert_eq!(rules.rules().len(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load("/nonexistent/rules.yml").unwrap_err();
        assert_matches!(err, ConfigError::Io { .. });
    }

    #[test]
    fn unknown_field_fails() {
        let err = load_str("fields:\n  nonsense: { type: string }\n").unwrap_err();
        assert_matches!(err, ConfigError::UnknownField { field } if field == "nonsense");
    }

    #[test]
    fn unknown_type_fails() {
        let err = load_str("fields:\n  title: { type: float }\n").unwrap_err();
        assert_matches!(err, ConfigError::UnknownType { field, name }
            if field == "title" && name == "float");
    }

    #[test]
    fn invalid_pattern_fails() {
        let err =
            load_str("fields:\n  title: { type: string, pattern: \"([unclosed\" }\n").unwrap_err();
        assert_matches!(err, ConfigError::InvalidPattern { field, .. } if field == "title");
    }

    #[test]
    fn duplicate_field_fails() {
        // serde_yaml rejects duplicate mapping keys at parse time.
        let err = load_str(
            "fields:\n  title: { type: string }\n  title: { type: string }\n",
        )
        .unwrap_err();
        assert_matches!(err, ConfigError::Parse(_));
    }

    #[test]
    fn malformed_yaml_fails() {
        let err = load_str("fields: [not, a, mapping").unwrap_err();
        assert_matches!(err, ConfigError::Parse(_));
    }

    #[test]
    fn empty_source_loads_empty_ruleset() {
        let rules = load_str("{}").unwrap();
        assert!(rules.rules().is_empty());
    }
}
