//! Type coercions, dispatched on an explicit type tag.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::rules::FieldType;
use crate::types::Timestamp;

/// A raw value coerced to its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Str(String),
    Int(i64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(Timestamp),
    Url(String),
}

/// Coerce a non-blank raw string to the given type. `None` means the value
/// does not parse as that type.
pub fn coerce(raw: &str, ty: FieldType) -> Option<Coerced> {
    let raw = raw.trim();
    match ty {
        FieldType::String => Some(Coerced::Str(raw.to_string())),
        FieldType::Integer => raw.parse::<i64>().ok().map(Coerced::Int),
        FieldType::Boolean => parse_bool(raw).map(Coerced::Bool),
        FieldType::Date => parse_date(raw).map(Coerced::Date),
        FieldType::DateTime => parse_datetime(raw).map(Coerced::DateTime),
        FieldType::Url => parse_url(raw).map(Coerced::Url),
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Accepts the three date shapes the extractor emits: ISO `YYYY-MM-DD`,
/// `DD/MM/YYYY`, and the date part of an ISO datetime.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` treated as UTC.
pub fn parse_datetime(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Structural URL check: an alphabetic scheme, `://`, and a non-empty rest.
/// Policy restrictions (e.g. https only) are expressed as pattern rules.
pub fn parse_url(raw: &str) -> Option<String> {
    let (scheme, rest) = raw.split_once("://")?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if rest.is_empty() {
        return None;
    }
    Some(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn coerce_string_trims() {
        assert_eq!(
            coerce(" Decreto ", FieldType::String),
            Some(Coerced::Str("Decreto".to_string()))
        );
    }

    #[test]
    fn coerce_integer() {
        assert_eq!(coerce("14", FieldType::Integer), Some(Coerced::Int(14)));
        assert_eq!(coerce("-3", FieldType::Integer), Some(Coerced::Int(-3)));
        assert_eq!(coerce("14.5", FieldType::Integer), None);
        assert_eq!(coerce("abc", FieldType::Integer), None);
    }

    #[test]
    fn coerce_boolean_variants() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn parse_date_iso() {
        let date = parse_date("2024-01-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
    }

    #[test]
    fn parse_date_slash_format() {
        let date = parse_date("31/12/2023").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 12, 31));
    }

    #[test]
    fn parse_date_from_iso_datetime() {
        let date = parse_date("2024-01-01T00:00:00-05:00").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn parse_datetime_rfc3339_and_naive() {
        assert!(parse_datetime("2024-01-01T12:00:00Z").is_some());
        assert!(parse_datetime("2024-01-01 12:00:00").is_some());
        assert_eq!(parse_datetime("2024-01-01"), None);
    }

    #[test]
    fn parse_url_accepts_schemes() {
        assert!(parse_url("https://ani.gov.co/d123").is_some());
        assert!(parse_url("ftp://x").is_some());
        assert_eq!(parse_url("ani.gov.co/d123"), None);
        assert_eq!(parse_url("://missing"), None);
        assert_eq!(parse_url("https://"), None);
    }
}
