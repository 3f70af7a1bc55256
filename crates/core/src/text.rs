//! Text normalization applied before rule evaluation.
//!
//! Scraped titles arrive with a zoo of typographic quote characters and
//! irregular whitespace. Natural-key comparison across runs only works if
//! both sides were normalized the same way, so the cleanup lives here as a
//! pure function rather than in the extraction collaborator.

/// Quote-like characters stripped from scraped text.
const QUOTE_CHARS: &[char] = &[
    '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{00AB}', '\u{00BB}',
    '\u{201E}', '\u{201A}', '\u{2039}', '\u{203A}', '\u{2032}', '\u{2033}', '\u{00B4}',
    '`',
];

/// Strip quote characters and collapse runs of whitespace to single spaces.
///
/// Returns `None` when the input normalizes to the empty string, so callers
/// treat fully-quoted or whitespace-only values as absent.
pub fn normalize_text(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Normalize an optional raw value, mapping blank results to `None`.
pub fn normalize_opt(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_typographic_quotes() {
        assert_eq!(
            normalize_text("\u{201C}Decreto 123\u{201D}").as_deref(),
            Some("Decreto 123")
        );
    }

    #[test]
    fn strips_ascii_quotes() {
        assert_eq!(
            normalize_text("\"Resoluci\u{F3}n 'Especial'\"").as_deref(),
            Some("Resoluci\u{F3}n Especial")
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            normalize_text("  Decreto   123\n\t2024  ").as_deref(),
            Some("Decreto 123 2024")
        );
    }

    #[test]
    fn blank_input_is_absent() {
        assert_eq!(normalize_text("   "), None);
        assert_eq!(normalize_text("\"\""), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_text(" \u{AB}Decreto  123\u{BB} ").unwrap();
        assert_eq!(normalize_text(&once).as_deref(), Some(once.as_str()));
    }

    #[test]
    fn normalize_opt_maps_none() {
        assert_eq!(normalize_opt(None), None);
        assert_eq!(normalize_opt(Some("x")).as_deref(), Some("x"));
    }
}
