//! Classification of a single CSV field

use crate::error::{ModelError, ModelResult};
use crate::types::{CellValue, NumberFormat};
use regex::Regex;
use std::sync::OnceLock;

/// A field ready to be placed in a cell
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedField {
    pub value: CellValue,
    pub format: NumberFormat,
}

impl ParsedField {
    fn new(value: CellValue, format: NumberFormat) -> Self {
        Self { value, format }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self.value, CellValue::Formula(_))
    }
}

/// Anything made only of digits, separators, a sign, parentheses and `%`
fn numeric_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?\(?\s*-?[0-9.,]*[0-9][0-9.,]*\s*\)?\s*%?$").expect("valid regex")
    })
}

/// A well-formed number: optional minus or parentheses, thousands commas, decimals
fn strict_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<minus>-)?(?P<open>\()?\s*(?P<body>[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?P<frac>\.[0-9]+)?\s*(?P<close>\))?$")
            .expect("valid regex")
    })
}

/// Parse a number written as `1,200`, `-1200`, `(1,200)` or `12.5`
pub fn parse_number(raw: &str) -> Option<f64> {
    let caps = strict_number().captures(raw.trim())?;
    let open = caps.name("open").is_some();
    let close = caps.name("close").is_some();
    if open != close {
        return None;
    }
    let negative = caps.name("minus").is_some() || open;

    let mut digits = caps.name("body")?.as_str().replace(',', "");
    if let Some(frac) = caps.name("frac") {
        digits.push_str(frac.as_str());
    }
    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Classify one data field
///
/// - blank → empty
/// - leading `=` → formula, copied verbatim
/// - `5%`, `2.5 %` → 0.05, 0.025 with a percent format
/// - `1,200`, `(300)`, `-4.5` → numbers with the accounting format
/// - anything else → text
///
/// A field that has the shape of a number but does not convert (`1.2.3`,
/// `(100`) is an error; callers keep it as text and report it.
pub fn parse_field(raw: &str) -> ModelResult<ParsedField> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(ParsedField::new(CellValue::Empty, NumberFormat::General));
    }
    if trimmed.starts_with('=') {
        return Ok(ParsedField::new(
            CellValue::formula(trimmed),
            NumberFormat::General,
        ));
    }
    if !numeric_shape().is_match(trimmed) {
        return Ok(ParsedField::new(CellValue::text(raw), NumberFormat::General));
    }

    let (body, percent) = match trimmed.strip_suffix('%') {
        Some(body) => (body.trim_end(), true),
        None => (trimmed, false),
    };

    let value = parse_number(body).ok_or_else(|| {
        ModelError::Parse(format!("'{}' looks numeric but could not be converted", raw))
    })?;

    Ok(if percent {
        ParsedField::new(CellValue::Number(value / 100.0), NumberFormat::Percent1)
    } else {
        ParsedField::new(CellValue::Number(value), NumberFormat::Number0NegParen)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn number(raw: &str) -> f64 {
        match parse_field(raw).unwrap().value {
            CellValue::Number(n) => n,
            other => panic!("expected number for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(parse_field("   ").unwrap().value, CellValue::Empty);
    }

    #[test]
    fn test_plain_and_thousands() {
        assert_eq!(number("1200"), 1200.0);
        assert_eq!(number("1,200"), 1200.0);
        assert_eq!(number("12,345,678"), 12_345_678.0);
        assert_eq!(parse_field("1,200").unwrap().format, NumberFormat::Number0NegParen);
    }

    #[test]
    fn test_negatives() {
        assert_eq!(number("-500"), -500.0);
        assert_eq!(number("(1,200)"), -1200.0);
        assert_eq!(number("(45.5)"), -45.5);
    }

    #[test]
    fn test_decimals() {
        assert_eq!(number("1.25"), 1.25);
    }

    #[test]
    fn test_percent() {
        let field = parse_field("2.5%").unwrap();
        assert_eq!(field.format, NumberFormat::Percent1);
        match field.value {
            CellValue::Number(n) => assert!((n - 0.025).abs() < 1e-12),
            other => panic!("expected number, got {other:?}"),
        }
        assert!((number("-1 %") + 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_formula_kept_verbatim() {
        let field = parse_field("=Assumptions_Macro!C3").unwrap();
        assert!(field.is_formula());
        assert_eq!(field.value.as_formula(), Some("=Assumptions_Macro!C3"));
    }

    #[test]
    fn test_text_with_percent_is_text() {
        let field = parse_field("Or abs £m. 2% of RAV").unwrap();
        assert_eq!(field.value, CellValue::text("Or abs £m. 2% of RAV"));
        assert_eq!(field.format, NumberFormat::General);
        assert!(matches!(parse_field("1.2.3%"), Err(ModelError::Parse(_))));
    }

    #[test]
    fn test_year_label_is_text() {
        assert_eq!(parse_field("FY2025").unwrap().value, CellValue::text("FY2025"));
    }

    #[test]
    fn test_malformed_numbers_error() {
        assert!(matches!(parse_field("1.2.3"), Err(ModelError::Parse(_))));
        assert!(matches!(parse_field("(100"), Err(ModelError::Parse(_))));
        assert!(matches!(parse_field("12,34"), Err(ModelError::Parse(_))));
    }
}
