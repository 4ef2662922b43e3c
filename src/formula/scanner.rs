//! Reference scanner for formula text
//!
//! Splits a formula like `=SUM(B3:B6)*'Assumptions_Macro'!C3` into verbatim
//! text pieces and typed [`CellReference`]s, so rewriting never touches
//! operators, function names or string literals.

use super::reference::{letters_to_column, CellAddress, CellReference, SheetPrefix, MAX_COLUMN_LETTERS};

/// A piece of a scanned formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Anything that is not a cell reference, copied as-is
    Text(&'a str),
    /// A cell or range reference
    Reference(CellReference),
}

/// Scan a formula into segments
///
/// Concatenating the rendered segments reproduces the input, except that
/// references are re-rendered from their typed form.
pub fn scan(formula: &str) -> Vec<Segment<'_>> {
    let bytes = formula.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'"' {
            pos = skip_string_literal(bytes, pos);
            continue;
        }

        if can_start_reference(bytes, pos) {
            if let Some((reference, end)) = read_reference(formula, pos) {
                if text_start < pos {
                    segments.push(Segment::Text(&formula[text_start..pos]));
                }
                segments.push(Segment::Reference(reference));
                pos = end;
                text_start = end;
                continue;
            }
        }

        pos += 1;
    }

    if text_start < bytes.len() {
        segments.push(Segment::Text(&formula[text_start..]));
    }

    segments
}

/// Collect only the references of a formula
pub fn references(formula: &str) -> Vec<CellReference> {
    scan(formula)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Reference(r) => Some(r),
            Segment::Text(_) => None,
        })
        .collect()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_sheet_name_byte(b: u8) -> bool {
    is_word_byte(b) || b == b'.'
}

/// A reference cannot begin in the middle of an identifier or number
fn can_start_reference(bytes: &[u8], pos: usize) -> bool {
    let b = bytes[pos];
    if !(b == b'\'' || b == b'$' || is_word_byte(b)) {
        return false;
    }
    match pos.checked_sub(1).map(|p| bytes[p]) {
        Some(prev) => !(is_sheet_name_byte(prev) || prev == b'$'),
        None => true,
    }
}

/// Returns the index just past the closing quote (or the end of input)
fn skip_string_literal(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        if bytes[pos] == b'"' {
            if bytes.get(pos + 1) == Some(&b'"') {
                pos += 2;
                continue;
            }
            return pos + 1;
        }
        pos += 1;
    }
    bytes.len()
}

fn read_reference(formula: &str, start: usize) -> Option<(CellReference, usize)> {
    let bytes = formula.as_bytes();
    let (sheet, pos) = read_sheet_prefix(formula, start)?;

    let (first, pos) = read_address(bytes, pos)?;

    let (end, pos) = match bytes.get(pos) {
        Some(b':') => match read_address(bytes, pos + 1) {
            Some((second, after)) if ends_cleanly(bytes, after) => (Some(second), after),
            _ => (None, pos),
        },
        _ => (None, pos),
    };

    if end.is_none() && !ends_cleanly(bytes, pos) {
        return None;
    }

    Some((
        CellReference {
            sheet,
            start: first,
            end,
        },
        pos,
    ))
}

/// The token must not run into an identifier or a call: `B5X`, `LOG10(`
fn ends_cleanly(bytes: &[u8], pos: usize) -> bool {
    match bytes.get(pos) {
        None => true,
        Some(&b) => !(is_sheet_name_byte(b) || b == b'(' || b == b'!' || b == b'$'),
    }
}

/// Returns the optional prefix and the position where the address starts.
/// `None` means the text at `start` cannot be a reference at all.
fn read_sheet_prefix(formula: &str, start: usize) -> Option<(Option<SheetPrefix>, usize)> {
    let bytes = formula.as_bytes();

    if bytes[start] == b'\'' {
        let mut name = String::new();
        let mut pos = start + 1;
        let mut segment_start = pos;
        loop {
            match bytes.get(pos) {
                None => return None,
                Some(b'\'') if bytes.get(pos + 1) == Some(&b'\'') => {
                    name.push_str(&formula[segment_start..pos]);
                    name.push('\'');
                    pos += 2;
                    segment_start = pos;
                }
                Some(b'\'') => {
                    name.push_str(&formula[segment_start..pos]);
                    pos += 1;
                    break;
                }
                Some(_) => pos += 1,
            }
        }
        if bytes.get(pos) != Some(&b'!') || name.is_empty() {
            return None;
        }
        return Some((Some(SheetPrefix::quoted(name)), pos + 1));
    }

    let mut pos = start;
    while pos < bytes.len() && is_sheet_name_byte(bytes[pos]) {
        pos += 1;
    }
    if pos > start && bytes.get(pos) == Some(&b'!') {
        return Some((
            Some(SheetPrefix::unquoted(&formula[start..pos])),
            pos + 1,
        ));
    }

    Some((None, start))
}

fn read_address(bytes: &[u8], start: usize) -> Option<(CellAddress, usize)> {
    let mut pos = start;

    let column_absolute = bytes.get(pos) == Some(&b'$');
    if column_absolute {
        pos += 1;
    }
    let letters_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_uppercase() {
        pos += 1;
    }
    let letter_count = pos - letters_start;
    if letter_count == 0 || letter_count > MAX_COLUMN_LETTERS {
        return None;
    }
    let letters = std::str::from_utf8(&bytes[letters_start..pos]).ok()?;
    let column = letters_to_column(letters)?;

    let row_absolute = bytes.get(pos) == Some(&b'$');
    if row_absolute {
        pos += 1;
    }
    let digits_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos == digits_start {
        return None;
    }
    let row: u32 = std::str::from_utf8(&bytes[digits_start..pos])
        .ok()?
        .parse()
        .ok()?;
    if row == 0 {
        return None;
    }

    Some((
        CellAddress {
            column,
            column_absolute,
            row,
            row_absolute,
        },
        pos,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(segments: &[Segment<'_>]) -> String {
        segments
            .iter()
            .map(|s| match s {
                Segment::Text(t) => t.to_string(),
                Segment::Reference(r) => r.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_scan_simple_sum() {
        let segments = scan("=B5+B6");
        assert_eq!(
            segments,
            vec![
                Segment::Text("="),
                Segment::Reference(CellReference::cell(CellAddress::new(2, 5))),
                Segment::Text("+"),
                Segment::Reference(CellReference::cell(CellAddress::new(2, 6))),
            ]
        );
    }

    #[test]
    fn test_scan_range() {
        let refs = references("=SUM(B3:B6)");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].start, CellAddress::new(2, 3));
        assert_eq!(refs[0].end, Some(CellAddress::new(2, 6)));
    }

    #[test]
    fn test_scan_quoted_and_unquoted_sheets() {
        let refs = references("='Hist_RAV_RateBase'!G7+Assumptions_Macro!$C$3");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].sheet, Some(SheetPrefix::quoted("Hist_RAV_RateBase")));
        assert_eq!(refs[1].sheet, Some(SheetPrefix::unquoted("Assumptions_Macro")));
        assert!(refs[1].start.column_absolute);
        assert!(refs[1].start.row_absolute);
    }

    #[test]
    fn test_scan_skips_function_names_with_digits() {
        let refs = references("=LOG10(A2)+ATAN2(B1,C1)");
        let rendered: Vec<String> = refs.iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["A2", "B1", "C1"]);
    }

    #[test]
    fn test_scan_skips_string_literals() {
        let refs = references("=MATCH(\"FY2025\",B1:Q1,0)");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].to_string(), "B1:Q1");
    }

    #[test]
    fn test_scan_skips_identifier_tails_and_numbers() {
        assert!(references("=AB5X+1E5").is_empty());
        assert!(references("=TOTAL2024").is_empty());
        let rendered: Vec<String> = references("=XB5*2").iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, vec!["XB5"]);
    }

    #[test]
    fn test_scan_ignores_lowercase() {
        assert!(references("=b5+c6").is_empty());
    }

    #[test]
    fn test_scan_columns_past_xfd_are_not_references() {
        assert!(references("=XFE1+ZZZ2").is_empty());
        assert_eq!(references("=XFD1").len(), 1);
    }

    #[test]
    fn test_scan_row_zero_is_not_a_reference() {
        assert!(references("=A0").is_empty());
    }

    #[test]
    fn test_scan_preserves_text_verbatim() {
        let formula = "=-B3*INDEX(Assumptions_UK_Reg!$C$4:$R$4,1,MATCH(B$1,Assumptions_UK_Reg!$C$1:$R$1,0))";
        assert_eq!(render(&scan(formula)), formula);
    }

    #[test]
    fn test_scan_quoted_sheet_with_spaces_and_escape() {
        let refs = references("='Bob''s Plan'!A1");
        assert_eq!(refs[0].sheet_name(), Some("Bob's Plan"));
        assert_eq!(render(&scan("='Bob''s Plan'!A1")), "='Bob''s Plan'!A1");
    }

    #[test]
    fn test_scan_non_ascii_text_passes_through() {
        let formula = "=B2&\"£m\"&C2";
        assert_eq!(render(&scan(formula)), formula);
        assert_eq!(references(formula).len(), 2);
    }
}
