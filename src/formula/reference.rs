//! Typed cell references: `Sheet!$A$1:$B$2` and friends

use std::fmt;

/// Widest column letter sequence accepted as a reference (Excel stops at XFD)
pub const MAX_COLUMN_LETTERS: usize = 3;

/// Last worksheet column (XFD)
pub const MAX_COLUMN: u32 = 16_384;

/// Convert a one-based column index to letters
///
/// Examples:
/// - 1 → A
/// - 26 → Z
/// - 27 → AA
/// - 16384 → XFD
///
/// Index 0 has no letter form; it is clamped to column A.
pub fn column_to_letters(column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column.max(1);

    while n > 0 {
        let remainder = (n - 1) % 26;
        letters.push(b'A' + remainder as u8);
        n = (n - 1) / 26;
    }

    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert uppercase column letters to a one-based index
///
/// Returns `None` for an empty string, any non-uppercase character, or a
/// column past [`MAX_COLUMN`].
pub fn letters_to_column(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    letters
        .bytes()
        .try_fold(0u32, |acc, b| {
            if !b.is_ascii_uppercase() {
                return None;
            }
            acc.checked_mul(26)?.checked_add(u32::from(b - b'A') + 1)
        })
        .filter(|&column| column <= MAX_COLUMN)
}

/// Sheet qualifier in front of `!`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPrefix {
    /// Sheet name with quotes removed and `''` unescaped
    pub name: String,
    /// Whether the source wrote the name inside single quotes
    pub quoted: bool,
}

impl SheetPrefix {
    pub fn unquoted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: false,
        }
    }

    pub fn quoted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: true,
        }
    }
}

impl fmt::Display for SheetPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "'{}'!", self.name.replace('\'', "''"))
        } else {
            write!(f, "{}!", self.name)
        }
    }
}

/// One column+row pair, each axis with its own `$` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    /// One-based column index
    pub column: u32,
    pub column_absolute: bool,
    /// One-based row number
    pub row: u32,
    pub row_absolute: bool,
}

impl CellAddress {
    pub fn new(column: u32, row: u32) -> Self {
        Self {
            column,
            column_absolute: false,
            row,
            row_absolute: false,
        }
    }

    pub fn with_column(self, column: u32) -> Self {
        Self { column, ..self }
    }

    pub fn column_letters(&self) -> String {
        column_to_letters(self.column)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.column_absolute { "$" } else { "" },
            self.column_letters(),
            if self.row_absolute { "$" } else { "" },
            self.row
        )
    }
}

/// A single cell or a two-cell range, optionally sheet-qualified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellReference {
    pub sheet: Option<SheetPrefix>,
    pub start: CellAddress,
    /// Range terminator; shares the sheet prefix of `start`
    pub end: Option<CellAddress>,
}

impl CellReference {
    pub fn cell(start: CellAddress) -> Self {
        Self {
            sheet: None,
            start,
            end: None,
        }
    }

    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }

    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet.as_ref().map(|s| s.name.as_str())
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}", sheet)?;
        }
        write!(f, "{}", self.start)?;
        if let Some(end) = &self.end {
            write!(f, ":{}", end)?;
        }
        Ok(())
    }
}
