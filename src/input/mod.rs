//! CSV input tables
//!
//! Each assumption or historical statement arrives as one delimited file:
//! a header row, then section banners and labelled data rows.

mod field;

pub use field::{parse_field, parse_number, ParsedField};

use crate::error::{ModelError, ModelResult};
use crate::types::{CellValue, NumberFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// First-column labels that never start a section, even with an empty row
const NON_SECTION_LABELS: [&str; 3] = ["Assumption", "Line Item (£m)", "Line Item"];

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// First line of the file
    Header(Vec<String>),
    /// Label with nothing after it; spans `width` columns
    Section { label: String, width: usize },
    /// Label followed by classified fields
    Data { label: String, fields: Vec<ParsedField> },
    /// Entirely empty line, kept so sheet rows line up with file lines
    Blank,
}

/// A field kept as text because it did not convert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line in the file (and row in the sheet)
    pub row: u32,
    /// 1-based field position
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub rows: Vec<TableRow>,
    pub warnings: Vec<ParseWarning>,
}

impl LoadedTable {
    pub fn data_rows(&self) -> impl Iterator<Item = (&str, &[ParsedField])> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Data { label, fields } => Some((label.as_str(), fields.as_slice())),
            _ => None,
        })
    }
}

/// Decide what kind of row a non-header record is
pub fn classify_row(record: &[String]) -> RowShape {
    if record.iter().all(|f| f.trim().is_empty()) {
        return RowShape::Blank;
    }
    let label = record.first().map(|s| s.trim()).unwrap_or_default();
    let rest_empty = record.iter().skip(1).all(|f| f.trim().is_empty());
    if rest_empty && !NON_SECTION_LABELS.contains(&label) {
        RowShape::Section
    } else {
        RowShape::Data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    Section,
    Data,
    Blank,
}

/// Load one CSV table
///
/// A missing file is [`ModelError::MissingInput`]; callers treat it as a
/// per-sheet warning. Fields that look numeric but fail to convert stay as
/// text and are listed in [`LoadedTable::warnings`].
pub fn load_table(sheet: &str, path: &Path) -> ModelResult<LoadedTable> {
    if !path.is_file() {
        return Err(ModelError::MissingInput {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
        });
    }

    debug!(sheet, path = %path.display(), "loading input table");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let record: Vec<String> = record?.iter().map(|s| s.to_string()).collect();
        let row_num = idx as u32 + 1;

        if idx == 0 {
            rows.push(TableRow::Header(record));
            continue;
        }

        let row = match classify_row(&record) {
            RowShape::Blank => TableRow::Blank,
            RowShape::Section => TableRow::Section {
                label: record[0].trim().to_string(),
                width: record.len(),
            },
            RowShape::Data => {
                let label = record.first().cloned().unwrap_or_default();
                let fields = record
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(col_idx, raw)| match parse_field(raw) {
                        Ok(field) => field,
                        Err(e) => {
                            warn!(sheet, row = row_num, column = col_idx + 1, "{}", e);
                            warnings.push(ParseWarning {
                                row: row_num,
                                column: col_idx as u32 + 1,
                                message: e.to_string(),
                            });
                            ParsedField {
                                value: CellValue::text(raw.as_str()),
                                format: NumberFormat::General,
                            }
                        }
                    })
                    .collect();
                TableRow::Data { label, fields }
            }
        };
        rows.push(row);
    }

    Ok(LoadedTable {
        path: path.to_path_buf(),
        rows,
        warnings,
    })
}
