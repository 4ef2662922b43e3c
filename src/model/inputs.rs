//! Assumption and historical sheets, filled from CSV tables

use super::theme::Theme;
use crate::config::TableKind;
use crate::input::{LoadedTable, TableRow};
use crate::types::{CellStyle, CellValue, SheetKind, SheetPlan};
use std::path::Path;

/// Column where year data begins for a table kind (after label, and unit for assumptions)
pub fn data_start_col(kind: TableKind) -> u32 {
    match kind {
        TableKind::Assumption => 3,
        TableKind::Historical => 2,
    }
}

pub fn sheet_kind(kind: TableKind) -> SheetKind {
    match kind {
        TableKind::Assumption => SheetKind::Assumption,
        TableKind::Historical => SheetKind::Historical,
    }
}

/// Lay a loaded table onto a sheet, one file line per sheet row
pub fn place_table(sheet: &mut SheetPlan, table: &LoadedTable) {
    for (idx, row) in table.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        match row {
            TableRow::Header(fields) => {
                for (c, field) in fields.iter().enumerate() {
                    let style = if c == 0 {
                        CellStyle::Title
                    } else {
                        CellStyle::YearHeader
                    };
                    sheet.set(r, c as u32 + 1, CellValue::text(field.as_str()), style);
                }
            }
            TableRow::Section { label, width } => {
                sheet.set(r, 1, CellValue::text(label.as_str()), CellStyle::SectionHeader);
                sheet.merge_row(r, 1, (*width as u32).max(1));
            }
            TableRow::Data { label, fields } => {
                sheet.set(r, 1, CellValue::text(label.as_str()), CellStyle::RowLabel);
                for (c, field) in fields.iter().enumerate() {
                    let style = match &field.value {
                        CellValue::Empty => continue,
                        CellValue::Number(_) => CellStyle::Input(field.format),
                        CellValue::Formula(_) => CellStyle::Formula(field.format),
                        CellValue::Text(_) => CellStyle::Note,
                    };
                    sheet.set(r, c as u32 + 2, field.value.clone(), style);
                }
            }
            TableRow::Blank => {}
        }
    }
}

/// Column widths for a CSV-backed sheet
pub fn apply_widths(sheet: &mut SheetPlan, theme: &Theme, kind: TableKind, year_count: usize) {
    let start = data_start_col(kind);
    sheet.set_width(1, theme.label_width);
    if kind == TableKind::Assumption {
        sheet.set_width(2, theme.year_width);
    }
    for i in 0..year_count as u32 {
        sheet.set_width(start + i, theme.year_width);
    }
    sheet.set_width(start + year_count as u32, theme.input_notes_width);
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Visible marker for an input file that does not exist
pub fn missing_notice(sheet: &mut SheetPlan, path: &Path) {
    sheet.set(
        1,
        1,
        CellValue::text(format!("Error: {} not found. Please create it.", file_label(path))),
        CellStyle::Placeholder,
    );
}

/// Visible marker for an input file that exists but could not be read
pub fn load_error_notice(sheet: &mut SheetPlan, path: &Path, error: &impl std::fmt::Display) {
    sheet.set(
        1,
        1,
        CellValue::text(format!("Error loading {}: {}", file_label(path), error)),
        CellStyle::Placeholder,
    );
}
