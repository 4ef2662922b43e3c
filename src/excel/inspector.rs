//! Read a generated workbook back with calamine

use crate::error::{ModelError, ModelResult};
use crate::formula::column_to_letters;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub formula_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaCell {
    /// A1-style address, e.g. `C4`
    pub address: String,
    /// Formula text with its leading `=`
    pub formula: String,
}

pub struct WorkbookInspector {
    workbook: Xlsx<BufReader<File>>,
}

impl WorkbookInspector {
    pub fn open(path: &Path) -> ModelResult<Self> {
        let workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            ModelError::Inspect(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        Ok(Self { workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    pub fn summary(&mut self) -> ModelResult<Vec<SheetSummary>> {
        let mut summaries = Vec::new();
        for name in self.sheet_names() {
            let values = self.values(&name)?;
            let (rows, cols) = values.get_size();
            let formula_cells = self.formulas(&name)?.len();
            summaries.push(SheetSummary {
                name,
                rows,
                cols,
                formula_cells,
            });
        }
        Ok(summaries)
    }

    /// Every formula cell on one sheet, in row-major order
    pub fn formulas(&mut self, sheet: &str) -> ModelResult<Vec<FormulaCell>> {
        let range = self
            .workbook
            .worksheet_formula(sheet)
            .map_err(|e| ModelError::Inspect(format!("Failed to read formulas of '{}': {}", sheet, e)))?;
        Ok(collect_formulas(&range))
    }

    fn values(&mut self, sheet: &str) -> ModelResult<Range<Data>> {
        self.workbook
            .worksheet_range(sheet)
            .map_err(|e| ModelError::Inspect(format!("Failed to read sheet '{}': {}", sheet, e)))
    }

    /// Cell value by 1-based row and column
    pub fn value(&mut self, sheet: &str, row: u32, col: u32) -> ModelResult<Option<Data>> {
        let range = self.values(sheet)?;
        if row == 0 || col == 0 {
            return Ok(None);
        }
        Ok(range.get_value((row - 1, col - 1)).cloned())
    }
}

/// Range offsets are relative to its start; addresses are absolute
fn collect_formulas(range: &Range<String>) -> Vec<FormulaCell> {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    range
        .used_cells()
        .filter(|(_, _, f)| !f.is_empty())
        .map(|(r, c, f)| {
            // calamine strips the leading '='
            let formula = if f.starts_with('=') {
                f.clone()
            } else {
                format!("={}", f)
            };
            FormulaCell {
                address: format!(
                    "{}{}",
                    column_to_letters(start_col + c as u32 + 1),
                    start_row + r as u32 + 1
                ),
                formula,
            }
        })
        .collect()
}
