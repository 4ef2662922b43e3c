use serde::Serialize;
use std::collections::BTreeMap;

//==============================================================================
// Cell content
//==============================================================================

/// Number formats used across the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    General,
    /// 0.0%
    Percent1,
    /// 0%
    Percent0,
    /// #,##0
    Number0,
    /// #,##0;(#,##0);0
    Number0NegParen,
    /// #,##0.00
    Number2,
    /// 0.00x
    Multiplier,
}

impl NumberFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::Percent1 => "0.0%",
            NumberFormat::Percent0 => "0%",
            NumberFormat::Number0 => "#,##0",
            NumberFormat::Number0NegParen => "#,##0;(#,##0);0",
            NumberFormat::Number2 => "#,##0.00",
            NumberFormat::Multiplier => "0.00x",
        }
    }
}

/// What goes into a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    /// Formula text including the leading `=`; never evaluated here
    Formula(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn formula(s: impl Into<String>) -> Self {
        CellValue::Formula(s.into())
    }

    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Semantic cell styles; the theme decides what they look like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    /// Sheet title in A1
    Title,
    /// Year and "Notes/Links" header cells
    YearHeader,
    /// Header cells on the summary sheet
    SummaryHeader,
    /// Merged section banner across a row
    SectionHeader,
    /// Bold label with light fill (block titles)
    Subheader,
    /// Bold row label
    RowLabel,
    /// Manually entered value
    Input(NumberFormat),
    /// Computed cell
    Formula(NumberFormat),
    /// Free text: notes, units
    Note,
    /// "To be implemented" marker
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// A horizontal merge on one row (1-based, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merge {
    pub row: u32,
    pub first_col: u32,
    pub last_col: u32,
}

//==============================================================================
// Sheets and workbook
//==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Assumption,
    Historical,
    Forecast,
    Placeholder,
    Summary,
}

/// In-memory layout of one worksheet; rows and columns are 1-based
#[derive(Debug, Clone)]
pub struct SheetPlan {
    pub name: String,
    pub kind: SheetKind,
    pub cells: BTreeMap<(u32, u32), PlannedCell>,
    pub merges: Vec<Merge>,
    pub column_widths: BTreeMap<u32, f64>,
}

impl SheetPlan {
    pub fn new(name: impl Into<String>, kind: SheetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cells: BTreeMap::new(),
            merges: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, row: u32, col: u32, value: CellValue, style: CellStyle) {
        self.cells.insert((row, col), PlannedCell { value, style });
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&PlannedCell> {
        self.cells.get(&(row, col))
    }

    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.get(row, col).map(|c| &c.value)
    }

    pub fn merge_row(&mut self, row: u32, first_col: u32, last_col: u32) {
        self.merges.push(Merge {
            row,
            first_col,
            last_col,
        });
    }

    pub fn set_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn is_merge_anchor(&self, row: u32, col: u32) -> bool {
        self.merges
            .iter()
            .any(|m| m.row == row && m.first_col == col && m.last_col > m.first_col)
    }

    pub fn formula_count(&self) -> usize {
        self.cells
            .values()
            .filter(|c| matches!(c.value, CellValue::Formula(_)))
            .count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkbookPlan {
    pub sheets: Vec<SheetPlan>,
}

impl WorkbookPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: SheetPlan) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetPlan> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Move a sheet to the front of the document order; no-op if absent
    pub fn move_to_front(&mut self, name: &str) {
        if let Some(idx) = self.sheets.iter().position(|s| s.name == name) {
            let sheet = self.sheets.remove(idx);
            self.sheets.insert(0, sheet);
        }
    }
}

//==============================================================================
// Generation report
//==============================================================================

/// A non-fatal problem with one sheet's input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationWarning {
    pub sheet: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub warnings: Vec<GenerationWarning>,
}

impl GenerationReport {
    pub fn warn(&mut self, sheet: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(GenerationWarning {
            sheet: sheet.into(),
            message: message.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
