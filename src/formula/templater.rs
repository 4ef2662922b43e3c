//! Year-shifting of first-forecast-year formulas
//!
//! A formula written for forecast year 0 is rewritten for year N:
//! - same-sheet and forecast-sheet references move N columns right
//! - assumption-sheet references jump to `assumption_base_column + N`
//! - historical-sheet references stay where they are

use super::reference::{CellAddress, CellReference, MAX_COLUMN};
use super::scanner::{scan, Segment};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a reference is treated when shifting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Sheet prefix names an assumptions sheet
    Assumption,
    /// Sheet prefix names a historical sheet
    Historical,
    /// Same sheet, or any other forecast sheet
    Forecast,
}

/// Sheet-naming conventions the templater relies on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplaterConfig {
    /// Substring that marks an assumptions sheet
    pub assumption_marker: String,
    /// Substring that marks a historical sheet
    pub historical_marker: String,
    /// Column holding the first forecast year on assumption sheets
    /// (after a label column and a unit column)
    pub assumption_base_column: u32,
    /// Leave `$`-marked columns in place instead of shifting them
    pub honor_absolute_columns: bool,
}

impl Default for TemplaterConfig {
    fn default() -> Self {
        Self {
            assumption_marker: "Assumptions_".to_string(),
            historical_marker: "Hist_".to_string(),
            assumption_base_column: 3,
            honor_absolute_columns: false,
        }
    }
}

/// Rewrites formulas for later forecast years
#[derive(Debug, Clone, Default)]
pub struct FormulaTemplater {
    config: TemplaterConfig,
}

impl FormulaTemplater {
    pub fn new(config: TemplaterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TemplaterConfig {
        &self.config
    }

    /// Classify a reference by its sheet prefix
    pub fn classify(&self, reference: &CellReference) -> ReferenceKind {
        match reference.sheet_name() {
            Some(name) if name.contains(&self.config.assumption_marker) => {
                ReferenceKind::Assumption
            }
            Some(name) if name.contains(&self.config.historical_marker) => {
                ReferenceKind::Historical
            }
            _ => ReferenceKind::Forecast,
        }
    }

    /// Shift `formula` from forecast year 0 to forecast year `year_offset`
    ///
    /// Non-formulas (no leading `=`) come back unchanged.
    ///
    /// Example:
    /// - `=B5+B6`, offset 2 → `=D5+D6`
    /// - `='Assumptions_Macro'!C2`, offset 5 → `='Assumptions_Macro'!H2`
    /// - `='Hist_RAV_RateBase'!G7`, any offset → unchanged
    pub fn shift(&self, formula: &str, year_offset: u32) -> String {
        if !formula.starts_with('=') {
            return formula.to_string();
        }

        let mut out = String::with_capacity(formula.len() + 8);
        for segment in scan(formula) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Reference(reference) => {
                    out.push_str(&self.shift_reference(&reference, year_offset).to_string())
                }
            }
        }
        out
    }

    /// Shift one reference; range endpoints share the start's classification
    pub fn shift_reference(&self, reference: &CellReference, year_offset: u32) -> CellReference {
        let kind = self.classify(reference);
        CellReference {
            sheet: reference.sheet.clone(),
            start: self.shift_address(reference.start, kind, year_offset),
            end: reference
                .end
                .map(|end| self.shift_address(end, kind, year_offset)),
        }
    }

    /// Formulas for forecast years `0..years`
    pub fn expand(&self, formula: &str, years: u32) -> Vec<String> {
        (0..years).map(|offset| self.shift(formula, offset)).collect()
    }

    fn shift_address(&self, address: CellAddress, kind: ReferenceKind, year_offset: u32) -> CellAddress {
        if self.config.honor_absolute_columns && address.column_absolute {
            return address;
        }

        let column = match kind {
            ReferenceKind::Assumption => self
                .config
                .assumption_base_column
                .saturating_add(year_offset),
            ReferenceKind::Historical => address.column,
            ReferenceKind::Forecast => address.column.saturating_add(year_offset),
        };

        if column > MAX_COLUMN {
            warn!(
                column = address.column,
                year_offset, "shifted column would pass XFD; reference left unshifted"
            );
            return address;
        }

        address.with_column(column.max(1))
    }
}

/// Shift with the default sheet conventions
pub fn shift(formula: &str, year_offset: u32) -> String {
    FormulaTemplater::default().shift(formula, year_offset)
}
