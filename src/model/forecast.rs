//! Forecast and summary sheets
//!
//! `RAV_RateBase_Forecast` is fully populated: each row carries a formula
//! for the first forecast year and the templater derives the rest.
//! The other forecast sheets are structural placeholders.

use super::layout::{setup_sheet_headers, HeaderOptions, FIRST_DATA_COL};
use super::theme::Theme;
use super::years::YearAxis;
use crate::formula::{column_to_letters, FormulaTemplater};
use crate::types::{CellStyle, CellValue, NumberFormat, SheetKind, SheetPlan};

pub const RAV_FORECAST_SHEET: &str = "RAV_RateBase_Forecast";
pub const SUMMARY_SHEET: &str = "Cover_Summary";
pub const BALANCE_SHEET: &str = "Forecast_BS_Consol";

pub const PLACEHOLDER_NOTE: &str =
    "FORMULAS TO BE IMPLEMENTED FOR ALL YEARS BASED ON MODEL LOGIC (FIRST YEAR AS TEMPLATE)";

const HIST_RAV_SHEET: &str = "Hist_RAV_RateBase";
const UK_REG_SHEET: &str = "Assumptions_UK_Reg";
const MACRO_SHEET: &str = "Assumptions_Macro";

/// Balance check row and the total rows it compares
const BALANCE_CHECK_ROW: u32 = 50;
const TOTAL_ASSETS_ROW: u32 = 20;
const TOTAL_LIABILITIES_EQUITY_ROW: u32 = 45;

/// How a forecast row fills the years after the first
#[derive(Debug, Clone, PartialEq)]
pub enum RowRule {
    /// Block title; label only
    Title,
    /// Formula for year 0, shifted for later years
    Template(String),
    /// Year 0 formula, then the previous year's closing row
    Opening { first_year: String, closing_offset: u32 },
    /// Same manual value every year
    Constant(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowTemplate {
    pub row: u32,
    pub label: String,
    pub unit: String,
    pub rule: RowRule,
}

impl RowTemplate {
    fn new(row: u32, label: &str, unit: &str, rule: RowRule) -> Self {
        Self {
            row,
            label: label.to_string(),
            unit: unit.to_string(),
            rule,
        }
    }
}

/// Row numbers of one RAV block on the source sheets
struct RavBlock<'a> {
    title: &'a str,
    /// First row of the block on the forecast sheet (the title row)
    start_row: u32,
    /// Closing RAV row on `Hist_RAV_RateBase`
    hist_closing_row: u32,
    /// Capex row on `Assumptions_UK_Reg`; depreciation rate is the row below
    capex_row: u32,
}

/// Row for UK CPIH on `Assumptions_Macro`
const CPIH_ROW: u32 = 3;

fn rav_block(block: &RavBlock<'_>, axis: &YearAxis, templater: &FormulaTemplater) -> Vec<RowTemplate> {
    // FY-last historical column: label column plus one per historical year
    let hist_col = column_to_letters(1 + axis.historical.len() as u32);
    let assumption_col = column_to_letters(templater.config().assumption_base_column);
    let first = column_to_letters(FIRST_DATA_COL);

    let title = block.start_row;
    let opening = title + 1;
    let closing = title + 6;

    vec![
        RowTemplate::new(title, block.title, "", RowRule::Title),
        RowTemplate::new(
            opening,
            "Opening RAV",
            "£m",
            RowRule::Opening {
                first_year: format!("='{}'!{}{}", HIST_RAV_SHEET, hist_col, block.hist_closing_row),
                closing_offset: closing - opening,
            },
        ),
        RowTemplate::new(
            title + 2,
            "Capex Additions (Allowed)",
            "£m",
            RowRule::Template(format!("='{}'!{}{}", UK_REG_SHEET, assumption_col, block.capex_row)),
        ),
        RowTemplate::new(
            title + 3,
            "Regulatory Depreciation",
            "£m",
            RowRule::Template(format!(
                "=-{first}{opening}*'{}'!{}{}",
                UK_REG_SHEET,
                assumption_col,
                block.capex_row + 1
            )),
        ),
        RowTemplate::new(
            title + 4,
            "Inflation Adjustment",
            "£m",
            RowRule::Template(format!(
                "={first}{opening}*'{}'!{}{}",
                MACRO_SHEET, assumption_col, CPIH_ROW
            )),
        ),
        RowTemplate::new(title + 5, "Other Movements", "£m", RowRule::Constant(0.0)),
        RowTemplate::new(
            closing,
            "Closing RAV",
            "£m",
            RowRule::Template(format!("=SUM({first}{opening}:{first}{})", closing - 1)),
        ),
    ]
}

/// Row definitions for the RAV forecast (NGET and NGED blocks)
pub fn rav_rows(axis: &YearAxis, templater: &FormulaTemplater) -> Vec<RowTemplate> {
    let blocks = [
        RavBlock {
            title: "UK Electricity Transmission (NGET) - RAV",
            start_row: 2,
            hist_closing_row: 7,
            capex_row: 3,
        },
        RavBlock {
            title: "UK Electricity Distribution (NGED) - RAV",
            start_row: 9,
            hist_closing_row: 13,
            capex_row: 7,
        },
    ];

    blocks
        .iter()
        .flat_map(|block| rav_block(block, axis, templater))
        .collect()
}

/// Fill one row template across every forecast year
pub fn populate_row(
    sheet: &mut SheetPlan,
    template: &RowTemplate,
    year_count: u32,
    notes_col: u32,
    templater: &FormulaTemplater,
) {
    if template.rule == RowRule::Title {
        sheet.set(template.row, 1, CellValue::text(template.label.as_str()), CellStyle::Subheader);
        return;
    }

    sheet.set(template.row, 1, CellValue::text(template.label.as_str()), CellStyle::RowLabel);
    sheet.set(template.row, notes_col, CellValue::text(template.unit.as_str()), CellStyle::Note);

    let formula_style = CellStyle::Formula(NumberFormat::Number0NegParen);
    for year_idx in 0..year_count {
        let col = FIRST_DATA_COL + year_idx;
        match &template.rule {
            RowRule::Title => {}
            RowRule::Template(base) => {
                sheet.set(template.row, col, CellValue::formula(templater.shift(base, year_idx)), formula_style);
            }
            RowRule::Opening {
                first_year,
                closing_offset,
            } => {
                let formula = if year_idx == 0 {
                    first_year.clone()
                } else {
                    format!("={}{}", column_to_letters(col - 1), template.row + closing_offset)
                };
                sheet.set(template.row, col, CellValue::formula(formula), formula_style);
            }
            RowRule::Constant(value) => {
                sheet.set(
                    template.row,
                    col,
                    CellValue::Number(*value),
                    CellStyle::Input(NumberFormat::Number0NegParen),
                );
            }
        }
    }
}

pub fn build_rav_forecast(axis: &YearAxis, theme: &Theme, templater: &FormulaTemplater) -> SheetPlan {
    let mut sheet = SheetPlan::new(RAV_FORECAST_SHEET, SheetKind::Forecast);
    let notes_col = setup_sheet_headers(
        &mut sheet,
        theme,
        "Forecast RAV & Rate Base",
        &axis.forecast,
        HeaderOptions::default(),
    )
    .unwrap_or(FIRST_DATA_COL + axis.forecast.len() as u32);

    let year_count = axis.forecast.len() as u32;
    for template in rav_rows(axis, templater) {
        populate_row(&mut sheet, &template, year_count, notes_col, templater);
    }
    sheet
}

/// A placeholder sheet: headers plus the "to be implemented" marker
pub struct PlaceholderSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub years: Vec<String>,
    pub kind: SheetKind,
}

pub fn placeholder_specs(axis: &YearAxis) -> Vec<PlaceholderSpec> {
    let display = axis.display();
    vec![
        PlaceholderSpec {
            name: "Forecast_PL_Segment",
            title: "Forecast P&L by Segment (£m)",
            years: display.clone(),
            kind: SheetKind::Placeholder,
        },
        PlaceholderSpec {
            name: "Debt_Schedule_Forecast",
            title: "Forecast Debt Schedule (£m)",
            years: axis.forecast.clone(),
            kind: SheetKind::Placeholder,
        },
        PlaceholderSpec {
            name: "Forecast_CF_Consol",
            title: "Forecast Cash Flow (£m)",
            years: display.clone(),
            kind: SheetKind::Placeholder,
        },
        PlaceholderSpec {
            name: BALANCE_SHEET,
            title: "Forecast Balance Sheet (£m)",
            years: display.clone(),
            kind: SheetKind::Placeholder,
        },
        PlaceholderSpec {
            name: "Credit_Metrics",
            title: "Credit Metrics",
            years: display,
            kind: SheetKind::Placeholder,
        },
        PlaceholderSpec {
            name: SUMMARY_SHEET,
            title: "Model Summary",
            years: axis.summary(),
            kind: SheetKind::Summary,
        },
    ]
}

pub fn build_placeholder(spec: &PlaceholderSpec, theme: &Theme) -> SheetPlan {
    let summary = spec.kind == SheetKind::Summary;
    let mut sheet = SheetPlan::new(spec.name, spec.kind);

    setup_sheet_headers(
        &mut sheet,
        theme,
        spec.title,
        &spec.years,
        HeaderOptions {
            notes_col: !summary,
            summary,
        },
    );
    if !summary {
        sheet.set_width(1, theme.summary_label_width);
    }

    sheet.set(3, 2, CellValue::text(PLACEHOLDER_NOTE), CellStyle::Placeholder);

    if spec.name == BALANCE_SHEET {
        sheet.set(
            BALANCE_CHECK_ROW,
            1,
            CellValue::text("Balance Check (Assets - L&E)"),
            CellStyle::RowLabel,
        );
        for i in 0..spec.years.len() as u32 {
            let col = FIRST_DATA_COL + i;
            let letters = column_to_letters(col);
            sheet.set(
                BALANCE_CHECK_ROW,
                col,
                CellValue::formula(format!(
                    "={letters}{TOTAL_ASSETS_ROW}-{letters}{TOTAL_LIABILITIES_EQUITY_ROW}"
                )),
                CellStyle::Formula(NumberFormat::Number0),
            );
        }
    }

    sheet
}
