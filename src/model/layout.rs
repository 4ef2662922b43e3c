//! Shared sheet scaffolding: title cell, year header row, column widths

use super::theme::Theme;
use crate::types::{CellStyle, CellValue, SheetPlan};

pub const NOTES_HEADER: &str = "Notes/Links";

/// First column holding year data on forecast-style sheets (B)
pub const FIRST_DATA_COL: u32 = 2;

#[derive(Debug, Clone, Copy)]
pub struct HeaderOptions {
    pub notes_col: bool,
    pub summary: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            notes_col: true,
            summary: false,
        }
    }
}

/// Write the title in A1 and one header cell per year starting at column B.
/// Returns the notes column, if one was written.
pub fn setup_sheet_headers(
    sheet: &mut SheetPlan,
    theme: &Theme,
    title: &str,
    years: &[String],
    options: HeaderOptions,
) -> Option<u32> {
    let header_style = if options.summary {
        CellStyle::SummaryHeader
    } else {
        CellStyle::YearHeader
    };

    sheet.set(1, 1, CellValue::text(title), if options.summary { header_style } else { CellStyle::Title });
    sheet.set_width(
        1,
        if options.summary {
            theme.summary_label_width
        } else {
            theme.label_width
        },
    );

    let year_width = if options.summary {
        theme.summary_year_width
    } else {
        theme.year_width
    };
    for (i, year) in years.iter().enumerate() {
        let col = FIRST_DATA_COL + i as u32;
        sheet.set(1, col, CellValue::text(year.as_str()), header_style);
        sheet.set_width(col, year_width);
    }

    if !options.notes_col {
        return None;
    }
    let notes_col = FIRST_DATA_COL + years.len() as u32;
    sheet.set(1, notes_col, CellValue::text(NOTES_HEADER), header_style);
    sheet.set_width(notes_col, theme.forecast_notes_width);
    Some(notes_col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SheetKind;

    #[test]
    fn test_headers_with_notes() {
        let mut sheet = SheetPlan::new("Credit_Metrics", SheetKind::Placeholder);
        let years = vec!["FY2024".to_string(), "FY2025".to_string()];
        let notes = setup_sheet_headers(&mut sheet, &Theme::default(), "Credit Metrics", &years, HeaderOptions::default());
        assert_eq!(notes, Some(4));
        assert_eq!(sheet.value(1, 1), Some(&CellValue::text("Credit Metrics")));
        assert_eq!(sheet.value(1, 3), Some(&CellValue::text("FY2025")));
        assert_eq!(sheet.value(1, 4), Some(&CellValue::text(NOTES_HEADER)));
        assert_eq!(sheet.get(1, 1).map(|c| c.style), Some(CellStyle::Title));
    }

    #[test]
    fn test_summary_headers_have_no_notes() {
        let mut sheet = SheetPlan::new("Cover_Summary", SheetKind::Summary);
        let years = vec!["FY2024".to_string()];
        let options = HeaderOptions {
            notes_col: false,
            summary: true,
        };
        assert_eq!(setup_sheet_headers(&mut sheet, &Theme::default(), "Model Summary", &years, options), None);
        assert_eq!(sheet.get(1, 2).map(|c| c.style), Some(CellStyle::SummaryHeader));
        assert_eq!(sheet.column_widths.get(&2), Some(&14.0));
    }
}
