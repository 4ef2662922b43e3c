//! Excel exporter: renders a [`WorkbookPlan`] with rust_xlsxwriter

use crate::error::{ModelError, ModelResult};
use crate::model::Theme;
use crate::types::{CellStyle, CellValue, NumberFormat, SheetPlan, WorkbookPlan};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub struct ExcelExporter {
    theme: Theme,
}

impl ExcelExporter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Write every planned sheet, in plan order, to one `.xlsx` file
    pub fn export(&self, plan: &WorkbookPlan, output_path: &Path) -> ModelResult<()> {
        let mut workbook = Workbook::new();
        let mut formats: HashMap<CellStyle, Format> = HashMap::new();

        for sheet in &plan.sheets {
            let worksheet = workbook.add_worksheet();
            self.export_sheet(worksheet, sheet, &mut formats)?;
        }

        workbook
            .save(output_path)
            .map_err(|e| ModelError::Export(format!("Failed to save Excel file: {}", e)))?;

        debug!(path = %output_path.display(), sheets = plan.sheets.len(), "workbook saved");
        Ok(())
    }

    fn export_sheet(
        &self,
        worksheet: &mut Worksheet,
        sheet: &SheetPlan,
        formats: &mut HashMap<CellStyle, Format>,
    ) -> ModelResult<()> {
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| ModelError::Export(format!("Failed to set worksheet name '{}': {}", sheet.name, e)))?;

        for (&col, &width) in &sheet.column_widths {
            worksheet
                .set_column_width(col_index(col)?, width)
                .map_err(|e| ModelError::Export(format!("Failed to set column width: {}", e)))?;
        }

        // Merged ranges carry the anchor cell's text and format
        for merge in sheet.merges.iter().filter(|m| m.last_col > m.first_col) {
            let Some(anchor) = sheet.get(merge.row, merge.first_col) else {
                continue;
            };
            let text = match &anchor.value {
                CellValue::Text(t) => t.as_str(),
                _ => "",
            };
            let format = self.cached(formats, anchor.style);
            worksheet
                .merge_range(
                    merge.row - 1,
                    col_index(merge.first_col)?,
                    merge.row - 1,
                    col_index(merge.last_col)?,
                    text,
                    &format,
                )
                .map_err(|e| {
                    ModelError::Export(format!(
                        "Failed to merge row {} on '{}': {}",
                        merge.row, sheet.name, e
                    ))
                })?;
        }

        for (&(row, col), cell) in &sheet.cells {
            if sheet.is_merge_anchor(row, col) {
                continue;
            }
            let format = self.cached(formats, cell.style);
            let (r, c) = (row - 1, col_index(col)?);

            let result = match &cell.value {
                CellValue::Empty => worksheet.write_blank(r, c, &format).map(|_| ()),
                CellValue::Number(n) => worksheet.write_number_with_format(r, c, *n, &format).map(|_| ()),
                CellValue::Text(t) => worksheet.write_string_with_format(r, c, t, &format).map(|_| ()),
                CellValue::Formula(f) => worksheet
                    .write_formula_with_format(r, c, Formula::new(f), &format)
                    .map(|_| ()),
            };
            result.map_err(|e| {
                ModelError::Export(format!(
                    "Failed to write cell ({}, {}) on '{}': {}",
                    row, col, sheet.name, e
                ))
            })?;
        }

        Ok(())
    }

    fn cached(&self, formats: &mut HashMap<CellStyle, Format>, style: CellStyle) -> Format {
        formats
            .entry(style)
            .or_insert_with(|| self.format_for(style))
            .clone()
    }

    /// Map a semantic style to a concrete cell format
    pub fn format_for(&self, style: CellStyle) -> Format {
        let t = &self.theme;
        let base = Format::new()
            .set_font_name(&t.font_name)
            .set_border(FormatBorder::Thin);

        match style {
            CellStyle::Title => base
                .set_bold()
                .set_font_size(t.header_font_size)
                .set_font_color(Color::RGB(t.white))
                .set_background_color(Color::RGB(t.primary))
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            CellStyle::YearHeader | CellStyle::SectionHeader => base
                .set_bold()
                .set_font_size(t.header_font_size)
                .set_font_color(Color::RGB(t.white))
                .set_background_color(Color::RGB(t.primary))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            CellStyle::SummaryHeader => base
                .set_bold()
                .set_font_size(t.header_font_size)
                .set_font_color(Color::RGB(t.black))
                .set_background_color(Color::RGB(t.grey))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            CellStyle::Subheader => base
                .set_bold()
                .set_font_size(t.header_font_size)
                .set_font_color(Color::RGB(t.black))
                .set_background_color(Color::RGB(t.secondary))
                .set_align(FormatAlign::Left),
            CellStyle::RowLabel => base
                .set_bold()
                .set_font_size(t.body_font_size)
                .set_align(FormatAlign::Left),
            CellStyle::Input(fmt) => number_cell(base, fmt)
                .set_font_size(t.body_font_size)
                .set_font_color(Color::RGB(t.input)),
            CellStyle::Formula(fmt) => number_cell(base, fmt)
                .set_font_size(t.body_font_size)
                .set_font_color(Color::RGB(t.black)),
            CellStyle::Note => base
                .set_font_size(t.body_font_size)
                .set_align(FormatAlign::Left),
            CellStyle::Placeholder => Format::new()
                .set_font_name(&t.font_name)
                .set_font_size(t.body_font_size)
                .set_font_color(Color::RGB(t.input)),
        }
    }
}

fn number_cell(format: Format, number_format: NumberFormat) -> Format {
    let format = format.set_align(FormatAlign::Right);
    match number_format {
        NumberFormat::General => format,
        other => format.set_num_format(other.as_str()),
    }
}

/// Plan columns are 1-based; the writer wants 0-based u16
fn col_index(col: u32) -> ModelResult<u16> {
    col.checked_sub(1)
        .and_then(|c| u16::try_from(c).ok())
        .ok_or_else(|| ModelError::Export(format!("Column {} is out of range", col)))
}
