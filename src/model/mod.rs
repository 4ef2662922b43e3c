//! Workbook plan builder
//!
//! Turns a [`ModelConfig`] and its CSV inputs into an in-memory
//! [`WorkbookPlan`]. Nothing here touches the output file; see
//! [`crate::excel::ExcelExporter`] for rendering.

pub mod forecast;
pub mod inputs;
pub mod layout;
pub mod theme;
pub mod years;

pub use forecast::{RowRule, RowTemplate, PLACEHOLDER_NOTE, RAV_FORECAST_SHEET, SUMMARY_SHEET};
pub use theme::Theme;
pub use years::YearAxis;

use crate::config::{InputTable, ModelConfig, TableKind};
use crate::error::{ModelError, ModelResult};
use crate::formula::FormulaTemplater;
use crate::input::load_table;
use crate::types::{CellStyle, CellValue, GenerationReport, SheetPlan, WorkbookPlan};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

pub struct ModelBuilder {
    config: ModelConfig,
    theme: Theme,
    templater: FormulaTemplater,
    generated_on: NaiveDate,
}

impl ModelBuilder {
    pub fn new(config: ModelConfig) -> Self {
        let templater = FormulaTemplater::new(config.templater.clone());
        Self {
            config,
            theme: Theme::default(),
            templater,
            generated_on: Local::now().date_naive(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Fix the date stamped on the summary sheet
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Build every sheet in the roster.
    ///
    /// Missing or partly unreadable inputs do not stop the build: the sheet
    /// is still created and the problem is recorded in the report.
    pub fn build(&self) -> ModelResult<(WorkbookPlan, GenerationReport)> {
        self.config.validate()?;

        let axis = YearAxis::from_settings(&self.config.years);
        let mut plan = WorkbookPlan::new();
        let mut report = GenerationReport::default();

        for input in &self.config.inputs {
            plan.push(self.input_sheet(input, &axis, &mut report)?);
        }

        plan.push(forecast::build_rav_forecast(&axis, &self.theme, &self.templater));

        for spec in forecast::placeholder_specs(&axis) {
            let mut sheet = forecast::build_placeholder(&spec, &self.theme);
            if spec.name == SUMMARY_SHEET {
                self.stamp_summary(&mut sheet);
            }
            plan.push(sheet);
        }

        plan.move_to_front(SUMMARY_SHEET);

        info!(
            sheets = plan.sheets.len(),
            warnings = report.warnings.len(),
            "workbook plan built"
        );
        Ok((plan, report))
    }

    fn input_sheet(
        &self,
        input: &InputTable,
        axis: &YearAxis,
        report: &mut GenerationReport,
    ) -> ModelResult<SheetPlan> {
        let mut sheet = SheetPlan::new(input.sheet.as_str(), inputs::sheet_kind(input.kind));
        let path = self.config.input_path(input);
        let year_count = match input.kind {
            TableKind::Assumption => axis.forecast.len(),
            TableKind::Historical => axis.historical.len(),
        };

        match load_table(&input.sheet, &path) {
            Ok(table) => {
                debug!(sheet = %input.sheet, rows = table.rows.len(), "placing table");
                inputs::place_table(&mut sheet, &table);
                for w in &table.warnings {
                    report.warn(
                        input.sheet.as_str(),
                        format!("row {}, field {}: {}", w.row, w.column, w.message),
                    );
                }
            }
            Err(ModelError::MissingInput { sheet: name, path }) => {
                warn!(sheet = %name, path = %path.display(), "input file missing");
                inputs::missing_notice(&mut sheet, &path);
                report.warn(name, format!("{} not found", path.display()));
            }
            Err(e @ (ModelError::Csv(_) | ModelError::Io(_))) => {
                warn!(sheet = %input.sheet, path = %path.display(), error = %e, "input file unreadable");
                inputs::load_error_notice(&mut sheet, &path, &e);
                report.warn(input.sheet.as_str(), format!("error loading {}: {}", path.display(), e));
            }
            Err(e) => return Err(e),
        }

        inputs::apply_widths(&mut sheet, &self.theme, input.kind, year_count);
        Ok(sheet)
    }

    fn stamp_summary(&self, sheet: &mut SheetPlan) {
        sheet.set(
            2,
            1,
            CellValue::text(format!("Generated {}", self.generated_on.format("%Y-%m-%d"))),
            CellStyle::Note,
        );
    }
}
