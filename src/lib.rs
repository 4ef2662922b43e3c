//! gridmodel - regulated utility financial model generator
//!
//! Builds a multi-year, multi-sheet spreadsheet model from CSV inputs.
//! Forecast formulas are authored once for the first forecast year and
//! rewritten for every later year by the [`formula`] templater.
//!
//! # Features
//!
//! - Reference-aware formula shifting (assumption, historical and forecast sheets)
//! - CSV loading with percent, thousands-separator and parenthesis-negative handling
//! - In-memory workbook plan, rendered to `.xlsx` in one pass
//! - Read-back of generated workbooks for inspection
//!
//! # Example
//!
//! ```no_run
//! use gridmodel::config::ModelConfig;
//! use gridmodel::excel::ExcelExporter;
//! use gridmodel::model::ModelBuilder;
//!
//! let config = ModelConfig::from_file("gridmodel.yaml".as_ref())?;
//! let builder = ModelBuilder::new(config.clone());
//! let (plan, report) = builder.build()?;
//!
//! println!("Sheets: {}", plan.sheets.len());
//! println!("Warnings: {}", report.warnings.len());
//!
//! ExcelExporter::new(builder.theme().clone()).export(&plan, &config.output)?;
//! # Ok::<(), gridmodel::error::ModelError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod formula;
pub mod input;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use config::ModelConfig;
pub use error::{ModelError, ModelResult};
pub use formula::{shift, FormulaTemplater, TemplaterConfig};
pub use types::{CellValue, GenerationReport, SheetPlan, WorkbookPlan};
