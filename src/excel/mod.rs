//! Excel output and read-back
//!
//! - Export: [`WorkbookPlan`](crate::types::WorkbookPlan) → `.xlsx` with formulas
//! - Inspect: `.xlsx` → sheet summaries and formula listings

mod exporter;
mod inspector;

pub use exporter::ExcelExporter;
pub use inspector::{FormulaCell, SheetSummary, WorkbookInspector};
