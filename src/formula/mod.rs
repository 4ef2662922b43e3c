//! Formula templating
//!
//! Formulas are opaque text to this crate: nothing is evaluated. The only
//! rewriting done is moving column references from the first forecast year
//! to a later one.

mod reference;
mod scanner;
mod templater;

pub use reference::{
    column_to_letters, letters_to_column, CellAddress, CellReference, SheetPrefix,
    MAX_COLUMN, MAX_COLUMN_LETTERS,
};
pub use scanner::{references, scan, Segment};
pub use templater::{shift, FormulaTemplater, ReferenceKind, TemplaterConfig};
