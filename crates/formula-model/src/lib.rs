//! Value types shared by the spreadsheet engine: grid coordinates, the
//! printable bounding box, cell values, and formula evaluation errors.
//!
//! This crate has no notion of cells, sheets, or dependency graphs — those
//! live in `formula-engine`. It exists so that `formula-parser` and
//! `formula-engine` can agree on the same `Position`/`Value`/`FormulaError`
//! types without either depending on the other.

mod error;
mod position;
mod size;
mod value;

pub use error::FormulaError;
pub use position::{Position, MAX_COL, MAX_ROW};
pub use size::Size;
pub use value::{format_number, Value};
