use formula_parser::ParseError;
use thiserror::Error;

/// Failures a [`crate::Sheet`] operation can report. Evaluation-time errors
/// (`#REF!`, `#VALUE!`, `#ARITHM!`) are not part of this enum — they are
/// [`formula_model::Value::Error`] values, never a reason to fail a call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SheetError {
    #[error("position is out of the valid sheet range")]
    InvalidPosition,
    #[error("formula failed to parse: {0}")]
    ParseFailure(#[from] ParseError),
    #[error("assignment would create a circular dependency")]
    CircularDependency,
}
