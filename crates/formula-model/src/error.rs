/// The category of failure a formula can evaluate to in place of a number.
///
/// `FormulaError` is a *value*, not an exception: it flows through
/// [`crate::Value::Error`] and is memoised, compared, and rendered exactly
/// like any other cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// A formula referenced a position outside the valid grid bounds.
    #[error("#REF!")]
    Ref,
    /// An operand could not be coerced to a number (non-numeric text, or a
    /// referenced cell that itself holds an error).
    #[error("#VALUE!")]
    Value,
    /// An arithmetic operation is undefined for its operands (division by
    /// zero).
    #[error("#ARITHM!")]
    Arithmetic,
}
