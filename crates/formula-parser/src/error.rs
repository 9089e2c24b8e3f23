/// Why a formula body failed to lex or parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected character '{0}' at byte offset {1}")]
    UnexpectedChar(char, usize),
    #[error("malformed number at byte offset {0}")]
    MalformedNumber(usize),
    #[error("unexpected end of formula")]
    UnexpectedEnd,
    #[error("expected ')' at byte offset {0}")]
    MissingCloseParen(usize),
    #[error("trailing input after expression: {0:?}")]
    TrailingInput(String),
    #[error("formula body is empty")]
    EmptyExpression,
}
