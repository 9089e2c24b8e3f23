use formula_model::Position;

/// A lexical token in a formula body (the text after the leading `=`).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// A syntactically well-formed cell reference (`[A-Z]{1,3}[0-9]+`), with
    /// the exact source text it was lexed from. Carries [`Position::NONE`]
    /// if the address decodes out of bounds — that's a runtime `#REF!`, not
    /// a parse error (see `formula-parser`'s crate docs) — in which case the
    /// source text is the only way the canonical printer can reproduce the
    /// reference later, since `Position::NONE` itself carries no text.
    CellRef(Position, String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}
