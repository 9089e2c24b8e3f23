use formula_model::{format_number, Position};
use std::fmt;

/// Binary arithmetic operators, ordered by ascending precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Higher binds tighter. `*`/`/` bind tighter than `+`/`-`.
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
        }
    }

    /// Whether reprinting `a OP (b OP c)` as `a OP b OP c` (no parens around
    /// the right operand) changes its meaning. True for `+`/`*`
    /// (associative), false for `-`/`/`.
    fn is_associative(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Mul)
    }

    fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Precedence unary negation binds at — tighter than any binary operator,
/// so `-A1*B1` parses as `(-A1)*B1`.
const NEG_PRECEDENCE: u8 = 3;

/// The parsed expression tree for a formula body. `Display` is the
/// canonical re-printer: it inserts the minimum parentheses needed so that
/// reparsing the printed text reproduces an equivalent tree (a fixpoint of
/// parse-then-print).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    /// A cell reference: the decoded position (`Position::NONE` if the
    /// address is out of bounds) plus the exact source text it was lexed
    /// from. The text is what `Display` reprints — for an out-of-bounds
    /// reference `Position::NONE` carries no information to reconstruct the
    /// original address, so the source text is the only way to avoid
    /// silently dropping the reference from the canonical form.
    Ref(Position, String),
    Neg(Box<Expr>),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Collects every `Ref` position reachable from this expression, in
    /// encounter order (left-to-right, pre-order) — the caller is
    /// responsible for sorting/deduplicating per the `Formula` contract.
    pub fn collect_refs(&self, out: &mut Vec<Position>) {
        match self {
            Expr::Number(_) => {}
            Expr::Ref(pos, _) => out.push(*pos),
            Expr::Neg(inner) => inner.collect_refs(out),
            Expr::BinaryOp { left, right, .. } => {
                left.collect_refs(out);
                right.collect_refs(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(_) | Expr::Ref(_, _) | Expr::Neg(_) => NEG_PRECEDENCE,
            Expr::BinaryOp { op, .. } => op.precedence(),
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        let needs_parens = self.precedence() < min_precedence;
        if needs_parens {
            f.write_str("(")?;
        }
        match self {
            Expr::Number(n) => f.write_str(&format_number(*n))?,
            Expr::Ref(_, text) => f.write_str(text)?,
            Expr::Neg(inner) => {
                f.write_str("-")?;
                inner.write(f, NEG_PRECEDENCE)?;
            }
            Expr::BinaryOp { op, left, right } => {
                let p = op.precedence();
                left.write(f, p)?;
                f.write_str(op.as_str())?;
                let right_min = if op.is_associative() { p } else { p + 1 };
                right.write(f, right_min)?;
            }
        }
        if needs_parens {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, 0)
    }
}
