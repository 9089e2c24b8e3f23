use crate::ast::{BinOp, Expr};
use formula_model::{FormulaError, Position, Value};

/// What a [`Formula`] reads cell values through. Decouples evaluation from
/// any particular sheet implementation: `formula-parser` never depends on
/// `formula-engine`, only the reverse.
pub trait CellLookup {
    /// The value at `pos` as the formula's operand-coercion rules see it:
    /// an absent/empty cell reads as `Value::Number(0.0)`.
    fn value_at(&self, pos: Position) -> Value;
}

/// A parsed formula body: an expression tree plus the positions it reads,
/// ready to be re-evaluated against any [`CellLookup`].
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: Expr,
    expression_text: String,
    referenced: Vec<Position>,
}

impl Formula {
    pub(crate) fn new(expr: Expr) -> Self {
        let expression_text = expr.to_string();
        let mut refs = Vec::new();
        expr.collect_refs(&mut refs);
        refs.retain(Position::is_valid);
        refs.sort();
        refs.dedup();
        Formula {
            expr,
            expression_text,
            referenced: refs,
        }
    }

    /// The canonical re-print of the parsed expression (no leading `=`).
    pub fn expression(&self) -> &str {
        &self.expression_text
    }

    /// Sorted, deduplicated, in-bounds cell positions this formula reads.
    /// Out-of-bounds references in the source text still evaluate to
    /// `#REF!` when reached, but are not graph edges (see crate docs).
    pub fn referenced_positions(&self) -> &[Position] {
        &self.referenced
    }

    /// Evaluates the expression against `lookup`, coercing operands and
    /// propagating errors per the engine's arithmetic rules:
    /// - a reference to an out-of-bounds position is `#REF!`;
    /// - a non-numeric operand (text that doesn't parse as a number, or a
    ///   cell whose own value is an error) is `#VALUE!`;
    /// - division by zero is `#ARITHM!`.
    pub fn evaluate(&self, lookup: &dyn CellLookup) -> Value {
        match eval(&self.expr, lookup) {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }
}

fn eval(expr: &Expr, lookup: &dyn CellLookup) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Ref(pos, _) => {
            if !pos.is_valid() {
                return Err(FormulaError::Ref);
            }
            coerce_to_number(lookup.value_at(*pos))
        }
        Expr::Neg(inner) => Ok(-eval(inner, lookup)?),
        Expr::BinaryOp { op, left, right } => {
            let l = eval(left, lookup)?;
            let r = eval(right, lookup)?;
            match op {
                BinOp::Add => Ok(l + r),
                BinOp::Sub => Ok(l - r),
                BinOp::Mul => Ok(l * r),
                BinOp::Div => {
                    if r == 0.0 {
                        Err(FormulaError::Arithmetic)
                    } else {
                        Ok(l / r)
                    }
                }
            }
        }
    }
}

/// A cell's own value already coerces an error to `#VALUE!` when read as an
/// operand — the spec's "non-numeric text or child FormulaError propagates
/// as Value".
fn coerce_to_number(value: Value) -> Result<f64, FormulaError> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Text(s) => s.trim().parse::<f64>().map_err(|_| FormulaError::Value),
        Value::Error(_) => Err(FormulaError::Value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_formula;
    use std::collections::HashMap;

    struct FakeSheet(HashMap<Position, Value>);

    impl CellLookup for FakeSheet {
        fn value_at(&self, pos: Position) -> Value {
            self.0.get(&pos).cloned().unwrap_or(Value::Number(0.0))
        }
    }

    #[test]
    fn evaluates_simple_arithmetic() {
        let formula = parse_formula("1+2*3").unwrap();
        let sheet = FakeSheet(HashMap::new());
        assert_eq!(formula.evaluate(&sheet), Value::Number(7.0));
    }

    #[test]
    fn reads_referenced_cell() {
        let formula = parse_formula("A1+3").unwrap();
        let mut cells = HashMap::new();
        cells.insert(Position::parse("A1"), Value::Number(2.0));
        let sheet = FakeSheet(cells);
        assert_eq!(formula.evaluate(&sheet), Value::Number(5.0));
        assert_eq!(formula.referenced_positions(), &[Position::parse("A1")]);
    }

    #[test]
    fn missing_cell_reads_as_zero() {
        let formula = parse_formula("A1+1").unwrap();
        let sheet = FakeSheet(HashMap::new());
        assert_eq!(formula.evaluate(&sheet), Value::Number(1.0));
    }

    #[test]
    fn non_numeric_text_operand_is_value_error() {
        let formula = parse_formula("A1+1").unwrap();
        let mut cells = HashMap::new();
        cells.insert(Position::parse("A1"), Value::Text("hi".into()));
        let sheet = FakeSheet(cells);
        assert_eq!(
            formula.evaluate(&sheet),
            Value::Error(FormulaError::Value)
        );
    }

    #[test]
    fn numeric_text_operand_coerces() {
        let formula = parse_formula("A1+1").unwrap();
        let mut cells = HashMap::new();
        cells.insert(Position::parse("A1"), Value::Text("4".into()));
        let sheet = FakeSheet(cells);
        assert_eq!(formula.evaluate(&sheet), Value::Number(5.0));
    }

    #[test]
    fn division_by_zero_is_arithmetic_error() {
        let formula = parse_formula("1/0").unwrap();
        let sheet = FakeSheet(HashMap::new());
        assert_eq!(
            formula.evaluate(&sheet),
            Value::Error(FormulaError::Arithmetic)
        );
    }

    #[test]
    fn out_of_bounds_ref_is_ref_error() {
        let formula = parse_formula("AAAA1+1").unwrap();
        let sheet = FakeSheet(HashMap::new());
        assert_eq!(formula.evaluate(&sheet), Value::Error(FormulaError::Ref));
        assert!(formula.referenced_positions().is_empty());
    }

    #[test]
    fn child_error_propagates_as_value_error() {
        let formula = parse_formula("A1+1").unwrap();
        let mut cells = HashMap::new();
        cells.insert(Position::parse("A1"), Value::Error(FormulaError::Arithmetic));
        let sheet = FakeSheet(cells);
        assert_eq!(
            formula.evaluate(&sheet),
            Value::Error(FormulaError::Value)
        );
    }
}
