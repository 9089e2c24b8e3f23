use formula_model::Position;
use formula_parser::{parse_formula, BinOp, Expr};
use proptest::prelude::*;

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0.0..1000.0f64).prop_map(Expr::Number),
        (0..50i32, 0..20i32).prop_map(|(r, c)| {
            let pos = Position::new(r, c);
            Expr::Ref(pos, pos.to_a1())
        }),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Expr::Neg(Box::new(e))),
            (
                inner.clone(),
                inner.clone(),
                prop_oneof![
                    Just(BinOp::Add),
                    Just(BinOp::Sub),
                    Just(BinOp::Mul),
                    Just(BinOp::Div),
                ],
            )
                .prop_map(|(l, r, op)| Expr::BinaryOp {
                    op,
                    left: Box::new(l),
                    right: Box::new(r),
                }),
        ]
    })
}

proptest! {
    // Division by zero is possible from the generator (a `Number(0.0)` right
    // operand); that's fine, we're only checking the *printer* is a
    // fixpoint under reparsing, not that every generated expression
    // evaluates cleanly.
    #[test]
    fn canonical_printer_is_a_fixpoint_under_reparsing(expr in arb_expr()) {
        let printed_once = expr.to_string();
        let Ok(formula) = parse_formula(&printed_once) else {
            // Some generated numbers (e.g. with more precision than the
            // lexer's NUMBER grammar needs) should always reparse; if this
            // ever fails it's a real printer/lexer mismatch.
            prop_assert!(false, "failed to reparse printer output: {printed_once}");
            return Ok(());
        };
        let printed_twice = formula.expression().to_string();
        prop_assert_eq!(printed_once, printed_twice);
    }
}
