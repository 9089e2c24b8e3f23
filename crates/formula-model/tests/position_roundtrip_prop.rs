use formula_model::{Position, MAX_COL, MAX_ROW};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_of_to_a1_is_identity(row in 0..=MAX_ROW, col in 0..=MAX_COL) {
        let pos = Position::new(row, col);
        prop_assume!(pos.is_valid());
        let text = pos.to_a1();
        prop_assert_eq!(Position::parse(&text), pos);
    }
}
