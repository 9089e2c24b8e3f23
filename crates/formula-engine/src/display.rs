use formula_model::Value;

/// Renders a cell value the way `print_values` wants it: numbers with the
/// minimum digits needed to round-trip, text verbatim, errors as their
/// `#REF!`/`#VALUE!`/`#ARITHM!` tokens. Kept as its own entry point (rather
/// than inlined at each call site) so the sheet's two printers and any
/// future renderer agree on one formatting rule.
pub(crate) fn format_value(value: &Value) -> String {
    value.to_string()
}
