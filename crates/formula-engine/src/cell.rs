use std::cell::RefCell;
use std::collections::BTreeSet;

use formula_model::{Position, Value};
use formula_parser::Formula;

/// A cell's polymorphic content. `Empty` and `Text` never reference other
/// cells; only `Formula` contributes outgoing graph edges.
#[derive(Debug, Clone, Default)]
pub(crate) enum CellKind {
    #[default]
    Empty,
    Text(String),
    Formula(Formula),
}

impl CellKind {
    pub(crate) fn referenced_positions(&self) -> &[Position] {
        match self {
            CellKind::Formula(f) => f.referenced_positions(),
            CellKind::Empty | CellKind::Text(_) => &[],
        }
    }
}

/// Everything the sheet tracks for one occupied position: content, memoised
/// value, and both directions of the dependency graph's edges.
///
/// The cache lives behind a `RefCell` so `value()` can take `&self` while
/// still memoising — the sheet as a whole is never mutated by a read.
#[derive(Debug, Default)]
pub(crate) struct CellSlot {
    pub(crate) kind: CellKind,
    pub(crate) cache: RefCell<Option<Value>>,
    pub(crate) referenced: BTreeSet<Position>,
    pub(crate) dependents: BTreeSet<Position>,
    /// Whether this position was named directly by `set_cell`, as opposed to
    /// merely auto-vivified as a formula's referenced position. Only
    /// explicitly-named positions count toward the printable bounding box.
    pub(crate) explicit: bool,
}
