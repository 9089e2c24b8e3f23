use std::collections::{HashMap, HashSet};

use formula_model::Position;

use crate::cell::CellSlot;

/// True if `target` is reachable from any position in `starts` by following
/// `referenced` edges of cells already present in `cells`.
///
/// Used at assignment time with `starts` being a candidate formula's
/// proposed referenced set and `target` the position being assigned: if the
/// new formula would read (transitively) from itself, the assignment must
/// be rejected before any graph mutation happens.
///
/// The `visited` set is marked on entry to each *child* position, not on
/// `target` itself — the reference implementation this crate's cycle check
/// is modelled on instead marked the node being assigned, which left deep
/// acyclic fan-in graphs re-walked from every starting edge.
pub(crate) fn reaches(
    cells: &HashMap<Position, CellSlot>,
    starts: &[Position],
    target: Position,
) -> bool {
    let mut visited = HashSet::new();
    starts.iter().any(|&start| dfs(cells, start, target, &mut visited))
}

fn dfs(
    cells: &HashMap<Position, CellSlot>,
    pos: Position,
    target: Position,
    visited: &mut HashSet<Position>,
) -> bool {
    if pos == target {
        return true;
    }
    if !visited.insert(pos) {
        return false;
    }
    let Some(slot) = cells.get(&pos) else {
        return false;
    };
    slot.referenced
        .iter()
        .any(|&next| dfs(cells, next, target, visited))
}

/// Clears the memoised cache of `start` and every cell transitively reached
/// by following `dependents` edges from it (i.e. everything whose value
/// could depend on `start`, directly or indirectly).
pub(crate) fn invalidate_transitive(cells: &HashMap<Position, CellSlot>, start: Position) {
    let mut stack = vec![start];
    let mut visited = HashSet::new();
    while let Some(pos) = stack.pop() {
        if !visited.insert(pos) {
            continue;
        }
        let Some(slot) = cells.get(&pos) else {
            continue;
        };
        slot.cache.borrow_mut().take();
        stack.extend(slot.dependents.iter().copied());
    }
}
