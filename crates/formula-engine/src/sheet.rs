use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use formula_model::{FormulaError, Position, Size, Value};
use formula_parser::{parse_formula, CellLookup};

use crate::cell::{CellKind, CellSlot};
use crate::display::format_value;
use crate::error::SheetError;
use crate::graph;

/// The sparse owner of every cell. Positions with no slot behave as Empty
/// for every read and simply don't exist for iteration/rendering purposes.
#[derive(Debug, Default)]
pub struct Sheet {
    cells: HashMap<Position, CellSlot>,
    rows_occupied: BTreeMap<i32, u32>,
    cols_occupied: BTreeMap<i32, u32>,
    size: Size,
}

impl Sheet {
    pub fn new() -> Self {
        Sheet::default()
    }

    /// Assigns `text` to `pos`, following the textual conventions: empty
    /// text clears to Empty, a leading `=` (with more text after it) parses
    /// as a formula, anything else (including a lone `=` or `'`-prefixed
    /// text) is literal Text.
    ///
    /// On `ParseFailure` or `CircularDependency` the cell is left exactly as
    /// it was: the candidate formula and its cycle check both happen before
    /// any edge or cache mutation.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<(), SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }

        let new_kind = if text.is_empty() {
            CellKind::Empty
        } else if text.starts_with('=') && text.len() > 1 {
            let formula = parse_formula(&text[1..])?;
            if graph::reaches(&self.cells, formula.referenced_positions(), pos) {
                return Err(SheetError::CircularDependency);
            }
            CellKind::Formula(formula)
        } else {
            CellKind::Text(text.to_string())
        };

        self.commit_kind(pos, new_kind);
        self.mark_explicit(pos);
        Ok(())
    }

    /// Clears `pos` back to Empty. A no-op if `pos` has no slot. If other
    /// live cells still depend on `pos`, its slot is kept as an Empty
    /// placeholder so their cached values keep invalidating correctly; only
    /// once both its content is Empty and it has no dependents is the slot
    /// actually dropped.
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        if !self.cells.contains_key(&pos) {
            return Ok(());
        }

        self.commit_kind(pos, CellKind::Empty);
        self.unmark_explicit(pos);

        let dependents_empty = self
            .cells
            .get(&pos)
            .is_some_and(|slot| slot.dependents.is_empty());
        if dependents_empty {
            self.cells.remove(&pos);
        }
        Ok(())
    }

    pub fn get_cell(&self, pos: Position) -> Result<Option<CellHandle<'_>>, SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        Ok(self
            .cells
            .contains_key(&pos)
            .then_some(CellHandle { sheet: self, pos }))
    }

    pub fn printable_size(&self) -> Size {
        self.size
    }

    pub fn print_values(&self, out: &mut impl Write) -> io::Result<()> {
        self.print_grid(out, |sheet, pos| format_value(&sheet.value_of(pos)))
    }

    pub fn print_texts(&self, out: &mut impl Write) -> io::Result<()> {
        self.print_grid(out, |sheet, pos| sheet.text_of(&sheet.cells[&pos]))
    }

    fn print_grid(
        &self,
        out: &mut impl Write,
        render_cell: impl Fn(&Sheet, Position) -> String,
    ) -> io::Result<()> {
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                if col > 0 {
                    write!(out, "\t")?;
                }
                let pos = Position::new(row, col);
                if self.cells.contains_key(&pos) {
                    write!(out, "{}", render_cell(self, pos))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Replaces the kind at `pos` (creating the slot if absent), invalidating
    /// caches and rewiring the dependency graph in the order the invariants
    /// require: invalidate first, then swap edges.
    fn commit_kind(&mut self, pos: Position, new_kind: CellKind) {
        self.cells.entry(pos).or_default();

        graph::invalidate_transitive(&self.cells, pos);

        let old_referenced: Vec<Position> = self.cells[&pos].referenced.iter().copied().collect();
        for p in &old_referenced {
            if let Some(slot) = self.cells.get_mut(p) {
                slot.dependents.remove(&pos);
            }
        }

        let new_referenced: Vec<Position> = new_kind.referenced_positions().to_vec();
        for &p in &new_referenced {
            let referenced_slot = self.cells.entry(p).or_default();
            referenced_slot.dependents.insert(pos);
        }

        let slot = self.cells.get_mut(&pos).expect("slot created above");
        slot.kind = new_kind;
        slot.referenced = new_referenced.into_iter().collect();
        slot.cache = Default::default();
    }

    fn mark_explicit(&mut self, pos: Position) {
        let slot = self.cells.get_mut(&pos).expect("set_cell commits a slot");
        if !slot.explicit {
            slot.explicit = true;
            *self.rows_occupied.entry(pos.row).or_insert(0) += 1;
            *self.cols_occupied.entry(pos.col).or_insert(0) += 1;
        }
        self.size.rows = self.size.rows.max(pos.row + 1);
        self.size.cols = self.size.cols.max(pos.col + 1);
    }

    fn unmark_explicit(&mut self, pos: Position) {
        let Some(slot) = self.cells.get_mut(&pos) else {
            return;
        };
        if !slot.explicit {
            return;
        }
        slot.explicit = false;

        if let Some(count) = self.rows_occupied.get_mut(&pos.row) {
            *count -= 1;
            if *count == 0 {
                self.rows_occupied.remove(&pos.row);
            }
        }
        if let Some(count) = self.cols_occupied.get_mut(&pos.col) {
            *count -= 1;
            if *count == 0 {
                self.cols_occupied.remove(&pos.col);
            }
        }

        if pos.row == self.size.rows - 1 {
            self.size.rows = self.rows_occupied.keys().next_back().map_or(0, |r| r + 1);
        }
        if pos.col == self.size.cols - 1 {
            self.size.cols = self.cols_occupied.keys().next_back().map_or(0, |c| c + 1);
        }
    }

    /// Evaluates (or returns the memoised value of) the cell at `pos`.
    /// Callers must already know a slot exists at `pos`.
    fn value_of(&self, pos: Position) -> Value {
        let slot = &self.cells[&pos];
        if let Some(value) = slot.cache.borrow().clone() {
            return value;
        }
        let value = match &slot.kind {
            CellKind::Empty => Value::Number(0.0),
            CellKind::Text(text) => Value::Text(strip_leading_escape(text).to_string()),
            CellKind::Formula(formula) => formula.evaluate(self),
        };
        *slot.cache.borrow_mut() = Some(value.clone());
        value
    }

    fn text_of(&self, slot: &CellSlot) -> String {
        match &slot.kind {
            CellKind::Empty => String::new(),
            CellKind::Text(text) => text.clone(),
            CellKind::Formula(formula) => format!("={}", formula.expression()),
        }
    }

    fn referenced_of(&self, pos: Position) -> Vec<Position> {
        self.cells
            .get(&pos)
            .map(|slot| slot.referenced.iter().copied().collect())
            .unwrap_or_default()
    }
}

fn strip_leading_escape(text: &str) -> &str {
    text.strip_prefix('\'').unwrap_or(text)
}

impl CellLookup for Sheet {
    fn value_at(&self, pos: Position) -> Value {
        if !pos.is_valid() {
            return Value::Error(FormulaError::Ref);
        }
        if self.cells.contains_key(&pos) {
            self.value_of(pos)
        } else {
            Value::Number(0.0)
        }
    }
}

/// A read-only view of one occupied cell, borrowed from its owning sheet.
/// Cannot outlive a later mutating call to the sheet — the borrow checker
/// enforces that statically rather than through any runtime token.
pub struct CellHandle<'a> {
    sheet: &'a Sheet,
    pos: Position,
}

impl<'a> CellHandle<'a> {
    pub fn value(&self) -> Value {
        self.sheet.value_of(self.pos)
    }

    pub fn text(&self) -> String {
        self.sheet.text_of(&self.sheet.cells[&self.pos])
    }

    pub fn referenced_cells(&self) -> Vec<Position> {
        self.sheet.referenced_of(self.pos)
    }
}
