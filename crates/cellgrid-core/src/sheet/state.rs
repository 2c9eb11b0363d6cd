use cellgrid_engine::engine::{Cell, CellMap, CellRef, DependencyGraph};
use std::collections::HashSet;

/// UI-agnostic spreadsheet state.
///
/// Owns the sparse cell map and the reverse dependency index derived from
/// it. All mutation goes through the update flow in `ops`, which keeps the
/// two consistent; readers only ever see snapshots.
pub struct Sheet {
    pub(crate) cells: CellMap,
    pub(crate) graph: DependencyGraph,
}

impl Sheet {
    /// Create an empty sheet. Side-effect free.
    pub fn new() -> Sheet {
        Sheet {
            cells: CellMap::new(),
            graph: DependencyGraph::new(),
        }
    }

    /// Read-only snapshot of a cell; blank default for unset addresses
    /// (reading never creates state).
    pub fn get_cell(&self, addr: &CellRef) -> Cell {
        self.cells.get(addr).cloned().unwrap_or_else(Cell::blank)
    }

    /// Display value of a cell, blank for unset addresses.
    pub fn display(&self, addr: &CellRef) -> String {
        self.cells
            .get(addr)
            .map(|cell| cell.display.clone())
            .unwrap_or_default()
    }

    /// Cells whose formulas currently reference `addr`.
    pub fn dependents_of(&self, addr: &CellRef) -> HashSet<CellRef> {
        self.graph.dependents_of(addr)
    }

    /// Iterate over stored cells.
    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
