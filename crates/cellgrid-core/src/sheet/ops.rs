//! Update propagation.
//!
//! One edit runs as a batch: the edited cell is recomputed, its edges are
//! rewired, and every transitive formula dependent is recomputed in turn.
//! The batch is driven by an explicit worklist with a processed set rather
//! than call-stack recursion, so depth is bounded and a cell is recomputed
//! at most once per batch.

use std::collections::{HashSet, VecDeque};

use cellgrid_engine::engine::{Cell, CellRef, evaluate, extract_references};

use super::Sheet;
use crate::error::{Result, SheetError};

impl Sheet {
    /// Set a cell's content and synchronously recompute every cell that
    /// transitively depends on it. Returns after full propagation.
    ///
    /// Evaluation failures are terminal for the failing cell's display
    /// value only; sibling dependents still recompute.
    pub fn set_cell(&mut self, addr: CellRef, content: &str) {
        let mut processed: HashSet<CellRef> = HashSet::new();
        let mut pending: VecDeque<(CellRef, String)> = VecDeque::new();
        pending.push_back((addr, content.to_string()));

        while let Some((cell, content)) = pending.pop_front() {
            // Guard against reprocessing: this also stops ripples that
            // arrive back at a cell through a formula cycle.
            if !processed.insert(cell) {
                continue;
            }

            // Dependents are independent of the cell's own outgoing edges;
            // snapshot them before rewiring.
            let dependents = self.graph.dependents_of(&cell);

            let old_depends_on = self
                .cells
                .get(&cell)
                .map(|stored| stored.depends_on.clone())
                .unwrap_or_default();
            self.graph.remove_outgoing(&cell, &old_depends_on);

            let updated = if content.starts_with('=') {
                self.recompute_formula(cell, &content)
            } else {
                Cell::literal(&content)
            };
            self.cells.insert(cell, updated);

            // Dependents re-evaluate their own stored formulas; later batch
            // members resolve against the already-updated cell map.
            for dependent in dependents {
                if let Some(stored) = self.cells.get(&dependent)
                    && stored.is_formula
                {
                    pending.push_back((dependent, stored.content.clone()));
                }
            }
        }
    }

    /// Evaluate a formula cell and install its new outgoing edges.
    fn recompute_formula(&mut self, cell: CellRef, content: &str) -> Cell {
        let body = content.strip_prefix('=').unwrap_or(content);
        let depends_on = extract_references(body);

        let visited = HashSet::from([cell]);
        let resolve = |referenced: &CellRef| {
            self.cells
                .get(referenced)
                .map(|stored| stored.content.clone())
                .unwrap_or_default()
        };
        let display = match evaluate(content, &resolve, &visited) {
            Ok(value) => value,
            Err(err) => err.display_token(),
        };

        self.graph.add_outgoing(&cell, &depends_on);
        Cell {
            content: content.to_string(),
            display,
            is_formula: true,
            depends_on,
        }
    }

    /// Logically delete a cell: blank content, edges removed, dependents
    /// recomputed. The address stays usable for future writes.
    pub fn clear_cell(&mut self, addr: CellRef) {
        self.set_cell(addr, "");
    }

    /// Set by label, e.g. `sheet.set("A1", "=B1+1")`.
    pub fn set(&mut self, label: &str, content: &str) -> Result<()> {
        let addr = parse_label(label)?;
        self.set_cell(addr, content);
        Ok(())
    }

    /// Snapshot by label.
    pub fn get(&self, label: &str) -> Result<Cell> {
        Ok(self.get_cell(&parse_label(label)?))
    }

    /// Evaluate candidate content for `addr` against current state without
    /// committing it (live preview while editing). Non-formula content
    /// previews as itself.
    pub fn preview(&self, addr: CellRef, content: &str) -> String {
        if !content.starts_with('=') {
            return content.to_string();
        }
        let visited = HashSet::from([addr]);
        let resolve = |referenced: &CellRef| {
            self.cells
                .get(referenced)
                .map(|stored| stored.content.clone())
                .unwrap_or_default()
        };
        match evaluate(content, &resolve, &visited) {
            Ok(value) => value,
            Err(err) => err.display_token(),
        }
    }
}

fn parse_label(label: &str) -> Result<CellRef> {
    CellRef::from_str(label).ok_or_else(|| SheetError::InvalidAddress(label.to_string()))
}
