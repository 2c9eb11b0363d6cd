//! Reverse dependency index for formula cells.
//!
//! The cell map owns the authoritative forward sets (`Cell::depends_on`);
//! this graph is the derived reverse index ("which cells reference me"),
//! maintained incrementally as formulas change. Invariant: an address has an
//! entry here iff its dependents set is non-empty, so the index stays
//! proportional to live edges.

use std::collections::{HashMap, HashSet};

use super::cell_ref::CellRef;

/// Dependency graph mapping a cell to the cells whose formulas reference it.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    dependents: HashMap<CellRef, HashSet<CellRef>>,
}

impl DependencyGraph {
    pub fn new() -> DependencyGraph {
        DependencyGraph::default()
    }

    /// Current dependents of `addr`; empty set if none. No side effects.
    pub fn dependents_of(&self, addr: &CellRef) -> HashSet<CellRef> {
        self.dependents.get(addr).cloned().unwrap_or_default()
    }

    /// Remove `addr`'s outgoing edges: for each referenced cell in
    /// `old_depends_on`, drop `addr` from its dependents set, pruning
    /// entries that become empty. Only removes what is present, so a stale
    /// or mismatched set is harmless.
    pub fn remove_outgoing(&mut self, addr: &CellRef, old_depends_on: &HashSet<CellRef>) {
        for dep in old_depends_on {
            if let Some(set) = self.dependents.get_mut(dep) {
                set.remove(addr);
                if set.is_empty() {
                    self.dependents.remove(dep);
                }
            }
        }
    }

    /// Install `addr`'s outgoing edges: for each referenced cell in
    /// `new_depends_on`, add `addr` to its dependents set, creating the
    /// entry if absent.
    pub fn add_outgoing(&mut self, addr: &CellRef, new_depends_on: &HashSet<CellRef>) {
        for dep in new_depends_on {
            self.dependents.entry(*dep).or_default().insert(*addr);
        }
    }

    /// Total number of live reverse edges.
    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[CellRef]) -> HashSet<CellRef> {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_add_and_query_edges() {
        let mut graph = DependencyGraph::new();
        let a1 = CellRef::new(0, 0);
        let b1 = CellRef::new(1, 0);
        let c1 = CellRef::new(2, 0);

        // A1 references B1 and C1.
        graph.add_outgoing(&a1, &set(&[b1, c1]));

        assert_eq!(graph.dependents_of(&b1), set(&[a1]));
        assert_eq!(graph.dependents_of(&c1), set(&[a1]));
        assert!(graph.dependents_of(&a1).is_empty());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_remove_prunes_empty_entries() {
        let mut graph = DependencyGraph::new();
        let a1 = CellRef::new(0, 0);
        let b1 = CellRef::new(1, 0);

        graph.add_outgoing(&a1, &set(&[b1]));
        graph.remove_outgoing(&a1, &set(&[b1]));

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut graph = DependencyGraph::new();
        let a1 = CellRef::new(0, 0);
        let b1 = CellRef::new(1, 0);
        let c1 = CellRef::new(2, 0);

        graph.add_outgoing(&a1, &set(&[b1]));
        // Removing edges that were never installed only removes what exists.
        graph.remove_outgoing(&a1, &set(&[b1, c1]));
        graph.remove_outgoing(&a1, &set(&[b1]));

        assert!(graph.is_empty());
    }

    #[test]
    fn test_shared_dependency_keeps_other_edges() {
        let mut graph = DependencyGraph::new();
        let a1 = CellRef::new(0, 0);
        let b1 = CellRef::new(1, 0);
        let c1 = CellRef::new(2, 0);

        // Both A1 and B1 reference C1.
        graph.add_outgoing(&a1, &set(&[c1]));
        graph.add_outgoing(&b1, &set(&[c1]));
        graph.remove_outgoing(&a1, &set(&[c1]));

        assert_eq!(graph.dependents_of(&c1), set(&[b1]));
    }
}
