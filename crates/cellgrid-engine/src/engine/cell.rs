//! Cell data structures for the spreadsheet grid.
//!
//! A [`Cell`] stores the raw user-entered content together with its current
//! display form and the set of cells its formula directly references.
//! [`CellMap`] is the sparse grid storage keyed by [`CellRef`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::cell_ref::CellRef;

/// A cell in the spreadsheet grid.
///
/// `depends_on` must always be the exact set of direct references extracted
/// from `content`; the update flow recomputes it on every content change
/// before dependents are notified.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Raw user-entered string (empty string = blank cell).
    pub content: String,
    /// Evaluated/displayed string. Equals `content` verbatim for
    /// non-formulas; the evaluation result or an error token for formulas.
    pub display: String,
    /// True iff `content` begins with `=`.
    pub is_formula: bool,
    /// Direct references a formula extracts from its own content.
    pub depends_on: HashSet<CellRef>,
}

impl Cell {
    /// A blank cell, the default for unset addresses.
    pub fn blank() -> Cell {
        Cell::default()
    }

    /// A non-formula cell displaying its content verbatim.
    pub fn literal(content: &str) -> Cell {
        Cell {
            content: content.to_string(),
            display: content.to_string(),
            is_formula: false,
            depends_on: HashSet::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

/// Sparse grid storage. Cells are created lazily on first write; reading an
/// unset address yields [`Cell::blank`] without inserting anything.
pub type CellMap = HashMap<CellRef, Cell>;
