//! Dependency extraction from formula strings.
//!
//! Parses formula text to find all cell references (e.g., `A1`, `B2`) that
//! the formula depends on. This is used to build the dependency graph for
//! update propagation and cycle detection.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::cell_ref::CellRef;

/// Extract the set of cell references a formula body mentions.
///
/// `body` is the formula text with the leading `=` already stripped.
/// References are uppercase letters followed by digits; duplicates collapse
/// into one entry. Matches whose column part overflows the address space are
/// skipped here and surface later as a syntax failure during substitution.
pub fn extract_references(body: &str) -> HashSet<CellRef> {
    let mut refs = HashSet::new();
    for m in cell_ref_re().find_iter(body) {
        if let Some(cell) = CellRef::from_str(m.as_str()) {
            refs.insert(cell);
        }
    }
    refs
}

/// Pattern for a single cell reference inside a formula body.
pub(crate) fn cell_ref_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE
        .get_or_init(|| Regex::new(r"[A-Z]+[0-9]+").expect("cell reference regex must compile"))
}
