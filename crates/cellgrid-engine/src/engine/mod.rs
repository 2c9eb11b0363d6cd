//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`CellMap`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ col/row indices)
//! - [`DependencyGraph`] - Reverse dependency index over cell references
//! - [`extract_references`] - Parse formula dependencies
//! - [`evaluate`] - Evaluate a formula against a reference resolver
//! - [`format_number`] - Format numeric results for display

mod arith;
mod cell;
mod cell_ref;
mod deps;
mod eval;
mod format;
mod graph;

pub use cell::{Cell, CellMap};
pub use cell_ref::CellRef;
pub use deps::extract_references;
pub use eval::{EvalError, evaluate};
pub use format::format_number;
pub use graph::DependencyGraph;
