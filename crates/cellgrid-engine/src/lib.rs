//! cellgrid-engine - spreadsheet computation engine.
//!
//! Stateless formula machinery and the data types it operates on. State
//! ownership (the cell map, the update flow) lives in `cellgrid-core`.

pub mod engine;
