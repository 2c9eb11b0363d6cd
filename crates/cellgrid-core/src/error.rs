//! Error types for cellgrid core.

use thiserror::Error;

/// Errors at the sheet API surface.
///
/// Formula evaluation failures are not errors here: they surface as
/// cell-local display tokens and never abort an update batch.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
