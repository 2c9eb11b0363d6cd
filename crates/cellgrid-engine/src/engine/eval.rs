//! Formula evaluation.
//!
//! A formula (`=A1+B2*2`) is evaluated by substituting each cell reference
//! with the numeric content of the referenced cell, then reducing the
//! remaining arithmetic with [`arith`]. References to formula cells recurse
//! through the same path; the `visited` set carries the chain of cells
//! currently being resolved so any re-entry fails as a circular reference
//! instead of looping.
//!
//! Evaluation failures are ordinary values: every outcome is either a
//! display string or an [`EvalError`] the caller renders into a cell-local
//! token with [`EvalError::display_token`]. Nothing here panics on user
//! input.

use std::collections::HashSet;

use thiserror::Error;

use super::arith;
use super::cell_ref::CellRef;
use super::deps::cell_ref_re;
use super::format::format_number;

/// A cell-local evaluation failure. `Display` renders the message part of
/// the error token (without the `#ERROR: ` prefix).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The resolution path re-entered a cell already being resolved.
    #[error("circular reference")]
    Circular,

    /// A referenced cell holds content that is neither blank, numeric, nor a
    /// formula.
    #[error("Cell {cell} contains non-numeric data: {value}")]
    NonNumeric { cell: CellRef, value: String },

    /// A referenced formula cell itself failed to evaluate.
    #[error("Error in referenced cell {cell}: {inner}")]
    Referenced { cell: CellRef, inner: Box<EvalError> },

    /// The substituted expression still contains identifier characters.
    #[error("Invalid cell reference or syntax")]
    InvalidReference,

    /// The substituted expression is not valid arithmetic.
    #[error("Invalid expression syntax")]
    InvalidExpression,
}

impl EvalError {
    /// The display token shown in the failing cell.
    pub fn display_token(&self) -> String {
        match self {
            EvalError::Circular => "#CIRCULAR".to_string(),
            other => format!("#ERROR: {other}"),
        }
    }
}

/// Evaluate a formula string into its display value.
///
/// `resolve` returns a referenced cell's raw content string - not a cached
/// display value - so nested formulas are always evaluated fresh. `visited`
/// is the chain of cells currently being resolved; callers seed it with the
/// formula's own address so a self-reference fails immediately. Each
/// recursion works on its own extended copy, keeping sibling branches of the
/// resolution independent.
pub fn evaluate<F>(
    formula: &str,
    resolve: &F,
    visited: &HashSet<CellRef>,
) -> Result<String, EvalError>
where
    F: Fn(&CellRef) -> String,
{
    let body = formula.strip_prefix('=').unwrap_or(formula).trim();

    let substituted = substitute_references(body, resolve, visited)?;

    // Anything alphabetic left over is an unresolved identifier, not
    // arithmetic (this also catches `Infinity`/`NaN` re-substituted from a
    // non-finite referenced result).
    if substituted
        .chars()
        .any(|c| c.is_ascii_alphabetic() || c == '$' || c == '_')
    {
        return Err(EvalError::InvalidReference);
    }

    // Tolerate a formula captured mid-edit, e.g. `=A1+`.
    let trimmed = trim_trailing_operator(&substituted);

    let value = arith::eval_expr(trimmed).map_err(|_| EvalError::InvalidExpression)?;
    Ok(format_number(value))
}

/// Replace every cell reference in `body` with the numeric string it
/// resolves to.
fn substitute_references<F>(
    body: &str,
    resolve: &F,
    visited: &HashSet<CellRef>,
) -> Result<String, EvalError>
where
    F: Fn(&CellRef) -> String,
{
    let mut out = String::with_capacity(body.len());
    let mut last = 0;

    for m in cell_ref_re().find_iter(body) {
        out.push_str(&body[last..m.start()]);
        last = m.end();

        // The pattern guarantees letters-then-digits; only an address-space
        // overflow can fail here.
        let cell = CellRef::from_str(m.as_str()).ok_or(EvalError::InvalidReference)?;

        if visited.contains(&cell) {
            return Err(EvalError::Circular);
        }

        let raw = resolve(&cell);
        let raw = raw.trim();

        if raw.starts_with('=') {
            let mut path = visited.clone();
            path.insert(cell);
            match evaluate(raw, resolve, &path) {
                Ok(value) => out.push_str(&value),
                Err(EvalError::Circular) => return Err(EvalError::Circular),
                Err(inner) => {
                    return Err(EvalError::Referenced {
                        cell,
                        inner: Box::new(inner),
                    });
                }
            }
        } else if raw.is_empty() {
            // Blank cells count as zero.
            out.push('0');
        } else if raw.parse::<f64>().is_ok() {
            out.push_str(raw);
        } else {
            return Err(EvalError::NonNumeric {
                cell,
                value: raw.to_string(),
            });
        }
    }

    out.push_str(&body[last..]);
    Ok(out)
}

/// Strip one trailing arithmetic operator, if present.
fn trim_trailing_operator(expr: &str) -> &str {
    let expr = expr.trim_end();
    match expr.as_bytes().last() {
        Some(b'+' | b'-' | b'*' | b'/') => &expr[..expr.len() - 1],
        _ => expr,
    }
}
