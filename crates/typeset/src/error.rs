//! Error types for the typeset crate

use thiserror::Error;

/// Errors that can occur while building or rendering expressions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Matrix cell grid does not match the declared dimensions
    #[error("Invalid matrix shape: expected {rows}x{columns} cells, {detail}")]
    InvalidMatrixShape {
        rows: usize,
        columns: usize,
        detail: String,
    },

    /// Error during rendering
    #[error("Render error: {0}")]
    Render(String),
}

/// Result type for typeset operations
pub type MathResult<T> = Result<T, MathError>;
