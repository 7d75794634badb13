//! Error types for cmt-tensor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TensorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("Tensor is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Expected a {expected}x{expected} tensor, got {rows}x{cols}")]
    WrongDimension {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Singular matrix: {0}")]
    Singular(String),
}
