//! Conversion between the nested and flat storage of Jacobians.
//!
//! The nested form is a `rows×cols` matrix. The flat form lists the same
//! entries row by row, so for a fourth-order tensor of dimension `n` the
//! flat index of `(i, j, k, l)` is `n²·n·i + n²·j + n·k + l`.

use nalgebra::DMatrix;

use crate::error::{Result, TensorError};
use crate::ops::Jacobian;

/// Flatten a Jacobian row by row.
pub fn flatten(jacobian: &Jacobian) -> Vec<f64> {
    let mut flat = Vec::with_capacity(jacobian.len());
    for row in jacobian.row_iter() {
        flat.extend(row.iter().copied());
    }
    flat
}

/// Rebuild a `rows×cols` Jacobian from its flat form.
pub fn inflate(flat: &[f64], rows: usize, cols: usize) -> Result<Jacobian> {
    if flat.len() != rows * cols {
        return Err(TensorError::ShapeMismatch(format!(
            "{} values cannot be inflated into a {rows}x{cols} matrix",
            flat.len()
        )));
    }
    Ok(DMatrix::from_row_slice(rows, cols, flat))
}

/// Jacobian as a vector of row vectors.
pub fn to_nested(jacobian: &Jacobian) -> Vec<Vec<f64>> {
    jacobian
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

/// Jacobian from a vector of equally long row vectors.
pub fn from_nested(rows: &[Vec<f64>]) -> Result<Jacobian> {
    let cols = rows.first().map_or(0, Vec::len);
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(TensorError::ShapeMismatch(format!(
            "row {index} has {} entries, expected {cols}",
            row.len()
        )));
    }
    Ok(DMatrix::from_fn(rows.len(), cols, |r, c| rows[r][c]))
}
