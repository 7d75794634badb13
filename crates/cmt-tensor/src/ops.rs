//! Second-order tensor primitives.
//!
//! Tensors are `n×n` [`DMatrix`] values. Whenever a tensor is viewed as a
//! flat sequence of components the numbering is row-major, component
//! `(i, j)` sitting at `n * i + j`. Fourth-order tensors (Jacobians) are
//! `n²×n²` matrices whose rows index the output components and whose
//! columns index the input components in that same numbering.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, TensorError};

/// Second-order tensor
pub type Tensor2 = DMatrix<f64>;

/// Fourth-order tensor stored as an `n²×n²` matrix of row vectors
pub type Jacobian = DMatrix<f64>;

/// Row-major index of component `(i, j)` of an `dim×dim` tensor.
#[inline]
pub fn component(dim: usize, i: usize, j: usize) -> usize {
    dim * i + j
}

/// Return the dimension of a square tensor.
pub fn square_dim(a: &Tensor2) -> Result<usize> {
    if a.nrows() != a.ncols() {
        return Err(TensorError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(a.nrows())
}

/// Require an `expected×expected` tensor.
pub fn require_dim(a: &Tensor2, expected: usize) -> Result<()> {
    if a.nrows() != expected || a.ncols() != expected {
        return Err(TensorError::WrongDimension {
            expected,
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(())
}

/// Require two square tensors of the same dimension and return it.
pub fn require_same_shape(a: &Tensor2, b: &Tensor2) -> Result<usize> {
    let dim = square_dim(a)?;
    if b.shape() != a.shape() {
        return Err(TensorError::ShapeMismatch(format!(
            "{}x{} and {}x{} tensors cannot be combined",
            a.nrows(),
            a.ncols(),
            b.nrows(),
            b.ncols()
        )));
    }
    Ok(dim)
}

/// Build a `dim×dim` tensor from row-major components.
pub fn from_row_major(dim: usize, values: &[f64]) -> Result<Tensor2> {
    if values.len() != dim * dim {
        return Err(TensorError::ShapeMismatch(format!(
            "{} values cannot fill a {dim}x{dim} tensor",
            values.len()
        )));
    }
    Ok(DMatrix::from_row_slice(dim, dim, values))
}

/// Components of a tensor in row-major order.
pub fn to_row_major(a: &DMatrix<f64>) -> Vec<f64> {
    a.transpose().as_slice().to_vec()
}

pub fn identity(dim: usize) -> Tensor2 {
    DMatrix::identity(dim, dim)
}

pub fn determinant(a: &Tensor2) -> Result<f64> {
    square_dim(a)?;
    Ok(a.determinant())
}

/// Inverse of a square tensor.
///
/// Fails with [`TensorError::Singular`] when the determinant vanishes or the
/// LU factorisation cannot be completed.
pub fn inverse(a: &Tensor2) -> Result<Tensor2> {
    let dim = square_dim(a)?;
    let det = a.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(TensorError::Singular(format!(
            "{dim}x{dim} tensor has determinant {det}"
        )));
    }
    a.clone().try_inverse().ok_or_else(|| {
        TensorError::Singular(format!("{dim}x{dim} tensor could not be inverted"))
    })
}

/// Derivative of the determinant with respect to each component.
///
/// ∂det(A)/∂A_ij = det(A) A⁻¹_ji
pub fn d_determinant_d_tensor(a: &Tensor2) -> Result<Tensor2> {
    let det = determinant(a)?;
    let inv = inverse(a)?;
    Ok(inv.transpose() * det)
}

/// Outer product `a ⊗ b` of two component vectors.
pub fn dyadic(a: &DVector<f64>, b: &DVector<f64>) -> DMatrix<f64> {
    a * b.transpose()
}

/// Full contraction `A : B`.
pub fn inner(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<f64> {
    if a.shape() != b.shape() {
        return Err(TensorError::ShapeMismatch(format!(
            "inner product of {:?} and {:?} tensors",
            a.shape(),
            b.shape()
        )));
    }
    Ok(a.dot(b))
}

/// Assemble a fourth-order tensor from an index expression.
///
/// Entry `(n*i + j, n*k + l)` is `f(i, j, k, l)`.
pub fn fourth_order<F>(dim: usize, f: F) -> Jacobian
where
    F: Fn(usize, usize, usize, usize) -> f64,
{
    let sot = dim * dim;
    DMatrix::from_fn(sot, sot, |row, col| {
        f(row / dim, row % dim, col / dim, col % dim)
    })
}

/// Fourth-order identity `δ_ik δ_jl`.
pub fn fourth_order_identity(dim: usize) -> Jacobian {
    DMatrix::identity(dim * dim, dim * dim)
}
