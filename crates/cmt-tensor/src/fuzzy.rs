//! Approximate comparison of scalars and tensors.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Tolerances for [`fuzzy_equals`].
///
/// Two values `a` and `b` compare equal when
/// `|a - b| < min(relative·|a|, relative·|b|) + absolute`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    /// Tighter tolerance for exact-arithmetic checks.
    pub fn strict() -> Self {
        Self {
            relative: 1e-12,
            absolute: 1e-12,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1e-6,
            absolute: 1e-6,
        }
    }
}

pub fn fuzzy_equals(a: f64, b: f64, tol: Tolerance) -> bool {
    let bound = (tol.relative * a.abs()).min(tol.relative * b.abs()) + tol.absolute;
    (a - b).abs() < bound
}

/// Component-wise [`fuzzy_equals`]; shapes must agree.
pub fn fuzzy_equals_tensor(a: &DMatrix<f64>, b: &DMatrix<f64>, tol: Tolerance) -> bool {
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| fuzzy_equals(*x, *y, tol))
}
