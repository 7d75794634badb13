//! Fixtures and finite-difference helpers shared by the integration tests.
#![allow(dead_code)]

use cmt_tensor::{Tensor2, from_row_major, to_row_major};
use nalgebra::DMatrix;

pub fn t3(values: [f64; 9]) -> Tensor2 {
    from_row_major(3, &values).unwrap()
}

/// Non-symmetric deformation gradient with a small determinant
pub fn reference_deformation() -> Tensor2 {
    t3([
        0.69646919, 0.28613933, 0.22685145, 0.55131477, 0.71946897, 0.42310646, 0.9807642,
        0.68482974, 0.4809319,
    ])
}

/// Moderate, well-conditioned deformation gradient
pub fn moderate_deformation() -> Tensor2 {
    t3([1.1, 0.2, -0.1, 0.05, 0.95, 0.15, -0.08, 0.12, 1.05])
}

/// Velocity gradient at the end of a step
pub fn velocity_gradient() -> Tensor2 {
    t3([
        0.57821272, 0.27720263, 0.45555826, 0.82144027, 0.83961342, 0.95322334, 0.4768852,
        0.93771539, 0.1056616,
    ])
}

/// Velocity gradient at the start of a step
pub fn previous_velocity_gradient() -> Tensor2 {
    t3([
        0.69006282, 0.0462321, 0.88086378, 0.8153887, 0.54987134, 0.72085876, 0.66559485,
        0.63708462, 0.54378588,
    ])
}

/// A generic stress-like tensor
pub fn stress() -> Tensor2 {
    t3([
        -1.07882482, -1.56821984, 2.29049707, -0.61427755, -4.40322103, -1.01955745, 2.37995406,
        -3.1750827, -3.24548244,
    ])
}

/// Central finite-difference Jacobian of `f` at `x`.
///
/// Row `r` of the result is output component `r` and column `c` is input
/// component `c`, both in row-major order, matching the analytic Jacobians.
pub fn finite_difference<F>(x: &DMatrix<f64>, f: F) -> DMatrix<f64>
where
    F: Fn(&DMatrix<f64>) -> DMatrix<f64>,
{
    let outputs = f(x).len();
    let cols = x.ncols();
    let mut jacobian = DMatrix::zeros(outputs, x.len());

    for c in 0..x.len() {
        let (row, col) = (c / cols, c % cols);
        let h = 1e-6 * x[(row, col)].abs() + 1e-6;

        let mut plus = x.clone();
        plus[(row, col)] += h;
        let mut minus = x.clone();
        minus[(row, col)] -= h;

        let column = (f(&plus) - f(&minus)) / (2.0 * h);
        for (r, value) in to_row_major(&column).into_iter().enumerate() {
            jacobian[(r, c)] = value;
        }
    }
    jacobian
}

/// Compare an analytic Jacobian against its finite-difference estimate.
pub fn assert_jacobian(analytic: &DMatrix<f64>, numeric: &DMatrix<f64>) {
    assert_eq!(analytic.shape(), numeric.shape(), "Jacobian shapes differ");
    for r in 0..analytic.nrows() {
        for c in 0..analytic.ncols() {
            let (a, n) = (analytic[(r, c)], numeric[(r, c)]);
            assert!(
                (a - n).abs() <= 1e-5 * (1.0 + n.abs()),
                "entry ({r}, {c}): analytic {a}, finite difference {n}"
            );
        }
    }
}
