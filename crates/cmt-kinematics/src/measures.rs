//! Kinematic measures derived from the deformation gradient.
//!
//! Operations documented as 3D require 3×3 arguments; the others accept any
//! square dimension. Every `*_with_jacobian(s)` function returns the value
//! together with its exact derivative in the nested layout of
//! [`cmt_tensor::Jacobian`].

use cmt_tensor::{
    Jacobian, Tensor2, Tolerance, d_determinant_d_tensor, dyadic, fourth_order,
    fourth_order_identity, fuzzy_equals, identity, inverse, require_dim, require_same_shape,
    square_dim, to_row_major,
};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::auxiliary::delta_dirac;
use crate::error::{KinematicsError, Result, tensor};

/// Configuration in which a displacement gradient was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientConfiguration {
    /// `∂u/∂X`, gradient with respect to reference coordinates
    Reference,
    /// `∂u/∂x`, gradient with respect to current coordinates
    Current,
}

/// Deformation gradient from a displacement gradient.
///
/// * `Reference`: `F = I + ∂u/∂X`
/// * `Current`: `F = (I - ∂u/∂x)⁻¹`
pub fn deformation_gradient(
    displacement_gradient: &Tensor2,
    configuration: GradientConfiguration,
) -> Result<Tensor2> {
    const OP: &str = "deformation_gradient";
    let dim = square_dim(displacement_gradient).map_err(tensor(OP))?;

    match configuration {
        GradientConfiguration::Reference => Ok(identity(dim) + displacement_gradient),
        GradientConfiguration::Current => {
            inverse(&(identity(dim) - displacement_gradient)).map_err(tensor(OP))
        }
    }
}

/// Deformation gradient and `∂F/∂(∂u)`.
pub fn deformation_gradient_with_jacobian(
    displacement_gradient: &Tensor2,
    configuration: GradientConfiguration,
) -> Result<(Tensor2, Jacobian)> {
    let f = deformation_gradient(displacement_gradient, configuration).map_err(|e| {
        e.context(
            "deformation_gradient_with_jacobian",
            "error computing the deformation gradient",
        )
    })?;
    let dim = f.nrows();

    let jacobian = match configuration {
        GradientConfiguration::Reference => fourth_order_identity(dim),
        GradientConfiguration::Current => fourth_order(dim, |i, j, k, l| f[(i, k)] * f[(l, j)]),
    };
    Ok((f, jacobian))
}

/// Right Cauchy-Green deformation tensor `C = FᵗF` (3D).
pub fn right_cauchy_green(f: &Tensor2) -> Result<Tensor2> {
    require_dim(f, 3).map_err(tensor("right_cauchy_green"))?;
    Ok(f.transpose() * f)
}

/// Right Cauchy-Green tensor and `∂C_IJ/∂F_kL = δ_IL F_kJ + F_kI δ_JL`.
pub fn right_cauchy_green_with_jacobian(f: &Tensor2) -> Result<(Tensor2, Jacobian)> {
    let c = right_cauchy_green(f).map_err(|e| {
        e.context(
            "right_cauchy_green_with_jacobian",
            "error computing the right Cauchy-Green deformation tensor",
        )
    })?;
    let jacobian = fourth_order(3, |ii, jj, k, ll| {
        delta_dirac(ii, ll) * f[(k, jj)] + f[(k, ii)] * delta_dirac(jj, ll)
    });
    Ok((c, jacobian))
}

/// Green-Lagrange strain `E = ½(FᵗF - I)` (3D).
pub fn green_lagrange_strain(f: &Tensor2) -> Result<Tensor2> {
    require_dim(f, 3).map_err(tensor("green_lagrange_strain"))?;
    Ok((f.transpose() * f - identity(3)) * 0.5)
}

/// `∂E_IJ/∂F_kK = ½(δ_IK F_kJ + F_kI δ_JK)` (3D).
pub fn d_green_lagrange_strain_d_deformation_gradient(f: &Tensor2) -> Result<Jacobian> {
    require_dim(f, 3).map_err(tensor("d_green_lagrange_strain_d_deformation_gradient"))?;
    Ok(fourth_order(3, |ii, jj, k, kk| {
        0.5 * (delta_dirac(ii, kk) * f[(k, jj)] + f[(k, ii)] * delta_dirac(jj, kk))
    }))
}

pub fn green_lagrange_strain_with_jacobian(f: &Tensor2) -> Result<(Tensor2, Jacobian)> {
    const OP: &str = "green_lagrange_strain_with_jacobian";
    let e = green_lagrange_strain(f)
        .map_err(|e| e.context(OP, "error computing the Green-Lagrange strain"))?;
    let jacobian = d_green_lagrange_strain_d_deformation_gradient(f)
        .map_err(|e| e.context(OP, "error computing the Green-Lagrange strain Jacobian"))?;
    Ok((e, jacobian))
}

/// Green-Lagrange strain split into a unit-determinant part and the volume ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochoricSplit {
    /// Isochoric strain `Ē`, the strain of `J^{-2/3} C`
    pub isochoric: Tensor2,
    /// Volume ratio `J = det F`
    pub volume_ratio: f64,
}

/// Derivatives of an [`IsochoricSplit`] with respect to the total strain.
#[derive(Debug, Clone, PartialEq)]
pub struct IsochoricSplitJacobians {
    pub d_isochoric_d_strain: Jacobian,
    pub d_volume_ratio_d_strain: Tensor2,
}

/// Split a Green-Lagrange strain into isochoric and volumetric parts (3D).
///
/// `J = sqrt(det(2E + I))` and `Ē = E/J^{2/3} + ½(J^{-2/3} - 1) I`. Fails
/// with `NegativeJacobianDeterminant` when `det(2E + I) ≤ 0`.
pub fn decompose_green_lagrange_strain(e: &Tensor2) -> Result<IsochoricSplit> {
    const OP: &str = "decompose_green_lagrange_strain";
    tracing::trace!(operation = OP, "decomposing Green-Lagrange strain");
    require_dim(e, 3).map_err(tensor(OP))?;

    let c = e * 2.0 + identity(3);
    let det = c.determinant();
    if det <= 0.0 {
        return Err(KinematicsError::NegativeJacobianDeterminant {
            operation: OP,
            message: format!("det(2E + I) = {det}"),
        });
    }

    let volume_ratio = det.sqrt();
    let inv_j23 = volume_ratio.powf(-2.0 / 3.0);
    let isochoric = e * inv_j23 + identity(3) * (0.5 * (inv_j23 - 1.0));
    Ok(IsochoricSplit {
        isochoric,
        volume_ratio,
    })
}

pub fn decompose_green_lagrange_strain_with_jacobians(
    e: &Tensor2,
) -> Result<(IsochoricSplit, IsochoricSplitJacobians)> {
    const OP: &str = "decompose_green_lagrange_strain_with_jacobians";
    let split = decompose_green_lagrange_strain(e)
        .map_err(|err| err.context(OP, "error computing the isochoric split"))?;

    let j = split.volume_ratio;
    let c = e * 2.0 + identity(3);
    // ∂J/∂E = (∂det C/∂C)/J with C = 2E + I
    let d_volume_ratio_d_strain = d_determinant_d_tensor(&c).map_err(tensor(OP))? / j;

    let inv_j23 = j.powf(-2.0 / 3.0);
    let inv_j53 = j.powf(-5.0 / 3.0);
    let d_isochoric_d_strain = fourth_order(3, |i, jj, k, l| {
        let dj = d_volume_ratio_d_strain[(k, l)];
        inv_j23 * delta_dirac(i, k) * delta_dirac(jj, l)
            - (2.0 / 3.0) * inv_j53 * e[(i, jj)] * dj
            - (1.0 / 3.0) * inv_j53 * delta_dirac(i, jj) * dj
    });

    Ok((
        split,
        IsochoricSplitJacobians {
            d_isochoric_d_strain,
            d_volume_ratio_d_strain,
        },
    ))
}

/// Symmetric part `½(A + Aᵗ)` of a square tensor of any dimension.
pub fn symmetric_part(a: &Tensor2) -> Result<Tensor2> {
    square_dim(a).map_err(tensor("symmetric_part"))?;
    Ok((a + a.transpose()) * 0.5)
}

pub fn symmetric_part_with_jacobian(a: &Tensor2) -> Result<(Tensor2, Jacobian)> {
    let sym = symmetric_part(a).map_err(|e| {
        e.context(
            "symmetric_part_with_jacobian",
            "error computing the symmetric part",
        )
    })?;
    let jacobian = fourth_order(a.nrows(), |i, j, k, l| {
        0.5 * (delta_dirac(i, k) * delta_dirac(j, l) + delta_dirac(j, k) * delta_dirac(i, l))
    });
    Ok((sym, jacobian))
}

/// Unit normal `A/‖A‖` of a tensor of any shape.
///
/// A tensor whose norm is fuzzy-equal to zero yields a zero tensor.
pub fn unit_normal(a: &DMatrix<f64>) -> DMatrix<f64> {
    let norm = a.norm();
    if fuzzy_equals(norm, 0.0, Tolerance::default()) {
        tracing::debug!(
            rows = a.nrows(),
            cols = a.ncols(),
            norm,
            "unit normal of a zero tensor, returning zeros"
        );
        return DMatrix::zeros(a.nrows(), a.ncols());
    }
    a / norm
}

/// Unit normal and `∂n/∂A = (I - n⊗n)/‖A‖` over the row-major components.
///
/// For a zero tensor the Jacobian is not defined and its entries are NaN or
/// infinite.
pub fn unit_normal_with_jacobian(a: &DMatrix<f64>) -> (DMatrix<f64>, Jacobian) {
    let normal = unit_normal(a);
    let norm = a.norm();
    let n = DVector::from_vec(to_row_major(&normal));
    let size = n.len();
    let jacobian = (DMatrix::identity(size, size) - dyadic(&n, &n)) / norm;
    (normal, jacobian)
}

/// Rotate `A` by `Q`: `A'_ij = Q_Ii A_IJ Q_Jj`.
pub fn rotate(a: &Tensor2, q: &Tensor2) -> Result<Tensor2> {
    require_same_shape(a, q).map_err(tensor("rotate"))?;
    Ok(q.transpose() * a * q)
}
