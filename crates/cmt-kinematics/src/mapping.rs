//! Push-forward and pull-back of stresses and strains.
//!
//! Every operator maps a second-order tensor between the reference and the
//! current configuration through a deformation gradient `F`. The Jacobian
//! variants return [`MappingJacobians`], the derivatives of the mapped tensor
//! with respect to the mapped argument and with respect to `F`.

use cmt_tensor::{
    Jacobian, Tensor2, d_determinant_d_tensor, determinant, fourth_order, inverse, require_dim,
    require_same_shape,
};

use crate::auxiliary::delta_dirac;
use crate::error::{Result, tensor};

/// Derivatives of a configuration mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingJacobians {
    /// Derivative with respect to the tensor being mapped
    pub wrt_argument: Jacobian,
    /// Derivative with respect to the deformation gradient
    pub wrt_deformation_gradient: Jacobian,
}

/// Inputs of a mapping once shapes and invertibility have been checked.
struct Validated {
    dim: usize,
    f_inv: Tensor2,
    det: f64,
}

fn validate(
    operation: &'static str,
    argument: &Tensor2,
    f: &Tensor2,
    required_dim: Option<usize>,
) -> Result<Validated> {
    if let Some(dim) = required_dim {
        require_dim(f, dim).map_err(tensor(operation))?;
    }
    let dim = require_same_shape(f, argument).map_err(tensor(operation))?;
    let f_inv = inverse(f).map_err(tensor(operation))?;
    let det = determinant(f).map_err(tensor(operation))?;
    Ok(Validated { dim, f_inv, det })
}

/// Push a PK2 stress forward to the Cauchy stress, `σ = F S Fᵗ / det F`.
///
/// Works for any dimension; see [`map_pk2_to_cauchy`] for the 3D form.
pub fn push_forward_pk2_stress(pk2: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    let v = validate("push_forward_pk2_stress", pk2, f, None)?;
    Ok(f * pk2 * f.transpose() / v.det)
}

pub fn push_forward_pk2_stress_with_jacobians(
    pk2: &Tensor2,
    f: &Tensor2,
) -> Result<(Tensor2, MappingJacobians)> {
    const OP: &str = "push_forward_pk2_stress_with_jacobians";
    let v = validate(OP, pk2, f, None)?;
    let cauchy = f * pk2 * f.transpose() / v.det;

    let s_ft = pk2 * f.transpose();
    let f_s = f * pk2;
    let j = v.det;
    let d_det = d_determinant_d_tensor(f).map_err(tensor(OP))?;

    let wrt_argument = fourth_order(v.dim, |i, jj, a, b| f[(i, a)] * f[(jj, b)] / j);
    let wrt_deformation_gradient = fourth_order(v.dim, |i, jj, a, b| {
        (-cauchy[(i, jj)] * d_det[(a, b)]
            + delta_dirac(i, a) * s_ft[(b, jj)]
            + f_s[(i, b)] * delta_dirac(jj, a))
            / j
    });

    Ok((
        cauchy,
        MappingJacobians {
            wrt_argument,
            wrt_deformation_gradient,
        },
    ))
}

/// Map the PK2 stress to the Cauchy stress (3D).
pub fn map_pk2_to_cauchy(pk2: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    const OP: &str = "map_pk2_to_cauchy";
    require_dim(f, 3).map_err(tensor(OP))?;
    push_forward_pk2_stress(pk2, f)
        .map_err(|e| e.context(OP, "error pushing the PK2 stress forward"))
}

/// Pull a Cauchy stress back to the PK2 stress, `S = J F⁻¹ σ F⁻ᵗ`.
pub fn pull_back_cauchy_stress(cauchy: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    let v = validate("pull_back_cauchy_stress", cauchy, f, None)?;
    Ok(&v.f_inv * cauchy * v.f_inv.transpose() * v.det)
}

pub fn pull_back_cauchy_stress_with_jacobians(
    cauchy: &Tensor2,
    f: &Tensor2,
) -> Result<(Tensor2, MappingJacobians)> {
    const OP: &str = "pull_back_cauchy_stress_with_jacobians";
    let v = validate(OP, cauchy, f, None)?;
    let f_inv = &v.f_inv;
    let pk2 = f_inv * cauchy * f_inv.transpose() * v.det;

    let wrt_argument = fourth_order(v.dim, |a, b, k, l| v.det * f_inv[(a, k)] * f_inv[(b, l)]);
    let wrt_deformation_gradient = fourth_order(v.dim, |a, b, k, l| {
        f_inv[(l, k)] * pk2[(a, b)] - f_inv[(a, k)] * pk2[(l, b)] - f_inv[(b, k)] * pk2[(a, l)]
    });

    Ok((
        pk2,
        MappingJacobians {
            wrt_argument,
            wrt_deformation_gradient,
        },
    ))
}

/// Push the Green-Lagrange strain forward to the Almansi strain, `e = F⁻ᵗ E F⁻¹` (3D).
pub fn push_forward_green_lagrange_strain(e: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    let v = validate("push_forward_green_lagrange_strain", e, f, Some(3))?;
    Ok(v.f_inv.transpose() * e * &v.f_inv)
}

pub fn push_forward_green_lagrange_strain_with_jacobians(
    e: &Tensor2,
    f: &Tensor2,
) -> Result<(Tensor2, MappingJacobians)> {
    const OP: &str = "push_forward_green_lagrange_strain_with_jacobians";
    let v = validate(OP, e, f, Some(3))?;
    let f_inv = &v.f_inv;
    let almansi = f_inv.transpose() * e * f_inv;

    let wrt_argument = fourth_order(3, |i, j, kk, ll| f_inv[(kk, i)] * f_inv[(ll, j)]);
    let wrt_deformation_gradient = fourth_order(3, |i, j, kk, ll| {
        -f_inv[(ll, i)] * almansi[(kk, j)] - f_inv[(ll, j)] * almansi[(i, kk)]
    });

    Ok((
        almansi,
        MappingJacobians {
            wrt_argument,
            wrt_deformation_gradient,
        },
    ))
}

/// Pull the Almansi strain back to the Green-Lagrange strain, `E = Fᵗ e F` (3D).
pub fn pull_back_almansi_strain(almansi: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    validate("pull_back_almansi_strain", almansi, f, Some(3))?;
    Ok(f.transpose() * almansi * f)
}

pub fn pull_back_almansi_strain_with_jacobians(
    almansi: &Tensor2,
    f: &Tensor2,
) -> Result<(Tensor2, MappingJacobians)> {
    const OP: &str = "pull_back_almansi_strain_with_jacobians";
    validate(OP, almansi, f, Some(3))?;
    let e = f.transpose() * almansi * f;

    let e_f = almansi * f;
    let ft_e = f.transpose() * almansi;
    let wrt_argument = fourth_order(3, |ii, jj, k, l| f[(k, ii)] * f[(l, jj)]);
    let wrt_deformation_gradient = fourth_order(3, |ii, jj, kk, ll| {
        delta_dirac(ii, ll) * e_f[(kk, jj)] + ft_e[(ii, kk)] * delta_dirac(jj, ll)
    });

    Ok((
        e,
        MappingJacobians {
            wrt_argument,
            wrt_deformation_gradient,
        },
    ))
}

/// Pull a velocity gradient back to the reference configuration, `L̄ = F⁻¹ L F` (3D).
pub fn pull_back_velocity_gradient(l: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    let v = validate("pull_back_velocity_gradient", l, f, Some(3))?;
    Ok(&v.f_inv * l * f)
}

pub fn pull_back_velocity_gradient_with_jacobians(
    l: &Tensor2,
    f: &Tensor2,
) -> Result<(Tensor2, MappingJacobians)> {
    const OP: &str = "pull_back_velocity_gradient_with_jacobians";
    let v = validate(OP, l, f, Some(3))?;
    let f_inv = &v.f_inv;
    let pulled = f_inv * l * f;
    let f_inv_l = f_inv * l;

    let wrt_argument = fourth_order(3, |ii, jj, k, ll| f_inv[(ii, k)] * f[(ll, jj)]);
    let wrt_deformation_gradient = fourth_order(3, |ii, jj, k, kk| {
        -f_inv[(ii, k)] * pulled[(kk, jj)] + f_inv_l[(ii, k)] * delta_dirac(jj, kk)
    });

    Ok((
        pulled,
        MappingJacobians {
            wrt_argument,
            wrt_deformation_gradient,
        },
    ))
}
