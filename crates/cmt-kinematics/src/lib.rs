//! Finite-deformation kinematics with consistent tangents.
//!
//! This crate provides the kinematic building blocks of nonlinear
//! constitutive models:
//!
//! - **Measures**: deformation gradient, right Cauchy-Green tensor,
//!   Green-Lagrange strain and its isochoric split, symmetric part, unit
//!   normal, rotation
//! - **Mapping**: push-forward and pull-back of stresses, strains and
//!   velocity gradients between the reference and current configurations
//! - **Evolution**: blended implicit/explicit integration of state vectors
//!   and of the deformation gradient
//! - **Auxiliary**: Kronecker delta, WLF shift factor, Macaulay bracket,
//!   quadratic thermal expansion
//!
//! Every differentiable operation has a `*_with_jacobian(s)` variant that
//! also returns the exact derivative. Jacobians are `n²×n²` matrices whose
//! row `n·i + j` and column `n·k + l` correspond to `∂A_ij/∂B_kl`; use
//! [`cmt_tensor::flatten`] for the flat row-major layout.
//!
//! All functions are pure and may be called from any number of threads.

pub mod auxiliary;
pub mod error;
pub mod evolution;
pub mod mapping;
pub mod measures;

pub use auxiliary::{
    WlfParameters, delta_dirac, macaulay, macaulay_with_derivative, quadratic_thermal_expansion,
    quadratic_thermal_expansion_with_jacobian, wlf, wlf_with_derivative,
};
pub use error::{ErrorKind, KinematicsError, Result};
pub use evolution::{
    EvolutionConfig, EvolutionJacobians, EvolutionMode, Evolved, IntegrationWeight,
    MidpointJacobians, RateJacobians, deformation_gradient_rate,
    deformation_gradient_rate_with_jacobians, evolve_deformation_gradient,
    evolve_deformation_gradient_with_jacobians, evolve_deformation_gradient_with_velocity_jacobian,
    midpoint_evolution, midpoint_evolution_with_jacobians,
};
pub use mapping::{
    MappingJacobians, map_pk2_to_cauchy, pull_back_almansi_strain,
    pull_back_almansi_strain_with_jacobians, pull_back_cauchy_stress,
    pull_back_cauchy_stress_with_jacobians, pull_back_velocity_gradient,
    pull_back_velocity_gradient_with_jacobians, push_forward_green_lagrange_strain,
    push_forward_green_lagrange_strain_with_jacobians, push_forward_pk2_stress,
    push_forward_pk2_stress_with_jacobians,
};
pub use measures::{
    GradientConfiguration, IsochoricSplit, IsochoricSplitJacobians,
    d_green_lagrange_strain_d_deformation_gradient, decompose_green_lagrange_strain,
    decompose_green_lagrange_strain_with_jacobians, deformation_gradient,
    deformation_gradient_with_jacobian, green_lagrange_strain, green_lagrange_strain_with_jacobian,
    right_cauchy_green, right_cauchy_green_with_jacobian, rotate, symmetric_part,
    symmetric_part_with_jacobian, unit_normal, unit_normal_with_jacobian,
};
