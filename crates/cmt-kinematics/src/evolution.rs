//! Time integration of rate-form state variables.
//!
//! All integrators blend the rate at the start of the step with the rate at
//! the end of the step by a weight `α ∈ [0, 1]`:
//!
//! * `α = 0` uses only the current rate (implicit)
//! * `α = 1` uses only the previous rate (explicit)
//! * `α = ½` is the trapezoidal rule
//!
//! The deformation gradient is advanced under `Ḟ = L F` (or `Ḟ = F L` in the
//! reference form) with the same blending. The operator that carries the
//! implicit part is inverted once per call and reused for every Jacobian.

use cmt_tensor::{Jacobian, Tensor2, fourth_order, identity, inverse, require_dim};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::auxiliary::delta_dirac;
use crate::error::{KinematicsError, Result, tensor};

fn check_alpha(operation: &'static str, alpha: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(KinematicsError::invalid_domain(
            operation,
            format!("alpha must be in [0, 1], got {alpha}"),
        ));
    }
    Ok(())
}

/// Blending weight between the previous and current rates.
///
/// Deserializes from either a single number or a list with one weight per
/// component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegrationWeight {
    Uniform(f64),
    PerComponent(Vec<f64>),
}

impl IntegrationWeight {
    /// Fully implicit, `α = 0`
    pub fn implicit() -> Self {
        Self::Uniform(0.0)
    }

    /// Fully explicit, `α = 1`
    pub fn explicit() -> Self {
        Self::Uniform(1.0)
    }

    /// Trapezoidal rule, `α = ½`
    pub fn midpoint() -> Self {
        Self::Uniform(0.5)
    }

    /// Expand to one checked weight per component.
    fn resolve(&self, operation: &'static str, len: usize) -> Result<Vec<f64>> {
        let weights = match self {
            Self::Uniform(alpha) => vec![*alpha; len],
            Self::PerComponent(alphas) => {
                if alphas.len() != len {
                    return Err(KinematicsError::shape_mismatch(
                        operation,
                        format!("{} weights for {len} components", alphas.len()),
                    ));
                }
                alphas.clone()
            }
        };
        for alpha in &weights {
            check_alpha(operation, *alpha)?;
        }
        Ok(weights)
    }
}

impl Default for IntegrationWeight {
    fn default() -> Self {
        Self::midpoint()
    }
}

/// Result of one integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Evolved<T> {
    /// Change over the step
    pub increment: T,
    /// Value at the end of the step
    pub current: T,
}

/// Derivatives of a [`midpoint_evolution`] step. Both are diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct MidpointJacobians {
    pub d_current_d_current_rate: DMatrix<f64>,
    pub d_current_d_previous_rate: DMatrix<f64>,
}

/// Advance a vector of state variables by one step of the blended rule.
///
/// `ΔA_i = Δt (α_i Ȧ_prev,i + (1 - α_i) Ȧ_curr,i)` and `A_i = A_prev,i + ΔA_i`.
///
/// # Arguments
/// * `dt` - Time increment
/// * `previous` - Values at the start of the step
/// * `previous_rate` - Rates at the start of the step
/// * `current_rate` - Rates at the end of the step
/// * `alpha` - Blending weight(s)
pub fn midpoint_evolution(
    dt: f64,
    previous: &DVector<f64>,
    previous_rate: &DVector<f64>,
    current_rate: &DVector<f64>,
    alpha: &IntegrationWeight,
) -> Result<Evolved<DVector<f64>>> {
    const OP: &str = "midpoint_evolution";
    let n = previous.len();
    if previous_rate.len() != n || current_rate.len() != n {
        return Err(KinematicsError::shape_mismatch(
            OP,
            format!(
                "values, previous rates and current rates have lengths {n}, {}, {}",
                previous_rate.len(),
                current_rate.len()
            ),
        ));
    }
    let weights = alpha.resolve(OP, n)?;

    let increment = DVector::from_fn(n, |i, _| {
        dt * (weights[i] * previous_rate[i] + (1.0 - weights[i]) * current_rate[i])
    });
    let current = previous + &increment;
    Ok(Evolved { increment, current })
}

pub fn midpoint_evolution_with_jacobians(
    dt: f64,
    previous: &DVector<f64>,
    previous_rate: &DVector<f64>,
    current_rate: &DVector<f64>,
    alpha: &IntegrationWeight,
) -> Result<(Evolved<DVector<f64>>, MidpointJacobians)> {
    const OP: &str = "midpoint_evolution_with_jacobians";
    let evolved = midpoint_evolution(dt, previous, previous_rate, current_rate, alpha)
        .map_err(|e| e.context(OP, "error in the midpoint evolution"))?;
    let weights = alpha.resolve(OP, previous.len())?;

    let d_current = DVector::from_iterator(weights.len(), weights.iter().map(|a| dt * (1.0 - a)));
    let d_previous = DVector::from_iterator(weights.len(), weights.iter().map(|a| dt * a));

    Ok((
        evolved,
        MidpointJacobians {
            d_current_d_current_rate: DMatrix::from_diagonal(&d_current),
            d_current_d_previous_rate: DMatrix::from_diagonal(&d_previous),
        },
    ))
}

/// Derivatives of the deformation-gradient rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateJacobians {
    pub wrt_velocity_gradient: Jacobian,
    pub wrt_deformation_gradient: Jacobian,
}

/// Rate of the deformation gradient `Ḟ = L F` (3D).
pub fn deformation_gradient_rate(l: &Tensor2, f: &Tensor2) -> Result<Tensor2> {
    const OP: &str = "deformation_gradient_rate";
    require_dim(l, 3).map_err(tensor(OP))?;
    require_dim(f, 3).map_err(tensor(OP))?;
    Ok(l * f)
}

/// `Ḟ` with `∂Ḟ_iI/∂L_kl = δ_ik F_lI` and `∂Ḟ_iI/∂F_kK = L_ik δ_IK`.
pub fn deformation_gradient_rate_with_jacobians(
    l: &Tensor2,
    f: &Tensor2,
) -> Result<(Tensor2, RateJacobians)> {
    let rate = deformation_gradient_rate(l, f).map_err(|e| {
        e.context(
            "deformation_gradient_rate_with_jacobians",
            "error computing the deformation gradient rate",
        )
    })?;
    let wrt_velocity_gradient = fourth_order(3, |i, ii, k, ll| delta_dirac(i, k) * f[(ll, ii)]);
    let wrt_deformation_gradient = fourth_order(3, |i, ii, k, kk| l[(i, k)] * delta_dirac(ii, kk));
    Ok((
        rate,
        RateJacobians {
            wrt_velocity_gradient,
            wrt_deformation_gradient,
        },
    ))
}

/// Configuration in which the velocity gradient acts on `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolutionMode {
    /// `Ḟ = L F`, velocity gradient in the current configuration
    Current = 1,
    /// `Ḟ = F L`, velocity gradient in the reference configuration
    Reference = 2,
}

impl TryFrom<u32> for EvolutionMode {
    type Error = KinematicsError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Current),
            2 => Ok(Self::Reference),
            other => Err(KinematicsError::invalid_domain(
                "EvolutionMode::try_from",
                format!("mode must be 1 or 2, got {other}"),
            )),
        }
    }
}

/// Settings of [`evolve_deformation_gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Weight of the previous velocity gradient
    pub alpha: f64,
    pub mode: EvolutionMode,
}

impl EvolutionConfig {
    /// Backward Euler (`α = 0`)
    pub fn implicit(mode: EvolutionMode) -> Self {
        Self { alpha: 0.0, mode }
    }

    /// Forward Euler (`α = 1`)
    pub fn explicit(mode: EvolutionMode) -> Self {
        Self { alpha: 1.0, mode }
    }

    /// Trapezoidal rule (`α = ½`)
    pub fn midpoint(mode: EvolutionMode) -> Self {
        Self { alpha: 0.5, mode }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self::midpoint(EvolutionMode::Current)
    }
}

/// Derivatives of an [`evolve_deformation_gradient`] step.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionJacobians {
    /// `∂F/∂L`
    pub d_current_d_velocity: Jacobian,
    /// `∂ΔF/∂F_prev`
    pub d_increment_d_previous_f: Jacobian,
    /// `∂F/∂F_prev`
    pub d_current_d_previous_f: Jacobian,
    /// `∂F/∂L_prev`
    pub d_current_d_previous_velocity: Jacobian,
}

/// Quantities of one step shared by the value and the Jacobians.
struct Step {
    dt: f64,
    alpha: f64,
    mode: EvolutionMode,
    /// `[I - Δt(1 - α) L]⁻¹`
    a_inv: Tensor2,
    /// `α L_prev + (1 - α) L`
    l_alpha: Tensor2,
    evolved: Evolved<Tensor2>,
}

fn step(
    dt: f64,
    previous_f: &Tensor2,
    previous_l: &Tensor2,
    l: &Tensor2,
    config: &EvolutionConfig,
) -> Result<Step> {
    const OP: &str = "evolve_deformation_gradient";
    let EvolutionConfig { alpha, mode } = *config;
    tracing::trace!(operation = OP, dt, alpha, ?mode, "evolving deformation gradient");

    check_alpha(OP, alpha)?;
    for t in [previous_f, previous_l, l] {
        require_dim(t, 3).map_err(tensor(OP))?;
    }

    let a_inv = inverse(&(identity(3) - l * (dt * (1.0 - alpha)))).map_err(tensor(OP))?;
    let l_alpha = previous_l * alpha + l * (1.0 - alpha);

    let increment = match mode {
        EvolutionMode::Current => &a_inv * &l_alpha * previous_f * dt,
        EvolutionMode::Reference => previous_f * &l_alpha * &a_inv * dt,
    };
    let current = previous_f + &increment;

    Ok(Step {
        dt,
        alpha,
        mode,
        a_inv,
        l_alpha,
        evolved: Evolved { increment, current },
    })
}

impl Step {
    fn d_current_d_velocity(&self) -> Jacobian {
        let s = self.dt * (1.0 - self.alpha);
        let f = &self.evolved.current;
        let a_inv = &self.a_inv;
        match self.mode {
            EvolutionMode::Current => fourth_order(3, |j, ii, k, l| s * a_inv[(j, k)] * f[(l, ii)]),
            EvolutionMode::Reference => {
                fourth_order(3, |j, ii, kk, ll| s * f[(j, kk)] * a_inv[(ll, ii)])
            }
        }
    }

    fn d_current_d_previous_velocity(&self, previous_f: &Tensor2) -> Jacobian {
        let s = self.dt * self.alpha;
        let a_inv = &self.a_inv;
        match self.mode {
            EvolutionMode::Current => {
                fourth_order(3, |j, ii, k, l| s * a_inv[(j, k)] * previous_f[(l, ii)])
            }
            EvolutionMode::Reference => {
                fourth_order(3, |j, ii, kk, ll| s * previous_f[(j, kk)] * a_inv[(ll, ii)])
            }
        }
    }

    fn d_increment_d_previous_f(&self) -> Jacobian {
        match self.mode {
            EvolutionMode::Current => {
                let m = &self.a_inv * &self.l_alpha * self.dt;
                fourth_order(3, |j, ii, k, kk| m[(j, k)] * delta_dirac(ii, kk))
            }
            EvolutionMode::Reference => {
                let m = &self.l_alpha * &self.a_inv * self.dt;
                fourth_order(3, |j, ii, k, kk| delta_dirac(j, k) * m[(kk, ii)])
            }
        }
    }
}

/// Advance the deformation gradient over one step (3D).
///
/// With `A = I - Δt(1 - α) L`:
///
/// * `Current`: `F = A⁻¹ (F_prev + Δt α L_prev F_prev)`
/// * `Reference`: `F = (F_prev + Δt α F_prev L_prev) A⁻¹`
///
/// # Arguments
/// * `dt` - Time increment
/// * `previous_f` - Deformation gradient at the start of the step
/// * `previous_l` - Velocity gradient at the start of the step
/// * `l` - Velocity gradient at the end of the step
/// * `config` - Blending weight and mode
pub fn evolve_deformation_gradient(
    dt: f64,
    previous_f: &Tensor2,
    previous_l: &Tensor2,
    l: &Tensor2,
    config: &EvolutionConfig,
) -> Result<Evolved<Tensor2>> {
    Ok(step(dt, previous_f, previous_l, l, config)?.evolved)
}

/// Evolved deformation gradient and `∂F/∂L`.
pub fn evolve_deformation_gradient_with_velocity_jacobian(
    dt: f64,
    previous_f: &Tensor2,
    previous_l: &Tensor2,
    l: &Tensor2,
    config: &EvolutionConfig,
) -> Result<(Evolved<Tensor2>, Jacobian)> {
    let step = step(dt, previous_f, previous_l, l, config).map_err(|e| {
        e.context(
            "evolve_deformation_gradient_with_velocity_jacobian",
            "error evolving the deformation gradient",
        )
    })?;
    let d_current_d_velocity = step.d_current_d_velocity();
    Ok((step.evolved, d_current_d_velocity))
}

/// Evolved deformation gradient with all of its derivatives.
pub fn evolve_deformation_gradient_with_jacobians(
    dt: f64,
    previous_f: &Tensor2,
    previous_l: &Tensor2,
    l: &Tensor2,
    config: &EvolutionConfig,
) -> Result<(Evolved<Tensor2>, EvolutionJacobians)> {
    let step = step(dt, previous_f, previous_l, l, config).map_err(|e| {
        e.context(
            "evolve_deformation_gradient_with_jacobians",
            "error evolving the deformation gradient",
        )
    })?;

    let d_increment_d_previous_f = step.d_increment_d_previous_f();
    let jacobians = EvolutionJacobians {
        d_current_d_velocity: step.d_current_d_velocity(),
        d_current_d_previous_f: DMatrix::identity(9, 9) + &d_increment_d_previous_f,
        d_increment_d_previous_f,
        d_current_d_previous_velocity: step.d_current_d_previous_velocity(previous_f),
    };
    Ok((step.evolved, jacobians))
}
