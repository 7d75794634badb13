//! Scalar helpers used alongside the tensor kinematics.
//!
//! These are the small closed-form functions constitutive models call on
//! every integration point: the Kronecker delta, the Williams-Landel-Ferry
//! time-temperature shift factor, the Macaulay bracket and a quadratic
//! thermal expansion law.

use cmt_tensor::{Tolerance, fuzzy_equals};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};

/// Kronecker delta `δ_ij`.
#[inline]
pub fn delta_dirac(i: usize, j: usize) -> f64 {
    if i == j { 1.0 } else { 0.0 }
}

/// Material constants of the WLF shift factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WlfParameters {
    /// Reference temperature `Tr`
    pub reference_temperature: f64,
    /// First WLF constant `C1`
    pub c1: f64,
    /// Second WLF constant `C2`
    pub c2: f64,
}

impl WlfParameters {
    pub fn new(reference_temperature: f64, c1: f64, c2: f64) -> Self {
        Self {
            reference_temperature,
            c1,
            c2,
        }
    }

    /// Read `[Tr, C1, C2]` from a material property list.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match *values {
            [reference_temperature, c1, c2] => Ok(Self::new(reference_temperature, c1, c2)),
            _ => Err(KinematicsError::shape_mismatch(
                "WlfParameters::from_slice",
                format!("expected 3 parameters (Tr, C1, C2), got {}", values.len()),
            )),
        }
    }
}

/// WLF shift factor `10^(-C1 (T - Tr) / (C2 + T - Tr))`.
pub fn wlf(temperature: f64, params: &WlfParameters) -> Result<f64> {
    let dt = temperature - params.reference_temperature;
    let denominator = params.c2 + dt;
    if fuzzy_equals(denominator, 0.0, Tolerance::default()) {
        return Err(KinematicsError::invalid_domain(
            "wlf",
            format!(
                "C2 + T - Tr vanishes (C2 = {}, T - Tr = {dt})",
                params.c2
            ),
        ));
    }
    Ok(10f64.powf(-params.c1 * dt / denominator))
}

/// WLF shift factor and its derivative with respect to temperature.
pub fn wlf_with_derivative(temperature: f64, params: &WlfParameters) -> Result<(f64, f64)> {
    let factor = wlf(temperature, params)
        .map_err(|e| e.context("wlf_with_derivative", "error computing the shift factor"))?;

    let dt = temperature - params.reference_temperature;
    let denominator = params.c2 + dt;
    let d_factor = std::f64::consts::LN_10
        * factor
        * (-params.c1 / denominator + params.c1 * dt / (denominator * denominator));

    Ok((factor, d_factor))
}

/// Macaulay bracket `⟨x⟩ = (|x| + x) / 2`.
#[inline]
pub fn macaulay(x: f64) -> f64 {
    0.5 * (x.abs() + x)
}

/// Macaulay bracket and its derivative. The derivative is taken as 1 at `x = 0`.
pub fn macaulay_with_derivative(x: f64) -> (f64, f64) {
    let derivative = if x >= 0.0 { 1.0 } else { 0.0 };
    (macaulay(x), derivative)
}

/// Quadratic thermal expansion `a (T - Tr) + b (T² - Tr²)`, component-wise.
///
/// # Arguments
/// * `temperature` - Current temperature
/// * `reference_temperature` - Temperature at which the expansion is zero
/// * `linear` - Linear coefficients `a`
/// * `quadratic` - Quadratic coefficients `b`, same length as `linear`
pub fn quadratic_thermal_expansion(
    temperature: f64,
    reference_temperature: f64,
    linear: &DVector<f64>,
    quadratic: &DVector<f64>,
) -> Result<DVector<f64>> {
    if linear.len() != quadratic.len() {
        return Err(KinematicsError::shape_mismatch(
            "quadratic_thermal_expansion",
            format!(
                "{} linear and {} quadratic parameters",
                linear.len(),
                quadratic.len()
            ),
        ));
    }
    let dt = temperature - reference_temperature;
    let dt2 = temperature * temperature - reference_temperature * reference_temperature;
    Ok(linear * dt + quadratic * dt2)
}

/// Thermal expansion and its derivative `a + 2 b T` with respect to temperature.
pub fn quadratic_thermal_expansion_with_jacobian(
    temperature: f64,
    reference_temperature: f64,
    linear: &DVector<f64>,
    quadratic: &DVector<f64>,
) -> Result<(DVector<f64>, DVector<f64>)> {
    let expansion = quadratic_thermal_expansion(temperature, reference_temperature, linear, quadratic)
        .map_err(|e| {
            e.context(
                "quadratic_thermal_expansion_with_jacobian",
                "error computing the thermal expansion",
            )
        })?;
    let jacobian = linear + quadratic * (2.0 * temperature);
    Ok((expansion, jacobian))
}
