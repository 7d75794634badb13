/// Analytic Jacobians checked against central finite differences
mod common;

use cmt_kinematics::*;
use cmt_tensor::{Tensor2, from_row_major, to_row_major};
use common::{
    assert_jacobian, finite_difference, moderate_deformation, previous_velocity_gradient, stress,
    t3, velocity_gradient,
};
use nalgebra::{DMatrix, DVector};

fn small_strain() -> Tensor2 {
    t3([0.05, 0.01, -0.02, 0.01, -0.03, 0.015, -0.02, 0.015, 0.08])
}

#[test]
fn test_deformation_gradient_jacobians() {
    let h = t3([0.1, 0.02, -0.05, 0.03, -0.08, 0.01, 0.0, 0.04, 0.12]);
    for configuration in [GradientConfiguration::Reference, GradientConfiguration::Current] {
        let (_, jac) = deformation_gradient_with_jacobian(&h, configuration).unwrap();
        let fd = finite_difference(&h, |x| deformation_gradient(x, configuration).unwrap());
        assert_jacobian(&jac, &fd);
    }
}

#[test]
fn test_right_cauchy_green_jacobian() {
    let f = moderate_deformation();
    let (_, jac) = right_cauchy_green_with_jacobian(&f).unwrap();
    let fd = finite_difference(&f, |x| right_cauchy_green(x).unwrap());
    assert_jacobian(&jac, &fd);
}

#[test]
fn test_green_lagrange_strain_jacobian() {
    let f = moderate_deformation();
    let (_, jac) = green_lagrange_strain_with_jacobian(&f).unwrap();
    let fd = finite_difference(&f, |x| green_lagrange_strain(x).unwrap());
    assert_jacobian(&jac, &fd);
    assert_eq!(jac, d_green_lagrange_strain_d_deformation_gradient(&f).unwrap());
}

#[test]
fn test_isochoric_split_jacobians() {
    let e = small_strain();
    let (_, jac) = decompose_green_lagrange_strain_with_jacobians(&e).unwrap();

    let fd_iso = finite_difference(&e, |x| decompose_green_lagrange_strain(x).unwrap().isochoric);
    assert_jacobian(&jac.d_isochoric_d_strain, &fd_iso);

    let fd_j = finite_difference(&e, |x| {
        DMatrix::from_element(1, 1, decompose_green_lagrange_strain(x).unwrap().volume_ratio)
    });
    let analytic_j = DMatrix::from_row_slice(1, 9, &to_row_major(&jac.d_volume_ratio_d_strain));
    assert_jacobian(&analytic_j, &fd_j);
}

#[test]
fn test_symmetric_part_jacobian() {
    let a = from_row_major(2, &[1.0, 2.0, -3.0, 4.0]).unwrap();
    let (_, jac) = symmetric_part_with_jacobian(&a).unwrap();
    let fd = finite_difference(&a, |x| symmetric_part(x).unwrap());
    assert_jacobian(&jac, &fd);
}

#[test]
fn test_unit_normal_jacobian() {
    let a = DMatrix::from_row_slice(2, 3, &[0.3, -1.2, 0.7, 2.0, 0.1, -0.4]);
    let (_, jac) = unit_normal_with_jacobian(&a);
    let fd = finite_difference(&a, unit_normal);
    assert_jacobian(&jac, &fd);
}

#[test]
fn test_push_forward_pk2_jacobians() {
    let (s, f) = (stress(), moderate_deformation());
    let (_, jac) = push_forward_pk2_stress_with_jacobians(&s, &f).unwrap();
    assert_jacobian(
        &jac.wrt_argument,
        &finite_difference(&s, |x| push_forward_pk2_stress(x, &f).unwrap()),
    );
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| push_forward_pk2_stress(&s, x).unwrap()),
    );
}

#[test]
fn test_push_forward_pk2_jacobians_in_two_dimensions() {
    let s = from_row_major(2, &[1.0, 0.3, 0.3, -0.5]).unwrap();
    let f = from_row_major(2, &[1.1, 0.2, -0.1, 0.95]).unwrap();
    let (_, jac) = push_forward_pk2_stress_with_jacobians(&s, &f).unwrap();
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| push_forward_pk2_stress(&s, x).unwrap()),
    );
}

#[test]
fn test_pull_back_cauchy_jacobians() {
    let (sigma, f) = (stress(), moderate_deformation());
    let (_, jac) = pull_back_cauchy_stress_with_jacobians(&sigma, &f).unwrap();
    assert_jacobian(
        &jac.wrt_argument,
        &finite_difference(&sigma, |x| pull_back_cauchy_stress(x, &f).unwrap()),
    );
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| pull_back_cauchy_stress(&sigma, x).unwrap()),
    );
}

#[test]
fn test_push_forward_green_lagrange_jacobians() {
    let (e, f) = (small_strain(), moderate_deformation());
    let (_, jac) = push_forward_green_lagrange_strain_with_jacobians(&e, &f).unwrap();
    assert_jacobian(
        &jac.wrt_argument,
        &finite_difference(&e, |x| push_forward_green_lagrange_strain(x, &f).unwrap()),
    );
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| push_forward_green_lagrange_strain(&e, x).unwrap()),
    );
}

#[test]
fn test_pull_back_almansi_jacobians() {
    let (e, f) = (small_strain(), moderate_deformation());
    let (_, jac) = pull_back_almansi_strain_with_jacobians(&e, &f).unwrap();
    assert_jacobian(
        &jac.wrt_argument,
        &finite_difference(&e, |x| pull_back_almansi_strain(x, &f).unwrap()),
    );
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| pull_back_almansi_strain(&e, x).unwrap()),
    );
}

#[test]
fn test_pull_back_velocity_gradient_jacobians() {
    let (l, f) = (velocity_gradient(), moderate_deformation());
    let (_, jac) = pull_back_velocity_gradient_with_jacobians(&l, &f).unwrap();
    assert_jacobian(
        &jac.wrt_argument,
        &finite_difference(&l, |x| pull_back_velocity_gradient(x, &f).unwrap()),
    );
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| pull_back_velocity_gradient(&l, x).unwrap()),
    );
}

#[test]
fn test_deformation_gradient_rate_jacobians() {
    let (l, f) = (velocity_gradient(), moderate_deformation());
    let (_, jac) = deformation_gradient_rate_with_jacobians(&l, &f).unwrap();
    assert_jacobian(
        &jac.wrt_velocity_gradient,
        &finite_difference(&l, |x| deformation_gradient_rate(x, &f).unwrap()),
    );
    assert_jacobian(
        &jac.wrt_deformation_gradient,
        &finite_difference(&f, |x| deformation_gradient_rate(&l, x).unwrap()),
    );
}

#[test]
fn test_evolution_jacobians_both_modes() {
    let dt = 0.3;
    let f_prev = moderate_deformation();
    let l_prev = previous_velocity_gradient();
    let l = velocity_gradient();

    for mode in [EvolutionMode::Current, EvolutionMode::Reference] {
        for alpha in [0.0, 0.35, 1.0] {
            let config = EvolutionConfig::midpoint(mode).with_alpha(alpha);
            let (_, jac) =
                evolve_deformation_gradient_with_jacobians(dt, &f_prev, &l_prev, &l, &config)
                    .unwrap();

            let current = |fp: &Tensor2, lp: &Tensor2, lc: &Tensor2| {
                evolve_deformation_gradient(dt, fp, lp, lc, &config).unwrap()
            };

            assert_jacobian(
                &jac.d_current_d_velocity,
                &finite_difference(&l, |x| current(&f_prev, &l_prev, x).current),
            );
            assert_jacobian(
                &jac.d_current_d_previous_velocity,
                &finite_difference(&l_prev, |x| current(&f_prev, x, &l).current),
            );
            assert_jacobian(
                &jac.d_current_d_previous_f,
                &finite_difference(&f_prev, |x| current(x, &l_prev, &l).current),
            );
            assert_jacobian(
                &jac.d_increment_d_previous_f,
                &finite_difference(&f_prev, |x| current(x, &l_prev, &l).increment),
            );
        }
    }
}

#[test]
fn test_velocity_jacobian_variant_agrees_with_full_set() {
    let config = EvolutionConfig::midpoint(EvolutionMode::Reference);
    let (f_prev, l_prev, l) = (
        moderate_deformation(),
        previous_velocity_gradient(),
        velocity_gradient(),
    );
    let (evolved, d_velocity) =
        evolve_deformation_gradient_with_velocity_jacobian(0.2, &f_prev, &l_prev, &l, &config)
            .unwrap();
    let (full, jac) =
        evolve_deformation_gradient_with_jacobians(0.2, &f_prev, &l_prev, &l, &config).unwrap();
    assert_eq!(evolved, full);
    assert_eq!(d_velocity, jac.d_current_d_velocity);
}

#[test]
fn test_midpoint_jacobians_match_finite_difference() {
    let previous = DVector::from_column_slice(&[9.0, 10.0, 11.0, 12.0]);
    let previous_rate = DMatrix::from_row_slice(1, 4, &[1.0, 2.0, 3.0, 4.0]);
    let rate = DMatrix::from_row_slice(1, 4, &[5.0, 6.0, 7.0, 8.0]);
    let alpha = IntegrationWeight::PerComponent(vec![0.1, 0.2, 0.3, 0.4]);

    let as_vector = |x: &DMatrix<f64>| DVector::from_column_slice(x.as_slice());
    let current = |prev_rate: &DMatrix<f64>, curr_rate: &DMatrix<f64>| {
        let out = midpoint_evolution(
            2.5,
            &previous,
            &as_vector(prev_rate),
            &as_vector(curr_rate),
            &alpha,
        )
        .unwrap();
        DMatrix::from_row_slice(1, 4, out.current.as_slice())
    };

    let (_, jac) = midpoint_evolution_with_jacobians(
        2.5,
        &previous,
        &as_vector(&previous_rate),
        &as_vector(&rate),
        &alpha,
    )
    .unwrap();

    assert_jacobian(
        &jac.d_current_d_current_rate,
        &finite_difference(&rate, |x| current(&previous_rate, x)),
    );
    assert_jacobian(
        &jac.d_current_d_previous_rate,
        &finite_difference(&previous_rate, |x| current(x, &rate)),
    );
}

#[test]
fn test_thermal_expansion_slope_matches_finite_difference() {
    let linear = DVector::from_column_slice(&[1.0, 2.0, 3.0, 4.0]);
    let quadratic = DVector::from_column_slice(&[5.0, 6.0, 7.0, 8.0]);
    let reference_temperature = 273.15;
    let temperature = DMatrix::from_element(1, 1, 283.15);

    let (_, slope) = quadratic_thermal_expansion_with_jacobian(
        temperature[(0, 0)],
        reference_temperature,
        &linear,
        &quadratic,
    )
    .unwrap();

    let fd = finite_difference(&temperature, |t| {
        let expansion =
            quadratic_thermal_expansion(t[(0, 0)], reference_temperature, &linear, &quadratic)
                .unwrap();
        DMatrix::from_row_slice(1, 4, expansion.as_slice())
    });
    // one output row per component, one input column for the temperature
    assert_jacobian(&DMatrix::from_column_slice(4, 1, slope.as_slice()), &fd);
}
