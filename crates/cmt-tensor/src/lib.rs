//! Dense tensor helpers shared by the continuum-mechanics tool crates.
//!
//! This crate is the linear-algebra layer under `cmt-kinematics`: it fixes
//! the storage conventions for second-order tensors and their fourth-order
//! Jacobians on top of `nalgebra`, and provides the handful of operations
//! (inverse, determinant derivative, reshape, fuzzy comparison) the
//! kinematics code needs.

mod error;
mod fuzzy;
mod ops;
mod reshape;

pub use error::{Result, TensorError};
pub use fuzzy::{Tolerance, fuzzy_equals, fuzzy_equals_tensor};
pub use ops::{
    Jacobian, Tensor2, component, d_determinant_d_tensor, determinant, dyadic, fourth_order,
    fourth_order_identity, from_row_major, identity, inner, inverse, require_dim,
    require_same_shape, square_dim, to_row_major,
};
pub use reshape::{flatten, from_nested, inflate, to_nested};
