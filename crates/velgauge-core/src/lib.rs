//! Angular coupling coefficients for the velocity-gauge laser interaction on a
//! spherical-harmonic basis.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;

pub use modules::velocity::{coupling, derivative_r_coupling};
