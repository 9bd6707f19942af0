//! Log-gamma evaluation at integer and half-integer arguments.
//!
//! Every gamma function that appears in the coupling kernels is evaluated at a
//! positive multiple of one half, so arguments are passed doubled (`two_x = 2x`)
//! and looked up in a table built once by the recurrence
//! `ln Γ(x + 1) = ln Γ(x) + ln x`. Arguments past the table fall back to the
//! Stirling series, which is accurate to machine precision there.

use crate::common::constants::LN_SQRT_PI;
use std::sync::OnceLock;

/// Largest doubled argument served from the table.
const TABLE_MAX_TWO_X: usize = 4096;
const HALF_LN_TWO_PI: f64 = 0.918_938_533_204_672_741_780_329_736_406_f64;

static LOG_GAMMA_HALVES: OnceLock<Vec<f64>> = OnceLock::new();

fn log_gamma_halves() -> &'static [f64] {
    LOG_GAMMA_HALVES.get_or_init(|| {
        let mut values = vec![f64::INFINITY; TABLE_MAX_TWO_X + 1];
        values[1] = LN_SQRT_PI;
        values[2] = 0.0;
        for two_x in 3..=TABLE_MAX_TWO_X {
            let previous = (two_x - 2) as f64 * 0.5;
            values[two_x] = values[two_x - 2] + previous.ln();
        }
        values
    })
}

/// Returns `ln Γ(two_x / 2)`.
///
/// Non-positive arguments are poles for the kernels in this crate and yield
/// `+inf`, so `exp(-ln Γ)` collapses to the reciprocal-gamma value of zero.
pub fn ln_gamma_half(two_x: i32) -> f64 {
    if two_x <= 0 {
        return f64::INFINITY;
    }

    let index = two_x as usize;
    if index <= TABLE_MAX_TWO_X {
        return log_gamma_halves()[index];
    }

    stirling_ln_gamma(0.5 * f64::from(two_x))
}

/// Returns `ln Γ(n)` for an integer argument.
pub fn ln_gamma_int(n: i32) -> f64 {
    ln_gamma_half(n.saturating_mul(2))
}

/// Returns `ln n!`, or `+inf` for negative `n`.
pub fn ln_factorial(n: i32) -> f64 {
    if n < 0 {
        return f64::INFINITY;
    }
    ln_gamma_int(n + 1)
}

fn stirling_ln_gamma(x: f64) -> f64 {
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    let series = inv
        * (1.0 / 12.0
            - inv2 * (1.0 / 360.0 - inv2 * (1.0 / 1260.0 - inv2 * (1.0 / 1680.0))));
    (x - 0.5) * x.ln() - x + HALF_LN_TWO_PI + series
}
