//! Normalization constants relating associated Legendre functions to
//! normalized spherical harmonics, `Y_lm = legendre_norm(l, m) * P_l^m`.

use super::gamma::ln_factorial;
use crate::common::constants::{FOUR_PI, MAX_KERNEL_DEGREE, PI};

/// Whether `(l, m)` indexes a spherical harmonic (`l >= 0`, `|m| <= l`).
pub fn is_valid_state(l: i32, m: i32) -> bool {
    l >= 0 && m.unsigned_abs() <= l.unsigned_abs()
}

/// Valid state with `l <= MAX_KERNEL_DEGREE`. Only these reach integer
/// arithmetic in the kernels.
pub fn is_kernel_state(l: i32, m: i32) -> bool {
    is_valid_state(l, m) && l <= MAX_KERNEL_DEGREE
}

/// Normalization of a single spherical harmonic; 0 outside the `(l, m)` domain.
pub fn legendre_norm(l: i32, m: i32) -> f64 {
    if !is_kernel_state(l, m) {
        return 0.0;
    }

    let m_abs = m.abs();
    let sign = parity_sign((m + m_abs) / 2);
    let degree = f64::from(2 * l + 1) / (4.0 * PI);
    let factorial_ratio = (ln_factorial(l - m_abs) - ln_factorial(l + m_abs)).exp();
    sign * degree.sqrt() * factorial_ratio.sqrt()
}

/// Product of two spherical-harmonic normalizations, accumulated in log space
/// and exponentiated once.
pub fn legendre_norm_double(l: i32, m: i32, lp: i32, mp: i32) -> f64 {
    if !is_kernel_state(l, m) || !is_kernel_state(lp, mp) {
        return 0.0;
    }

    let m_abs = m.abs();
    let mp_abs = mp.abs();
    let exponent = ln_factorial(l - m_abs) + ln_factorial(lp - mp_abs)
        - ln_factorial(lp + mp_abs)
        - ln_factorial(l + m_abs)
        + f64::from(2 * l + 1).ln()
        + f64::from(2 * lp + 1).ln();

    parity_sign((m + mp + m_abs + mp_abs) / 2) / FOUR_PI * exponent.exp().sqrt()
}

pub(crate) fn parity_sign(exponent: i32) -> f64 {
    if exponent.rem_euclid(2) == 0 {
        1.0
    } else {
        -1.0
    }
}
