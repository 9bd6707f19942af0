//! Overlap integrals of associated Legendre function products.
//!
//! [`parity_overlap`] is the closed-form azimuthal kernel (K1);
//! [`polar_overlap`] is the finite double sum over the Legendre series
//! coefficients (K2). K2 terms alternate in sign and span many orders of
//! magnitude for large degrees, so they are collected into a [`TermList`] and
//! reduced smallest-magnitude first.

use super::gamma::{ln_factorial, ln_gamma_half, ln_gamma_int};
use super::legendre::{is_kernel_state, parity_sign};
use crate::common::constants::LN_2;
use crate::numerics::{magnitude_ordered_sum, stable_sum};
use serde::Serialize;

/// Azimuthal overlap kernel K1.
///
/// Nonzero only for valid states with `l + p` odd whose degree and order
/// differences share a strict sign; then `2 (ν+μ)! / (ν-μ)!` with
/// `ν = min(l, p)` and `μ = min(m, q)`.
pub fn parity_overlap(l: i32, m: i32, p: i32, q: i32) -> f64 {
    if !is_kernel_state(l, m) || !is_kernel_state(p, q) {
        return 0.0;
    }
    if (l + p).rem_euclid(2) != 1 {
        return 0.0;
    }

    let degree_gap = l - p;
    let order_gap = m - q;
    let same_direction =
        (degree_gap < 0 && order_gap < 0) || (degree_gap > 0 && order_gap > 0);
    if !same_direction {
        return 0.0;
    }

    let nu = l.min(p);
    let mu = m.min(q);
    2.0 * (ln_factorial(nu + mu) - ln_factorial(nu - mu)).exp()
}

/// Summands of one K2 evaluation, stored in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermList {
    values: Vec<f64>,
}

impl TermList {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn largest_magnitude(&self) -> f64 {
        self.values
            .iter()
            .fold(0.0_f64, |largest, value| largest.max(value.abs()))
    }

    /// Ascending-magnitude reduction; ties keep generation order.
    pub fn magnitude_ordered_sum(&self) -> f64 {
        magnitude_ordered_sum(&self.values)
    }

    pub fn generation_order_sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn compensated_sum(&self) -> f64 {
        stable_sum(&self.values)
    }
}

fn polar_overlap_domain(l: i32, m: i32, p: i32, q: i32) -> bool {
    // Orders are magnitudes here; negative orders would put poles of Γ in
    // the numerator.
    m >= 0
        && q >= 0
        && is_kernel_state(l, m)
        && is_kernel_state(p, q)
        && (l + p - m - q) % 2 == 0
}

/// Builds the K2 summands, or `None` when the kernel vanishes by its domain
/// or parity rule.
pub fn polar_overlap_terms(l: i32, m: i32, p: i32, q: i32) -> Option<TermList> {
    if !polar_overlap_domain(l, m, p, q) {
        return None;
    }

    let outer_max = (l - m) / 2;
    let inner_max = (p - q) / 2;
    let shared = -ln_gamma_half(l + p + 3) + ln_gamma_int(p + q + 1) + ln_gamma_int(l + m + 1);

    let mut values = Vec::with_capacity(((outer_max + 1) * (inner_max + 1)) as usize);
    for i in 0..=outer_max {
        let outer = -ln_gamma_int(m + i + 1) - ln_gamma_int(i + 1) - ln_gamma_int(l - m - 2 * i + 1);
        for j in 0..=inner_max {
            let exponent = shared
                + outer
                + ln_gamma_half(l + p - m - q - 2 * (i + j) + 1)
                + ln_gamma_half(m + q + 2 * (i + j + 1))
                - ln_gamma_int(q + j + 1)
                - ln_gamma_int(j + 1)
                - ln_gamma_int(p - q - 2 * j + 1)
                - LN_2 * f64::from(m + q + 2 * (i + j));
            values.push(parity_sign(i + j) * exponent.exp());
        }
    }

    Some(TermList { values })
}

/// Polar overlap kernel K2 with magnitude-ordered summation.
pub fn polar_overlap(l: i32, m: i32, p: i32, q: i32) -> f64 {
    polar_overlap_terms(l, m, p, q)
        .map(|terms| terms.magnitude_ordered_sum())
        .unwrap_or(0.0)
}

/// Coefficient of `cos^(l-m-2i)θ sin^(m+2i)θ` in the expansion of
/// `P_l^m(cos θ)` (no Condon–Shortley phase), formed from plain factorials.
pub fn legendre_series_coefficient(l: i32, m: i32, i: i32) -> f64 {
    parity_sign(i) * 2.0_f64.powi(-(m + 2 * i)) * direct_factorial(l + m)
        / (direct_factorial(m + i) * direct_factorial(i) * direct_factorial(l - m - 2 * i))
}

/// Direct double-loop evaluation of K2 in generation order, without log
/// space or reordering. Intended as a reference for small degrees only;
/// factorials overflow past 170.
pub fn polar_overlap_reference(l: i32, m: i32, p: i32, q: i32) -> f64 {
    if !polar_overlap_domain(l, m, p, q) {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..=(l - m) / 2 {
        let c_lmi = legendre_series_coefficient(l, m, i);
        for j in 0..=(p - q) / 2 {
            let c_pqj = legendre_series_coefficient(p, q, j);
            let gammas = direct_gamma_half(l + p - m - q - 2 * (i + j) + 1)
                * direct_gamma_half(m + q + 2 * (i + j + 1))
                / direct_gamma_half(l + p + 3);
            sum += c_lmi * c_pqj * gammas;
        }
    }
    sum
}

fn direct_factorial(n: i32) -> f64 {
    (1..=n).fold(1.0, |product, k| product * f64::from(k))
}

fn direct_gamma_half(two_x: i32) -> f64 {
    // Γ(1/2) = sqrt(pi), Γ(1) = 1, then Γ(x + 1) = x Γ(x).
    let (mut value, mut current) = if two_x % 2 == 1 {
        (std::f64::consts::PI.sqrt(), 1)
    } else {
        (1.0, 2)
    };
    while current < two_x {
        value *= 0.5 * f64::from(current);
        current += 2;
    }
    value
}

/// Cancellation diagnostics for one K2 evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolarSumReport {
    pub l: i32,
    pub m: i32,
    pub p: i32,
    pub q: i32,
    pub term_count: usize,
    pub largest_term: f64,
    pub magnitude_ordered_sum: f64,
    pub generation_order_sum: f64,
    pub compensated_sum: f64,
}

pub fn polar_sum_report(l: i32, m: i32, p: i32, q: i32) -> PolarSumReport {
    let terms = polar_overlap_terms(l, m, p, q).unwrap_or_default();
    PolarSumReport {
        l,
        m,
        p,
        q,
        term_count: terms.len(),
        largest_term: terms.largest_magnitude(),
        magnitude_ordered_sum: terms.magnitude_ordered_sum(),
        generation_order_sum: terms.generation_order_sum(),
        compensated_sum: terms.compensated_sum(),
    }
}
