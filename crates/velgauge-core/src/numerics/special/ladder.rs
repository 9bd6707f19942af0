//! Recurrence coefficients for associated Legendre functions under `l ± 1`,
//! `l ± 2` and `m ± 1` shifts.
//!
//! Each coefficient (except `E`) is a ratio of integer factors. The ratio is
//! formed directly to decide whether it clears [`NEGLIGIBLE_RADICAND`]; the
//! returned value is then rebuilt from the logarithms of the factor
//! magnitudes so large degrees never overflow an intermediate product.

use crate::common::constants::NEGLIGIBLE_RADICAND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Power {
    Linear,
    SquareRoot,
}

fn guarded_ratio(numerator: &[f64], denominator: &[f64], power: Power) -> f64 {
    let radicand = numerator.iter().product::<f64>() / denominator.iter().product::<f64>();
    if !(radicand >= NEGLIGIBLE_RADICAND) {
        return 0.0;
    }

    let log_ratio = numerator.iter().map(|factor| factor.abs().ln()).sum::<f64>()
        - denominator
            .iter()
            .map(|factor| factor.abs().ln())
            .sum::<f64>();
    let ratio = log_ratio.exp();
    match power {
        Power::Linear => ratio,
        Power::SquareRoot => ratio.sqrt(),
    }
}

/// `+1` for non-negative orders, `-1` otherwise.
pub fn delta_m(m: i32) -> i32 {
    if m >= 0 { 1 } else { -1 }
}

/// `sqrt((l-|m|)(l+|m|+1))`, the `m`-raising amplitude.
pub fn e_lm(l: i32, m: i32) -> f64 {
    let (l, m_abs) = (f64::from(l), f64::from(m).abs());
    let product = (l - m_abs) * (l + m_abs + 1.0);
    if product < 0.0 { 0.0 } else { product.sqrt() }
}

/// `l - 2` step amplitude.
pub fn f_lm(l: i32, m: i32) -> f64 {
    let (l, m) = (f64::from(l), f64::from(m));
    guarded_ratio(
        &[l + m, l - m, l + m - 1.0, l - m - 1.0],
        &[2.0 * l + 1.0, 2.0 * l - 1.0, 2.0 * l - 1.0, 2.0 * l - 3.0],
        Power::SquareRoot,
    )
}

/// Diagonal `l`-lowering weight; enters as a first power.
pub fn g_lm(l: i32, m: i32) -> f64 {
    let (l, m) = (f64::from(l), f64::from(m));
    guarded_ratio(
        &[l + m, l - m],
        &[2.0 * l + 1.0, 2.0 * l - 1.0],
        Power::Linear,
    )
}

/// Diagonal `l`-raising weight; enters as a first power.
pub fn h_lm(l: i32, m: i32) -> f64 {
    let (l, m) = (f64::from(l), f64::from(m));
    guarded_ratio(
        &[l + m + 1.0, l - m + 1.0],
        &[2.0 * l + 1.0, 2.0 * l + 3.0],
        Power::Linear,
    )
}

/// `l + 2` step amplitude.
pub fn i_lm(l: i32, m: i32) -> f64 {
    let (l, m) = (f64::from(l), f64::from(m));
    guarded_ratio(
        &[l + m + 1.0, l - m + 1.0, l + m + 2.0, l - m + 2.0],
        &[2.0 * l + 1.0, 2.0 * l + 3.0, 2.0 * l + 3.0, 2.0 * l + 5.0],
        Power::SquareRoot,
    )
}

/// `l - 1` amplitude at the adjacent order `m + delta_m(m)`.
pub fn j_lm(l: i32, m: i32) -> f64 {
    let delta = f64::from(delta_m(m));
    let (l, m) = (f64::from(l), f64::from(m));
    guarded_ratio(
        &[l + m + delta, l - m - delta],
        &[2.0 * l + 1.0, 2.0 * l - 1.0],
        Power::SquareRoot,
    )
}

/// `l + 1` amplitude at the adjacent order `m + delta_m(m)`.
pub fn k_lm(l: i32, m: i32) -> f64 {
    let delta = f64::from(delta_m(m));
    let (l, m) = (f64::from(l), f64::from(m));
    guarded_ratio(
        &[l + m + delta + 1.0, l - m - delta + 1.0],
        &[2.0 * l + 1.0, 2.0 * l + 3.0],
        Power::SquareRoot,
    )
}

/// All ladder coefficients of one `(l, m)` state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderCoefficients {
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
    pub delta: i32,
}

impl LadderCoefficients {
    pub fn new(l: i32, m: i32) -> Self {
        Self {
            e: e_lm(l, m),
            f: f_lm(l, m),
            g: g_lm(l, m),
            h: h_lm(l, m),
            i: i_lm(l, m),
            j: j_lm(l, m),
            k: k_lm(l, m),
            delta: delta_m(m),
        }
    }
}
