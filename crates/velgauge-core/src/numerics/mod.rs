pub mod special;

pub use special::{
    ClebschGordanProvider, LadderCoefficients, PolarSumReport, TermList, WignerClebschGordan,
    legendre_norm, legendre_norm_double, parity_overlap, polar_overlap, polar_overlap_reference,
    polar_overlap_terms, polar_sum_report,
};

use serde::{Deserialize, Serialize};

/// Acceptance band for comparing a computed value against a reference.
///
/// A value passes when it is within `abs_tol` of the reference, or within
/// `rel_tol` of `max(|reference|, relative_floor)`. For cancelling sums the
/// floor is raised to the largest summand, since the value itself is then a
/// poor scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NumericTolerance {
    #[serde(rename = "absTol")]
    pub abs_tol: f64,
    #[serde(rename = "relTol")]
    pub rel_tol: f64,
    #[serde(rename = "relativeFloor")]
    pub relative_floor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

impl NumericTolerance {
    /// Relative band with unit floor, so values below one are compared
    /// absolutely.
    pub fn relative(rel_tol: f64) -> Self {
        Self {
            abs_tol: 0.0,
            rel_tol,
            relative_floor: 1.0,
        }
    }

    pub fn with_relative_floor(self, relative_floor: f64) -> Self {
        Self {
            relative_floor,
            ..self
        }
    }

    pub fn compare(&self, reference: f64, actual: f64) -> ToleranceComparison {
        let abs_diff = (actual - reference).abs();
        let scale = reference.abs().max(self.relative_floor);
        let rel_diff = abs_diff / scale;
        ToleranceComparison {
            abs_diff,
            rel_diff,
            passes: abs_diff <= self.abs_tol || abs_diff <= self.rel_tol * scale,
        }
    }
}

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    *correction = (next - *sum) - corrected;
    *sum = next;
}

/// Kahan-compensated sum in input order.
pub fn stable_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut correction = 0.0;

    for &value in values {
        kahan_add(&mut sum, &mut correction, value);
    }

    sum
}

/// Indices ordered by ascending magnitude; equal magnitudes keep input order.
pub fn magnitude_argsort(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_unstable_by(|lhs, rhs| {
        values[*lhs]
            .abs()
            .total_cmp(&values[*rhs].abs())
            .then_with(|| lhs.cmp(rhs))
    });
    indices
}

/// Plain left-to-right sum after ordering by ascending magnitude.
pub fn magnitude_ordered_sum(values: &[f64]) -> f64 {
    magnitude_argsort(values)
        .into_iter()
        .fold(0.0, |sum, index| sum + values[index])
}
