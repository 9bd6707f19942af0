use crate::common::constants::MAX_SUPPORTED_LMAX;
use crate::domain::{AngularState, BasisPair, VelgaugeError, VelgaugeResult};

/// Spherical-harmonic basis `{Y_lm : 0 <= l <= lmax}` stored at
/// index `l^2 + l + m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphericalHarmonicBasis {
    lmax: u32,
}

impl SphericalHarmonicBasis {
    pub fn new(lmax: u32) -> VelgaugeResult<Self> {
        if lmax > MAX_SUPPORTED_LMAX {
            return Err(VelgaugeError::input_validation(
                "INPUT.LMAX",
                format!("lmax {lmax} exceeds the supported maximum {MAX_SUPPORTED_LMAX}"),
            ));
        }
        Ok(Self { lmax })
    }

    pub fn lmax(&self) -> u32 {
        self.lmax
    }

    pub fn size(&self) -> usize {
        (self.lmax as usize + 1).pow(2)
    }

    pub fn linear_index(&self, state: AngularState) -> Option<usize> {
        if !state.is_valid() || state.l as u32 > self.lmax {
            return None;
        }
        let index = state.l * state.l + state.l + state.m;
        Some(index as usize)
    }

    pub fn lm_index(&self, index: usize) -> Option<AngularState> {
        if index >= self.size() {
            return None;
        }
        let l = index.isqrt();
        let m = index as i64 - (l * l + l) as i64;
        Some(AngularState::new(l as i32, m as i32))
    }

    pub fn states(&self) -> impl Iterator<Item = AngularState> + '_ {
        (0..self.size()).filter_map(|index| self.lm_index(index))
    }
}

/// Index pairs `(left, right)` obeying `|l - l'| = 1` and `|m - m'| = 1`,
/// row-major.
pub fn selection_rule_pairs(basis: &SphericalHarmonicBasis) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (left_index, left) in basis.states().enumerate() {
        // Candidates in ascending linear index: l-1 before l+1, m-1 before m+1.
        for dl in [-1, 1] {
            for dm in [-1, 1] {
                let right = AngularState::new(left.l + dl, left.m + dm);
                debug_assert!(BasisPair::new(left, right).satisfies_selection_rule());
                if let Some(right_index) = basis.linear_index(right) {
                    pairs.push((left_index, right_index));
                }
            }
        }
    }
    pairs
}
