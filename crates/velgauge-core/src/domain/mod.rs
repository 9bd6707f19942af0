pub mod errors;

pub use errors::{VelgaugeError, VelgaugeErrorCategory, VelgaugeResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A spherical-harmonic quantum-number pair. Any integers are representable;
/// kernels treat states outside `l >= 0, |m| <= l` as zero contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AngularState {
    pub l: i32,
    pub m: i32,
}

impl AngularState {
    pub const fn new(l: i32, m: i32) -> Self {
        Self { l, m }
    }

    pub const fn is_valid(self) -> bool {
        self.l >= 0 && self.m.unsigned_abs() <= self.l.unsigned_abs()
    }
}

impl Display for AngularState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.l, self.m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasisPair {
    pub left: AngularState,
    pub right: AngularState,
}

impl BasisPair {
    pub const fn new(left: AngularState, right: AngularState) -> Self {
        Self { left, right }
    }

    /// Dipole selection rule shared by both velocity-gauge terms.
    pub const fn satisfies_selection_rule(&self) -> bool {
        let dl = self.left.l as i64 - self.right.l as i64;
        let dm = self.left.m as i64 - self.right.m as i64;
        dl.abs() == 1 && dm.abs() == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingTerm {
    /// `1/r` angular part of the velocity-gauge operator.
    #[default]
    Body,
    /// `sin(theta) sin(phi)` factor paired with a radial derivative.
    DerivativeR,
}

impl CouplingTerm {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::DerivativeR => "derivative_r",
        }
    }
}

impl Display for CouplingTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
