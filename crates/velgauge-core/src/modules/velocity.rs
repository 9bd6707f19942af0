//! Angular coupling of the linearly polarized velocity-gauge operator,
//!
//! `<Y_lm| (1/r) [cos(phi)/sin(theta) d/dphi + sin(phi) cos(theta) d/dtheta
//!     - cos(phi) sin(theta)] |Y_l'm'>`,
//!
//! split into three partial integrals and combined as `-I1 + I2 + I3`.

use crate::common::constants::{MAX_KERNEL_DEGREE, PI};
use crate::numerics::special::{
    ClebschGordanProvider, LadderCoefficients, WignerClebschGordan, is_valid_state,
    legendre_norm_double, parity_overlap, polar_overlap,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PartialIntegrals {
    pub i1: f64,
    pub i2: f64,
    pub i3: f64,
}

impl PartialIntegrals {
    pub fn total(&self) -> f64 {
        -self.i1 + self.i2 + self.i3
    }
}

/// The assembler shifts degrees by up to two, so it stops short of the
/// kernel limit.
const MAX_COUPLING_DEGREE: i32 = MAX_KERNEL_DEGREE - 2;

fn is_coupling_state(l: i32, m: i32) -> bool {
    is_valid_state(l, m) && l <= MAX_COUPLING_DEGREE
}

fn kronecker(lhs: i32, rhs: i32) -> f64 {
    if lhs == rhs { 1.0 } else { 0.0 }
}

/// Evaluates couplings against an injected Clebsch–Gordan source.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityCouplingAssembler<P = WignerClebschGordan> {
    provider: P,
}

impl<P: ClebschGordanProvider> VelocityCouplingAssembler<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `sqrt((2l+1) / (2(2l'+1))) <l 0 1 0|l' 0> (<l m 1 -1|l' m'> + <l m 1 1|l' m'>)`.
    pub fn first_integral(&self, l: i32, m: i32, lp: i32, mp: i32) -> f64 {
        if !is_coupling_state(l, m) || !is_coupling_state(lp, mp) {
            return 0.0;
        }

        let axial = self.provider.compute(l, 1, 0, 0, lp, 0);
        if axial == 0.0 {
            return 0.0;
        }

        let weight = (0.5 * f64::from(2 * l + 1) / f64::from(2 * lp + 1)).sqrt();
        let transverse =
            self.provider.compute(l, 1, m, -1, lp, mp) + self.provider.compute(l, 1, m, 1, lp, mp);
        weight * axial * transverse
    }

    /// All three integrals are exactly 0 unless both states are valid and
    /// inside the evaluated degree range.
    pub fn partial_integrals(&self, l: i32, m: i32, lp: i32, mp: i32) -> PartialIntegrals {
        if !is_coupling_state(l, m) || !is_coupling_state(lp, mp) {
            return PartialIntegrals::default();
        }

        let i1 = self.first_integral(l, m, lp, mp);

        let raised = kronecker(mp, m + 1);
        let lowered = kronecker(mp, m - 1);
        let (m_abs, mp_abs) = (m.abs(), mp.abs());
        let diagonal_norm = legendre_norm_double(l, m, lp, mp);
        let diagonal_overlap = parity_overlap(lp, mp_abs, l, m_abs);

        let i2 = PI * f64::from(m) * diagonal_norm * (raised + lowered) * diagonal_overlap;

        let ladder = LadderCoefficients::new(l, m);
        let scale = PI * (lowered - raised);

        let degree_ladder = legendre_norm_double(l - 2, m, lp, mp)
            * ladder.f
            * parity_overlap(lp, mp_abs, l - 2, m_abs)
            + diagonal_norm * (ladder.g + ladder.h) * diagonal_overlap
            + legendre_norm_double(l + 2, m, lp, mp)
                * ladder.i
                * parity_overlap(lp, mp_abs, l + 2, m_abs);

        let shifted = m + ladder.delta;
        let order_ladder = legendre_norm_double(l - 1, shifted, lp, mp)
            * ladder.j
            * polar_overlap(l - 1, shifted.abs(), lp, mp_abs)
            + legendre_norm_double(l + 1, shifted, lp, mp)
                * ladder.k
                * polar_overlap(l + 1, shifted.abs(), lp, mp_abs);

        let i3 = f64::from(m_abs) * (degree_ladder * scale)
            + f64::from(ladder.delta) * ladder.e * (order_ladder * scale);

        tracing::trace!(l, m, lp, mp, i1, i2, i3, "velocity coupling partial integrals");
        PartialIntegrals { i1, i2, i3 }
    }

    pub fn coupling(&self, l: i32, m: i32, lp: i32, mp: i32) -> f64 {
        self.partial_integrals(l, m, lp, mp).total()
    }

    /// Angular factor `<Y_lm| sin(theta) sin(phi) |Y_l'm'>` of the term carrying
    /// the radial derivative.
    pub fn derivative_r_coupling(&self, l: i32, m: i32, lp: i32, mp: i32) -> f64 {
        if !is_coupling_state(l, m) || !is_coupling_state(lp, mp) {
            return 0.0;
        }
        self.first_integral(lp, mp, l, m)
    }
}

/// `coupling(l, m, l', m')` with the 3j-based Clebsch–Gordan provider.
pub fn coupling(l: i32, m: i32, lp: i32, mp: i32) -> f64 {
    VelocityCouplingAssembler::<WignerClebschGordan>::default().coupling(l, m, lp, mp)
}

pub fn derivative_r_coupling(l: i32, m: i32, lp: i32, mp: i32) -> f64 {
    VelocityCouplingAssembler::<WignerClebschGordan>::default().derivative_r_coupling(l, m, lp, mp)
}
