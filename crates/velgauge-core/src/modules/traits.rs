use crate::domain::{AngularState, CouplingTerm};
use crate::modules::velocity::VelocityCouplingAssembler;
use crate::numerics::special::{ClebschGordanProvider, WignerClebschGordan};

/// Angular factor of one velocity-gauge term between a bra (`left`) and a
/// ket (`right`) basis state.
pub trait CouplingEvaluator {
    fn term(&self) -> CouplingTerm;

    fn evaluate(&self, left: AngularState, right: AngularState) -> f64;
}

/// The `1/r` term. The assembler is called with the ket state first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyVelocityTerm<P = WignerClebschGordan> {
    assembler: VelocityCouplingAssembler<P>,
}

impl<P: ClebschGordanProvider> BodyVelocityTerm<P> {
    pub fn new(provider: P) -> Self {
        Self {
            assembler: VelocityCouplingAssembler::new(provider),
        }
    }
}

impl<P: ClebschGordanProvider> CouplingEvaluator for BodyVelocityTerm<P> {
    fn term(&self) -> CouplingTerm {
        CouplingTerm::Body
    }

    fn evaluate(&self, left: AngularState, right: AngularState) -> f64 {
        self.assembler.coupling(right.l, right.m, left.l, left.m)
    }
}

/// The radial-derivative term.
#[derive(Debug, Clone, Copy, Default)]
pub struct DerivativeRTerm<P = WignerClebschGordan> {
    assembler: VelocityCouplingAssembler<P>,
}

impl<P: ClebschGordanProvider> DerivativeRTerm<P> {
    pub fn new(provider: P) -> Self {
        Self {
            assembler: VelocityCouplingAssembler::new(provider),
        }
    }
}

impl<P: ClebschGordanProvider> CouplingEvaluator for DerivativeRTerm<P> {
    fn term(&self) -> CouplingTerm {
        CouplingTerm::DerivativeR
    }

    fn evaluate(&self, left: AngularState, right: AngularState) -> f64 {
        self.assembler
            .derivative_r_coupling(left.l, left.m, right.l, right.m)
    }
}

impl<T: CouplingEvaluator + ?Sized> CouplingEvaluator for &T {
    fn term(&self) -> CouplingTerm {
        (**self).term()
    }

    fn evaluate(&self, left: AngularState, right: AngularState) -> f64 {
        (**self).evaluate(left, right)
    }
}

/// Default-provider evaluator for `term`.
pub fn evaluator_for_term(term: CouplingTerm) -> Box<dyn CouplingEvaluator + Send + Sync> {
    match term {
        CouplingTerm::Body => Box::new(BodyVelocityTerm::<WignerClebschGordan>::default()),
        CouplingTerm::DerivativeR => Box::new(DerivativeRTerm::<WignerClebschGordan>::default()),
    }
}
