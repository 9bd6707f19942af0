pub mod basis;
pub mod matrix;
pub mod traits;
pub mod velocity;

pub use basis::{SphericalHarmonicBasis, selection_rule_pairs};
pub use matrix::{
    AngularMatrix, CouplingRow, CouplingTable, MatrixElement, assemble_angular_matrix,
    build_coupling_table, evaluate_matrix_elements,
};
pub use traits::{BodyVelocityTerm, CouplingEvaluator, DerivativeRTerm, evaluator_for_term};
pub use velocity::{
    PartialIntegrals, VelocityCouplingAssembler, coupling, derivative_r_coupling,
};
