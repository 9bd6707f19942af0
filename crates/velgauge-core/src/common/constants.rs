//! Numeric constants shared by the angular coupling kernels.
//!
//! Kernels import these instead of repeating literals so the guard thresholds
//! stay identical across the ladder and overlap evaluators.

pub const PI: f64 = 3.141_592_653_589_793_238_462_643_383_279_5_f64;
pub const FOUR_PI: f64 = 4.0 * PI;
pub const LN_2: f64 = 0.693_147_180_559_945_309_417_232_121_458_2_f64;
/// `ln(sqrt(pi)) = ln Γ(1/2)`.
pub const LN_SQRT_PI: f64 = 0.572_364_942_924_700_087_071_713_675_677_f64;

/// Radicands below this value are treated as an exact zero by the ladder
/// coefficients.
pub const NEGLIGIBLE_RADICAND: f64 = 1.0e-15;

/// Largest degree accepted by configuration and basis construction. Past it the
/// K2 cancellation costs more than about six digits of every coupling.
pub const MAX_SUPPORTED_LMAX: u32 = 32;

/// Largest degree the kernels evaluate; states above it are outside their
/// domain. Near l = 86 the K1 value `2 (2l)!` and the largest K2 summands pass
/// `f64::MAX`.
pub const MAX_KERNEL_DEGREE: i32 = 80;
