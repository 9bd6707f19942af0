pub mod gamma;
pub mod ladder;
pub mod legendre;
pub mod overlap;
pub mod wigner;

pub use gamma::{ln_factorial, ln_gamma_half, ln_gamma_int};
pub use ladder::{
    LadderCoefficients, delta_m, e_lm, f_lm, g_lm, h_lm, i_lm, j_lm, k_lm,
};
pub use legendre::{is_kernel_state, is_valid_state, legendre_norm, legendre_norm_double};
pub use overlap::{
    PolarSumReport, TermList, legendre_series_coefficient, parity_overlap, polar_overlap,
    polar_overlap_reference, polar_overlap_terms, polar_sum_report,
};
pub use wigner::{ClebschGordanProvider, Wigner3jInput, WignerClebschGordan, wigner_3j};
