use super::gamma::ln_factorial;
use crate::common::constants::MAX_KERNEL_DEGREE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wigner3jInput {
    pub two_j1: i32,
    pub two_j2: i32,
    pub two_j3: i32,
    pub two_m1: i32,
    pub two_m2: i32,
    pub two_m3: i32,
}

impl Wigner3jInput {
    pub fn new(
        two_j1: i32,
        two_j2: i32,
        two_j3: i32,
        two_m1: i32,
        two_m2: i32,
        two_m3: i32,
    ) -> Self {
        Self {
            two_j1,
            two_j2,
            two_j3,
            two_m1,
            two_m2,
            two_m3,
        }
    }

    fn is_allowed(&self) -> bool {
        // Widened so out-of-range input cannot overflow the checks themselves.
        let [two_j1, two_j2, two_j3, two_m1, two_m2, two_m3] = [
            self.two_j1,
            self.two_j2,
            self.two_j3,
            self.two_m1,
            self.two_m2,
            self.two_m3,
        ]
        .map(i64::from);
        let limit = 2 * i64::from(MAX_KERNEL_DEGREE);

        [two_j1, two_j2, two_j3]
            .iter()
            .all(|two_j| (0..=limit).contains(two_j))
            && two_m1 + two_m2 + two_m3 == 0
            && two_m1.abs() <= two_j1
            && two_m2.abs() <= two_j2
            && two_m3.abs() <= two_j3
            && (two_j1 - two_m1).rem_euclid(2) == 0
            && (two_j2 - two_m2).rem_euclid(2) == 0
            && (two_j3 - two_m3).rem_euclid(2) == 0
            && (two_j1 + two_j2 + two_j3).rem_euclid(2) == 0
            && two_j3 <= two_j1 + two_j2
            && two_j1 <= two_j2 + two_j3
            && two_j2 <= two_j1 + two_j3
    }
}

/// Computes the Wigner 3j symbol from doubled quantum numbers.
///
/// All `two_*` values represent `2*j` or `2*m` (e.g., `two_j=3` means `j=3/2`).
/// The Racah sum is evaluated term by term in log space; selection-rule
/// violations return 0.
pub fn wigner_3j(input: Wigner3jInput) -> f64 {
    if !input.is_allowed() {
        return 0.0;
    }

    let Wigner3jInput {
        two_j1,
        two_j2,
        two_j3,
        two_m1,
        two_m2,
        two_m3,
    } = input;

    // Every combination below is even once the selection rules hold.
    let half = |doubled: i32| doubled / 2;
    let triangle = [
        half(two_j1 + two_j2 - two_j3),
        half(two_j1 - two_j2 + two_j3),
        half(-two_j1 + two_j2 + two_j3),
    ];
    let projections = [
        half(two_j1 + two_m1),
        half(two_j1 - two_m1),
        half(two_j2 + two_m2),
        half(two_j2 - two_m2),
        half(two_j3 + two_m3),
        half(two_j3 - two_m3),
    ];

    let mut prefactor_log = -ln_factorial(half(two_j1 + two_j2 + two_j3) + 1);
    for value in triangle.iter().chain(projections.iter()) {
        prefactor_log += ln_factorial(*value);
    }
    prefactor_log *= 0.5;

    // Racah sum limits: k!, (j3-j2+m1+k)!, (j3-j1-m2+k)!, (j1+j2-j3-k)!, (j1-m1-k)!, (j2+m2-k)!
    let shift_a = half(two_j3 - two_j2 + two_m1);
    let shift_b = half(two_j3 - two_j1 - two_m2);
    let k_min = 0.max(-shift_a).max(-shift_b);
    let k_max = triangle[0].min(projections[1]).min(projections[2]);
    if k_min > k_max {
        return 0.0;
    }

    let mut result = 0.0;
    for k in k_min..=k_max {
        let denominator_log = ln_factorial(k)
            + ln_factorial(shift_a + k)
            + ln_factorial(shift_b + k)
            + ln_factorial(triangle[0] - k)
            + ln_factorial(projections[1] - k)
            + ln_factorial(projections[2] - k);
        let sign = if k.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
        result += sign * (prefactor_log - denominator_log).exp();
    }

    if half(two_j1 - two_j2 - two_m3).rem_euclid(2) != 0 {
        result = -result;
    }

    result
}

/// Source of Clebsch–Gordan coefficients `<j1 m1 j2 m2 | J M>` for integer
/// angular momenta.
///
/// Implementations return 0 for any argument outside the triangle and
/// projection selection rules.
pub trait ClebschGordanProvider {
    fn compute(&self, j1: i32, j2: i32, m1: i32, m2: i32, j: i32, m: i32) -> f64;
}

/// Clebsch–Gordan coefficients from the 3j symbol,
/// `<j1 m1 j2 m2 | J M> = (-1)^(j1-j2+M) sqrt(2J+1) (j1 j2 J; m1 m2 -M)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WignerClebschGordan;

impl ClebschGordanProvider for WignerClebschGordan {
    fn compute(&self, j1: i32, j2: i32, m1: i32, m2: i32, j: i32, m: i32) -> f64 {
        let in_range = |degree: i32, order: i32| {
            (0..=MAX_KERNEL_DEGREE).contains(&degree)
                && order.unsigned_abs() <= degree.unsigned_abs()
        };
        if !in_range(j1, m1) || !in_range(j2, m2) || !in_range(j, m) || m1 + m2 != m {
            return 0.0;
        }

        let symbol = wigner_3j(Wigner3jInput::new(
            2 * j1,
            2 * j2,
            2 * j,
            2 * m1,
            2 * m2,
            -2 * m,
        ));
        if symbol == 0.0 {
            return 0.0;
        }

        let sign = if (j1 - j2 + m).rem_euclid(2) == 0 {
            1.0
        } else {
            -1.0
        };
        sign * f64::from(2 * j + 1).sqrt() * symbol
    }
}

impl<P: ClebschGordanProvider + ?Sized> ClebschGordanProvider for &P {
    fn compute(&self, j1: i32, j2: i32, m1: i32, m2: i32, j: i32, m: i32) -> f64 {
        (**self).compute(j1, j2, m1, m2, j, m)
    }
}
