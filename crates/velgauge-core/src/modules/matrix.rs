//! Dense angular matrices of the velocity-gauge terms over a
//! spherical-harmonic basis.

use super::basis::{SphericalHarmonicBasis, selection_rule_pairs};
use super::traits::CouplingEvaluator;
use crate::domain::{AngularState, CouplingTerm, VelgaugeError, VelgaugeResult};
use faer::Mat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub type AngularMatrix = Mat<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixElement {
    pub row: usize,
    pub col: usize,
    pub left: AngularState,
    pub right: AngularState,
    pub value: f64,
}

fn validate_charge(charge: f64) -> VelgaugeResult<()> {
    if charge.is_finite() {
        Ok(())
    } else {
        Err(VelgaugeError::input_validation(
            "INPUT.CHARGE",
            format!("charge must be finite, got {charge}"),
        ))
    }
}

/// Evaluates `-charge * evaluate(left, right)` for every selection-rule pair,
/// in parallel. The returned elements keep the row-major pair order.
pub fn evaluate_matrix_elements<E>(
    basis: &SphericalHarmonicBasis,
    evaluator: &E,
    charge: f64,
) -> VelgaugeResult<Vec<MatrixElement>>
where
    E: CouplingEvaluator + Sync + ?Sized,
{
    validate_charge(charge)?;
    let pairs = selection_rule_pairs(basis);

    let span = tracing::debug_span!(
        "angular_matrix",
        term = %evaluator.term(),
        lmax = basis.lmax(),
        size = basis.size(),
        pairs = pairs.len()
    );
    let _guard = span.enter();

    let elements = pairs
        .par_iter()
        .map(|&(row, col)| {
            let left = basis.lm_index(row).ok_or_else(|| {
                VelgaugeError::internal("SYS.BASIS_INDEX", format!("row {row} outside basis"))
            })?;
            let right = basis.lm_index(col).ok_or_else(|| {
                VelgaugeError::internal("SYS.BASIS_INDEX", format!("column {col} outside basis"))
            })?;
            let value = -charge * evaluator.evaluate(left, right);
            if !value.is_finite() {
                return Err(VelgaugeError::computation(
                    "RUN.NON_FINITE",
                    format!("coupling between {left} and {right} is not finite"),
                ));
            }
            Ok(MatrixElement {
                row,
                col,
                left,
                right,
                value,
            })
        })
        .collect::<VelgaugeResult<Vec<_>>>()?;

    tracing::debug!(
        nonzero = elements.iter().filter(|element| element.value != 0.0).count(),
        "evaluated angular matrix elements"
    );
    Ok(elements)
}

/// Dense `(lmax+1)^2` square matrix; entries outside the selection rule are 0.
pub fn assemble_angular_matrix<E>(
    basis: &SphericalHarmonicBasis,
    evaluator: &E,
    charge: f64,
) -> VelgaugeResult<AngularMatrix>
where
    E: CouplingEvaluator + Sync + ?Sized,
{
    let elements = evaluate_matrix_elements(basis, evaluator, charge)?;
    let dimension = basis.size();
    let mut matrix = AngularMatrix::zeros(dimension, dimension);
    for element in elements {
        matrix[(element.row, element.col)] = element.value;
    }
    Ok(matrix)
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CouplingRow {
    pub l: i32,
    pub m: i32,
    pub lp: i32,
    pub mp: i32,
    pub value: f64,
}

/// Exportable nonzero elements of one angular matrix.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouplingTable {
    pub lmax: u32,
    pub term: CouplingTerm,
    pub charge: f64,
    pub rows: Vec<CouplingRow>,
}

impl CouplingTable {
    pub fn from_elements(
        basis: &SphericalHarmonicBasis,
        term: CouplingTerm,
        charge: f64,
        elements: &[MatrixElement],
    ) -> Self {
        let rows = elements
            .iter()
            .filter(|element| element.value != 0.0)
            .map(|element| CouplingRow {
                l: element.left.l,
                m: element.left.m,
                lp: element.right.l,
                mp: element.right.m,
                value: element.value,
            })
            .collect();
        Self {
            lmax: basis.lmax(),
            term,
            charge,
            rows,
        }
    }

    pub fn value(&self, left: AngularState, right: AngularState) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.l == left.l && row.m == left.m && row.lp == right.l && row.mp == right.m)
            .map(|row| row.value)
    }
}

pub fn build_coupling_table<E>(
    basis: &SphericalHarmonicBasis,
    evaluator: &E,
    charge: f64,
) -> VelgaugeResult<CouplingTable>
where
    E: CouplingEvaluator + Sync + ?Sized,
{
    let elements = evaluate_matrix_elements(basis, evaluator, charge)?;
    Ok(CouplingTable::from_elements(
        basis,
        evaluator.term(),
        charge,
        &elements,
    ))
}
