use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use velgauge_core::common::constants::MAX_SUPPORTED_LMAX;
use velgauge_core::common::load_coupling_config;
use velgauge_core::domain::{AngularState, CouplingTerm};
use velgauge_core::modules::{
    SphericalHarmonicBasis, assemble_angular_matrix, build_coupling_table, evaluator_for_term,
};
use velgauge_core::numerics::NumericTolerance;
use velgauge_core::{coupling, derivative_r_coupling};

fn workspace_root() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CouplingFixtures {
    body_cases: Vec<CouplingCase>,
    derivative_r_cases: Vec<CouplingCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CouplingCase {
    id: String,
    l: i32,
    m: i32,
    lp: i32,
    mp: i32,
    expected: f64,
    rel_tol: f64,
}

fn load_fixtures() -> CouplingFixtures {
    let fixture_path = workspace_root().join("tasks/velocity-coupling-reference-fixtures.json");
    let source = fs::read_to_string(&fixture_path).unwrap_or_else(|error| {
        panic!(
            "fixture file {} should be readable: {}",
            fixture_path.display(),
            error
        )
    });

    serde_json::from_str(&source).unwrap_or_else(|error| {
        panic!(
            "fixture file {} should parse as JSON: {}",
            fixture_path.display(),
            error
        )
    })
}

fn assert_scalar_close(label: &str, expected: f64, actual: f64, rel_tol: f64) {
    let comparison = NumericTolerance::relative(rel_tol).compare(expected, actual);

    assert!(
        comparison.passes,
        "{} expected={:.15e} actual={:.15e} abs_diff={:.15e} rel_diff={:.15e} rel_tol={:.15e}",
        label,
        expected,
        actual,
        comparison.abs_diff,
        comparison.rel_diff,
        rel_tol
    );
}

#[test]
fn body_couplings_match_reference_outputs() {
    let fixtures = load_fixtures();
    let cap = MAX_SUPPORTED_LMAX as i32;
    assert!(
        fixtures
            .body_cases
            .iter()
            .any(|case| case.l.max(case.lp) == cap),
        "fixtures should cover the largest supported degree"
    );
    for case in fixtures.body_cases {
        let actual = coupling(case.l, case.m, case.lp, case.mp);
        let repeated = coupling(case.l, case.m, case.lp, case.mp);
        assert_eq!(
            actual.to_bits(),
            repeated.to_bits(),
            "{} should be deterministic for fixed inputs",
            case.id
        );
        assert_scalar_close(&case.id, case.expected, actual, case.rel_tol);
    }
}

#[test]
fn derivative_r_couplings_match_reference_outputs() {
    let fixtures = load_fixtures();
    for case in fixtures.derivative_r_cases {
        let actual = derivative_r_coupling(case.l, case.m, case.lp, case.mp);
        assert_scalar_close(&case.id, case.expected, actual, case.rel_tol);
    }
}

#[test]
fn config_driven_matrix_matches_direct_couplings() {
    let temp = tempfile::TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("coupling.json");
    fs::write(&config_path, r#"{ "lmax": 5, "term": "body", "charge": -1.0 }"#)
        .expect("config should be written");

    let config = load_coupling_config(&config_path).expect("config should load");
    let basis = SphericalHarmonicBasis::new(config.lmax).expect("basis should build");
    let evaluator = evaluator_for_term(config.term);
    let matrix = assemble_angular_matrix(&basis, evaluator.as_ref(), config.charge)
        .expect("matrix should assemble");

    let left = AngularState::new(2, 1);
    let right = AngularState::new(1, 0);
    let row = basis.linear_index(left).expect("left in basis");
    let col = basis.linear_index(right).expect("right in basis");
    assert_eq!(matrix[(row, col)].to_bits(), coupling(1, 0, 2, 1).to_bits());

    let table = build_coupling_table(&basis, evaluator.as_ref(), config.charge)
        .expect("table should build");
    assert_eq!(table.term, CouplingTerm::Body);
    assert_eq!(table.value(left, right), Some(matrix[(row, col)]));
    let nonzero = (0..basis.size())
        .flat_map(|r| (0..basis.size()).map(move |c| (r, c)))
        .filter(|&(r, c)| matrix[(r, c)] != 0.0)
        .count();
    assert_eq!(table.rows.len(), nonzero);
}
