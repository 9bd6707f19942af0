use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_velgauge(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_velgauge");
    Command::new(binary_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("velgauge binary should run")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn read_json(path: &Path) -> Value {
    let source = fs::read_to_string(path).expect("output should be readable");
    serde_json::from_str(&source).expect("output should be valid JSON")
}

#[test]
fn coupling_command_prints_reference_value() {
    let output = run_velgauge(&["coupling", "--l", "1", "--m", "0", "--lp", "2", "--mp", "-1"]);
    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        stderr_of(&output)
    );

    let value: f64 = stdout_of(&output)
        .trim()
        .parse()
        .expect("stdout should be a number");
    assert!((value + (2.0_f64 / 5.0).sqrt()).abs() < 1.0e-9, "value={value}");
}

#[test]
fn coupling_command_json_includes_partial_integrals() {
    let output = run_velgauge(&[
        "coupling", "--l", "2", "--m", "1", "--lp", "1", "--mp", "0", "--json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let record: Value = serde_json::from_str(&stdout_of(&output)).expect("stdout should be JSON");
    assert_eq!(record["term"], "body");
    assert_eq!(record["lp"], 1);
    let partials = &record["partials"];
    let total = -partials["i1"].as_f64().expect("i1")
        + partials["i2"].as_f64().expect("i2")
        + partials["i3"].as_f64().expect("i3");
    let value = record["value"].as_f64().expect("value");
    assert!((total - value).abs() < 1.0e-15);
    assert!((value + 0.632_455_532_033_676).abs() < 1.0e-9);
}

#[test]
fn coupling_command_traces_partial_integrals_at_trace_verbosity() {
    let output = run_velgauge(&["-vv", "coupling", "--l", "1", "--m", "0", "--lp", "2", "--mp", "1"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("velocity coupling partial integrals"),
        "stderr: {stderr}"
    );

    let quiet = run_velgauge(&["coupling", "--l", "1", "--m", "0", "--lp", "2", "--mp", "1"]);
    assert!(!stderr_of(&quiet).contains("velocity coupling partial integrals"));
}

#[test]
fn coupling_command_treats_extreme_integers_as_zero() {
    let output = run_velgauge(&[
        "coupling",
        "--l",
        "-2147483648",
        "--m",
        "0",
        "--lp",
        "1",
        "--mp",
        "2147483647",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let value: f64 = stdout_of(&output)
        .trim()
        .parse()
        .expect("stdout should be a number");
    assert_eq!(value, 0.0);
}

#[test]
fn coupling_command_evaluates_derivative_term() {
    let output = run_velgauge(&[
        "coupling",
        "--l",
        "1",
        "--m",
        "0",
        "--lp",
        "2",
        "--mp",
        "1",
        "--term",
        "derivative-r",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let value: f64 = stdout_of(&output)
        .trim()
        .parse()
        .expect("stdout should be a number");
    assert!((value + 1.0 / 10.0_f64.sqrt()).abs() < 1.0e-12, "value={value}");
}

#[test]
fn matrix_command_writes_coupling_table() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_path = temp.path().join("out/table.json");

    let output = run_velgauge(&[
        "matrix",
        "--lmax",
        "2",
        "--output",
        output_path.to_str().expect("utf-8 path"),
    ]);
    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        stderr_of(&output)
    );
    assert!(stdout_of(&output).contains("Wrote 16 body couplings"));

    let table = read_json(&output_path);
    assert_eq!(table["lmax"], 2);
    assert_eq!(table["term"], "body");
    assert_eq!(table["charge"], -1.0);
    let rows = table["rows"].as_array().expect("rows should be an array");
    assert_eq!(rows.len(), 16);
    for row in rows {
        let dl = row["l"].as_i64().expect("l") - row["lp"].as_i64().expect("lp");
        let dm = row["m"].as_i64().expect("m") - row["mp"].as_i64().expect("mp");
        assert_eq!(dl.abs(), 1);
        assert_eq!(dm.abs(), 1);
    }
}

#[test]
fn matrix_command_applies_flag_overrides_to_config() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("coupling.json");
    let output_path = temp.path().join("table.json");
    write_file(
        &config_path,
        r#"{ "lmax": 1, "term": "body", "charge": 2.0 }"#,
    );

    let output = run_velgauge(&[
        "matrix",
        "--config",
        config_path.to_str().expect("utf-8 path"),
        "--term",
        "derivative-r",
        "--output",
        output_path.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let table = read_json(&output_path);
    assert_eq!(table["lmax"], 1);
    assert_eq!(table["term"], "derivative_r");
    assert_eq!(table["charge"], 2.0);
    assert_eq!(table["rows"].as_array().expect("rows").len(), 4);
}

#[test]
fn matrix_command_without_basis_size_is_usage_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_path = temp.path().join("table.json");

    let output = run_velgauge(&[
        "matrix",
        "--output",
        output_path.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("ERROR: [INPUT.CLI_USAGE]"), "stderr: {stderr}");
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
    assert!(!output_path.exists());
}

#[test]
fn matrix_command_rejects_oversized_config() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("coupling.json");
    write_file(&config_path, r#"{ "lmax": 500 }"#);

    let output = run_velgauge(&[
        "matrix",
        "--config",
        config_path.to_str().expect("utf-8 path"),
        "--output",
        temp.path().join("table.json").to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("ERROR: [INPUT.CONFIG_INVALID]"));
}

#[test]
fn matrix_command_rejects_lmax_past_supported_maximum() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output_path = temp.path().join("table.json");

    let output = run_velgauge(&[
        "matrix",
        "--lmax",
        "33",
        "--output",
        output_path.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("ERROR: [INPUT.CONFIG_INVALID]"), "stderr: {stderr}");
    assert!(stderr.contains("supported maximum 32"), "stderr: {stderr}");
    assert!(!output_path.exists());
}

#[test]
fn matrix_command_reports_missing_config_as_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_velgauge(&[
        "matrix",
        "--config",
        temp.path().join("absent.json").to_str().expect("utf-8 path"),
        "--output",
        temp.path().join("table.json").to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).contains("ERROR: [IO.CONFIG_READ]"));
}

#[test]
fn kernel_command_reports_summation_diagnostics() {
    let output = run_velgauge(&["kernel", "--l", "20", "--m", "1", "--p", "19", "--q", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let record: Value = serde_json::from_str(&stdout_of(&output)).expect("stdout should be JSON");
    let report = &record["polarOverlap"];
    assert_eq!(report["termCount"], 90);
    let sorted = report["magnitudeOrderedSum"].as_f64().expect("sorted sum");
    assert!((sorted + 189.479_545_643_491_3).abs() <= 1.0e-12 * 3.7e6);
    assert_eq!(record["parityOverlap"], 0.0);
}

#[test]
fn kernel_command_reports_parity_overlap() {
    let output = run_velgauge(&["kernel", "--l", "3", "--m", "2", "--p", "2", "--q", "1"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let record: Value = serde_json::from_str(&stdout_of(&output)).expect("stdout should be JSON");
    let k1 = record["parityOverlap"].as_f64().expect("parity overlap");
    assert!((k1 - 12.0).abs() < 1.0e-12);
    assert_eq!(record["polarOverlap"]["termCount"], 1);
}

#[test]
fn unknown_command_exits_with_usage_code() {
    let output = run_velgauge(&["transmogrify"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("ERROR: [INPUT.CLI_USAGE]"));
}
