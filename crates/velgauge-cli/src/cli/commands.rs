use super::CliError;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use velgauge_core::common::{CouplingConfig, CouplingConfigOverrides, load_coupling_config};
use velgauge_core::domain::{CouplingTerm, VelgaugeError};
use velgauge_core::modules::{
    PartialIntegrals, SphericalHarmonicBasis, VelocityCouplingAssembler, build_coupling_table,
    evaluator_for_term,
};
use velgauge_core::numerics::{PolarSumReport, parity_overlap, polar_sum_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum TermArg {
    Body,
    #[value(name = "derivative-r", alias = "derivative_r")]
    DerivativeR,
}

impl From<TermArg> for CouplingTerm {
    fn from(term: TermArg) -> Self {
        match term {
            TermArg::Body => CouplingTerm::Body,
            TermArg::DerivativeR => CouplingTerm::DerivativeR,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct CouplingArgs {
    /// Bra degree
    #[arg(long, allow_negative_numbers = true)]
    l: i32,

    /// Bra order
    #[arg(long, allow_negative_numbers = true)]
    m: i32,

    /// Ket degree
    #[arg(long, allow_negative_numbers = true)]
    lp: i32,

    /// Ket order
    #[arg(long, allow_negative_numbers = true)]
    mp: i32,

    /// Operator term to evaluate
    #[arg(long, value_enum, default_value_t = TermArg::Body)]
    term: TermArg,

    /// Print a JSON record including the partial integrals
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct MatrixArgs {
    /// JSON coupling config (lmax, term, charge)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Largest degree of the basis; overrides the config
    #[arg(long)]
    lmax: Option<u32>,

    /// Operator term; overrides the config
    #[arg(long, value_enum)]
    term: Option<TermArg>,

    /// Signed particle charge; overrides the config
    #[arg(long, allow_negative_numbers = true)]
    charge: Option<f64>,

    /// Output JSON path
    #[arg(long)]
    output: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct KernelArgs {
    #[arg(long, allow_negative_numbers = true)]
    l: i32,

    #[arg(long, allow_negative_numbers = true)]
    m: i32,

    #[arg(long, allow_negative_numbers = true)]
    p: i32,

    #[arg(long, allow_negative_numbers = true)]
    q: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CouplingRecord {
    l: i32,
    m: i32,
    lp: i32,
    mp: i32,
    term: CouplingTerm,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    partials: Option<PartialIntegrals>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KernelRecord {
    parity_overlap: f64,
    polar_overlap: PolarSumReport,
}

pub(super) fn run_coupling_command(args: CouplingArgs) -> Result<i32, CliError> {
    let term = CouplingTerm::from(args.term);
    let assembler: VelocityCouplingAssembler = VelocityCouplingAssembler::default();
    let (value, partials) = match term {
        CouplingTerm::Body => {
            let partials = assembler.partial_integrals(args.l, args.m, args.lp, args.mp);
            (partials.total(), Some(partials))
        }
        CouplingTerm::DerivativeR => (
            assembler.derivative_r_coupling(args.l, args.m, args.lp, args.mp),
            None,
        ),
    };

    if args.json {
        let record = CouplingRecord {
            l: args.l,
            m: args.m,
            lp: args.lp,
            mp: args.mp,
            term,
            value,
            partials,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&record).context("failed to encode coupling record")?
        );
    } else {
        println!("{value:e}");
    }
    Ok(0)
}

fn resolve_matrix_config(args: &MatrixArgs) -> Result<CouplingConfig, CliError> {
    let base = match &args.config {
        Some(path) => load_coupling_config(path).map_err(VelgaugeError::from)?,
        None => {
            if args.lmax.is_none() {
                return Err(CliError::Usage(
                    "matrix requires --lmax when no --config is given".to_string(),
                ));
            }
            CouplingConfig::default()
        }
    };

    let config = base.with_overrides(CouplingConfigOverrides {
        lmax: args.lmax,
        term: args.term.map(CouplingTerm::from),
        charge: args.charge,
    });
    config.validate().map_err(VelgaugeError::from)?;
    Ok(config)
}

fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| {
            VelgaugeError::io_system(
                "IO.OUTPUT_DIR",
                format!("failed to create '{}': {}", parent.display(), source),
            )
        })?;
    }
    fs::write(path, contents).map_err(|source| {
        VelgaugeError::io_system(
            "IO.OUTPUT_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    })?;
    Ok(())
}

pub(super) fn run_matrix_command(args: MatrixArgs) -> Result<i32, CliError> {
    let config = resolve_matrix_config(&args)?;
    tracing::debug!(
        lmax = config.lmax,
        term = %config.term,
        charge = config.charge,
        "resolved matrix configuration"
    );

    let basis = SphericalHarmonicBasis::new(config.lmax)?;
    let evaluator = evaluator_for_term(config.term);
    let table = build_coupling_table(&basis, evaluator.as_ref(), config.charge)?;

    let encoded =
        serde_json::to_string_pretty(&table).context("failed to encode coupling table")?;
    write_output(&args.output, &encoded)?;

    println!(
        "Wrote {} {} couplings (lmax={}, basis size={}) to {}",
        table.rows.len(),
        config.term,
        config.lmax,
        basis.size(),
        args.output.display()
    );
    Ok(0)
}

pub(super) fn run_kernel_command(args: KernelArgs) -> Result<i32, CliError> {
    let record = KernelRecord {
        parity_overlap: parity_overlap(args.l, args.m, args.p, args.q),
        polar_overlap: polar_sum_report(args.l, args.m, args.p, args.q),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("failed to encode kernel report")?
    );
    Ok(0)
}
