mod commands;
mod logging;

use clap::Parser;
use velgauge_core::domain::VelgaugeError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_velgauge_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            if let Some(summary_line) = diagnostic.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("velgauge".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            logging::init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "velgauge",
    version,
    about = "Velocity-gauge angular coupling coefficients on a spherical-harmonic basis"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Evaluate one coupling coefficient
    Coupling(commands::CouplingArgs),
    /// Assemble the angular matrix and write its nonzero couplings as JSON
    Matrix(commands::MatrixArgs),
    /// Print the K2 summation diagnostics for one index set as JSON
    Kernel(commands::KernelArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Coupling(args) => commands::run_coupling_command(args),
        CliCommand::Matrix(args) => commands::run_matrix_command(args),
        CliCommand::Kernel(args) => commands::run_kernel_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(VelgaugeError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<VelgaugeError> for CliError {
    fn from(error: VelgaugeError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_velgauge_error(&self) -> VelgaugeError {
        match self {
            Self::Usage(message) => {
                VelgaugeError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => VelgaugeError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}
