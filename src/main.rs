use clap::{Parser, Subcommand};
use gridmodel::cli::{self, GenerateOptions};
use gridmodel::error::ModelResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridmodel")]
#[command(about = "Generate the multi-year regulated utility financial model workbook")]
#[command(long_about = "gridmodel - Regulated utility financial model generator

Loads assumption and historical tables from CSV, lays out the forecast
sheets and writes one .xlsx workbook. Forecast formulas are written for the
first forecast year and templated across the remaining years.

COMMANDS:
  generate  - Build the workbook from CSV inputs
  shift     - Show a formula moved to later forecast years
  inspect   - List sheets or formulas of a generated workbook
  init      - Write the default config file

EXAMPLES:
  gridmodel generate --input-dir inputs/
  gridmodel shift \"=B5+B6\" --offset 2
  gridmodel shift \"='Assumptions_Macro'!C3\" --years 4
  gridmodel inspect NationalGrid_Full_Model_Generated.xlsx --sheet RAV_RateBase_Forecast")]
#[command(version)]
struct Cli {
    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the workbook from CSV inputs
    Generate {
        /// YAML config file (defaults are used when omitted)
        #[arg(short, long, env = "GRIDMODEL_CONFIG")]
        config: Option<PathBuf>,

        /// Directory containing the input CSV files
        #[arg(short, long, env = "GRIDMODEL_INPUT_DIR")]
        input_dir: Option<PathBuf>,

        /// Output .xlsx path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail if any input is missing or has unreadable fields
        #[arg(long)]
        strict: bool,
    },

    /// Shift a first-year formula to later forecast years
    Shift {
        /// Formula text, including the leading '='
        formula: String,

        /// Year offset to apply (default 1)
        #[arg(long, conflicts_with = "years")]
        offset: Option<u32>,

        /// Print the formula for every offset from 0 to N-1
        #[arg(long)]
        years: Option<u32>,
    },

    /// List sheets or formula cells in a workbook
    Inspect {
        /// Path to .xlsx file
        file: PathBuf,

        /// Only list formulas of this sheet
        #[arg(short, long)]
        sheet: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the default config as YAML
    Init {
        /// Target file
        #[arg(default_value = "gridmodel.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ModelResult<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "gridmodel=debug"
    } else {
        "gridmodel=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            config,
            input_dir,
            output,
            strict,
        } => cli::generate(GenerateOptions {
            config,
            input_dir,
            output,
            strict,
            verbose: cli.verbose,
        })
        .map(|_| ()),

        Commands::Shift {
            formula,
            offset,
            years,
        } => cli::shift(formula, offset, years),

        Commands::Inspect { file, sheet, json } => cli::inspect(file, sheet, json),

        Commands::Init { path, force } => cli::init(path, force),
    }
}
