mod commands;
mod error;
mod input;
mod output;
mod session;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::time_value::{AnnuityArgs, CompoundInterestArgs, PresentValueArgs};

pub use error::{CliError, Result};

/// Time-value-of-money calculator
#[derive(Parser)]
#[command(
    name = "tvm",
    version,
    about = "Time-value-of-money calculator",
    long_about = "Compound interest, present value and annuity future value with \
                  decimal precision. Run without a subcommand for the interactive menu."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format for one-shot calculations
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Future value of a lump sum under periodic compounding
    CompoundInterest(CompoundInterestArgs),
    /// Discount a future amount back to today
    PresentValue(PresentValueArgs),
    /// Future value of equal periodic payments
    Annuity(AnnuityArgs),
    /// Menu-driven session (the default)
    Interactive,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value> = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::CompoundInterest(args) => commands::time_value::run_compound_interest(args),
        Commands::PresentValue(args) => commands::time_value::run_present_value(args),
        Commands::Annuity(args) => commands::time_value::run_annuity(args),
        Commands::Interactive => {
            if let Err(e) = commands::interactive::run() {
                fail(&e);
            }
            return;
        }
        Commands::Version => {
            println!("tvm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            if let Err(e) = output::format_output(&cli.output, &value) {
                fail(&e);
            }
            process::exit(0);
        }
        Err(e) => fail(&e),
    }
}
