use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use tvm_calc_core::time_value::{self, AnnuityInput, CompoundInterestInput, PresentValueInput};
use tvm_calc_core::ComputationOutput;

use crate::input;
use crate::{CliError, Result};

/// Rate, horizon and compounding frequency shared by every calculation
#[derive(Args)]
pub struct TermsArgs {
    /// Nominal annual interest rate (e.g. 0.05 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time in years
    #[arg(long)]
    pub time: Option<Decimal>,

    /// Compounding periods per year (e.g. 12 for monthly)
    #[arg(long, alias = "periods-per-year")]
    pub periods: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl TermsArgs {
    fn any_given(&self) -> bool {
        self.rate.is_some() || self.time.is_some() || self.periods.is_some()
    }

    fn rate(&self) -> Result<Decimal> {
        self.rate.ok_or_else(|| missing("--rate"))
    }

    fn time(&self) -> Result<Decimal> {
        self.time.ok_or_else(|| missing("--time"))
    }

    fn periods(&self) -> Result<u32> {
        self.periods.ok_or_else(|| missing("--periods"))
    }
}

/// Arguments for the future value of a lump sum
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompoundInterestArgs {
    /// Initial amount invested
    #[arg(long)]
    pub principal: Option<Decimal>,

    #[command(flatten)]
    pub terms: TermsArgs,
}

/// Arguments for discounting a future amount
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PresentValueArgs {
    /// Amount received at the end of the horizon
    #[arg(long, alias = "fv")]
    pub future_value: Option<Decimal>,

    #[command(flatten)]
    pub terms: TermsArgs,
}

/// Arguments for the future value of a stream of payments
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnnuityArgs {
    /// Payment made every compounding period
    #[arg(long, alias = "pmt")]
    pub payment: Option<Decimal>,

    #[command(flatten)]
    pub terms: TermsArgs,
}

pub fn run_compound_interest(args: CompoundInterestArgs) -> Result<Value> {
    let flags_given = args.principal.is_some() || args.terms.any_given();
    let ci_input: CompoundInterestInput = if let Some(ref path) = args.terms.input {
        input::file::read_json(path)?
    } else if let Some(data) = piped(flags_given)? {
        data
    } else {
        CompoundInterestInput {
            principal: args.principal.ok_or_else(|| missing("--principal"))?,
            rate: args.terms.rate()?,
            time: args.terms.time()?,
            periods_per_year: args.terms.periods()?,
        }
    };

    let result = time_value::calculate_compound_interest(&ci_input)?;
    envelope_to_value(result)
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value> {
    let flags_given = args.future_value.is_some() || args.terms.any_given();
    let pv_input: PresentValueInput = if let Some(ref path) = args.terms.input {
        input::file::read_json(path)?
    } else if let Some(data) = piped(flags_given)? {
        data
    } else {
        PresentValueInput {
            future_value: args.future_value.ok_or_else(|| missing("--future-value"))?,
            rate: args.terms.rate()?,
            time: args.terms.time()?,
            periods_per_year: args.terms.periods()?,
        }
    };

    let result = time_value::calculate_present_value(&pv_input)?;
    envelope_to_value(result)
}

pub fn run_annuity(args: AnnuityArgs) -> Result<Value> {
    let flags_given = args.payment.is_some() || args.terms.any_given();
    let annuity_input: AnnuityInput = if let Some(ref path) = args.terms.input {
        input::file::read_json(path)?
    } else if let Some(data) = piped(flags_given)? {
        data
    } else {
        AnnuityInput {
            payment: args.payment.ok_or_else(|| missing("--payment"))?,
            rate: args.terms.rate()?,
            time: args.terms.time()?,
            periods_per_year: args.terms.periods()?,
        }
    };

    let result = time_value::calculate_annuity_future_value(&annuity_input)?;
    envelope_to_value(result)
}

/// Piped JSON is only consulted when no value flags were given.
fn piped<T: serde::de::DeserializeOwned>(flags_given: bool) -> Result<Option<T>> {
    if flags_given {
        return Ok(None);
    }
    input::stdin::read_stdin()
}

fn envelope_to_value<T: Serialize>(output: ComputationOutput<T>) -> Result<Value> {
    for w in &output.warnings {
        warn!("{w}");
    }
    Ok(serde_json::to_value(output)?)
}

fn missing(flag: &str) -> CliError {
    CliError::MissingArgument(format!("{flag} is required (or provide --input)"))
}
