use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::TvmError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Rate, Years};
use crate::TvmResult;

/// Nominal annual rates above this level are almost certainly entered as
/// percentages rather than fractions.
const RATE_SANITY_CEILING: Decimal = dec!(1.0);

/// Input parameters for the future value of a lump sum under compounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    /// Initial amount invested
    pub principal: Money,
    /// Nominal annual interest rate (0.05 = 5%)
    pub rate: Rate,
    /// Investment horizon in years
    pub time: Years,
    /// Compounding sub-periods per year (12 = monthly)
    pub periods_per_year: u32,
}

/// Input parameters for discounting a future amount back to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueInput {
    /// Amount received at the end of the horizon
    pub future_value: Money,
    /// Nominal annual discount rate (0.05 = 5%)
    pub rate: Rate,
    /// Horizon in years
    pub time: Years,
    /// Compounding sub-periods per year
    pub periods_per_year: u32,
}

/// Input parameters for the future value of an ordinary annuity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityInput {
    /// Fixed payment made at the end of every sub-period
    pub payment: Money,
    /// Nominal annual interest rate (0.05 = 5%)
    pub rate: Rate,
    /// Horizon in years
    pub time: Years,
    /// Payments (and compounding sub-periods) per year
    pub periods_per_year: u32,
}

/// Output shared by all three time-value calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvmOutput {
    /// Headline result, rounded to cents
    pub value: Money,
    /// Rate applied per sub-period (rate / periods_per_year)
    pub periodic_rate: Rate,
    /// Number of compounding sub-periods (periods_per_year * time)
    pub total_periods: Decimal,
    /// (1 + periodic_rate) ^ total_periods, unrounded
    pub growth_factor: Decimal,
}

/// Intermediate quantities common to every formula in this module.
struct Compounding {
    periodic_rate: Rate,
    total_periods: Decimal,
    growth_factor: Decimal,
}

// ---------------------------------------------------------------------------
// Scalar API
// ---------------------------------------------------------------------------

/// Future value of `principal` compounded `periods_per_year` times a year.
///
/// FV = P * (1 + r/n)^(n*t), rounded to 2 decimal places.
pub fn compound_interest(
    principal: Money,
    rate: Rate,
    time: Years,
    periods_per_year: u32,
) -> TvmResult<Money> {
    let input = CompoundInterestInput {
        principal,
        rate,
        time,
        periods_per_year,
    };
    Ok(compound_interest_output(&input)?.value)
}

/// Present value of `future_value` discounted over `time` years.
///
/// PV = FV / (1 + r/n)^(n*t), rounded to 2 decimal places.
pub fn present_value(
    future_value: Money,
    rate: Rate,
    time: Years,
    periods_per_year: u32,
) -> TvmResult<Money> {
    let input = PresentValueInput {
        future_value,
        rate,
        time,
        periods_per_year,
    };
    Ok(present_value_output(&input)?.value)
}

/// Future value of `payment` made every sub-period for `time` years.
///
/// FV = PMT * ((1 + r/n)^(n*t) - 1) / (r/n), rounded to 2 decimal places.
/// At a zero rate this is the limit PMT * n * t.
pub fn annuity_future_value(
    payment: Money,
    rate: Rate,
    time: Years,
    periods_per_year: u32,
) -> TvmResult<Money> {
    let input = AnnuityInput {
        payment,
        rate,
        time,
        periods_per_year,
    };
    let (output, _) = annuity_output(&input)?;
    Ok(output.value)
}

// ---------------------------------------------------------------------------
// Envelope API
// ---------------------------------------------------------------------------

/// Compound interest with methodology, assumptions and warnings attached.
pub fn calculate_compound_interest(
    input: &CompoundInterestInput,
) -> TvmResult<ComputationOutput<TvmOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    amount_warning("principal", input.principal, &mut warnings);
    rate_time_warnings(input.rate, input.time, &mut warnings);

    let output = compound_interest_output(input)?;
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Future value of a lump sum: P * (1 + r/n)^(n*t)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Present value with methodology, assumptions and warnings attached.
pub fn calculate_present_value(
    input: &PresentValueInput,
) -> TvmResult<ComputationOutput<TvmOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    amount_warning("future_value", input.future_value, &mut warnings);
    rate_time_warnings(input.rate, input.time, &mut warnings);

    let output = present_value_output(input)?;
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Present value of a lump sum: FV / (1 + r/n)^(n*t)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Annuity future value with methodology, assumptions and warnings attached.
pub fn calculate_annuity_future_value(
    input: &AnnuityInput,
) -> TvmResult<ComputationOutput<TvmOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    amount_warning("payment", input.payment, &mut warnings);
    rate_time_warnings(input.rate, input.time, &mut warnings);

    let (output, zero_rate_limit) = annuity_output(input)?;
    if zero_rate_limit {
        warnings.push(
            "Periodic rate is zero: value is the plain sum of payments (PMT * n * t)".into(),
        );
    }
    let elapsed = start.elapsed().as_micros() as u64;

    let methodology = if zero_rate_limit {
        "Ordinary annuity future value, zero-rate limit: PMT * n * t"
    } else {
        "Ordinary annuity future value: PMT * ((1 + r/n)^(n*t) - 1) / (r/n)"
    };

    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compound_interest_output(input: &CompoundInterestInput) -> TvmResult<TvmOutput> {
    let c = compounding(
        input.rate,
        input.time,
        input.periods_per_year,
        "compound interest",
    )?;
    let raw = input
        .principal
        .checked_mul(c.growth_factor)
        .ok_or_else(|| overflow("compound interest"))?;
    let value = round_money(raw);

    debug!(
        principal = %input.principal,
        growth_factor = %c.growth_factor,
        %value,
        "compound interest"
    );

    Ok(c.into_output(value))
}

fn present_value_output(input: &PresentValueInput) -> TvmResult<TvmOutput> {
    let c = compounding(
        input.rate,
        input.time,
        input.periods_per_year,
        "present value",
    )?;
    if c.growth_factor.is_zero() {
        return Err(TvmError::DivisionByZero {
            context: "present value discount factor (1 + r/n)^(n*t)".into(),
        });
    }
    let raw = input
        .future_value
        .checked_div(c.growth_factor)
        .ok_or_else(|| overflow("present value"))?;
    let value = round_money(raw);

    debug!(
        future_value = %input.future_value,
        growth_factor = %c.growth_factor,
        %value,
        "present value"
    );

    Ok(c.into_output(value))
}

/// Returns the output and whether the zero-rate limit was used.
fn annuity_output(input: &AnnuityInput) -> TvmResult<(TvmOutput, bool)> {
    let c = compounding(
        input.rate,
        input.time,
        input.periods_per_year,
        "annuity future value",
    )?;

    // r/n can underflow to zero for tiny non-zero rates, so test the periodic rate.
    let zero_rate_limit = c.periodic_rate.is_zero();
    let raw = if zero_rate_limit {
        input.payment.checked_mul(c.total_periods)
    } else {
        c.growth_factor
            .checked_sub(Decimal::ONE)
            .and_then(|excess| excess.checked_div(c.periodic_rate))
            .and_then(|factor| input.payment.checked_mul(factor))
    }
    .ok_or_else(|| overflow("annuity future value"))?;
    let value = round_money(raw);

    debug!(
        payment = %input.payment,
        growth_factor = %c.growth_factor,
        zero_rate_limit,
        %value,
        "annuity future value"
    );

    Ok((c.into_output(value), zero_rate_limit))
}

/// Periodic rate, period count and growth factor for a nominal annual rate.
fn compounding(
    rate: Rate,
    time: Years,
    periods_per_year: u32,
    context: &str,
) -> TvmResult<Compounding> {
    if periods_per_year == 0 {
        return Err(TvmError::DivisionByZero {
            context: format!("{context}: compounding periods per year must be > 0"),
        });
    }

    let n = Decimal::from(periods_per_year);
    let periodic_rate = rate / n;
    let total_periods = n.checked_mul(time).ok_or_else(|| overflow(context))?;
    let base = Decimal::ONE
        .checked_add(periodic_rate)
        .ok_or_else(|| overflow(context))?;

    if base < Decimal::ZERO && !total_periods.fract().is_zero() {
        return Err(TvmError::InvalidInput {
            field: "rate".into(),
            reason: format!(
                "Growth base 1 + r/n = {base} is negative; a fractional number of periods ({total_periods}) has no real value"
            ),
        });
    }
    if base.is_zero() && total_periods < Decimal::ZERO {
        return Err(TvmError::DivisionByZero {
            context: format!("{context}: zero growth base raised to a negative power"),
        });
    }

    let growth_factor = base
        .checked_powd(total_periods)
        .ok_or_else(|| overflow(context))?;

    Ok(Compounding {
        periodic_rate,
        total_periods,
        growth_factor,
    })
}

impl Compounding {
    fn into_output(self, value: Money) -> TvmOutput {
        TvmOutput {
            value,
            periodic_rate: self.periodic_rate,
            total_periods: self.total_periods,
            growth_factor: self.growth_factor,
        }
    }
}

fn overflow(context: &str) -> TvmError {
    TvmError::FinancialImpossibility(format!(
        "{context} exceeds the representable decimal range"
    ))
}

fn amount_warning(field: &str, amount: Money, warnings: &mut Vec<String>) {
    if amount < Decimal::ZERO {
        warnings.push(format!("{field} is negative ({amount}); result sign follows it"));
    }
}

fn rate_time_warnings(rate: Rate, time: Years, warnings: &mut Vec<String>) {
    if rate < Decimal::ZERO {
        warnings.push(format!(
            "Negative interest rate ({rate}): balances shrink each period"
        ));
    }
    if rate > RATE_SANITY_CEILING {
        warnings.push(format!(
            "Rate of {rate} exceeds 100% per year; rates are decimals (0.05 = 5%)"
        ));
    }
    if time < Decimal::ZERO {
        warnings.push(format!(
            "Negative time ({time}): the formula runs backwards in time"
        ));
    }
}
