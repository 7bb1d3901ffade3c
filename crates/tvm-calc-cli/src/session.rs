//! Interactive menu-driven calculator session.
//!
//! The session owns its reader and writer so it can be driven by the real
//! console or by an in-memory script in tests.

use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info};

use tvm_calc_core::time_value;

use crate::input::prompt::{parse_field, PromptValue};
use crate::{CliError, Result};

const RATE_PROMPT: &str = "Enter the annual interest rate (e.g., 0.05 for 5%): ";
const TIME_PROMPT: &str = "Enter the time in years: ";
const PERIODS_PROMPT: &str = "Enter the number of times interest is compounded per year: ";

/// A selection from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CompoundInterest,
    PresentValue,
    AnnuityFutureValue,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "1" => Ok(MenuChoice::CompoundInterest),
            "2" => Ok(MenuChoice::PresentValue),
            "3" => Ok(MenuChoice::AnnuityFutureValue),
            "q" | "quit" | "exit" => Ok(MenuChoice::Quit),
            _ => Err(CliError::InvalidChoice(trimmed.to_string())),
        }
    }
}

/// Counts reported when a session ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub calculations: usize,
    pub errors: usize,
}

/// Prompts gathered for one calculation, in the order they are asked.
struct Terms {
    amount: Decimal,
    rate: Decimal,
    time: Decimal,
    periods: u32,
}

pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user quits or input is exhausted.
    ///
    /// Parse, menu and calculation errors are printed and the menu is shown
    /// again; only I/O failures end the session with an error.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        self.print_menu()?;

        loop {
            let Some(line) = self.prompt("Enter your choice (1/2/3, q to quit): ")? else {
                break;
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Quit) => break,
                Ok(choice) => choice,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };
            debug!(?choice, "menu selection");

            match self.calculate(choice) {
                Ok(Some(line)) => {
                    writeln!(self.output, "{line}")?;
                    summary.calculations += 1;
                }
                Ok(None) => break,
                Err(e) if e.is_recoverable() => {
                    writeln!(self.output, "{e}")?;
                    summary.errors += 1;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Goodbye!")?;
        info!(
            calculations = summary.calculations,
            errors = summary.errors,
            "session ended"
        );
        Ok(summary)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the Financial Calculator!")?;
        writeln!(self.output, "1. Compound Interest")?;
        writeln!(self.output, "2. Present Value")?;
        writeln!(self.output, "3. Annuity Future Value")?;
        writeln!(self.output, "q. Quit")?;
        Ok(())
    }

    /// Returns the formatted result line, or None if input ran out mid-way.
    fn calculate(&mut self, choice: MenuChoice) -> Result<Option<String>> {
        let (field, amount_prompt) = match choice {
            MenuChoice::CompoundInterest => ("principal", "Enter the principal amount: "),
            MenuChoice::PresentValue => ("future value", "Enter the future amount: "),
            MenuChoice::AnnuityFutureValue => ("payment", "Enter the periodic payment amount: "),
            MenuChoice::Quit => return Ok(None),
        };
        let Some(terms) = self.read_terms(field, amount_prompt)? else {
            return Ok(None);
        };

        let line = match choice {
            MenuChoice::CompoundInterest => {
                let fv = time_value::compound_interest(
                    terms.amount,
                    terms.rate,
                    terms.time,
                    terms.periods,
                )?;
                format!("The future value of the investment is: {fv:.2}")
            }
            MenuChoice::PresentValue => {
                let pv = time_value::present_value(
                    terms.amount,
                    terms.rate,
                    terms.time,
                    terms.periods,
                )?;
                format!("The present value is: {pv:.2}")
            }
            MenuChoice::AnnuityFutureValue => {
                let fv = time_value::annuity_future_value(
                    terms.amount,
                    terms.rate,
                    terms.time,
                    terms.periods,
                )?;
                format!("The future value of the annuity is: {fv:.2}")
            }
            MenuChoice::Quit => return Ok(None),
        };
        Ok(Some(line))
    }

    fn read_terms(&mut self, field: &str, amount_prompt: &str) -> Result<Option<Terms>> {
        let Some(amount) = self.read_value(field, amount_prompt)? else {
            return Ok(None);
        };
        let Some(rate) = self.read_value("rate", RATE_PROMPT)? else {
            return Ok(None);
        };
        let Some(time) = self.read_value("time", TIME_PROMPT)? else {
            return Ok(None);
        };
        let Some(periods) = self.read_value("periods per year", PERIODS_PROMPT)? else {
            return Ok(None);
        };
        Ok(Some(Terms {
            amount,
            rate,
            time,
            periods,
        }))
    }

    fn read_value<T: PromptValue>(&mut self, field: &str, text: &str) -> Result<Option<T>> {
        match self.prompt(text)? {
            Some(line) => parse_field(field, &line).map(Some),
            None => Ok(None),
        }
    }

    /// Print `text` and read one line. None at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
