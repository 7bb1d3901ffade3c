pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::Value;
use std::io::{self, Write};

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn write_output<W: Write>(out: &mut W, format: &OutputFormat, value: &Value) -> io::Result<()> {
    match format {
        OutputFormat::Json => json::write_json(out, value),
        OutputFormat::Table => table::write_table(out, value),
        OutputFormat::Csv => csv_out::write_csv(out, value),
        OutputFormat::Minimal => minimal::write_minimal(out, value),
    }
}

/// Write to stdout in the requested format.
pub fn format_output(format: &OutputFormat, value: &Value) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_output(&mut lock, format, value)
}

/// Render a scalar JSON value without quotes.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
