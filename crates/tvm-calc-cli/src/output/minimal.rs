use serde_json::Value;
use std::io::{self, Write};

use super::plain;

/// Print just the headline `value` from the result.
///
/// Falls back to the whole result when no `value` field is present.
pub fn write_minimal<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result = value.get("result").unwrap_or(value);
    match result.get("value") {
        Some(headline) if !headline.is_null() => writeln!(out, "{}", plain(headline)),
        _ => writeln!(out, "{}", plain(result)),
    }
}
