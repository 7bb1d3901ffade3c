use serde_json::Value;
use std::io::{self, Write};
use tabled::{builder::Builder, Table};

use super::plain;

/// Format the envelope as a field/value table followed by warnings and
/// methodology.
pub fn write_table<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let result = value.get("result").unwrap_or(value);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    match result {
        Value::Object(map) => {
            for (key, val) in map {
                builder.push_record([key.clone(), plain(val)]);
            }
        }
        other => builder.push_record(["value".to_string(), plain(other)]),
    }
    writeln!(out, "{}", Table::from(builder))?;

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for w in warnings {
                writeln!(out, "  - {}", plain(w))?;
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        writeln!(out, "\nMethodology: {meth}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_includes_methodology() {
        let envelope = json!({
            "result": {"value": "1000.00"},
            "methodology": "Present value of a lump sum",
            "warnings": [],
        });
        let mut out = Vec::new();
        write_table(&mut out, &envelope).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1000.00"));
        assert!(text.contains("Methodology: Present value of a lump sum"));
        assert!(!text.contains("Warnings:"));
    }
}
