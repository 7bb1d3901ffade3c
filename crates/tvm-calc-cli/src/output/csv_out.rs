use serde_json::Value;
use std::io::{self, Write};

use super::plain;

/// Write the result fields as a two-column `field,value` CSV.
pub fn write_csv<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["field", "value"])?;

    let result = value.get("result").unwrap_or(value);
    match result {
        Value::Object(map) => {
            for (key, val) in map {
                wtr.write_record([key.as_str(), &plain(val)])?;
            }
        }
        other => wtr.write_record(["value", &plain(other)])?,
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        for w in warnings {
            wtr.write_record(["warning", &plain(w)])?;
        }
    }

    wtr.flush()
}
