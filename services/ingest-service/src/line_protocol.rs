//! Turns a measurement batch into InfluxDB line protocol.
//!
//! Every measurement lands in one fixed series, `current`, with a single
//! `value` field. Field values are not type checked; they are rendered as
//! text the same way for any JSON shape and left for InfluxDB to reject.

use std::fmt::{self, Display, Formatter, Write};

use serde_json::{Number, Value};

use crate::error::IngestError;

pub const SERIES: &str = "current";

/// Returns the `measurements` array of a request body.
///
/// A missing or falsy field (`null`, `false`, `0`, `""`) is rejected, as is a
/// truthy value that is not an array.
pub fn measurements(body: &Value) -> Result<&[Value], IngestError> {
    match body.get("measurements") {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(IngestError::InvalidPayload),
    }
}

/// One line per measurement, input order kept, joined by `\n` without a
/// trailing newline.
pub fn encode_lines(measurements: &[Value]) -> String {
    let mut payload = String::new();
    for (index, measurement) in measurements.iter().enumerate() {
        if index > 0 {
            payload.push('\n');
        }
        // Writing into a String cannot fail.
        let _ = write!(payload, "{}", LineRecord::new(measurement));
    }
    payload
}

/// `current value=<value> <timestamp>` for a single measurement.
pub struct LineRecord<'a> {
    measurement: &'a Value,
}

impl<'a> LineRecord<'a> {
    pub fn new(measurement: &'a Value) -> Self {
        Self { measurement }
    }
}

impl Display for LineRecord<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SERIES} value={} {}",
            FieldText(self.measurement.get("value")),
            FieldText(self.measurement.get("timestamp")),
        )
    }
}

/// Loose text rendering of a JSON field; `None` is an absent field.
struct FieldText<'a>(Option<&'a Value>);

impl Display for FieldText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("undefined"),
            Some(value) => write_value(f, value),
        }
    }
}

fn write_value(f: &mut Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(flag) => write!(f, "{flag}"),
        Value::Number(number) => write_number(f, number),
        Value::String(text) => f.write_str(text),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_char(',')?;
                }
                // Nulls inside an array render as nothing.
                if !item.is_null() {
                    write_value(f, item)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

fn write_number(f: &mut Formatter<'_>, number: &Number) -> fmt::Result {
    if let Some(int) = number.as_i64() {
        return write!(f, "{int}");
    }
    if let Some(uint) = number.as_u64() {
        return write!(f, "{uint}");
    }
    match number.as_f64() {
        Some(float) => write_float(f, float),
        None => write!(f, "{number}"),
    }
}

// Shortest round-trip digits; exponent form outside [1e-6, 1e21).
fn write_float(f: &mut Formatter<'_>, float: f64) -> fmt::Result {
    if float == 0.0 {
        return f.write_str("0");
    }
    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{float}");
    }
    let text = format!("{float:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&text),
    }
}
