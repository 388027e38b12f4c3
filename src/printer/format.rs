use std::borrow::Cow;

use crate::schema::{Value, DATE_FORMAT, TIMESTAMP_FORMAT};

/// Text form of a value in printed output. NULL prints as an empty string.
pub fn format_value(v: &Value) -> Cow<'_, str> {
    match v {
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::BigInt(n) => Cow::Owned(n.to_string()),
        Value::Integer(n) => Cow::Owned(n.to_string()),
        Value::Double(d) => Cow::Owned(format_double(*d)),
        Value::Date(d) => Cow::Owned(d.format(DATE_FORMAT).to_string()),
        Value::Timestamp(t) => Cow::Owned(t.format(TIMESTAMP_FORMAT).to_string()),
        Value::Str(s) => Cow::Borrowed(s.as_str()),
    }
}

fn format_double(d: f64) -> String {
    if d.is_nan() {
        "NaN".to_string()
    } else if d.is_infinite() {
        if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if d.fract() == 0.0 {
        format!("{:.1}", d)
    } else {
        d.to_string()
    }
}
