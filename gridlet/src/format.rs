//! Cell display formatting

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Datelike;
use chrono::Timelike;
use chrono::Utc;

use crate::model::Value;

/// Signature for custom cell formatters: the cell value and its row id.
pub type FormatFn = dyn Fn(&Value, usize) -> String + Send + Sync;

/// How a column renders its cells to strings.
///
/// Columns resolve to `Number` or `Date` when type inference finds a numeric
/// or datetime value first, and to `Text` otherwise. `Custom` carries a
/// user-supplied closure. Undefined cells never reach a format: the window
/// builder renders them empty before formatting is consulted.
#[derive(Clone)]
pub enum CellFormat {
    /// Locale-style grouped number (`1,234,567.892`).
    Number,
    /// ISO 8601 date/time with minimal precision (`2001-02-03T04:05Z`).
    Date,
    /// Plain display text; nulls render empty.
    Text,
    /// User-supplied formatter.
    Custom(Arc<FormatFn>),
}

impl CellFormat {
    /// Wraps a closure as a custom format.
    pub fn custom(f: impl Fn(&Value, usize) -> String + Send + Sync + 'static) -> Self {
        CellFormat::Custom(Arc::new(f))
    }

    /// Renders one cell.
    pub fn apply(&self, value: &Value, row: usize) -> String {
        match self {
            CellFormat::Number => format_number(value),
            CellFormat::Date => format_date_value(value),
            CellFormat::Text => format_text(value),
            CellFormat::Custom(f) => f(value, row),
        }
    }
}

impl fmt::Debug for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellFormat::Number => f.write_str("Number"),
            CellFormat::Date => f.write_str("Date"),
            CellFormat::Text => f.write_str("Text"),
            CellFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Formats a numeric value with en-locale thousands grouping and at most
/// three fraction digits. Non-numeric values fall through to text.
pub fn format_number(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int(i) => group_thousands(&i.to_string()),
        Value::Float(f) => format_f64(*f),
        other => format_text(other),
    }
}

/// Formats a datetime value as UTC ISO 8601, omitting the time when it is
/// midnight, seconds when zero, and milliseconds when zero.
///
/// Numeric values coerce as epoch milliseconds; anything else that is not a
/// datetime renders as `Invalid Date`.
pub fn format_date_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::DateTime(dt) => format_date(dt),
        Value::Int(ms) => match DateTime::from_timestamp_millis(*ms) {
            Some(dt) => format_date(&dt),
            None => "Invalid Date".to_string(),
        },
        Value::Float(ms) if ms.is_finite() => match DateTime::from_timestamp_millis(*ms as i64) {
            Some(dt) => format_date(&dt),
            None => "Invalid Date".to_string(),
        },
        _ => "Invalid Date".to_string(),
    }
}

/// Plain text rendering: nulls empty, everything else via its natural form.
pub fn format_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => s.clone(),
        Value::DateTime(dt) => format_date(dt),
    }
}

/// ISO 8601 with minimal round-tripping precision.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    let mut out = format!(
        "{}-{:02}-{:02}",
        format_year(dt.year()),
        dt.month(),
        dt.day()
    );
    let (hours, minutes, seconds) = (dt.hour(), dt.minute(), dt.second());
    let millis = dt.timestamp_subsec_millis();
    if hours != 0 || minutes != 0 || seconds != 0 || millis != 0 {
        out.push_str(&format!("T{hours:02}:{minutes:02}"));
        if seconds != 0 || millis != 0 {
            out.push_str(&format!(":{seconds:02}"));
            if millis != 0 {
                out.push_str(&format!(".{millis:03}"));
            }
        }
        out.push('Z');
    }
    out
}

/// Years outside 0..=9999 take the expanded six-digit signed form.
fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:06}", -year)
    } else if year > 9999 {
        format!("+{year:06}")
    } else {
        format!("{year:04}")
    }
}

fn format_f64(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-∞" } else { "∞" }.to_string();
    }
    // Round to three fraction digits, then trim what the rounding left over.
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    group_thousands(&s)
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    out.push_str(sign);
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
