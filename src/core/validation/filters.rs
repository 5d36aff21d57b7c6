//! Reusable field filters
//!
//! Filters normalize the raw value before presence and type checks, so
//! `trim` turns a whitespace-only string into a missing value.

use super::rule::Filter;
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> Filter {
    Filter::new("trim", |value| match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    })
}

/// Filter: convert string to uppercase
pub fn uppercase() -> Filter {
    Filter::new("uppercase", |value| match value {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    })
}

/// Filter: convert string to lowercase
pub fn lowercase() -> Filter {
    Filter::new("lowercase", |value| match value {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other,
    })
}

/// Filter: round number to specified decimal places
///
/// Numeric strings (query and path parameters) are rounded too and stay
/// strings. Integers are left untouched, as is anything whose rounding would
/// not be finite.
pub fn round_decimals(decimals: u32) -> Filter {
    Filter::new("round_decimals", move |value| {
        let num = match &value {
            Value::Number(n) if n.is_f64() => n.as_f64(),
            Value::String(s) if s.trim().parse::<i64>().is_err() => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match num.and_then(|num| round_to(num, decimals)) {
            Some(rounded) if value.is_string() => Value::String(rounded.to_string()),
            Some(rounded) => json!(rounded),
            None => value,
        }
    })
}

fn round_to(num: f64, decimals: u32) -> Option<f64> {
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (num * factor).round() / factor;
    rounded.is_finite().then_some(rounded)
}
