//! Reusable field rules
//!
//! Every rule only judges values of the kind it understands and passes the
//! others through: type checking is the job of the declared `FieldType`.

use super::rule::Rule;
use crate::core::field::{FieldFormat, FieldValue};
use regex::Regex;
use std::cmp::Ordering;

/// Custom rule from a predicate
pub fn rule(
    name: impl Into<String>,
    message: impl Into<String>,
    predicate: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
) -> Rule {
    Rule::new(name, message, predicate)
}

/// Number must be strictly positive
pub fn positive() -> Rule {
    Rule::new("positive", "must be positive", |value| {
        value.as_float().is_none_or(|num| num > 0.0)
    })
}

/// Number must not be below `min`
pub fn min_value(min: f64) -> Rule {
    Rule::new("min_value", format!("must be at least {}", min), move |value| {
        compare(value, min).is_none_or(|ord| ord != Ordering::Less)
    })
}

/// Number must not exceed `max`
pub fn max_value(max: f64) -> Rule {
    Rule::new(
        "max_value",
        format!("must not exceed {}", max),
        move |value| compare(value, max).is_none_or(|ord| ord != Ordering::Greater),
    )
}

/// Orders a number against a bound
///
/// Integers are compared exactly against whole bounds, so values past 2^53
/// are not rounded through `f64`.
fn compare(value: &FieldValue, bound: f64) -> Option<Ordering> {
    const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

    match value {
        FieldValue::Integer(n) if bound.fract() == 0.0 => Some(if bound >= I64_LIMIT {
            Ordering::Less
        } else if bound < -I64_LIMIT {
            Ordering::Greater
        } else {
            n.cmp(&(bound as i64))
        }),
        other => other.as_float().and_then(|num| num.partial_cmp(&bound)),
    }
}

/// String length (in characters) must be within `min..=max`
pub fn string_length(min: usize, max: usize) -> Rule {
    Rule::new(
        "string_length",
        format!("length must be between {} and {}", min, max),
        move |value| {
            value.as_string().is_none_or(|s| {
                let len = s.chars().count();
                len >= min && len <= max
            })
        },
    )
}

/// Value must be one of `allowed`
pub fn in_list(allowed: Vec<String>) -> Rule {
    let message = format!("must be one of: {}", allowed.join(", "));
    Rule::new("in_list", message, move |value| {
        value.as_string().is_none_or(|s| allowed.iter().any(|a| a == s))
    })
}

/// Date string must match a chrono format
pub fn date_format(format: impl Into<String>) -> Rule {
    let format: String = format.into();
    let message = format!("must match date format {}", format);
    Rule::new("date_format", message, move |value| {
        value
            .as_string()
            .is_none_or(|s| chrono::NaiveDate::parse_from_str(s, &format).is_ok())
    })
}

/// Value must match a [`FieldFormat`]
pub fn format(format: FieldFormat) -> Rule {
    let name = format.name();
    Rule::new(name, format!("invalid {}", name), move |value| {
        format.validate(value)
    })
}

pub fn email() -> Rule {
    format(FieldFormat::Email)
}

pub fn url() -> Rule {
    format(FieldFormat::Url)
}

pub fn uuid() -> Rule {
    format(FieldFormat::Uuid)
}

pub fn phone() -> Rule {
    format(FieldFormat::Phone)
}

/// String must match `regex`
pub fn pattern(regex: Regex) -> Rule {
    format(FieldFormat::Custom(regex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> FieldValue {
        FieldValue::String(value.to_string())
    }

    // === positive() ===

    #[test]
    fn test_positive_rejects_negative_and_zero() {
        let r = positive();
        assert!(!r.check(&FieldValue::Float(-5.0)));
        assert!(!r.check(&FieldValue::Integer(0)));
        assert_eq!(r.message(), "must be positive");
    }

    #[test]
    fn test_positive_accepts_positive() {
        let r = positive();
        assert!(r.check(&FieldValue::Float(42.5)));
        assert!(r.check(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_positive_non_number_passthrough() {
        assert!(positive().check(&s("hello")));
    }

    // === min_value() / max_value() ===

    #[test]
    fn test_min_value_bounds() {
        let r = min_value(10.0);
        assert!(r.check(&FieldValue::Integer(10)));
        assert!(!r.check(&FieldValue::Integer(9)));
        assert!(r.message().contains("10"));
    }

    #[test]
    fn test_max_value_bounds() {
        let r = max_value(100.0);
        assert!(r.check(&FieldValue::Float(100.0)));
        assert!(!r.check(&FieldValue::Float(101.0)));
        assert!(r.check(&s("hello")));
    }

    #[test]
    fn test_bounds_compare_large_integers_exactly() {
        assert!(!max_value(9007199254740992.0).check(&FieldValue::Integer(9007199254740993)));
        assert!(max_value(9007199254740992.0).check(&FieldValue::Integer(9007199254740992)));
        assert!(!min_value(i64::MAX as f64).check(&FieldValue::Integer(i64::MAX)));
        assert!(min_value(i64::MIN as f64).check(&FieldValue::Integer(i64::MIN)));
    }

    #[test]
    fn test_bounds_with_fractional_limit() {
        let r = min_value(1.5);
        assert!(!r.check(&FieldValue::Integer(1)));
        assert!(r.check(&FieldValue::Integer(2)));
        assert!(r.check(&FieldValue::Float(1.5)));
    }

    // === string_length() ===

    #[test]
    fn test_string_length_bounds() {
        let r = string_length(3, 5);
        assert!(!r.check(&s("ab")));
        assert!(r.check(&s("abc")));
        assert!(r.check(&s("abcde")));
        assert!(!r.check(&s("abcdef")));
    }

    #[test]
    fn test_string_length_counts_chars() {
        assert!(string_length(1, 3).check(&s("été")));
    }

    #[test]
    fn test_string_length_non_string_passthrough() {
        assert!(string_length(5, 10).check(&FieldValue::Integer(42)));
    }

    // === in_list() ===

    #[test]
    fn test_in_list() {
        let r = in_list(vec!["active".into(), "inactive".into()]);
        assert!(r.check(&s("active")));
        assert!(!r.check(&s("deleted")));
        assert_eq!(r.message(), "must be one of: active, inactive");
    }

    #[test]
    fn test_in_list_empty_list_rejects_strings() {
        assert!(!in_list(vec![]).check(&s("anything")));
    }

    // === date_format() ===

    #[test]
    fn test_date_format() {
        let r = date_format("%Y-%m-%d");
        assert!(r.check(&s("2024-01-15")));
        assert!(!r.check(&s("15/01/2024")));
        assert!(r.check(&FieldValue::Integer(12345)));
    }

    // === formats ===

    #[test]
    fn test_email_rule() {
        let r = email();
        assert_eq!(r.name(), "email");
        assert_eq!(r.message(), "invalid email");
        assert!(r.check(&s("a@b.io")));
        assert!(!r.check(&s("nope")));
    }

    #[test]
    fn test_pattern_rule() {
        let r = pattern(Regex::new(r"^[A-Z]{3}-\d{3}$").unwrap());
        assert!(r.check(&s("INV-001")));
        assert!(!r.check(&s("inv-001")));
    }

    #[test]
    fn test_custom_rule() {
        let r = rule("not_admin", "reserved name", |v| v.as_string() != Some("admin"));
        assert!(!r.check(&s("admin")));
        assert!(r.check(&s("alice")));
    }
}
