//! Boundary coercion for loosely-typed catalog JSON
//!
//! The catalog API sends prices as numbers, numeric strings, `null`, or not at
//! all. Everything is coerced here, exactly once, when a [`Product`] is built,
//! so the filter code only ever sees definite values.
//!
//! [`Product`]: crate::core::product::Product

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Coerce a currency amount to `f64`
///
/// Numbers pass through, numeric strings are parsed (surrounding whitespace
/// ignored). Anything else, including negative amounts, NaN and infinities,
/// becomes `0.0`.
pub fn price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.map(amount).unwrap_or(0.0)
}

/// Apply the currency rule to an already-numeric amount
///
/// Finite, non-negative values pass through; NaN, infinities and negative
/// amounts become `0.0`.
pub fn amount(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerce a non-negative count to `u32`
///
/// Accepts integers, integral floats and numeric strings. Negative or
/// unparseable values become `0`.
pub fn count(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .map(|c| u32::try_from(c).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Coerce a timestamp
///
/// Accepts RFC 3339 (`2024-06-01T10:00:00Z`) or a bare date (`2024-06-01`,
/// read as midnight UTC). Returns `None` for anything else.
pub fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coerce a boolean flag
///
/// `true`/`false`, `1`/`0` and the strings `"true"`/`"false"` are understood.
pub fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_price_accepts_numbers_and_strings() {
        assert_eq!(price(&json!(12.5)), 12.5);
        assert_eq!(price(&json!(40)), 40.0);
        assert_eq!(price(&json!("19.99")), 19.99);
        assert_eq!(price(&json!("  7 ")), 7.0);
    }

    #[test]
    fn test_price_degrades_to_zero() {
        assert_eq!(price(&Value::Null), 0.0);
        assert_eq!(price(&json!("N/A")), 0.0);
        assert_eq!(price(&json!("")), 0.0);
        assert_eq!(price(&json!({"amount": 3})), 0.0);
        assert_eq!(price(&json!("NaN")), 0.0);
        assert_eq!(price(&json!("inf")), 0.0);
        assert_eq!(price(&json!(-5)), 0.0);
    }

    #[test]
    fn test_amount_rejects_non_finite_and_negative() {
        assert_eq!(amount(12.5), 12.5);
        assert_eq!(amount(0.0), 0.0);
        assert_eq!(amount(f64::NAN), 0.0);
        assert_eq!(amount(f64::INFINITY), 0.0);
        assert_eq!(amount(-5.0), 0.0);
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&json!(6)), 6);
        assert_eq!(count(&json!("3")), 3);
        assert_eq!(count(&json!(2.0)), 2);
        assert_eq!(count(&json!(-4)), 0);
        assert_eq!(count(&Value::Null), 0);
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(timestamp(&json!("2024-06-01")), Some(expected));
        assert_eq!(timestamp(&json!("2024-06-01T00:00:00Z")), Some(expected));
        assert_eq!(
            timestamp(&json!("2024-06-01T02:00:00+02:00")),
            Some(expected)
        );
        assert_eq!(timestamp(&json!("yesterday")), None);
        assert_eq!(timestamp(&json!(1717200000)), None);
    }

    #[test]
    fn test_flag() {
        assert!(flag(&json!(true)));
        assert!(flag(&json!(1)));
        assert!(flag(&json!("TRUE")));
        assert!(!flag(&json!("no")));
        assert!(!flag(&Value::Null));
    }
}
