//! Validator helper functions
//!
//! Scalar checks run by every element constructor, and the coercions that
//! turn raw input values into the scalars those constructors accept.

use crate::error::{Error, Result, ValidationError};
use chrono::NaiveDate;
use serde_json::Value;
use std::num::IntErrorKind;

/// Date format used for every date-valued field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a string field may be empty after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emptiness {
    /// Empty text fails validation
    Required,
    /// Empty text is accepted
    Allowed,
}

/// Sign constraint of an integer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// x > 0
    Positive,
    /// x >= 0
    NonNegative,
}

// =============================================================================
// String Validators
// =============================================================================

/// Validate and normalize a string field
pub fn validate_string(field: &str, value: impl Into<String>, emptiness: Emptiness) -> Result<String> {
    let value = value.into();
    let normalized = value.trim();
    if normalized.is_empty() && emptiness == Emptiness::Required {
        return Err(Error::Validation(
            ValidationError::new("value must not be empty").with_field(field),
        ));
    }
    if let Some(c) = normalized.chars().find(|c| !is_xml_char(*c)) {
        return Err(Error::Validation(
            ValidationError::new("value contains a character not allowed in XML")
                .with_field(field)
                .with_reason(format!("U+{:04X}", c as u32)),
        ));
    }
    Ok(normalized.to_string())
}

/// Check if a character matches the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Normalize an optional string field; empty text counts as absent
pub fn validate_optional_string<S: Into<String>>(field: &str, value: Option<S>) -> Result<Option<String>> {
    match value {
        Some(value) => {
            let normalized = validate_string(field, value, Emptiness::Allowed)?;
            Ok((!normalized.is_empty()).then_some(normalized))
        }
        None => Ok(None),
    }
}

/// Validate that a code belongs to its allowed set
pub fn validate_enumeration(field: &str, value: String, allowed: &'static [&'static str]) -> Result<String> {
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(Error::InvalidEnumeration {
            field: field.to_string(),
            value,
            allowed: allowed.to_vec(),
        })
    }
}

/// Coerce a raw scalar to text
///
/// Strings pass through; numbers and booleans are rendered. Null, arrays
/// and objects are not scalars.
pub fn scalar_text(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::Validation(
            ValidationError::new("value is not a scalar")
                .with_field(field)
                .with_reason(format!("Actual value: {}", other)),
        )),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validate the sign of an integer field
pub fn validate_positive_integer(field: &str, value: i64, sign: Sign) -> Result<u64> {
    let (ok, message) = match sign {
        Sign::Positive => (value > 0, "value must be positive"),
        Sign::NonNegative => (value >= 0, "value must not be negative"),
    };
    if !ok {
        return Err(Error::Validation(
            ValidationError::new(message)
                .with_field(field)
                .with_reason(format!("Actual value: {}", value)),
        ));
    }
    Ok(value.unsigned_abs())
}

/// Coerce a raw value to an integer
///
/// Accepts JSON integers and integer-like strings such as `"12"`.
pub fn integer_value(field: &str, value: &Value) -> Result<i64> {
    let not_integer = |reason: String| {
        Error::Validation(
            ValidationError::new("value is not an integer")
                .with_field(field)
                .with_reason(reason),
        )
    };

    let out_of_range = |actual: String| {
        Error::Validation(
            ValidationError::new("integer is out of range")
                .with_field(field)
                .with_reason(format!("Actual value: {} (maximum {})", actual, i64::MAX)),
        )
    };

    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(i),
            None if n.is_u64() => Err(out_of_range(n.to_string())),
            None => Err(not_integer(format!("Actual value: {}", n))),
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(format!("'{}'", s)),
            _ => not_integer(format!("Actual value: '{}'", s)),
        }),
        other => Err(not_integer(format!("Actual value: {}", other))),
    }
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validate an ISO 8601 calendar date (`YYYY-MM-DD`)
pub fn validate_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        Error::Validation(
            ValidationError::new("value is not a valid date")
                .with_field(field)
                .with_reason(format!("'{}': {}", value, e)),
        )
    })
}

/// Render a date the way it is written to documents
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_validate_string() {
        assert_eq!(
            validate_string("ItemName", "  Journal of Tests ", Emptiness::Required).unwrap(),
            "Journal of Tests"
        );
        assert!(validate_string("ItemName", "   ", Emptiness::Required).is_err());
        assert_eq!(validate_string("ItemName", "", Emptiness::Allowed).unwrap(), "");
    }

    #[test]
    fn test_validate_string_rejects_non_xml_chars() {
        for bad in ["Bad\u{1}Name", "a\u{8}b", "a\u{B}b", "a\u{C}b", "a\u{1F}b", "a\u{FFFE}b"] {
            let err = validate_string("ItemName", bad, Emptiness::Required).unwrap_err();
            assert!(matches!(err, Error::Validation(ref e) if e.field.as_deref() == Some("ItemName")));
        }
        assert_eq!(
            validate_string("ItemName", "Tab\tand\nnewline \u{E9}\u{1F600}", Emptiness::Required).unwrap(),
            "Tab\tand\nnewline \u{E9}\u{1F600}"
        );
        assert!(validate_optional_string("ItemPublisher", Some("Press\u{0}")).is_err());
    }

    #[test]
    fn test_validate_optional_string() {
        assert_eq!(validate_optional_string::<&str>("ItemPublisher", None).unwrap(), None);
        assert_eq!(validate_optional_string("ItemPublisher", Some("")).unwrap(), None);
        assert_eq!(
            validate_optional_string("ItemPublisher", Some(" Press ")).unwrap(),
            Some("Press".to_string())
        );
    }

    #[test]
    fn test_validate_enumeration() {
        const CODES: &[&str] = &["Requests", "Searches"];
        assert_eq!(
            validate_enumeration("Category", "Requests".to_string(), CODES).unwrap(),
            "Requests"
        );
        let err = validate_enumeration("Category", "requests".to_string(), CODES).unwrap_err();
        assert!(matches!(err, Error::InvalidEnumeration { ref value, .. } if value == "requests"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text("Value", &json!("abc")).unwrap(), "abc");
        assert_eq!(scalar_text("Value", &json!(42)).unwrap(), "42");
        assert_eq!(scalar_text("Value", &json!(true)).unwrap(), "true");
        assert!(scalar_text("Value", &json!(null)).is_err());
        assert!(scalar_text("Value", &json!(["a"])).is_err());
        assert!(scalar_text("Value", &json!({"a": 1})).is_err());
    }

    #[test]
    fn test_validate_positive_integer() {
        assert_eq!(validate_positive_integer("Count", 5, Sign::Positive).unwrap(), 5);
        assert!(validate_positive_integer("Count", 0, Sign::Positive).is_err());
        assert_eq!(validate_positive_integer("Count", 0, Sign::NonNegative).unwrap(), 0);
        assert!(validate_positive_integer("Count", -1, Sign::NonNegative).is_err());
    }

    #[test]
    fn test_integer_value() {
        assert_eq!(integer_value("Count", &json!(5)).unwrap(), 5);
        assert_eq!(integer_value("Count", &json!("12")).unwrap(), 12);
        assert_eq!(integer_value("Count", &json!(" 7 ")).unwrap(), 7);
        assert_eq!(integer_value("Count", &json!(-3)).unwrap(), -3);
        assert!(integer_value("Count", &json!(5.5)).is_err());
        assert!(integer_value("Count", &json!("5.5")).is_err());
        assert!(integer_value("Count", &json!("five")).is_err());
        assert!(integer_value("Count", &json!(true)).is_err());
        assert!(integer_value("Count", &json!(null)).is_err());
    }

    #[test]
    fn test_integer_value_out_of_range() {
        let too_big = json!(9_223_372_036_854_775_808u64);
        let err = integer_value("Count", &too_big).unwrap_err();
        assert!(matches!(err, Error::Validation(ref e) if e.message == "integer is out of range"));

        let err = integer_value("Count", &json!("99999999999999999999")).unwrap_err();
        assert!(matches!(err, Error::Validation(ref e) if e.message == "integer is out of range"));
    }

    #[test]
    fn test_validate_date() {
        let date = validate_date("Begin", "2015-01-31").unwrap();
        assert_eq!(format_date(&date), "2015-01-31");
        assert!(validate_date("Begin", "2015-02-30").is_err());
        assert!(validate_date("Begin", "31/01/2015").is_err());
    }

    proptest! {
        #[test]
        fn prop_non_positive_always_rejected(value in i64::MIN..=0) {
            prop_assert!(validate_positive_integer("Count", value, Sign::Positive).is_err());
        }

        #[test]
        fn prop_positive_round_trips(value in 1i64..=i64::MAX) {
            prop_assert_eq!(
                validate_positive_integer("Count", value, Sign::Positive).unwrap(),
                value as u64
            );
        }

        #[test]
        fn prop_integer_strings_parse(value in any::<i64>()) {
            prop_assert_eq!(integer_value("Count", &json!(value.to_string())).unwrap(), value);
        }
    }
}
