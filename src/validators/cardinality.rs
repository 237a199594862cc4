//! Occurrence constraints for element fields
//!
//! Every field of a schema element has one of four cardinality classes.
//! The collection validators here enforce them on child collections.

use crate::error::{CardinalityError, Result};
use serde::Serialize;
use std::fmt;

/// Occurrence class of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cardinality {
    /// Exactly one occurrence
    ExactlyOne,
    /// Optional, at most one occurrence
    ZeroOrOne,
    /// Any number of occurrences
    ZeroOrMore,
    /// At least one occurrence
    OneOrMore,
}

impl Cardinality {
    /// Minimum number of occurrences
    pub fn min(&self) -> usize {
        match self {
            Cardinality::ExactlyOne | Cardinality::OneOrMore => 1,
            Cardinality::ZeroOrOne | Cardinality::ZeroOrMore => 0,
        }
    }

    /// Maximum number of occurrences (None = unbounded)
    pub fn max(&self) -> Option<usize> {
        match self {
            Cardinality::ExactlyOne | Cardinality::ZeroOrOne => Some(1),
            Cardinality::ZeroOrMore | Cardinality::OneOrMore => None,
        }
    }

    /// Check if the field must be present
    pub fn is_required(&self) -> bool {
        self.min() > 0
    }

    /// Check if the field can hold more than one value
    pub fn is_multiple(&self) -> bool {
        self.max().is_none()
    }

    /// Check if occurrence count is under the minimum
    pub fn is_missing(&self, count: usize) -> bool {
        count < self.min()
    }

    /// Check if occurrence count exceeds the maximum
    pub fn is_exceeded(&self, count: usize) -> bool {
        match self.max() {
            Some(max) => count > max,
            None => false,
        }
    }

    /// Check an occurrence count against both bounds
    pub fn check(&self, field: &str, count: usize) -> Result<()> {
        if self.is_missing(count) || self.is_exceeded(count) {
            return Err(CardinalityError::new(field, *self, count).into());
        }
        Ok(())
    }

    /// Get the cardinality as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::ExactlyOne => "exactly one",
            Cardinality::ZeroOrOne => "zero or one",
            Cardinality::ZeroOrMore => "zero or more",
            Cardinality::OneOrMore => "one or more",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validate a collection that must hold at least one member
pub fn validate_one_or_more_of<T>(field: &str, items: Vec<T>) -> Result<Vec<T>> {
    Cardinality::OneOrMore.check(field, items.len())?;
    Ok(items)
}

/// Validate an optional single member
///
/// Accepts an `Option` as well as a collection that arrived from raw data.
pub fn validate_zero_or_one_of<T>(
    field: &str,
    items: impl IntoIterator<Item = T>,
) -> Result<Option<T>> {
    let mut items: Vec<T> = items.into_iter().collect();
    Cardinality::ZeroOrOne.check(field, items.len())?;
    Ok(items.pop())
}

/// Validate a collection that may be empty
pub fn validate_zero_or_more_of<T>(field: &str, items: Vec<T>) -> Result<Vec<T>> {
    Cardinality::ZeroOrMore.check(field, items.len())?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_bounds() {
        assert_eq!(Cardinality::ExactlyOne.min(), 1);
        assert_eq!(Cardinality::ExactlyOne.max(), Some(1));
        assert_eq!(Cardinality::ZeroOrMore.max(), None);
        assert!(Cardinality::OneOrMore.is_required());
        assert!(!Cardinality::ZeroOrOne.is_required());
        assert!(Cardinality::OneOrMore.is_multiple());
    }

    #[test]
    fn test_check() {
        assert!(Cardinality::ExactlyOne.check("Count", 1).is_ok());
        assert!(Cardinality::ExactlyOne.check("Count", 0).is_err());
        assert!(Cardinality::ExactlyOne.check("Count", 2).is_err());
        assert!(Cardinality::ZeroOrMore.check("ItemDate", 0).is_ok());
        assert!(Cardinality::ZeroOrMore.check("ItemDate", 500).is_ok());
    }

    #[test]
    fn test_one_or_more_preserves_order() {
        let items = validate_one_or_more_of("Instance", vec![3, 1, 2]).unwrap();
        assert_eq!(items, vec![3, 1, 2]);

        let err = validate_one_or_more_of::<u8>("Instance", vec![]).unwrap_err();
        match err {
            Error::Cardinality(e) => {
                assert_eq!(e.field, "Instance");
                assert_eq!(e.expected, Cardinality::OneOrMore);
                assert_eq!(e.actual, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_or_one() {
        assert_eq!(validate_zero_or_one_of("ParentItem", None::<u8>).unwrap(), None);
        assert_eq!(validate_zero_or_one_of("ParentItem", Some(7)).unwrap(), Some(7));
        assert_eq!(validate_zero_or_one_of("ParentItem", vec![7]).unwrap(), Some(7));
        assert!(matches!(
            validate_zero_or_one_of("ParentItem", vec![1, 2]),
            Err(Error::Cardinality(_))
        ));
    }

    #[test]
    fn test_zero_or_more() {
        assert!(validate_zero_or_more_of::<u8>("ItemIdentifier", vec![]).unwrap().is_empty());
        assert_eq!(
            validate_zero_or_more_of("ItemIdentifier", vec!["a", "b"]).unwrap(),
            vec!["a", "b"]
        );
    }
}
