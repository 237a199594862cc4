//! Error types for counter-reports
//!
//! This module defines all error types used throughout the library.
//! Every failure is raised synchronously at construction or build time;
//! an element either satisfies its invariants or does not exist.

use std::fmt;
use thiserror::Error;

use crate::validators::Cardinality;

/// Result type alias using counter-reports Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for counter-reports operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field value failed its type, shape or sign check
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A string field is not one of the codes allowed for it
    #[error("invalid {field}: '{value}' (allowed: {})", .allowed.join(", "))]
    InvalidEnumeration {
        /// Field name
        field: String,
        /// Offending value
        value: String,
        /// The allowed code set
        allowed: Vec<&'static str>,
    },

    /// A collection field violates its occurrence constraint
    #[error("cardinality error: {0}")]
    Cardinality(#[from] CardinalityError),

    /// Build input matched none of the shapes the element accepts
    #[error("malformed input for {element}: {data}")]
    MalformedInput {
        /// Element tag that rejected the data
        element: String,
        /// Compact rendering of the offending data
        data: String,
    },

    /// Input exceeded a configured limit
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// XML reading or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a malformed input error for an element tag
    pub fn malformed(element: impl Into<String>, data: &serde_json::Value) -> Self {
        Error::MalformedInput {
            element: element.into(),
            data: data.to_string(),
        }
    }

    /// True for value-level failures, including enumeration mismatches
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::InvalidEnumeration { .. }
        )
    }
}

/// Field validation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Field that failed validation
    pub field: Option<String>,
    /// Element tag the field belongs to
    pub element: Option<String>,
    /// Underlying reason
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            element: None,
            reason: None,
        }
    }

    /// Set the field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the element tag
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.element, &self.field) {
            (Some(element), Some(field)) => write!(f, "{}/{}: ", element, field)?,
            (None, Some(field)) => write!(f, "{}: ", field)?,
            (Some(element), None) => write!(f, "{}: ", element)?,
            (None, None) => {}
        }
        write!(f, "{}", self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, " ({})", reason)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Occurrence violation for a child collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardinalityError {
    /// Field that was violated
    pub field: String,
    /// Declared cardinality
    pub expected: Cardinality,
    /// Number of members supplied
    pub actual: usize,
    /// Set when a member has the wrong element type
    pub mismatched: Option<String>,
}

impl CardinalityError {
    /// Create an occurrence error
    pub fn new(field: impl Into<String>, expected: Cardinality, actual: usize) -> Self {
        Self {
            field: field.into(),
            expected,
            actual,
            mismatched: None,
        }
    }

    /// Record the tag of a member that does not conform to the field type
    pub fn with_mismatched(mut self, tag: impl Into<String>) -> Self {
        self.mismatched = Some(tag.into());
        self
    }
}

impl fmt::Display for CardinalityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mismatched {
            Some(tag) => write!(
                f,
                "{} expects {} element(s), got a {} member",
                self.field, self.expected, tag
            ),
            None => write!(
                f,
                "{} expects {}, got {} member(s)",
                self.field, self.expected, self.actual
            ),
        }
    }
}

impl std::error::Error for CardinalityError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("value must not be empty")
            .with_element("ReportItems")
            .with_field("ItemName")
            .with_reason("got only whitespace");

        let msg = format!("{}", err);
        assert_eq!(
            msg,
            "ReportItems/ItemName: value must not be empty (got only whitespace)"
        );
    }

    #[test]
    fn test_cardinality_error_display() {
        let err = CardinalityError::new("ItemPerformance", Cardinality::OneOrMore, 0);
        let msg = format!("{}", err);
        assert!(msg.contains("ItemPerformance"));
        assert!(msg.contains("one or more"));
        assert!(msg.contains("got 0"));

        let err = CardinalityError::new("ParentItem", Cardinality::ZeroOrOne, 1)
            .with_mismatched("ItemDate");
        assert!(format!("{}", err).contains("ItemDate member"));
    }

    #[test]
    fn test_invalid_enumeration_display() {
        let err = Error::InvalidEnumeration {
            field: "Category".to_string(),
            value: "Downloads".to_string(),
            allowed: vec!["Requests", "Searches"],
        };
        assert_eq!(
            err.to_string(),
            "invalid Category: 'Downloads' (allowed: Requests, Searches)"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_malformed_input() {
        let err = Error::malformed("Instance", &json!([1, 2]));
        assert_eq!(err.to_string(), "malformed input for Instance: [1,2]");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_conversion() {
        let val_err = ValidationError::new("test");
        let err: Error = val_err.into();
        assert!(matches!(err, Error::Validation(_)));

        let card_err = CardinalityError::new("Instance", Cardinality::OneOrMore, 0);
        let err: Error = card_err.into();
        assert!(matches!(err, Error::Cardinality(_)));
    }
}
