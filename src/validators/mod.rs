//! Element validators
//!
//! Stateless checks invoked by every element constructor. Each routine
//! takes a candidate value, returns the validated (and normalized) value,
//! or fails. None of them mutate anything or perform I/O.

pub mod cardinality;
pub mod helpers;

// Re-exports
pub use cardinality::{
    validate_one_or_more_of, validate_zero_or_more_of, validate_zero_or_one_of, Cardinality,
};
pub use helpers::{
    format_date, integer_value, scalar_text, validate_date, validate_enumeration,
    validate_optional_string, validate_positive_integer, validate_string, Emptiness, Sign,
};
