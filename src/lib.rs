//! # counter-reports
//!
//! Typed, validated element model for COUNTER usage reports, serialized to
//! schema-ordered XML.
//!
//! ## Features
//!
//! - Immutable report elements validated at construction
//! - Building elements from raw JSON data, including the `{metric: count}`
//!   shorthand for counters
//! - Registry dispatch by element tag
//! - Per-element XML documents composed into a single report tree
//! - Limits on untrusted build input
//!
//! ## Example
//!
//! ```rust
//! use counter_reports::elements::{DateRange, Metric, PerformanceCounter, SchemaElement};
//!
//! let metric = Metric::new(
//!     DateRange::parse("2015-01-01", "2015-01-31")?,
//!     "Requests",
//!     vec![PerformanceCounter::new("ft_pdf", 5)?],
//! )?;
//!
//! let xml = metric.as_document().to_xml_string()?;
//! assert!(xml.contains("<Category>Requests</Category>"));
//! # Ok::<(), counter_reports::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Code sets and validation
pub mod codes;
pub mod validators;

// Documents and elements
pub mod documents;
pub mod elements;

// Re-exports for convenience
pub use documents::{Document, Element, WriterConfig};
pub use elements::{build_element, AnyElement, SchemaElement};
pub use error::{Error, Result};
pub use limits::Limits;

/// Version of the counter-reports library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
