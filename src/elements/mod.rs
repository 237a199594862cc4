//! COUNTER report elements
//!
//! Each concrete element validates on construction, builds from raw JSON
//! input through [`SchemaElement::build`], and renders itself as a
//! standalone XML [`Document`](crate::documents::Document) whose children
//! follow the schema's content-model order.

pub mod attribute;
pub mod base;
pub mod contributor;
pub mod dates;
pub mod identifier;
pub mod parent_item;
pub mod performance;
pub mod registry;
pub mod report_items;

// Re-exports
pub use attribute::ItemAttribute;
pub use base::{build_multiple, compose, FieldContent, FieldSpec, FieldValue, SchemaElement};
pub use contributor::{ContributorIdentifier, ItemContributor};
pub use dates::{DateRange, ItemDate};
pub use identifier::Identifier;
pub use parent_item::ParentItem;
pub use performance::{Metric, PerformanceCounter};
pub use registry::{
    build_element, build_with_limits, expect_kind, field_specs, members_of, registered_tags,
    AnyElement, Registration,
};
pub use report_items::ReportItems;
