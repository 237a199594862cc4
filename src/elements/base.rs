//! Base element infrastructure
//!
//! This module provides the [`SchemaElement`] trait every concrete report
//! element implements, the ordered field table that drives document
//! composition, and the helpers `build` implementations share.

use crate::documents::Document;
use crate::error::{Error, Result};
use crate::validators::{scalar_text, Cardinality};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Raw input object handed to `build`
pub type RawMap = Map<String, Value>;

/// What a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldContent {
    /// Text leaf element(s) named for the field
    Text,
    /// Child schema element(s) whose tag is the field name
    Element,
}

/// One field role in an element's schema-ordered content model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field name; also the emitted element name
    pub name: &'static str,
    /// Occurrence class
    pub cardinality: Cardinality,
    /// Text or child element
    pub content: FieldContent,
}

impl FieldSpec {
    /// A text field
    pub const fn text(name: &'static str, cardinality: Cardinality) -> Self {
        Self {
            name,
            cardinality,
            content: FieldContent::Text,
        }
    }

    /// A child element field
    pub const fn element(name: &'static str, cardinality: Cardinality) -> Self {
        Self {
            name,
            cardinality,
            content: FieldContent::Element,
        }
    }

    /// Check if the field must be present in structured input
    pub fn is_required(&self) -> bool {
        self.cardinality.is_required()
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.cardinality)
    }
}

/// Rendered content of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single text value; `None` emits nothing
    Text(Option<String>),
    /// Repeated text values, one leaf each
    Texts(Vec<String>),
    /// Standalone child documents to graft, in order
    Children(Vec<Document>),
    /// The element has no such field
    Absent,
}

impl FieldValue {
    /// A present text value
    pub fn text(value: impl ToString) -> Self {
        FieldValue::Text(Some(value.to_string()))
    }

    /// An optional text value
    pub fn optional_text(value: Option<&str>) -> Self {
        FieldValue::Text(value.map(str::to_string))
    }

    /// A single child element
    pub fn child<T: SchemaElement>(child: &T) -> Self {
        FieldValue::Children(vec![child.as_document()])
    }

    /// Any number of child elements, each rendered to its own document
    pub fn children<'a, T: SchemaElement + 'a>(children: impl IntoIterator<Item = &'a T>) -> Self {
        FieldValue::Children(children.into_iter().map(|child| child.as_document()).collect())
    }
}

/// Contract every COUNTER schema element satisfies
///
/// Implementations validate in their constructor and are immutable
/// afterwards. `build` accepts raw input and must route through the same
/// constructor, so both paths enforce the same invariants.
pub trait SchemaElement: Sized + fmt::Debug + Clone + PartialEq {
    /// Name of the root element this type renders
    const TAG: &'static str;

    /// Fields in the order the schema's content model declares them
    const FIELDS: &'static [FieldSpec];

    /// Build an element from raw input data
    fn build(raw: &Value) -> Result<Self>;

    /// Render the content of one field
    fn render_field(&self, field: &FieldSpec) -> FieldValue;

    /// Fallback for input matching none of the accepted shapes
    fn build_fallback(raw: &Value) -> Result<Self> {
        tracing::debug!(element = Self::TAG, "no input shape matched");
        Err(Error::malformed(Self::TAG, raw))
    }

    /// Render this element and its subtree as a standalone document
    fn as_document(&self) -> Document {
        compose(self)
    }
}

/// Compose a document by walking the field table in schema order
pub fn compose<T: SchemaElement>(element: &T) -> Document {
    let mut doc = Document::new(T::TAG);
    for field in T::FIELDS {
        match element.render_field(field) {
            FieldValue::Text(Some(text)) => doc.append_leaf(field.name, text),
            FieldValue::Texts(texts) => {
                for text in texts {
                    doc.append_leaf(field.name, text);
                }
            }
            FieldValue::Children(children) => {
                for child in children {
                    doc.graft(child);
                }
            }
            FieldValue::Text(None) | FieldValue::Absent => {}
        }
    }
    doc
}

// =============================================================================
// Build helpers
// =============================================================================

/// Look up a key, treating `null` as absent
pub fn present<'a>(map: &'a RawMap, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Check whether an object carries every required field of `T`
pub fn has_required_fields<T: SchemaElement>(map: &RawMap) -> bool {
    T::FIELDS
        .iter()
        .filter(|field| field.is_required())
        .all(|field| present(map, field.name).is_some())
}

/// Check whether an object's keys are the indices `0..n`, i.e. a list in disguise
pub fn is_indexed(map: &RawMap) -> bool {
    let mut indices = Vec::with_capacity(map.len());
    for key in map.keys() {
        match key.parse::<usize>() {
            Ok(index) => indices.push(index),
            Err(_) => return false,
        }
    }
    indices.sort_unstable();
    indices.iter().enumerate().all(|(position, index)| position == *index)
}

/// Build a sequence of `T` from an optional raw value
///
/// Arrays build each member in order, a single value builds one member,
/// absent or `null` yields an empty sequence.
pub fn build_multiple<T: SchemaElement>(raw: Option<&Value>) -> Result<Vec<T>> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(T::build).collect(),
        Some(single) => Ok(vec![T::build(single)?]),
    }
}

/// Text of a required field (callers check presence first)
pub fn required_text(map: &RawMap, key: &str) -> Result<String> {
    scalar_text(key, map.get(key).unwrap_or(&Value::Null))
}

/// Text of an optional field
pub fn optional_text(map: &RawMap, key: &str) -> Result<Option<String>> {
    present(map, key).map(|value| scalar_text(key, value)).transpose()
}

/// Texts of a repeated field; a lone scalar counts as one value
pub fn text_list(map: &RawMap, key: &str) -> Result<Vec<String>> {
    match present(map, key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(|item| scalar_text(key, item)).collect(),
        Some(single) => Ok(vec![scalar_text(key, single)?]),
    }
}
