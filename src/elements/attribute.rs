//! Item attributes (`ItemAttribute`)

use serde_json::Value;

use super::base::{has_required_fields, required_text, FieldSpec, FieldValue, SchemaElement};
use crate::codes::ITEM_ATTRIBUTE_TYPES;
use crate::error::Result;
use crate::validators::{validate_enumeration, validate_string, Cardinality, Emptiness};

/// Typed attribute of a report item, e.g. its article version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAttribute {
    attribute_type: String,
    value: String,
}

impl ItemAttribute {
    /// Create a new item attribute
    pub fn new(attribute_type: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let attribute_type = validate_string("Type", attribute_type, Emptiness::Required)?;
        let attribute_type = validate_enumeration("Type", attribute_type, ITEM_ATTRIBUTE_TYPES)?;
        let value = validate_string("Value", value, Emptiness::Required)?;
        Ok(Self {
            attribute_type,
            value,
        })
    }

    /// Get the attribute type code
    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    /// Get the attribute value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl SchemaElement for ItemAttribute {
    const TAG: &'static str = "ItemAttribute";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("Type", Cardinality::ExactlyOne),
        FieldSpec::text("Value", Cardinality::ExactlyOne),
    ];

    fn build(raw: &Value) -> Result<Self> {
        match raw.as_object() {
            Some(map) if has_required_fields::<Self>(map) => {
                Self::new(required_text(map, "Type")?, required_text(map, "Value")?)
            }
            _ => Self::build_fallback(raw),
        }
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "Type" => FieldValue::text(&self.attribute_type),
            "Value" => FieldValue::text(&self.value),
            _ => FieldValue::Absent,
        }
    }
}
