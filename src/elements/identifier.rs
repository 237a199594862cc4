//! Item identifiers (`ItemIdentifier`)

use serde_json::Value;

use super::base::{has_required_fields, required_text, FieldSpec, FieldValue, SchemaElement};
use crate::codes::IDENTIFIER_TYPES;
use crate::error::Result;
use crate::validators::{validate_enumeration, validate_string, Cardinality, Emptiness};

/// Identifier of a report item, e.g. its DOI or online ISSN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    id_type: String,
    value: String,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(id_type: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let id_type = validate_string("Type", id_type, Emptiness::Required)?;
        let id_type = validate_enumeration("Type", id_type, IDENTIFIER_TYPES)?;
        let value = validate_string("Value", value, Emptiness::Required)?;
        Ok(Self { id_type, value })
    }

    /// Get the identifier type code
    pub fn id_type(&self) -> &str {
        &self.id_type
    }

    /// Get the identifier value
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl SchemaElement for Identifier {
    const TAG: &'static str = "ItemIdentifier";
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
            "Type" => FieldValue::text(&self.id_type),
            "Value" => FieldValue::text(&self.value),
            _ => FieldValue::Absent,
        }
    }
}
