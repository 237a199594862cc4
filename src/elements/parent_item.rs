//! Parent item (`ParentItem`): the journal or book a report item belongs to

use serde_json::Value;

use super::attribute::ItemAttribute;
use super::base::{
    build_multiple, has_required_fields, optional_text, present, required_text, FieldSpec,
    FieldValue, SchemaElement,
};
use super::contributor::ItemContributor;
use super::dates::ItemDate;
use super::identifier::Identifier;
use crate::codes::ITEM_DATA_TYPES;
use crate::error::Result;
use crate::validators::{
    validate_enumeration, validate_optional_string, validate_string, validate_zero_or_more_of,
    Cardinality, Emptiness,
};

/// Container of a report item, described by name and data type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentItem {
    identifiers: Vec<Identifier>,
    contributors: Vec<ItemContributor>,
    dates: Vec<ItemDate>,
    attributes: Vec<ItemAttribute>,
    publisher: Option<String>,
    name: String,
    data_type: String,
}

impl ParentItem {
    /// Create a new parent item
    ///
    /// `name` and `data_type` are required; the collections may be empty and
    /// an empty or absent publisher is omitted from the document.
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        identifiers: Vec<Identifier>,
        contributors: Vec<ItemContributor>,
        dates: Vec<ItemDate>,
        attributes: Vec<ItemAttribute>,
        publisher: Option<String>,
    ) -> Result<Self> {
        let name = validate_string("ItemName", name, Emptiness::Required)?;
        let data_type = validate_string("ItemDataType", data_type, Emptiness::Required)?;
        let data_type = validate_enumeration("ItemDataType", data_type, ITEM_DATA_TYPES)?;

        Ok(Self {
            identifiers: validate_zero_or_more_of("ItemIdentifier", identifiers)?,
            contributors: validate_zero_or_more_of("ItemContributor", contributors)?,
            dates: validate_zero_or_more_of("ItemDate", dates)?,
            attributes: validate_zero_or_more_of("ItemAttribute", attributes)?,
            publisher: validate_optional_string("ItemPublisher", publisher)?,
            name,
            data_type,
        })
    }

    /// Get the identifiers
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Get the contributors
    pub fn contributors(&self) -> &[ItemContributor] {
        &self.contributors
    }

    /// Get the dates
    pub fn dates(&self) -> &[ItemDate] {
        &self.dates
    }

    /// Get the attributes
    pub fn attributes(&self) -> &[ItemAttribute] {
        &self.attributes
    }

    /// Get the publisher name
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    /// Get the item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the item data type code
    pub fn data_type(&self) -> &str {
        &self.data_type
    }
}

impl SchemaElement for ParentItem {
    const TAG: &'static str = "ParentItem";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::element("ItemIdentifier", Cardinality::ZeroOrMore),
        FieldSpec::element("ItemContributor", Cardinality::ZeroOrMore),
        FieldSpec::element("ItemDate", Cardinality::ZeroOrMore),
        FieldSpec::element("ItemAttribute", Cardinality::ZeroOrMore),
        FieldSpec::text("ItemPublisher", Cardinality::ZeroOrOne),
        FieldSpec::text("ItemName", Cardinality::ExactlyOne),
        FieldSpec::text("ItemDataType", Cardinality::ExactlyOne),
    ];

    fn build(raw: &Value) -> Result<Self> {
        match raw.as_object() {
            Some(map) if has_required_fields::<Self>(map) => Self::new(
                required_text(map, "ItemName")?,
                required_text(map, "ItemDataType")?,
                build_multiple(present(map, "ItemIdentifier"))?,
                build_multiple(present(map, "ItemContributor"))?,
                build_multiple(present(map, "ItemDate"))?,
                build_multiple(present(map, "ItemAttribute"))?,
                optional_text(map, "ItemPublisher")?,
            ),
            _ => Self::build_fallback(raw),
        }
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "ItemIdentifier" => FieldValue::children(&self.identifiers),
            "ItemContributor" => FieldValue::children(&self.contributors),
            "ItemDate" => FieldValue::children(&self.dates),
            "ItemAttribute" => FieldValue::children(&self.attributes),
            "ItemPublisher" => FieldValue::optional_text(self.publisher.as_deref()),
            "ItemName" => FieldValue::text(&self.name),
            "ItemDataType" => FieldValue::text(&self.data_type),
            _ => FieldValue::Absent,
        }
    }
}
