//! Report items (`ReportItems`)
//!
//! One row of a COUNTER report: the item being counted, how to identify
//! it, and one or more metrics of its usage.

use serde_json::Value;

use super::attribute::ItemAttribute;
use super::base::{
    build_multiple, has_required_fields, optional_text, present, required_text, FieldSpec,
    FieldValue, SchemaElement,
};
use super::contributor::ItemContributor;
use super::dates::ItemDate;
use super::identifier::Identifier;
use super::parent_item::ParentItem;
use super::performance::Metric;
use crate::codes::ITEM_DATA_TYPES;
use crate::error::Result;
use crate::validators::{
    validate_enumeration, validate_one_or_more_of, validate_optional_string, validate_string,
    validate_zero_or_more_of, validate_zero_or_one_of, Cardinality, Emptiness,
};

/// A counted item with its usage metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItems {
    parent_item: Option<ParentItem>,
    identifiers: Vec<Identifier>,
    contributors: Vec<ItemContributor>,
    dates: Vec<ItemDate>,
    attributes: Vec<ItemAttribute>,
    platform: String,
    publisher: Option<String>,
    name: String,
    data_type: String,
    performance: Vec<Metric>,
}

impl ReportItems {
    /// Create a new report item
    ///
    /// Required: `platform`, `name`, `data_type` (an item data type code) and
    /// at least one `performance` metric. The parent item and publisher are
    /// optional; the remaining collections may be empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        platform: impl Into<String>,
        name: impl Into<String>,
        data_type: impl Into<String>,
        performance: Vec<Metric>,
        parent_item: Option<ParentItem>,
        identifiers: Vec<Identifier>,
        contributors: Vec<ItemContributor>,
        dates: Vec<ItemDate>,
        attributes: Vec<ItemAttribute>,
        publisher: Option<String>,
    ) -> Result<Self> {
        let platform = validate_string("ItemPlatform", platform, Emptiness::Required)?;
        let name = validate_string("ItemName", name, Emptiness::Required)?;
        let data_type = validate_string("ItemDataType", data_type, Emptiness::Required)?;
        let data_type = validate_enumeration("ItemDataType", data_type, ITEM_DATA_TYPES)?;

        Ok(Self {
            parent_item: validate_zero_or_one_of("ParentItem", parent_item)?,
            identifiers: validate_zero_or_more_of("ItemIdentifier", identifiers)?,
            contributors: validate_zero_or_more_of("ItemContributor", contributors)?,
            dates: validate_zero_or_more_of("ItemDate", dates)?,
            attributes: validate_zero_or_more_of("ItemAttribute", attributes)?,
            platform,
            publisher: validate_optional_string("ItemPublisher", publisher)?,
            name,
            data_type,
            performance: validate_one_or_more_of("ItemPerformance", performance)?,
        })
    }

    /// Get the parent item
    pub fn parent_item(&self) -> Option<&ParentItem> {
        self.parent_item.as_ref()
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

    /// Get the platform name
    pub fn platform(&self) -> &str {
        &self.platform
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

    /// Get the usage metrics
    pub fn performance(&self) -> &[Metric] {
        &self.performance
    }
}

impl SchemaElement for ReportItems {
    const TAG: &'static str = "ReportItems";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::element("ParentItem", Cardinality::ZeroOrOne),
        FieldSpec::element("ItemIdentifier", Cardinality::ZeroOrMore),
        FieldSpec::element("ItemContributor", Cardinality::ZeroOrMore),
        FieldSpec::element("ItemDate", Cardinality::ZeroOrMore),
        FieldSpec::element("ItemAttribute", Cardinality::ZeroOrMore),
        FieldSpec::text("ItemPlatform", Cardinality::ExactlyOne),
        FieldSpec::text("ItemPublisher", Cardinality::ZeroOrOne),
        FieldSpec::text("ItemName", Cardinality::ExactlyOne),
        FieldSpec::text("ItemDataType", Cardinality::ExactlyOne),
        FieldSpec::element("ItemPerformance", Cardinality::OneOrMore),
    ];

    fn build(raw: &Value) -> Result<Self> {
        let map = match raw.as_object() {
            Some(map) if has_required_fields::<Self>(map) => map,
            _ => return Self::build_fallback(raw),
        };
        tracing::trace!(element = Self::TAG, shape = "structured", "building element");

        let parent_items = build_multiple::<ParentItem>(present(map, "ParentItem"))?;
        Self::new(
            required_text(map, "ItemPlatform")?,
            required_text(map, "ItemName")?,
            required_text(map, "ItemDataType")?,
            build_multiple(present(map, "ItemPerformance"))?,
            validate_zero_or_one_of("ParentItem", parent_items)?,
            build_multiple(present(map, "ItemIdentifier"))?,
            build_multiple(present(map, "ItemContributor"))?,
            build_multiple(present(map, "ItemDate"))?,
            build_multiple(present(map, "ItemAttribute"))?,
            optional_text(map, "ItemPublisher")?,
        )
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "ParentItem" => FieldValue::children(self.parent_item.iter()),
            "ItemIdentifier" => FieldValue::children(&self.identifiers),
            "ItemContributor" => FieldValue::children(&self.contributors),
            "ItemDate" => FieldValue::children(&self.dates),
            "ItemAttribute" => FieldValue::children(&self.attributes),
            "ItemPlatform" => FieldValue::text(&self.platform),
            "ItemPublisher" => FieldValue::optional_text(self.publisher.as_deref()),
            "ItemName" => FieldValue::text(&self.name),
            "ItemDataType" => FieldValue::text(&self.data_type),
            "ItemPerformance" => FieldValue::children(&self.performance),
            _ => FieldValue::Absent,
        }
    }
}
