//! Item contributors (`ItemContributor`) and their identifiers

use serde_json::Value;

use super::base::{
    build_multiple, has_required_fields, optional_text, present, required_text, text_list,
    FieldSpec, FieldValue, RawMap, SchemaElement,
};
use crate::codes::CONTRIBUTOR_ID_TYPES;
use crate::error::{Error, Result, ValidationError};
use crate::validators::{
    validate_enumeration, validate_optional_string, validate_string, validate_zero_or_one_of,
    Cardinality, Emptiness,
};

/// Identifier of a contributor, e.g. an ORCID iD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorIdentifier {
    id_type: String,
    value: String,
}

impl ContributorIdentifier {
    /// Create a new contributor identifier
    pub fn new(id_type: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let id_type = validate_string("Type", id_type, Emptiness::Required)?;
        let id_type = validate_enumeration("Type", id_type, CONTRIBUTOR_ID_TYPES)?;
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

impl SchemaElement for ContributorIdentifier {
    const TAG: &'static str = "ItemContributorID";
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

/// Author, editor or other contributor of a report item
///
/// The schema makes every field optional; a contributor still needs an
/// identifier or a name to say who it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContributor {
    contributor_id: Option<ContributorIdentifier>,
    name: Option<String>,
    affiliations: Vec<String>,
    roles: Vec<String>,
}

impl ItemContributor {
    /// Create a new contributor
    pub fn new(
        contributor_id: Option<ContributorIdentifier>,
        name: Option<String>,
        affiliations: Vec<String>,
        roles: Vec<String>,
    ) -> Result<Self> {
        let name = validate_optional_string("ItemContributorName", name)?;
        if contributor_id.is_none() && name.is_none() {
            return Err(Error::Validation(
                ValidationError::new("contributor needs an ItemContributorID or an ItemContributorName")
                    .with_element(Self::TAG),
            ));
        }
        let affiliations = affiliations
            .into_iter()
            .map(|a| validate_string("ItemContributorAffiliation", a, Emptiness::Required))
            .collect::<Result<Vec<_>>>()?;
        let roles = roles
            .into_iter()
            .map(|r| validate_string("ItemContributorRole", r, Emptiness::Required))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            contributor_id,
            name,
            affiliations,
            roles,
        })
    }

    /// Create a contributor known only by name
    pub fn named(name: impl Into<String>) -> Result<Self> {
        Self::new(None, Some(name.into()), Vec::new(), Vec::new())
    }

    /// Get the contributor identifier
    pub fn contributor_id(&self) -> Option<&ContributorIdentifier> {
        self.contributor_id.as_ref()
    }

    /// Get the contributor name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the affiliations
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    /// Get the roles
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl SchemaElement for ItemContributor {
    const TAG: &'static str = "ItemContributor";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::element("ItemContributorID", Cardinality::ZeroOrOne),
        FieldSpec::text("ItemContributorName", Cardinality::ZeroOrOne),
        FieldSpec::text("ItemContributorAffiliation", Cardinality::ZeroOrMore),
        FieldSpec::text("ItemContributorRole", Cardinality::ZeroOrMore),
    ];

    fn build(raw: &Value) -> Result<Self> {
        let map = match raw.as_object() {
            Some(map) if carries(map, "ItemContributorID") || carries(map, "ItemContributorName") => map,
            _ => return Self::build_fallback(raw),
        };

        let ids = build_multiple::<ContributorIdentifier>(present(map, "ItemContributorID"))?;
        Self::new(
            validate_zero_or_one_of("ItemContributorID", ids)?,
            optional_text(map, "ItemContributorName")?,
            text_list(map, "ItemContributorAffiliation")?,
            text_list(map, "ItemContributorRole")?,
        )
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "ItemContributorID" => FieldValue::children(self.contributor_id.iter()),
            "ItemContributorName" => FieldValue::optional_text(self.name.as_deref()),
            "ItemContributorAffiliation" => FieldValue::Texts(self.affiliations.clone()),
            "ItemContributorRole" => FieldValue::Texts(self.roles.clone()),
            _ => FieldValue::Absent,
        }
    }
}

/// Check if a key holds a value; an empty list counts as absent
fn carries(map: &RawMap, key: &str) -> bool {
    match present(map, key) {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
        None => false,
    }
}
