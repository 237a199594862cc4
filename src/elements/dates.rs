//! Date-valued elements: `ItemDate` and the `Period` date range

use chrono::NaiveDate;
use serde_json::Value;

use super::base::{has_required_fields, required_text, FieldSpec, FieldValue, SchemaElement};
use crate::codes::ITEM_DATE_TYPES;
use crate::error::{Error, Result, ValidationError};
use crate::validators::{
    format_date, validate_date, validate_enumeration, validate_string, Cardinality, Emptiness,
};

/// Typed date of a report item, e.g. its publication date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDate {
    date_type: String,
    value: NaiveDate,
}

impl ItemDate {
    /// Create a new item date
    pub fn new(date_type: impl Into<String>, value: NaiveDate) -> Result<Self> {
        let date_type = validate_string("Type", date_type, Emptiness::Required)?;
        let date_type = validate_enumeration("Type", date_type, ITEM_DATE_TYPES)?;
        Ok(Self { date_type, value })
    }

    /// Get the date type code
    pub fn date_type(&self) -> &str {
        &self.date_type
    }

    /// Get the date
    pub fn value(&self) -> NaiveDate {
        self.value
    }
}

impl SchemaElement for ItemDate {
    const TAG: &'static str = "ItemDate";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("Type", Cardinality::ExactlyOne),
        FieldSpec::text("Value", Cardinality::ExactlyOne),
    ];

    fn build(raw: &Value) -> Result<Self> {
        match raw.as_object() {
            Some(map) if has_required_fields::<Self>(map) => {
                let value = validate_date("Value", &required_text(map, "Value")?)?;
                Self::new(required_text(map, "Type")?, value)
            }
            _ => Self::build_fallback(raw),
        }
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "Type" => FieldValue::text(&self.date_type),
            "Value" => FieldValue::text(format_date(&self.value)),
            _ => FieldValue::Absent,
        }
    }
}

/// Reporting period covered by a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    begin: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a new date range; `end` must not precede `begin`
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < begin {
            return Err(Error::Validation(
                ValidationError::new("period ends before it begins")
                    .with_field("End")
                    .with_reason(format!("{} < {}", format_date(&end), format_date(&begin))),
            ));
        }
        Ok(Self { begin, end })
    }

    /// Create a date range from `YYYY-MM-DD` strings
    pub fn parse(begin: &str, end: &str) -> Result<Self> {
        Self::new(validate_date("Begin", begin)?, validate_date("End", end)?)
    }

    /// Get the first day of the period
    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    /// Get the last day of the period
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl SchemaElement for DateRange {
    const TAG: &'static str = "Period";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("Begin", Cardinality::ExactlyOne),
        FieldSpec::text("End", Cardinality::ExactlyOne),
    ];

    fn build(raw: &Value) -> Result<Self> {
        match raw.as_object() {
            Some(map) if has_required_fields::<Self>(map) => {
                Self::parse(&required_text(map, "Begin")?, &required_text(map, "End")?)
            }
            _ => Self::build_fallback(raw),
        }
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "Begin" => FieldValue::text(format_date(&self.begin)),
            "End" => FieldValue::text(format_date(&self.end)),
            _ => FieldValue::Absent,
        }
    }
}
