//! Usage counts: `Instance` counters and the `ItemPerformance` metrics holding them

use serde_json::Value;

use super::base::{
    build_multiple, has_required_fields, is_indexed, required_text, FieldSpec, FieldValue,
    SchemaElement,
};
use super::dates::DateRange;
use crate::codes::{CATEGORIES, METRIC_TYPES};
use crate::error::Result;
use crate::validators::{
    integer_value, validate_enumeration, validate_one_or_more_of, validate_positive_integer,
    validate_string, Cardinality, Emptiness, Sign,
};

/// Count of one metric type within a reporting period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceCounter {
    metric_type: String,
    count: u64,
}

impl PerformanceCounter {
    /// Create a new counter
    pub fn new(metric_type: impl Into<String>, count: i64) -> Result<Self> {
        let metric_type = validate_string("MetricType", metric_type, Emptiness::Required)?;
        let metric_type = validate_enumeration("MetricType", metric_type, METRIC_TYPES)?;
        let count = validate_positive_integer("Count", count, Sign::NonNegative)?;
        Ok(Self { metric_type, count })
    }

    /// Get the metric type code
    pub fn metric_type(&self) -> &str {
        &self.metric_type
    }

    /// Get the count
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl SchemaElement for PerformanceCounter {
    const TAG: &'static str = "Instance";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("MetricType", Cardinality::ExactlyOne),
        FieldSpec::text("Count", Cardinality::ExactlyOne),
    ];

    /// Accepts `{"MetricType": code, "Count": n}` or the shorthand `{code: n}`
    fn build(raw: &Value) -> Result<Self> {
        let Some(map) = raw.as_object() else {
            return Self::build_fallback(raw);
        };

        if has_required_fields::<Self>(map) {
            tracing::trace!(element = Self::TAG, shape = "structured", "building element");
            let count = integer_value("Count", &map["Count"])?;
            return Self::new(required_text(map, "MetricType")?, count);
        }

        if map.len() == 1 && !is_indexed(map) {
            if let Some((metric_type, count)) = map.iter().next() {
                tracing::trace!(element = Self::TAG, shape = "shorthand", "building element");
                return Self::new(metric_type.as_str(), integer_value("Count", count)?);
            }
        }

        Self::build_fallback(raw)
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "MetricType" => FieldValue::text(&self.metric_type),
            "Count" => FieldValue::text(self.count),
            _ => FieldValue::Absent,
        }
    }
}

/// Usage of a report item in one category over one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    period: DateRange,
    category: String,
    instances: Vec<PerformanceCounter>,
}

impl Metric {
    /// Create a new metric
    pub fn new(
        period: DateRange,
        category: impl Into<String>,
        instances: Vec<PerformanceCounter>,
    ) -> Result<Self> {
        let category = validate_string("Category", category, Emptiness::Required)?;
        let category = validate_enumeration("Category", category, CATEGORIES)?;
        let instances = validate_one_or_more_of("Instance", instances)?;
        Ok(Self {
            period,
            category,
            instances,
        })
    }

    /// Get the reporting period
    pub fn period(&self) -> &DateRange {
        &self.period
    }

    /// Get the category code
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Get the counters
    pub fn instances(&self) -> &[PerformanceCounter] {
        &self.instances
    }
}

impl SchemaElement for Metric {
    const TAG: &'static str = "ItemPerformance";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::element("Period", Cardinality::ExactlyOne),
        FieldSpec::text("Category", Cardinality::ExactlyOne),
        FieldSpec::element("Instance", Cardinality::OneOrMore),
    ];

    fn build(raw: &Value) -> Result<Self> {
        match raw.as_object() {
            Some(map) if has_required_fields::<Self>(map) => {
                let period = DateRange::build(&map["Period"])?;
                let instances = build_multiple::<PerformanceCounter>(map.get("Instance"))?;
                Self::new(period, required_text(map, "Category")?, instances)
            }
            _ => Self::build_fallback(raw),
        }
    }

    fn render_field(&self, field: &FieldSpec) -> FieldValue {
        match field.name {
            "Period" => FieldValue::child(&self.period),
            "Category" => FieldValue::text(&self.category),
            "Instance" => FieldValue::children(&self.instances),
            _ => FieldValue::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_counter_document() {
        let counter = PerformanceCounter::new("ft_pdf", 5).unwrap();
        let doc = counter.as_document();
        let root = doc.root();
        assert_eq!(root.name(), "Instance");
        assert_eq!(root.child_names(), vec!["MetricType", "Count"]);
        assert_eq!(root.children()[0].text(), Some("ft_pdf"));
        assert_eq!(root.children()[1].text(), Some("5"));
    }

    #[test]
    fn test_counter_validation() {
        assert!(matches!(
            PerformanceCounter::new("downloads", 5),
            Err(Error::InvalidEnumeration { .. })
        ));
        assert!(matches!(
            PerformanceCounter::new("ft_pdf", -1),
            Err(Error::Validation(_))
        ));
        assert_eq!(PerformanceCounter::new("ft_pdf", 0).unwrap().count(), 0);
    }

    #[test]
    fn test_counter_build_structured() {
        let built = PerformanceCounter::build(&json!({"MetricType": "ft_html", "Count": "12"})).unwrap();
        assert_eq!(built, PerformanceCounter::new("ft_html", 12).unwrap());
    }

    #[test]
    fn test_counter_build_shorthand() {
        let built = PerformanceCounter::build(&json!({"ft_pdf": 5})).unwrap();
        assert_eq!(built, PerformanceCounter::new("ft_pdf", 5).unwrap());
    }

    #[test]
    fn test_counter_build_rejects_other_shapes() {
        for raw in [
            json!([["ft_pdf", 5]]),
            json!("ft_pdf"),
            json!({"0": 5}),
            json!({"ft_pdf": 5, "ft_html": 3}),
            json!({}),
        ] {
            assert!(
                matches!(PerformanceCounter::build(&raw), Err(Error::MalformedInput { .. })),
                "expected malformed input for {}",
                raw
            );
        }
    }

    #[test]
    fn test_counter_shorthand_still_validates() {
        assert!(PerformanceCounter::build(&json!({"ft_pdf": "lots"})).unwrap_err().is_validation());
        assert!(PerformanceCounter::build(&json!({"pdf": 5})).unwrap_err().is_validation());
        // A lone structured key falls through to the shorthand shape
        assert!(PerformanceCounter::build(&json!({"MetricType": "ft_pdf"}))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_counter_count_beyond_i64() {
        let err = PerformanceCounter::build(&json!({"ft_pdf": 9_223_372_036_854_775_808u64})).unwrap_err();
        assert!(matches!(err, Error::Validation(ref e) if e.message == "integer is out of range"));
    }

    fn sample_metric() -> Metric {
        Metric::new(
            DateRange::parse("2015-01-01", "2015-01-31").unwrap(),
            "Requests",
            vec![
                PerformanceCounter::new("ft_html", 3).unwrap(),
                PerformanceCounter::new("ft_pdf", 5).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_metric_document_order() {
        let doc = sample_metric().as_document();
        assert_eq!(doc.root().name(), "ItemPerformance");
        assert_eq!(
            doc.root().child_names(),
            vec!["Period", "Category", "Instance", "Instance"]
        );
        let second = &doc.root().children()[3];
        assert_eq!(second.children()[0].text(), Some("ft_pdf"));
    }

    #[test]
    fn test_metric_requires_instances() {
        let err = Metric::new(
            DateRange::parse("2015-01-01", "2015-01-31").unwrap(),
            "Requests",
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Cardinality(_)));
    }

    #[test]
    fn test_metric_invalid_category() {
        let err = Metric::new(
            DateRange::parse("2015-01-01", "2015-01-31").unwrap(),
            "Downloads",
            vec![PerformanceCounter::new("ft_pdf", 1).unwrap()],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidEnumeration { ref field, .. } if field == "Category"));
    }

    #[test]
    fn test_metric_build() {
        let built = Metric::build(&json!({
            "Period": {"Begin": "2015-01-01", "End": "2015-01-31"},
            "Category": "Requests",
            "Instance": [{"ft_html": 3}, {"MetricType": "ft_pdf", "Count": 5}]
        }))
        .unwrap();
        assert_eq!(built, sample_metric());
    }

    #[test]
    fn test_metric_build_empty_instances() {
        let err = Metric::build(&json!({
            "Period": {"Begin": "2015-01-01", "End": "2015-01-31"},
            "Category": "Requests",
            "Instance": []
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Cardinality(_)));
    }

    proptest! {
        #[test]
        fn prop_shorthand_equals_structured(
            index in 0..METRIC_TYPES.len(),
            count in 0i64..1_000_000,
        ) {
            let code = METRIC_TYPES[index];
            let mut shorthand = serde_json::Map::new();
            shorthand.insert(code.to_string(), json!(count));
            let short = PerformanceCounter::build(&Value::Object(shorthand)).unwrap();
            let structured =
                PerformanceCounter::build(&json!({"MetricType": code, "Count": count})).unwrap();
            prop_assert_eq!(&short, &structured);
            prop_assert_eq!(short, PerformanceCounter::new(code, count).unwrap());
        }

        #[test]
        fn prop_unknown_metric_type_rejected(code in "[a-z_]{1,12}") {
            prop_assume!(!METRIC_TYPES.contains(&code.as_str()));
            prop_assert!(PerformanceCounter::new(code, 1).unwrap_err().is_validation());
        }
    }
}
