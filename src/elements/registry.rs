//! Element registry
//!
//! Maps each element tag to the `build` routine of its concrete type.
//! Dispatch goes through a read-only table; tags with no entry hit the
//! default handler, which rejects the input as malformed.

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

use super::attribute::ItemAttribute;
use super::base::{FieldSpec, SchemaElement};
use super::contributor::{ContributorIdentifier, ItemContributor};
use super::dates::{DateRange, ItemDate};
use super::identifier::Identifier;
use super::parent_item::ParentItem;
use super::performance::{Metric, PerformanceCounter};
use super::report_items::ReportItems;
use crate::documents::Document;
use crate::error::{CardinalityError, Error, Result};
use crate::limits::Limits;
use crate::validators::Cardinality;

/// Build routine stored in the registry
pub type BuildFn = fn(&Value) -> Result<AnyElement>;

/// Registry entry for one element type
#[derive(Clone, Copy, Serialize)]
pub struct Registration {
    /// Element tag
    pub tag: &'static str,
    /// Fields in schema order
    pub fields: &'static [FieldSpec],
    #[serde(skip)]
    build: BuildFn,
}

impl Registration {
    /// Build an element of this type from raw input
    pub fn build(&self, raw: &Value) -> Result<AnyElement> {
        (self.build)(raw)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("tag", &self.tag)
            .field("fields", &self.fields)
            .finish()
    }
}

fn build_as<T>(raw: &Value) -> Result<AnyElement>
where
    T: SchemaElement + Into<AnyElement>,
{
    T::build(raw).map(Into::into)
}

macro_rules! element_registry {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        /// Any registered element, tagged by its concrete type
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyElement {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )+
        }

        impl AnyElement {
            /// Tag of the wrapped element
            pub fn tag(&self) -> &'static str {
                match self {
                    $(AnyElement::$variant(_) => <$ty as SchemaElement>::TAG,)+
                }
            }

            /// Render the wrapped element as a standalone document
            pub fn as_document(&self) -> Document {
                match self {
                    $(AnyElement::$variant(element) => element.as_document(),)+
                }
            }
        }

        $(
            impl From<$ty> for AnyElement {
                fn from(element: $ty) -> Self {
                    AnyElement::$variant(element)
                }
            }

            impl TryFrom<AnyElement> for $ty {
                type Error = AnyElement;

                fn try_from(element: AnyElement) -> std::result::Result<Self, AnyElement> {
                    match element {
                        AnyElement::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )+

        static REGISTRY: Lazy<IndexMap<&'static str, Registration>> = Lazy::new(|| {
            let mut registry = IndexMap::new();
            $(
                registry.insert(
                    <$ty as SchemaElement>::TAG,
                    Registration {
                        tag: <$ty as SchemaElement>::TAG,
                        fields: <$ty as SchemaElement>::FIELDS,
                        build: build_as::<$ty>,
                    },
                );
            )+
            registry
        });
    };
}

element_registry! {
    Identifier => Identifier,
    ContributorIdentifier => ContributorIdentifier,
    ItemContributor => ItemContributor,
    ItemDate => ItemDate,
    ItemAttribute => ItemAttribute,
    DateRange => DateRange,
    PerformanceCounter => PerformanceCounter,
    Metric => Metric,
    ParentItem => ParentItem,
    ReportItems => ReportItems,
}

/// Build the element registered under `tag` from raw input
pub fn build_element(tag: &str, raw: &Value) -> Result<AnyElement> {
    tracing::debug!(tag, "dispatching build");
    match REGISTRY.get(tag) {
        Some(registration) => registration.build(raw),
        None => default_handler(tag, raw),
    }
}

/// Like [`build_element`], after checking the input against `limits`
pub fn build_with_limits(tag: &str, raw: &Value, limits: &Limits) -> Result<AnyElement> {
    limits.check_input(raw)?;
    build_element(tag, raw)
}

fn default_handler(tag: &str, raw: &Value) -> Result<AnyElement> {
    tracing::debug!(tag, "no element registered");
    Err(Error::malformed(tag, raw))
}

/// Look up the registration for a tag
pub fn lookup(tag: &str) -> Option<&'static Registration> {
    REGISTRY.get(tag)
}

/// Registered tags, innermost elements first
pub fn registered_tags() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

/// All registrations in registry order
pub fn registrations() -> impl Iterator<Item = &'static Registration> {
    REGISTRY.values()
}

/// Ordered fields of the element registered under `tag`
pub fn field_specs(tag: &str) -> Option<&'static [FieldSpec]> {
    lookup(tag).map(|registration| registration.fields)
}

/// Unwrap a registry-built element as the type a field expects
pub fn expect_kind<T>(field: &str, element: AnyElement) -> Result<T>
where
    T: SchemaElement + TryFrom<AnyElement, Error = AnyElement>,
{
    T::try_from(element).map_err(|other| {
        Error::Cardinality(
            CardinalityError::new(field, Cardinality::ZeroOrMore, 1).with_mismatched(other.tag()),
        )
    })
}

/// Unwrap every member of a registry-built collection as the field's type
pub fn members_of<T>(field: &str, elements: Vec<AnyElement>) -> Result<Vec<T>>
where
    T: SchemaElement + TryFrom<AnyElement, Error = AnyElement>,
{
    let count = elements.len();
    elements
        .into_iter()
        .map(|element| {
            T::try_from(element).map_err(|other| {
                Error::Cardinality(
                    CardinalityError::new(field, Cardinality::ZeroOrMore, count)
                        .with_mismatched(other.tag()),
                )
            })
        })
        .collect()
}
