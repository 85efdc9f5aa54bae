//! # Supporting Properties
//!
//! A [`SupportingProperty`] describes one input field an [`Operation`](crate::Operation)
//! expects: its name, its range (the kind of value), an optional default and, for
//! enumerated ranges, the list of legal [`Choice`]s.
//!
//! The range is fixed when the property is built and cannot be changed afterwards.
//! Choices only exist for the `Enum` and `Data` ranges, which is enforced by
//! carrying them inside the [`PropertyKind`] variant itself.
//!
//! ## Wire Shape
//!
//! ```text
//! { "property": "colour", "defaultValue": "0", "range": "Data",
//!   "data": [ { "@id": "0", "dcterms:title": "Red" }, ... ] }
//! ```
//!
//! `data` is only emitted for `Enum`/`Data` ranges. An absent default is written as `""`.

use crate::labels::{choices, Labeled};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of value a property accepts, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Range {
    Text,
    Integer,
    Boolean,
    Enum,
    Array,
    Data,
    File,
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Range::Text => "Text",
            Range::Integer => "Integer",
            Range::Boolean => "Boolean",
            Range::Enum => "Enum",
            Range::Array => "Array",
            Range::Data => "Data",
            Range::File => "File",
        };
        f.write_str(s)
    }
}

/// One legal value of an enumerated property: the token the client sends back and a
/// human-facing label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(rename = "@id")]
    pub value: String,
    #[serde(rename = "dcterms:title")]
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Range tag plus the payload that range carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Text,
    Integer,
    Boolean,
    Array,
    File,
    Enum(Vec<Choice>),
    Data(Vec<Choice>),
}

impl PropertyKind {
    pub fn range(&self) -> Range {
        match self {
            PropertyKind::Text => Range::Text,
            PropertyKind::Integer => Range::Integer,
            PropertyKind::Boolean => Range::Boolean,
            PropertyKind::Array => Range::Array,
            PropertyKind::File => Range::File,
            PropertyKind::Enum(_) => Range::Enum,
            PropertyKind::Data(_) => Range::Data,
        }
    }
}

/// Descriptor of a single expected input field.
///
/// Build one with the range-specific constructors; none of them can fail.
///
/// ```
/// use hydra_framework::{Range, SupportingProperty};
///
/// let name = SupportingProperty::text("name").with_default("Unnamed");
/// assert_eq!(name.range(), Range::Text);
/// assert_eq!(name.default_value(), Some("Unnamed"));
/// assert!(name.choices().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireProperty", from = "WireProperty")]
pub struct SupportingProperty {
    name: String,
    default_value: Option<String>,
    kind: PropertyKind,
}

impl SupportingProperty {
    /// Builds a property of an arbitrary kind.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Boolean)
    }

    /// A boolean property with a default. The default is written as `True`/`False`,
    /// the literal form the HTML form binder round-trips.
    pub fn boolean_with_default(name: impl Into<String>, default: bool) -> Self {
        let literal = if default { "True" } else { "False" };
        Self::boolean(name).with_default(literal)
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Array)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::File)
    }

    /// An `Enum`-ranged property with explicit choices.
    pub fn enumeration(name: impl Into<String>, choices: impl IntoIterator<Item = Choice>) -> Self {
        Self::new(name, PropertyKind::Enum(choices.into_iter().collect()))
    }

    /// A `Data`-ranged property with explicit choices.
    pub fn data(name: impl Into<String>, choices: impl IntoIterator<Item = Choice>) -> Self {
        Self::new(name, PropertyKind::Data(choices.into_iter().collect()))
    }

    /// A `Data`-ranged property whose choices are the variants of `T`.
    ///
    /// Tokens are zero-based positions in declaration order; labels fall back to the
    /// raw variant name.
    pub fn data_from<T: Labeled>(name: impl Into<String>) -> Self {
        Self::data(name, choices::<T>())
    }

    /// An `Enum`-ranged property whose choices are the variants of `T`.
    pub fn enumeration_from<T: Labeled>(name: impl Into<String>) -> Self {
        Self::enumeration(name, choices::<T>())
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> Range {
        self.kind.range()
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// The enumerated choices; empty for every range other than `Enum` and `Data`.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            PropertyKind::Enum(choices) | PropertyKind::Data(choices) => choices,
            _ => &[],
        }
    }
}

/// A bare field name becomes a `Text` property.
impl From<&str> for SupportingProperty {
    fn from(name: &str) -> Self {
        Self::text(name)
    }
}

impl From<String> for SupportingProperty {
    fn from(name: String) -> Self {
        Self::text(name)
    }
}

// =============================================================================
// WIRE REPRESENTATION
// =============================================================================

#[derive(Serialize, Deserialize)]
struct WireProperty {
    property: String,
    #[serde(rename = "defaultValue", default)]
    default_value: String,
    range: Range,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Vec<Choice>>,
}

impl From<SupportingProperty> for WireProperty {
    fn from(p: SupportingProperty) -> Self {
        let range = p.kind.range();
        let data = match p.kind {
            PropertyKind::Enum(choices) | PropertyKind::Data(choices) => Some(choices),
            _ => None,
        };
        Self {
            property: p.name,
            default_value: p.default_value.unwrap_or_default(),
            range,
            data,
        }
    }
}

impl From<WireProperty> for SupportingProperty {
    fn from(w: WireProperty) -> Self {
        let choices = w.data.unwrap_or_default();
        let kind = match w.range {
            Range::Text => PropertyKind::Text,
            Range::Integer => PropertyKind::Integer,
            Range::Boolean => PropertyKind::Boolean,
            Range::Array => PropertyKind::Array,
            Range::File => PropertyKind::File,
            Range::Enum => PropertyKind::Enum(choices),
            Range::Data => PropertyKind::Data(choices),
        };
        Self {
            name: w.property,
            default_value: Some(w.default_value).filter(|d| !d.is_empty()),
            kind,
        }
    }
}
