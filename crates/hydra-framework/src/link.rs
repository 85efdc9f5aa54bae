//! # Links
//!
//! A [`Link`] is the lightweight reference form of a resource: its id, its type tag and
//! an optional title. An empty id means "no link"; it is a value, not an error.

use serde::{Deserialize, Serialize};

/// Reference to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@type", default)]
    pub r#type: String,
    #[serde(rename = "dcterms:title", default)]
    pub title: String,
}

impl Link {
    pub fn new(id: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            r#type: r#type.into(),
            title: String::new(),
        }
    }

    pub fn titled(
        id: impl Into<String>,
        r#type: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            r#type: r#type.into(),
            title: title.into(),
        }
    }

    /// The "no link" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// The id with every `/` replaced by `-`.
    pub fn html_id(&self) -> String {
        self.id.replace('/', "-")
    }

    /// The id up to and including the first `?`, or the whole id when there is none.
    ///
    /// ```
    /// use hydra_framework::Link;
    ///
    /// assert_eq!(Link::new("/items?page=2", "Item").path(), "/items?");
    /// assert_eq!(Link::new("/items", "Item").path(), "/items");
    /// ```
    pub fn path(&self) -> &str {
        match self.id.find('?') {
            Some(idx) => &self.id[..=idx],
            None => &self.id,
        }
    }
}

/// A literal value node: `{@id, dcterms:title, @type, @value}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "dcterms:title", default)]
    pub title: String,
    #[serde(rename = "@type", default)]
    pub r#type: String,
    #[serde(rename = "@value", default)]
    pub value: String,
}

impl TypedValue {
    pub fn new(r#type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            value: value.into(),
            ..Self::default()
        }
    }
}
