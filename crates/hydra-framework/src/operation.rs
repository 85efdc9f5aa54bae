//! # Operations
//!
//! An [`Operation`] is one affordance a resource advertises: an HTTP method plus the
//! ordered list of input fields it expects. Operations map onto the standard CRUD
//! verbs:
//!
//! - **GET**: read the resource (optionally with query inputs, e.g. a search form).
//! - **POST**: create a new member.
//! - **PUT**: update the resource.
//! - **DELETE**: remove the resource.
//!
//! Operations have no lifecycle of their own: a [`Resource`](crate::Resource) owns its
//! operations outright.

use crate::property::SupportingProperty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of an affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Put => "PUT",
        }
    }

    /// Case-insensitive parse of a method name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "DELETE" => Some(Method::Delete),
            "PUT" => Some(Method::Put),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `expects` block of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expects {
    #[serde(rename = "supportedProperty", default)]
    pub supported_property: Vec<SupportingProperty>,
}

/// A method plus the properties it expects, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    method: Method,
    #[serde(default)]
    expects: Expects,
}

impl Operation {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            expects: Expects::default(),
        }
    }

    /// Builds an operation expecting `properties` in the given order.
    pub fn with_properties<I, P>(method: Method, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<SupportingProperty>,
    {
        let mut op = Self::new(method);
        for p in properties {
            op.add_property(p.into());
        }
        op
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn expected_properties(&self) -> &[SupportingProperty] {
        &self.expects.supported_property
    }

    /// First expected property called `name`.
    pub fn property(&self, name: &str) -> Option<&SupportingProperty> {
        self.expects
            .supported_property
            .iter()
            .find(|p| p.name() == name)
    }

    /// Appends a property. Names are not checked for uniqueness; a property with an
    /// empty name is dropped.
    pub fn add_property(&mut self, property: SupportingProperty) {
        if property.name().is_empty() {
            return;
        }
        self.expects.supported_property.push(property);
    }

    pub fn add_text_property(&mut self, name: impl Into<String>) {
        self.add_property(SupportingProperty::text(name));
    }

    pub fn add_file_property(&mut self, name: impl Into<String>) {
        self.add_property(SupportingProperty::file(name));
    }
}
