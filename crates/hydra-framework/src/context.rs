//! # Linking Service Contract
//!
//! Resources do not know their own URLs. A feature handler asks a [`LinkContext`] to
//! resolve a resource type (optionally with an id or a set of route values), or a named
//! route, to a canonical [`Link`]; the resulting id seeds the resource it is building.
//!
//! The engine only consumes this contract. The application provides the implementation
//! (a route table bound to the current request); tests use
//! [`MockContext`](crate::mock::MockContext).
//!
//! Resolution is total: an implementation that cannot resolve a route returns the empty
//! link sentinel.

use crate::error::HydraError;
use crate::link::Link;
use crate::resource::{Hypermedia, Resource};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a value substituted into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped in a query-string key or value.
const QUERY_COMPONENT: &AsciiSet = &PATH_SEGMENT.add(b'&').add(b'=').add(b'+');

/// Ordered key/value pairs used to fill a route template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    values: Vec<(String, String)>,
}

impl RouteValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common `{id}` value.
    pub fn id(id: impl ToString) -> Self {
        Self::new().with("id", id)
    }

    /// Adds or replaces a value, keeping the position of the first insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fills `{key}` placeholders of `template`.
    ///
    /// A placeholder written `{key?}` is optional: when no value is given it is dropped
    /// along with the `/` in front of it. Values the template does not mention are
    /// appended as a query string, in insertion order.
    ///
    /// Values are percent-encoded, so a value can never add a path segment or a query
    /// parameter of its own.
    ///
    /// ```
    /// use hydra_framework::RouteValues;
    ///
    /// let values = RouteValues::id(7).with("page", 2);
    /// assert_eq!(values.expand("/widgets/{id}").unwrap(), "/widgets/7?page=2");
    /// assert_eq!(RouteValues::new().expand("/widgets/{id?}").unwrap(), "/widgets");
    /// assert!(RouteValues::new().expand("/widgets/{id}").is_err());
    /// ```
    pub fn expand(&self, template: &str) -> Result<String, HydraError> {
        let mut out = String::with_capacity(template.len());
        let mut used: Vec<&str> = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            out.push_str(&rest[..open]);
            let placeholder = &rest[open + 1..close];
            let (key, optional) = match placeholder.strip_suffix('?') {
                Some(key) => (key, true),
                None => (placeholder, false),
            };
            match self.get(key) {
                Some(value) => {
                    out.extend(utf8_percent_encode(value, PATH_SEGMENT));
                    used.push(key);
                }
                None if optional => {
                    if out.ends_with('/') && out.len() > 1 {
                        out.pop();
                    }
                }
                None => {
                    return Err(HydraError::MissingRouteValue {
                        route: template.to_string(),
                        key: key.to_string(),
                    })
                }
            }
            rest = &rest[close + 1..];
        }
        out.push_str(rest);

        for (key, value) in self.iter().filter(|(k, _)| !used.contains(k)) {
            let separator = if out.contains('?') { '&' } else { '?' };
            out.push(separator);
            out.extend(utf8_percent_encode(key, QUERY_COMPONENT));
            out.push('=');
            out.extend(utf8_percent_encode(value, QUERY_COMPONENT));
        }
        Ok(out)
    }
}

/// Resolves resource types and named routes to links for the current request.
pub trait LinkContext {
    /// Link to the resource of type `resource_type`, filled with `values`.
    fn link(&self, resource_type: &str, values: &RouteValues) -> Link;

    /// Link for a named route.
    fn route(&self, route_name: &str, values: &RouteValues) -> Link;

    /// The full URL of the request being served.
    fn current_url(&self) -> String;

    fn host(&self) -> String;

    fn scheme(&self) -> String;
}

/// Typed conveniences over [`LinkContext`].
pub trait LinkContextExt: LinkContext {
    /// Link to the canonical (id-less) route of `T`.
    fn link_to<T: Hypermedia>(&self) -> Link {
        self.link(T::TYPE, &RouteValues::new())
    }

    /// Link to the `T` with the given numeric id.
    fn link_to_id<T: Hypermedia>(&self, id: i32) -> Link {
        self.link(T::TYPE, &RouteValues::id(id))
    }

    fn link_with<T: Hypermedia>(&self, values: &RouteValues) -> Link {
        self.link(T::TYPE, values)
    }

    /// Link resolved from an existing resource's type.
    fn link_for(&self, resource: &Resource, values: &RouteValues) -> Link {
        self.link(&resource.r#type, values)
    }

    /// Just the id part of [`LinkContextExt::link_to_id`].
    fn id_of<T: Hypermedia>(&self, id: i32) -> String {
        self.link_to_id::<T>(id).id
    }
}

impl<C: LinkContext + ?Sized> LinkContextExt for C {}
