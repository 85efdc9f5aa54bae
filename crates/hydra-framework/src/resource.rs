//! # Resources
//!
//! [`Resource`] is the full representation of one addressable thing: its identity, title,
//! type tag, the [`Operation`]s a client may perform next, accumulated error messages and
//! a human-facing alert.
//!
//! ## Affordances
//!
//! A resource is purely declarative. Whoever builds it decides which operations to
//! advertise (after evaluating business rules and permissions); the resource only
//! records that decision:
//!
//! ```
//! use hydra_framework::{Method, Resource, SupportingProperty};
//!
//! let mut widget = Resource::new("Widget").with_id("/widgets/42");
//! widget.add_get();
//! widget.add_put([SupportingProperty::text("name")]);
//! widget.add_delete();
//!
//! // Retract an affordance after default construction.
//! widget.remove_delete();
//!
//! assert!(widget.can_get());
//! assert!(widget.can_put());
//! assert!(!widget.can_delete());
//! assert_eq!(widget.integer_id(), 42);
//! ```
//!
//! ## Sentinels
//!
//! Nothing here fails. Absence is expressed with values: an empty [`Link`], `-1` from
//! [`Resource::integer_id`], an empty error list.

use crate::link::Link;
use crate::operation::{Method, Operation};
use crate::property::SupportingProperty;
use crate::text::to_int;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A concrete hypermedia type built around a [`Resource`].
///
/// `TYPE` is the logical name used as the default `@type` and as the key the linking
/// service resolves routes by.
pub trait Hypermedia {
    const TYPE: &'static str;

    fn resource(&self) -> &Resource;

    fn resource_mut(&mut self) -> &mut Resource;
}

fn placeholder() -> bool {
    true
}

/// Representation of a resource and its affordances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "dcterms:title", default)]
    pub title: String,
    #[serde(rename = "@type", default)]
    pub r#type: String,
    #[serde(rename = "operation", default)]
    operations: Vec<Operation>,
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
    #[serde(skip)]
    human_alert: String,
    #[serde(skip, default = "placeholder")]
    empty: bool,
}

impl Resource {
    /// A placeholder resource of the given type: no id, no operations, marked empty.
    pub fn new(r#type: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            r#type: r#type.into(),
            operations: Vec::new(),
            error_messages: Vec::new(),
            human_alert: String::new(),
            empty: true,
        }
    }

    /// A placeholder resource typed after `T`.
    pub fn of<T: Hypermedia>() -> Self {
        Self::new(T::TYPE)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    // --- Population state ---

    /// True until [`Resource::mark_populated`] is called: a not-found or placeholder
    /// instance.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn mark_populated(&mut self) {
        self.empty = false;
    }

    // --- Adding affordances ---

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Appends an operation as-is.
    pub fn add_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn add_get(&mut self) {
        self.add_operation(Operation::new(Method::Get));
    }

    /// GET with query inputs (a search or filter form).
    pub fn add_get_with<I, P>(&mut self, properties: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<SupportingProperty>,
    {
        self.add_operation(Operation::with_properties(Method::Get, properties));
    }

    /// POST expecting `properties` in the given order. Plain names become text fields.
    pub fn add_post<I, P>(&mut self, properties: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<SupportingProperty>,
    {
        self.add_operation(Operation::with_properties(Method::Post, properties));
    }

    pub fn add_empty_post(&mut self) {
        self.add_operation(Operation::new(Method::Post));
    }

    /// PUT expecting `properties` in the given order. Plain names become text fields.
    pub fn add_put<I, P>(&mut self, properties: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<SupportingProperty>,
    {
        self.add_operation(Operation::with_properties(Method::Put, properties));
    }

    pub fn add_empty_put(&mut self) {
        self.add_operation(Operation::new(Method::Put));
    }

    pub fn add_delete(&mut self) {
        self.add_operation(Operation::new(Method::Delete));
    }

    // --- Querying affordances ---

    /// The first operation with `method`. Later duplicates are never returned.
    pub fn get_operation(&self, method: Method) -> Option<&Operation> {
        self.operations.iter().find(|op| op.method() == method)
    }

    pub fn get_operation_mut(&mut self, method: Method) -> Option<&mut Operation> {
        self.operations.iter_mut().find(|op| op.method() == method)
    }

    pub fn get_get(&self) -> Option<&Operation> {
        self.get_operation(Method::Get)
    }

    pub fn get_post(&self) -> Option<&Operation> {
        self.get_operation(Method::Post)
    }

    pub fn get_put(&self) -> Option<&Operation> {
        self.get_operation(Method::Put)
    }

    pub fn get_delete(&self) -> Option<&Operation> {
        self.get_operation(Method::Delete)
    }

    pub fn can(&self, method: Method) -> bool {
        self.get_operation(method).is_some()
    }

    pub fn can_get(&self) -> bool {
        self.can(Method::Get)
    }

    pub fn can_post(&self) -> bool {
        self.can(Method::Post)
    }

    pub fn can_put(&self) -> bool {
        self.can(Method::Put)
    }

    pub fn can_delete(&self) -> bool {
        self.can(Method::Delete)
    }

    // --- Retracting affordances ---

    /// Removes the first operation with `method`; does nothing when there is none.
    pub fn remove(&mut self, method: Method) {
        match self.operations.iter().position(|op| op.method() == method) {
            Some(idx) => {
                self.operations.remove(idx);
                trace!(id = %self.id, %method, "Affordance retracted");
            }
            None => trace!(id = %self.id, %method, "No affordance to retract"),
        }
    }

    pub fn remove_get(&mut self) {
        self.remove(Method::Get);
    }

    pub fn remove_post(&mut self) {
        self.remove(Method::Post);
    }

    pub fn remove_put(&mut self) {
        self.remove(Method::Put);
    }

    pub fn remove_delete(&mut self) {
        self.remove(Method::Delete);
    }

    // --- Links ---

    /// A link to this resource if it is readable, otherwise the empty sentinel.
    pub fn get_link(&self) -> Link {
        if self.can_get() {
            Link::new(self.id.clone(), self.r#type.clone())
        } else {
            Link::none()
        }
    }

    /// A titled link to this resource regardless of its affordances.
    pub fn to_link(&self) -> Link {
        Link::titled(self.id.clone(), self.r#type.clone(), self.title.clone())
    }

    // --- Errors & alerts ---

    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// Records a message for the client. Empty messages are dropped.
    pub fn add_error_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.error_messages.push(message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.error_messages.is_empty()
    }

    /// The first recorded message, or `""`.
    pub fn first_error_message(&self) -> &str {
        self.error_messages.first().map(String::as_str).unwrap_or("")
    }

    pub fn human_alert(&self) -> &str {
        &self.human_alert
    }

    pub fn has_human_alert(&self) -> bool {
        !self.human_alert.is_empty()
    }

    pub fn set_human_alert(&mut self, alert: impl Into<String>) {
        self.human_alert = alert.into();
    }

    /// Sets the alert and hands the same resource back.
    pub fn with_human_alert(mut self, alert: impl Into<String>) -> Self {
        self.set_human_alert(alert);
        self
    }

    // --- Derived identity ---

    /// The id with every `/` replaced by `-`.
    pub fn html_id(&self) -> String {
        self.id.replace('/', "-")
    }

    /// The trailing numeric segment of the id.
    ///
    /// Returns `-1` when the id is empty or has no `/`. A trailing segment that is not a
    /// number yields `0`.
    pub fn integer_id(&self) -> i32 {
        match self.id.rfind('/') {
            Some(idx) => to_int(&self.id[idx + 1..]),
            None => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Range;

    #[test]
    fn test_new_resource_is_placeholder() {
        let r = Resource::new("Widget");
        assert!(r.is_empty());
        assert_eq!(r.r#type, "Widget");
        assert!(r.operations().is_empty());
        assert_eq!(r.integer_id(), -1);
    }

    #[test]
    fn test_get_operation_returns_first_duplicate() {
        let mut r = Resource::new("Widget");
        r.add_post(["first"]);
        r.add_post(["second"]);
        let post = r.get_post().unwrap();
        assert_eq!(post.expected_properties()[0].name(), "first");
    }

    #[test]
    fn test_remove_then_can_is_false_for_every_method() {
        for method in [Method::Get, Method::Post, Method::Put, Method::Delete] {
            let mut r = Resource::new("Widget");
            r.add_operation(Operation::new(method));
            assert!(r.can(method));
            r.remove(method);
            assert!(!r.can(method), "{method} still present");
        }
    }

    #[test]
    fn test_remove_only_drops_first_match() {
        let mut r = Resource::new("Widget");
        r.add_delete();
        r.add_delete();
        r.remove_delete();
        assert!(r.can_delete());
        r.remove_delete();
        assert!(!r.can_delete());
        // absent: no-op
        r.remove_delete();
        assert!(r.operations().is_empty());
    }

    #[test]
    fn test_add_post_with_text_fields() {
        let mut r = Resource::new("Widget");
        r.add_post(["a", "b"]);
        let props = r.get_post().unwrap().expected_properties();
        assert_eq!(props, &[SupportingProperty::text("a"), SupportingProperty::text("b")]);
        assert!(props.iter().all(|p| p.range() == Range::Text));
    }

    #[test]
    fn test_add_get_with_properties() {
        let mut r = Resource::new("Search");
        r.add_get_with([SupportingProperty::integer("page").with_default("1")]);
        assert_eq!(r.get_get().unwrap().expected_properties().len(), 1);
    }

    #[test]
    fn test_links_depend_on_get() {
        let mut r = Resource::new("Widget").with_id("/widgets/3").with_title("Gear");
        assert!(r.get_link().is_empty());
        assert_eq!(r.to_link(), Link::titled("/widgets/3", "Widget", "Gear"));

        r.add_get();
        assert_eq!(r.get_link(), Link::new("/widgets/3", "Widget"));
    }

    #[test]
    fn test_error_messages_drop_empty() {
        let mut r = Resource::new("Widget");
        assert_eq!(r.first_error_message(), "");
        r.add_error_message("");
        assert!(!r.has_errors());
        r.add_error_message("Name is required");
        r.add_error_message(String::from("Colour is invalid"));
        assert!(r.has_errors());
        assert_eq!(r.first_error_message(), "Name is required");
        assert_eq!(r.error_messages().len(), 2);
    }

    #[test]
    fn test_human_alert_is_fluent() {
        let r = Resource::new("Widget").with_human_alert("Saved");
        assert!(r.has_human_alert());
        assert_eq!(r.human_alert(), "Saved");
    }

    #[test]
    fn test_integer_id_sentinels() {
        let id = |s: &str| Resource::new("W").with_id(s).integer_id();
        assert_eq!(id("/widgets/42"), 42);
        assert_eq!(id(""), -1);
        assert_eq!(id("42"), -1);
        assert_eq!(id("/widgets/abc"), 0);
        assert_eq!(id("/widgets/"), 0);
    }

    #[test]
    fn test_html_id() {
        assert_eq!(Resource::new("W").with_id("/a/b/c").html_id(), "-a-b-c");
    }

    #[test]
    fn test_wire_field_order_and_hidden_fields() {
        let mut r = Resource::new("Widget")
            .with_id("/widgets/1")
            .with_title("Gear")
            .with_human_alert("not on the wire");
        r.add_delete();
        r.mark_populated();

        let s = serde_json::to_string(&r).unwrap();
        assert_eq!(
            s,
            r#"{"@id":"/widgets/1","dcterms:title":"Gear","@type":"Widget","operation":[{"method":"DELETE","expects":{"supportedProperty":[]}}],"errorMessages":[]}"#
        );
    }
}
