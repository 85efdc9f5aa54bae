//! # Collections
//!
//! A [`Collection`] is a [`Resource`] whose payload is an ordered list of members,
//! either full representations or [`Link`](crate::Link)s. Because it is a resource it
//! can advertise its own affordances, typically a POST for creating a new member:
//!
//! ```
//! use hydra_framework::{Link, LinkCollection};
//!
//! let mut widgets = LinkCollection::new().with_id("/widgets");
//! widgets.add_get();
//! widgets.add_post(["name"]);
//! widgets.add(Link::new("/widgets/1", "Widget"));
//! widgets.add(Link::new("/widgets/2", "Widget"));
//!
//! assert!(widgets.can_post());
//! assert_eq!(widgets.members().len(), 2);
//! ```
//!
//! Members are serialized after the resource fields, in insertion order.

use crate::link::Link;
use crate::resource::{Hypermedia, Resource};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Type tag every collection carries.
pub const COLLECTION_TYPE: &str = "@Collection";

/// An ordered set of members plus the collection's own affordances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(flatten)]
    resource: Resource,
    #[serde(default = "Vec::new")]
    members: Vec<T>,
}

/// A collection of plain links.
pub type LinkCollection = Collection<Link>;

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            resource: Resource::new(COLLECTION_TYPE),
            members: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.resource.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.resource.title = title.into();
        self
    }

    pub fn with_human_alert(mut self, alert: impl Into<String>) -> Self {
        self.resource.set_human_alert(alert);
        self
    }

    /// Appends a member.
    pub fn add(&mut self, item: T) {
        self.members.push(item);
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn has_members(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn empty_members(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<T> Deref for Collection<T> {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.resource
    }
}

impl<T> DerefMut for Collection<T> {
    fn deref_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl<T> Hypermedia for Collection<T> {
    const TYPE: &'static str = COLLECTION_TYPE;

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}
