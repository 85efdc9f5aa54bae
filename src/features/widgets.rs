//! # Widgets
//!
//! A widget has a name and a colour. Its representation offers GET, PUT and DELETE;
//! locked widgets keep PUT but lose DELETE, and carry a human alert explaining why.
//! The listing is a link collection offering POST to create a new widget.

use super::WIDGETS_ROUTE;
use hydra_framework::{
    labeled, Hypermedia, Labeled, LinkCollection, LinkContext, LinkContextExt, Resource,
    RouteValues, SupportingProperty,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

labeled! {
    pub enum Colour {
        Red,
        Green,
        Blue => "Deep blue",
    }
}

pub const LOCKED_ALERT: &str = "This widget is locked and cannot be deleted.";

/// A widget as the catalogue stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: i32,
    pub name: String,
    pub colour: Colour,
    pub locked: bool,
}

impl Widget {
    pub fn new(id: i32, name: impl Into<String>, colour: Colour) -> Self {
        Self {
            id,
            name: name.into(),
            colour,
            locked: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// The inputs PUT and POST expect.
fn widget_form(name: &str, colour: Colour) -> [SupportingProperty; 2] {
    [
        SupportingProperty::text("name").with_default(name),
        SupportingProperty::data_from::<Colour>("colour").with_default(colour.token().to_string()),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetHypermedia {
    #[serde(flatten)]
    resource: Resource,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub colour: String,
}

impl Hypermedia for WidgetHypermedia {
    const TYPE: &'static str = "Widget";

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Deref for WidgetHypermedia {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.resource
    }
}

impl DerefMut for WidgetHypermedia {
    fn deref_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl WidgetHypermedia {
    pub fn new(ctx: &impl LinkContext, widget: &Widget) -> Self {
        let mut resource = Resource::of::<Self>()
            .with_id(ctx.id_of::<Self>(widget.id))
            .with_title(&widget.name);
        resource.add_get();
        resource.add_put(widget_form(&widget.name, widget.colour));
        resource.add_delete();

        if widget.locked {
            resource.remove_delete();
            resource.set_human_alert(LOCKED_ALERT);
        }
        resource.mark_populated();

        Self {
            resource,
            name: widget.name.clone(),
            colour: widget.colour.display_label().to_string(),
        }
    }

    /// Placeholder for an id the catalogue does not hold.
    pub fn not_found(ctx: &impl LinkContext, id: i32) -> Self {
        let mut resource = Resource::of::<Self>().with_id(ctx.id_of::<Self>(id));
        resource.add_error_message(format!("Widget {id} does not exist"));
        Self {
            resource,
            name: String::new(),
            colour: String::new(),
        }
    }
}

/// The widget listing: one link per widget, plus a POST for creating one.
pub fn collection(ctx: &impl LinkContext, widgets: &[Widget]) -> LinkCollection {
    let mut listing = LinkCollection::new()
        .with_id(ctx.route(WIDGETS_ROUTE, &RouteValues::new()).id)
        .with_title("Widgets");
    listing.add_get();
    listing.add_post(widget_form("", Colour::Red));
    listing.extend(
        widgets
            .iter()
            .map(|w| ctx.link_to_id::<WidgetHypermedia>(w.id).with_title(&w.name)),
    );
    listing.mark_populated();
    listing
}

/// A submitted create or update form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetForm {
    pub name: String,
    pub colour: Colour,
}

impl WidgetForm {
    /// Validates submitted fields, collecting every problem found.
    pub fn parse(fields: &BTreeMap<String, String>) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let name = fields.get("name").map(|n| n.trim()).unwrap_or_default();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        }

        let colour = match fields.get("colour") {
            None => Some(Colour::Red),
            Some(token) => Colour::from_token(token).or_else(|| Colour::from_name(token)),
        };
        if colour.is_none() {
            errors.push("Unknown colour".to_string());
        }

        match colour {
            Some(colour) if errors.is_empty() => Ok(Self {
                name: name.to_string(),
                colour,
            }),
            _ => Err(errors),
        }
    }
}
