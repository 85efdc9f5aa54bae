//! The entry point a client starts discovering from.

use super::WIDGETS_ROUTE;
use hydra_framework::{Hypermedia, Link, LinkContext, LinkContextExt, Resource, RouteValues};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeHypermedia {
    #[serde(flatten)]
    resource: Resource,
    pub widgets: Link,
}

impl Hypermedia for HomeHypermedia {
    const TYPE: &'static str = "Home";

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl HomeHypermedia {
    pub fn new(ctx: &impl LinkContext) -> Self {
        let mut resource = Resource::of::<Self>()
            .with_id(ctx.link_to::<Self>().id)
            .with_title("Home");
        resource.add_get();
        resource.mark_populated();

        Self {
            resource,
            widgets: ctx
                .route(WIDGETS_ROUTE, &RouteValues::new())
                .with_title("Widgets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_framework::mock::MockContext;
    use hydra_framework::COLLECTION_TYPE;

    #[test]
    fn test_home_links_to_widgets() {
        let mock = MockContext::new();
        mock.expect_link("Home").return_link(Link::new("/", "Home"));
        mock.expect_route(WIDGETS_ROUTE)
            .return_link(Link::new("/widgets", COLLECTION_TYPE));

        let home = HomeHypermedia::new(&mock);

        assert_eq!(home.resource().id, "/");
        assert!(home.resource().can_get());
        assert_eq!(home.widgets, Link::titled("/widgets", COLLECTION_TYPE, "Widgets"));
        mock.verify();
    }
}
