//! # Route Table
//!
//! The application's implementation of [`LinkContext`]. A [`RouteTable`] maps resource
//! types and route names to URL templates; [`RouteTable::bind`] pairs it with the request
//! being served so features can resolve links without knowing any URLs.
//!
//! ```
//! use hydra_framework::{LinkContext, RouteValues};
//! use hydra_recipe::routing::{RequestInfo, RouteTable};
//!
//! let routes = RouteTable::new()
//!     .map_type("Widget", "/widgets/{id}")
//!     .map_named("widgets", "@Collection", "/widgets");
//! let links = routes.bind(RequestInfo::new("http", "localhost", "/"));
//!
//! assert_eq!(links.link("Widget", &RouteValues::id(3)).id, "/widgets/3");
//! assert_eq!(links.route("widgets", &RouteValues::new().with("page", 2)).id, "/widgets?page=2");
//! assert!(links.link("Gadget", &RouteValues::new()).is_empty());
//! ```

use hydra_framework::{Hypermedia, HydraError, Link, LinkContext, RouteValues};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Where the current request came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub scheme: String,
    pub host: String,
    pub path_and_query: String,
}

impl RequestInfo {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path_and_query: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path_and_query: path_and_query.into(),
        }
    }

    pub fn current_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.path_and_query)
    }
}

#[derive(Debug, Clone)]
struct NamedRoute {
    resource_type: String,
    template: String,
}

/// Typed and named URL templates.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    typed: HashMap<String, String>,
    named: HashMap<String, NamedRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the canonical template for hypermedia type `T`.
    pub fn map<T: Hypermedia>(self, template: impl Into<String>) -> Self {
        self.map_type(T::TYPE, template)
    }

    pub fn map_type(mut self, resource_type: impl Into<String>, template: impl Into<String>) -> Self {
        self.typed.insert(resource_type.into(), template.into());
        self
    }

    /// Registers a named route; links it produces carry `resource_type`.
    pub fn map_named(
        mut self,
        name: impl Into<String>,
        resource_type: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.named.insert(
            name.into(),
            NamedRoute {
                resource_type: resource_type.into(),
                template: template.into(),
            },
        );
        self
    }

    /// Resolves a resource type, failing when it is unmapped or a value is missing.
    pub fn resolve(&self, resource_type: &str, values: &RouteValues) -> Result<Link, HydraError> {
        let template = self
            .typed
            .get(resource_type)
            .ok_or_else(|| HydraError::UnknownRoute(resource_type.to_string()))?;
        Ok(Link::new(values.expand(template)?, resource_type))
    }

    pub fn resolve_route(&self, route_name: &str, values: &RouteValues) -> Result<Link, HydraError> {
        let route = self
            .named
            .get(route_name)
            .ok_or_else(|| HydraError::UnknownRoute(route_name.to_string()))?;
        Ok(Link::new(values.expand(&route.template)?, &route.resource_type))
    }

    /// A [`LinkContext`] for one request.
    pub fn bind(&self, request: RequestInfo) -> RequestLinks<'_> {
        RequestLinks {
            routes: self,
            request,
        }
    }
}

/// A [`RouteTable`] bound to the request being served.
#[derive(Debug)]
pub struct RequestLinks<'a> {
    routes: &'a RouteTable,
    request: RequestInfo,
}

impl RequestLinks<'_> {
    fn settle(&self, key: &str, resolved: Result<Link, HydraError>) -> Link {
        match resolved {
            Ok(link) => {
                debug!(key, id = %link.id, "Resolved link");
                link
            }
            Err(e) => {
                warn!(key, error = %e, "Unresolvable link");
                Link::none()
            }
        }
    }
}

impl LinkContext for RequestLinks<'_> {
    fn link(&self, resource_type: &str, values: &RouteValues) -> Link {
        self.settle(resource_type, self.routes.resolve(resource_type, values))
    }

    fn route(&self, route_name: &str, values: &RouteValues) -> Link {
        self.settle(route_name, self.routes.resolve_route(route_name, values))
    }

    fn current_url(&self) -> String {
        self.request.current_url()
    }

    fn host(&self) -> String {
        self.request.host.clone()
    }

    fn scheme(&self) -> String {
        self.request.scheme.clone()
    }
}
