//! # Mock Linking Service & Testing Guide
//!
//! `MockContext` implements [`LinkContext`] entirely from expectations. It lets you test
//! feature constructors (the code that asks for links and decides which affordances to
//! advertise) without configuring a route table.
//!
//! ## When to use the Mock vs a Route Table
//!
//! | Feature | MockContext | Route table |
//! |---------|-------------|-------------|
//! | **Setup** | One line per expected lookup | Full route registration |
//! | **Verification** | `verify()` checks every lookup happened | None |
//! | **Use Case** | Unit testing a single hypermedia constructor | Integration tests of the app |
//!
//! ## Example
//!
//! ```rust
//! use hydra_framework::mock::MockContext;
//! use hydra_framework::{Hypermedia, Link, LinkContextExt, Resource};
//!
//! struct Home { resource: Resource }
//!
//! impl Hypermedia for Home {
//!     const TYPE: &'static str = "Home";
//!     fn resource(&self) -> &Resource { &self.resource }
//!     fn resource_mut(&mut self) -> &mut Resource { &mut self.resource }
//! }
//!
//! impl Home {
//!     fn new(ctx: &impl LinkContextExt) -> Self {
//!         let mut resource = Resource::of::<Home>().with_id(ctx.link_to::<Home>().id);
//!         resource.add_get();
//!         Self { resource }
//!     }
//! }
//!
//! let mock = MockContext::new();
//! mock.expect_link("Home").return_link(Link::new("/", "Home"));
//!
//! let home = Home::new(&mock);
//! assert_eq!(home.resource().id, "/");
//! mock.verify();
//! ```
//!
//! ## Failure Scenarios
//!
//! Expect a lookup and answer with [`Link::none`] to exercise the "unresolvable route"
//! branch of a constructor:
//!
//! ```rust
//! use hydra_framework::mock::MockContext;
//! use hydra_framework::{Link, LinkContext, RouteValues};
//!
//! let mock = MockContext::new();
//! mock.expect_route("Archive").return_link(Link::none());
//! assert!(mock.route("Archive", &RouteValues::new()).is_empty());
//! mock.verify();
//! ```

use crate::context::{LinkContext, RouteValues};
use crate::link::Link;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected lookup and the link to answer it with.
#[derive(Debug)]
enum Expectation {
    Link { resource_type: String, response: Link },
    Route { route_name: String, response: Link },
}

/// A linking service driven by queued expectations.
///
/// Lookups must arrive in the order they were expected; a lookup that does not match
/// the next expectation panics.
#[derive(Debug, Clone)]
pub struct MockContext {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    current_url: String,
    host: String,
    scheme: String,
}

impl Default for MockContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MockContext {
    /// A mock serving `http://localhost/` with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            current_url: "http://localhost/".to_string(),
            host: "localhost".to_string(),
            scheme: "http".to_string(),
        }
    }

    /// Overrides the request information the mock reports.
    pub fn with_request(
        mut self,
        scheme: impl Into<String>,
        host: impl Into<String>,
        current_url: impl Into<String>,
    ) -> Self {
        self.scheme = scheme.into();
        self.host = host.into();
        self.current_url = current_url.into();
        self
    }

    /// Expects a [`LinkContext::link`] lookup for `resource_type`.
    pub fn expect_link(&self, resource_type: impl Into<String>) -> LinkExpectationBuilder {
        LinkExpectationBuilder {
            resource_type: resource_type.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a [`LinkContext::route`] lookup for `route_name`.
    pub fn expect_route(&self, route_name: impl Into<String>) -> RouteExpectationBuilder {
        RouteExpectationBuilder {
            route_name: route_name.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self) -> Option<Expectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

impl LinkContext for MockContext {
    fn link(&self, resource_type: &str, _values: &RouteValues) -> Link {
        match self.next() {
            Some(Expectation::Link {
                resource_type: expected,
                response,
            }) if expected == resource_type => response,
            other => panic!("Unexpected link lookup for {resource_type}, expected {other:?}"),
        }
    }

    fn route(&self, route_name: &str, _values: &RouteValues) -> Link {
        match self.next() {
            Some(Expectation::Route {
                route_name: expected,
                response,
            }) if expected == route_name => response,
            other => panic!("Unexpected route lookup for {route_name}, expected {other:?}"),
        }
    }

    fn current_url(&self) -> String {
        self.current_url.clone()
    }

    fn host(&self) -> String {
        self.host.clone()
    }

    fn scheme(&self) -> String {
        self.scheme.clone()
    }
}

/// Builder for `link` expectations.
pub struct LinkExpectationBuilder {
    resource_type: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl LinkExpectationBuilder {
    pub fn return_link(self, link: Link) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Link {
            resource_type: self.resource_type,
            response: link,
        });
    }
}

/// Builder for `route` expectations.
pub struct RouteExpectationBuilder {
    route_name: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl RouteExpectationBuilder {
    pub fn return_link(self, link: Link) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Route {
            route_name: self.route_name,
            response: link,
        });
    }
}
