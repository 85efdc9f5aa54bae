//! # Features
//!
//! One module per resource the application serves. Each builds its representation from
//! domain values and a [`LinkContext`](hydra_framework::LinkContext); none of them knows
//! a URL. [`routes`] is the single place URLs are decided.

pub mod errors;
pub mod home;
pub mod widgets;

pub use errors::{ErrorPage, ErrorPageHypermedia};
pub use home::HomeHypermedia;
pub use widgets::{Colour, Widget, WidgetForm, WidgetHypermedia};

use crate::middleware::error_pages::{BAD_REQUEST_PAGE, NOT_FOUND_PAGE, SERVER_ERROR_PAGE};
use crate::routing::RouteTable;
use hydra_framework::{Hypermedia, COLLECTION_TYPE};

pub const HOME_ROUTE: &str = "home";
pub const WIDGETS_ROUTE: &str = "widgets";
pub const BAD_REQUEST_ROUTE: &str = "bad-request";
pub const NOT_FOUND_ROUTE: &str = "not-found";
pub const SERVER_ERROR_ROUTE: &str = "server-error";

/// The application's route table.
pub fn routes() -> RouteTable {
    RouteTable::new()
        .map::<HomeHypermedia>("/")
        .map::<WidgetHypermedia>("/widgets/{id}")
        .map_named(HOME_ROUTE, HomeHypermedia::TYPE, "/")
        .map_named(WIDGETS_ROUTE, COLLECTION_TYPE, "/widgets")
        .map_named(BAD_REQUEST_ROUTE, ErrorPageHypermedia::TYPE, BAD_REQUEST_PAGE)
        .map_named(NOT_FOUND_ROUTE, ErrorPageHypermedia::TYPE, NOT_FOUND_PAGE)
        .map_named(SERVER_ERROR_ROUTE, ErrorPageHypermedia::TYPE, SERVER_ERROR_PAGE)
}
