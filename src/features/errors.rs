//! Representations behind the canonical error pages.

use super::{BAD_REQUEST_ROUTE, HOME_ROUTE, NOT_FOUND_ROUTE, SERVER_ERROR_ROUTE};
use http::StatusCode;
use hydra_framework::{Hypermedia, Link, LinkContext, Resource, RouteValues};
use serde::{Deserialize, Serialize};

/// Which error page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPage {
    BadRequest,
    NotFound,
    ServerError,
}

impl ErrorPage {
    /// Case-insensitive match on the page's path.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_matches('/').to_ascii_lowercase().as_str() {
            "badrequest" => Some(Self::BadRequest),
            "notfound" => Some(Self::NotFound),
            "servererror" => Some(Self::ServerError),
            _ => None,
        }
    }

    fn route(self) -> &'static str {
        match self {
            Self::BadRequest => BAD_REQUEST_ROUTE,
            Self::NotFound => NOT_FOUND_ROUTE,
            Self::ServerError => SERVER_ERROR_ROUTE,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::NotFound => "Not found",
            Self::ServerError => "Something went wrong",
        }
    }

    /// Status to answer with; a server error page keeps an upstream error status.
    pub fn status(self, upstream: StatusCode) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServerError if upstream.is_client_error() || upstream.is_server_error() => upstream,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPageHypermedia {
    #[serde(flatten)]
    resource: Resource,
    pub status: u16,
    pub home: Link,
}

impl Hypermedia for ErrorPageHypermedia {
    const TYPE: &'static str = "ErrorPage";

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl ErrorPageHypermedia {
    pub fn new(
        ctx: &impl LinkContext,
        page: ErrorPage,
        status: StatusCode,
        message: Option<&str>,
    ) -> Self {
        let mut resource = Resource::of::<Self>()
            .with_id(ctx.route(page.route(), &RouteValues::new()).id)
            .with_title(page.title());
        resource.add_get();
        if let Some(message) = message {
            resource.add_error_message(message);
        }
        resource.mark_populated();

        Self {
            resource,
            status: status.as_u16(),
            home: ctx.route(HOME_ROUTE, &RouteValues::new()).with_title("Home"),
        }
    }
}
