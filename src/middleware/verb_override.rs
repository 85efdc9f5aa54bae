//! # Verb Override
//!
//! HTML forms can only GET or POST. A form POST carrying a `_method` field is passed on
//! with that method instead, so PUT and DELETE affordances work from a browser.

use crate::http::{Handler, HandlerError, Request, RequestExt, Response};
use async_trait::async_trait;
use http::Method;
use tracing::{debug, warn};

pub const METHOD_FIELD: &str = "_method";

pub struct VerbOverride<H> {
    next: H,
}

impl<H: Handler> VerbOverride<H> {
    pub fn new(next: H) -> Self {
        Self { next }
    }
}

fn requested_method(request: &Request) -> Option<Method> {
    if request.method() != Method::POST || !request.has_form_content_type() {
        return None;
    }
    let raw = request.field(METHOD_FIELD)?.trim();
    if raw.is_empty() {
        return None;
    }
    match Method::from_bytes(raw.to_ascii_uppercase().as_bytes()) {
        Ok(method) => Some(method),
        Err(e) => {
            warn!(method = raw, error = %e, "Ignoring invalid method override");
            None
        }
    }
}

#[async_trait]
impl<H: Handler> Handler for VerbOverride<H> {
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError> {
        if let Some(method) = requested_method(request) {
            debug!(%method, path = %request.uri().path(), "Overriding form method");
            *request.method_mut() = method;
        }
        self.next.handle(request, response).await
    }
}
