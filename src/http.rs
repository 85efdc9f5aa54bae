//! # Request Pipeline Primitives
//!
//! Requests and responses are plain [`http`] types: an [`http::Request`] whose body is
//! the submitted [`Form`], and an [`http::Response`] whose body is the serialized
//! envelope. They flow through a chain of [`Handler`]s; middleware wraps the next
//! handler and may rewrite the request, inspect the response afterwards, or re-dispatch
//! to another path.
//!
//! [`RequestExt`] and [`ResponseExt`] add the few content-negotiation and bookkeeping
//! helpers the pipeline needs.

use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, StatusCode};
use hydra_framework::HydraError;
use std::collections::BTreeMap;
use thiserror::Error;

pub const HTML: &str = "text/html";
pub const HYDRA_JSON: &str = "application/ld+json";
pub const URL_ENCODED_FORM: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM: &str = "multipart/form-data";

/// Submitted form fields.
pub type Form = BTreeMap<String, String>;

pub type Request = http::Request<Form>;

pub type Response = http::Response<String>;

/// Faults raised by handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Hydra(#[from] HydraError),
    #[error(transparent)]
    InvalidUri(#[from] http::uri::InvalidUri),
}

/// Response extension marking that headers have gone out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Started;

pub trait RequestExt {
    fn header_str(&self, name: &str) -> Option<&str>;

    fn accepts_html(&self) -> bool;

    fn sends_html(&self) -> bool;

    fn has_form_content_type(&self) -> bool;

    fn field(&self, key: &str) -> Option<&str>;
}

impl RequestExt for Request {
    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }

    fn accepts_html(&self) -> bool {
        self.header_str(ACCEPT.as_str()).is_some_and(|a| a.contains(HTML))
    }

    fn sends_html(&self) -> bool {
        self.header_str(CONTENT_TYPE.as_str()).is_some_and(|c| c.contains(HTML))
    }

    fn has_form_content_type(&self) -> bool {
        self.header_str(CONTENT_TYPE.as_str())
            .is_some_and(|c| c.starts_with(URL_ENCODED_FORM) || c.starts_with(MULTIPART_FORM))
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.body().get(key).map(String::as_str)
    }
}

pub trait ResponseExt {
    /// Marks the response as started; it can no longer be rewritten.
    fn start(&mut self);

    fn has_started(&self) -> bool;

    /// Drops everything written so far.
    fn clear(&mut self);

    fn write_json(&mut self, status: StatusCode, body: String);
}

impl ResponseExt for Response {
    fn start(&mut self) {
        self.extensions_mut().insert(Started);
    }

    fn has_started(&self) -> bool {
        self.extensions().get::<Started>().is_some()
    }

    fn clear(&mut self) {
        *self = Response::default();
    }

    fn write_json(&mut self, status: StatusCode, body: String) {
        *self.status_mut() = status;
        self.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(HYDRA_JSON));
        *self.body_mut() = body;
    }
}

/// One stage of the pipeline.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError>;
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Box<H> {
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError> {
        (**self).handle(request, response).await
    }
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError> {
        (**self).handle(request, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn request(content_type: Option<&str>, accept: Option<&str>) -> Request {
        let mut builder = http::Request::builder().method(Method::POST).uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }
        builder.body(Form::new()).unwrap()
    }

    #[test]
    fn test_accept_and_content_type_checks() {
        let browser = request(None, Some("text/html,application/xhtml+xml"));
        assert!(browser.accepts_html());
        assert!(!browser.sends_html());
        assert!(!request(None, None).accepts_html());
    }

    #[test]
    fn test_form_content_types() {
        assert!(request(Some(URL_ENCODED_FORM), None).has_form_content_type());
        assert!(request(Some("multipart/form-data; boundary=x"), None).has_form_content_type());
        assert!(!request(Some("application/json"), None).has_form_content_type());
    }

    #[test]
    fn test_field_reads_form_body() {
        let request = http::Request::builder()
            .uri("/widgets")
            .body(Form::from([("name".to_string(), "Cog".to_string())]))
            .unwrap();
        assert_eq!(request.field("name"), Some("Cog"));
        assert_eq!(request.field("colour"), None);
    }

    #[test]
    fn test_clear_resets_response() {
        let mut response = Response::default();
        response.write_json(StatusCode::NOT_FOUND, "{}".to_string());
        assert_eq!(response.headers()[CONTENT_TYPE], HYDRA_JSON);

        response.clear();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_started_marker() {
        let mut response = Response::default();
        assert!(!response.has_started());
        response.start();
        assert!(response.has_started());
    }
}
