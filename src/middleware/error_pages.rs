//! # Error Page Middleware
//!
//! Turns failed requests into canonical error pages by re-dispatching them through the
//! inner handler.
//!
//! | status                  | page           | condition                     |
//! |-------------------------|----------------|-------------------------------|
//! | 400                     | `/badrequest`  | request body is HTML          |
//! | 404                     | `/NotFound`    | client accepts HTML           |
//! | 401, 402, 403, 500, 503 | `/ServerError` | client accepts HTML           |
//!
//! [`ErrorHandling::Live`] swallows handler faults: the response is cleared, set to 500,
//! and the fault message is handed to the error page in the `message` request header.
//! [`ErrorHandling::Test`] only rewrites 400 and 404 and always re-raises the original
//! fault so tests see it.
//!
//! Nothing is rewritten once the response has started.

use crate::http::{Handler, HandlerError, Request, RequestExt, Response, ResponseExt};
use async_trait::async_trait;
use http::header::HeaderName;
use http::{HeaderValue, StatusCode, Uri};
use tracing::{error, info, instrument, warn};

pub const NOT_FOUND_PAGE: &str = "/NotFound";
pub const SERVER_ERROR_PAGE: &str = "/ServerError";
pub const BAD_REQUEST_PAGE: &str = "/badrequest";

pub const MESSAGE_HEADER: HeaderName = HeaderName::from_static("message");
pub const DETAIL_HEADER: HeaderName = HeaderName::from_static("stack");

const SERVER_ERROR_STATUSES: [StatusCode; 5] = [
    StatusCode::UNAUTHORIZED,
    StatusCode::PAYMENT_REQUIRED,
    StatusCode::FORBIDDEN,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::SERVICE_UNAVAILABLE,
];

/// The page a status is rewritten to, if any.
pub fn error_page(status: StatusCode) -> Option<&'static str> {
    if status == StatusCode::NOT_FOUND {
        Some(NOT_FOUND_PAGE)
    } else if SERVER_ERROR_STATUSES.contains(&status) {
        Some(SERVER_ERROR_PAGE)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHandling {
    Live,
    Test,
}

pub struct ErrorPages<H> {
    next: H,
    mode: ErrorHandling,
}

fn attach(request: &mut Request, name: HeaderName, value: String) {
    match HeaderValue::from_str(&value) {
        Ok(value) => {
            request.headers_mut().insert(name, value);
        }
        Err(e) => warn!(header = %name, error = %e, "Fault detail is not a valid header value"),
    }
}

impl<H: Handler> ErrorPages<H> {
    pub fn live(next: H) -> Self {
        Self {
            next,
            mode: ErrorHandling::Live,
        }
    }

    pub fn test(next: H) -> Self {
        Self {
            next,
            mode: ErrorHandling::Test,
        }
    }

    pub fn mode(&self) -> ErrorHandling {
        self.mode
    }

    async fn redispatch(
        &self,
        page: &str,
        request: &mut Request,
        response: &mut Response,
    ) -> Result<(), HandlerError> {
        info!(from = %request.uri(), to = page, status = %response.status(), "Re-dispatching to error page");
        *request.uri_mut() = page.parse::<Uri>()?;
        self.next.handle(request, response).await
    }

    async fn handle_live(
        &self,
        request: &mut Request,
        response: &mut Response,
        outcome: Result<(), HandlerError>,
    ) -> Result<(), HandlerError> {
        if let Err(e) = outcome {
            error!(error = %e, path = %request.uri().path(), "Unhandled handler fault");
            if response.has_started() {
                warn!("The response has already started, the error page middleware will not be executed");
                return Err(e);
            }
            response.clear();
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            attach(request, MESSAGE_HEADER, e.to_string());
            attach(request, DETAIL_HEADER, format!("{e:?}"));
        }

        if response.has_started() {
            return Ok(());
        }

        let status = response.status();
        if status == StatusCode::BAD_REQUEST && request.sends_html() {
            error!(path = %request.uri().path(), "Bad request");
            return self.redispatch(BAD_REQUEST_PAGE, request, response).await;
        }
        if status == StatusCode::NOT_FOUND {
            error!(path = %request.uri().path(), "Page not found");
        }
        match error_page(status) {
            Some(page) if request.accepts_html() => self.redispatch(page, request, response).await,
            _ => Ok(()),
        }
    }

    async fn handle_test(
        &self,
        request: &mut Request,
        response: &mut Response,
        outcome: Result<(), HandlerError>,
    ) -> Result<(), HandlerError> {
        if let Err(e) = &outcome {
            error!(error = %e, path = %request.uri().path(), "Unhandled handler fault");
            if response.has_started() {
                warn!("The response has already started, the error page middleware will not be executed");
            }
        }

        if response.has_started() {
            return outcome;
        }

        let status = response.status();
        let rewrite = if status == StatusCode::BAD_REQUEST && request.sends_html() {
            Some(BAD_REQUEST_PAGE)
        } else if status == StatusCode::NOT_FOUND {
            Some(NOT_FOUND_PAGE)
        } else {
            None
        };

        if let Some(page) = rewrite {
            if let Err(page_error) = self.redispatch(page, request, response).await {
                if outcome.is_ok() {
                    return Err(page_error);
                }
                error!(error = %page_error, page, "Error page failed while handling an earlier fault");
            }
        }
        outcome
    }
}

#[async_trait]
impl<H: Handler> Handler for ErrorPages<H> {
    #[instrument(skip_all, fields(mode = ?self.mode))]
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError> {
        let outcome = self.next.handle(request, response).await;
        match self.mode {
            ErrorHandling::Live => self.handle_live(request, response, outcome).await,
            ErrorHandling::Test => self.handle_test(request, response, outcome).await,
        }
    }
}
