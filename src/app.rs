//! # Hypermedia Application
//!
//! The innermost [`Handler`]: matches the request path to a feature, runs it against an
//! in-memory widget catalogue, and writes the resulting envelope.
//!
//! | path               | methods               |
//! |--------------------|-----------------------|
//! | `/`                | GET                   |
//! | `/widgets`         | GET, POST             |
//! | `/widgets/{id}`    | GET, PUT, DELETE      |
//! | `/NotFound`, `/ServerError`, `/badrequest` | any (case-insensitive) |
//!
//! Unknown paths answer 404 with an empty body; known paths with an unsupported method
//! answer 405.

use crate::config::AppSettings;
use crate::features::widgets::{self, LOCKED_ALERT};
use crate::features::{
    ErrorPage, ErrorPageHypermedia, HomeHypermedia, Widget, WidgetForm, WidgetHypermedia,
};
use crate::http::{Handler, HandlerError, Request, RequestExt, Response, ResponseExt};
use crate::middleware::error_pages::MESSAGE_HEADER;
use crate::routing::{RequestInfo, RequestLinks, RouteTable};
use async_trait::async_trait;
use http::StatusCode;
use hydra_framework::text::to_int;
use hydra_framework::{Envelope, Method};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

pub const CATALOGUE_FULL: &str = "The catalogue cannot hold any more widgets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Home,
    Widgets,
    Widget(i32),
    ErrorPage(ErrorPage),
    Unknown,
}

impl Target {
    fn of(path: &str) -> Self {
        if let Some(page) = ErrorPage::from_path(path) {
            return Self::ErrorPage(page);
        }
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["widgets"] => Self::Widgets,
            ["widgets", id] => Self::Widget(to_int(id)),
            _ => Self::Unknown,
        }
    }
}

struct Catalogue {
    widgets: Vec<Widget>,
    /// `None` once every id up to `i32::MAX` has been handed out.
    next_id: Option<i32>,
}

impl Catalogue {
    fn new(widgets: Vec<Widget>) -> Self {
        let highest = widgets.iter().map(|w| w.id).max().unwrap_or(0);
        Self {
            next_id: highest.checked_add(1),
            widgets,
        }
    }

    fn find(&self, id: i32) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn find_mut(&mut self, id: i32) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    fn allocate_id(&mut self) -> Option<i32> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }
}

pub struct HypermediaApp {
    routes: RouteTable,
    scheme: String,
    host: String,
    catalogue: RwLock<Catalogue>,
}

fn respond<R: Serialize>(
    response: &mut Response,
    status: StatusCode,
    root: R,
) -> Result<(), HandlerError> {
    let body = Envelope::new(root).to_json()?;
    response.write_json(status, body);
    Ok(())
}

impl HypermediaApp {
    pub fn new(settings: &AppSettings, routes: RouteTable, widgets: Vec<Widget>) -> Self {
        Self {
            routes,
            scheme: settings.scheme.clone(),
            host: settings.host.clone(),
            catalogue: RwLock::new(Catalogue::new(widgets)),
        }
    }

    fn links(&self, request: &Request) -> RequestLinks<'_> {
        let path_and_query = request
            .uri()
            .path_and_query()
            .map(|p| p.as_str())
            .unwrap_or("/");
        self.routes
            .bind(RequestInfo::new(&self.scheme, &self.host, path_and_query))
    }

    async fn create(&self, request: &Request, response: &mut Response) -> Result<(), HandlerError> {
        let links = self.links(request);
        let mut catalogue = self.catalogue.write().await;

        let form = WidgetForm::parse(request.body());
        let id = match &form {
            Ok(_) => catalogue.allocate_id(),
            Err(_) => catalogue.next_id,
        };
        match (form, id) {
            (Ok(form), Some(id)) => {
                let widget = Widget::new(id, form.name, form.colour);
                info!(id, "Widget created");
                let body = WidgetHypermedia::new(&links, &widget);
                catalogue.widgets.push(widget);
                respond(response, StatusCode::CREATED, body)
            }
            (form, id) => {
                let mut errors = form.err().unwrap_or_default();
                if id.is_none() {
                    warn!("Widget ids exhausted");
                    errors.push(CATALOGUE_FULL.to_string());
                }
                let mut listing = widgets::collection(&links, &catalogue.widgets);
                for error in errors {
                    listing.add_error_message(error);
                }
                respond(response, StatusCode::BAD_REQUEST, listing)
            }
        }
    }

    async fn update(&self, id: i32, request: &Request, response: &mut Response) -> Result<(), HandlerError> {
        let links = self.links(request);
        let mut catalogue = self.catalogue.write().await;
        let Some(widget) = catalogue.find_mut(id) else {
            return respond(response, StatusCode::NOT_FOUND, WidgetHypermedia::not_found(&links, id));
        };
        match WidgetForm::parse(request.body()) {
            Ok(form) => {
                widget.name = form.name;
                widget.colour = form.colour;
                info!(id, "Widget updated");
                respond(response, StatusCode::OK, WidgetHypermedia::new(&links, widget))
            }
            Err(errors) => {
                let mut body = WidgetHypermedia::new(&links, widget);
                for error in errors {
                    body.add_error_message(error);
                }
                respond(response, StatusCode::BAD_REQUEST, body)
            }
        }
    }

    async fn delete(&self, id: i32, request: &Request, response: &mut Response) -> Result<(), HandlerError> {
        let links = self.links(request);
        let mut catalogue = self.catalogue.write().await;
        let Some(index) = catalogue.widgets.iter().position(|w| w.id == id) else {
            return respond(response, StatusCode::NOT_FOUND, WidgetHypermedia::not_found(&links, id));
        };
        if catalogue.widgets[index].locked {
            let mut body = WidgetHypermedia::new(&links, &catalogue.widgets[index]);
            body.add_error_message(LOCKED_ALERT);
            return respond(response, StatusCode::CONFLICT, body);
        }
        catalogue.widgets.remove(index);
        info!(id, "Widget deleted");
        *response.status_mut() = StatusCode::NO_CONTENT;
        Ok(())
    }
}

#[async_trait]
impl Handler for HypermediaApp {
    #[instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError> {
        let target = Target::of(request.uri().path());
        let method = Method::parse(request.method().as_str());
        debug!(?target, ?method, "Routing request");

        match (target, method) {
            (Target::ErrorPage(page), _) => {
                let status = page.status(response.status());
                let body = ErrorPageHypermedia::new(
                    &self.links(request),
                    page,
                    status,
                    request.header_str(MESSAGE_HEADER.as_str()),
                );
                respond(response, status, body)
            }
            (Target::Home, Some(Method::Get)) => {
                respond(response, StatusCode::OK, HomeHypermedia::new(&self.links(request)))
            }
            (Target::Widgets, Some(Method::Get)) => {
                let catalogue = self.catalogue.read().await;
                let listing = widgets::collection(&self.links(request), &catalogue.widgets);
                respond(response, StatusCode::OK, listing)
            }
            (Target::Widgets, Some(Method::Post)) => self.create(request, response).await,
            (Target::Widget(id), Some(Method::Get)) => {
                let links = self.links(request);
                let catalogue = self.catalogue.read().await;
                match catalogue.find(id) {
                    Some(widget) => respond(response, StatusCode::OK, WidgetHypermedia::new(&links, widget)),
                    None => respond(response, StatusCode::NOT_FOUND, WidgetHypermedia::not_found(&links, id)),
                }
            }
            (Target::Widget(id), Some(Method::Put)) => self.update(id, request, response).await,
            (Target::Widget(id), Some(Method::Delete)) => self.delete(id, request, response).await,
            (Target::Unknown, _) => {
                *response.status_mut() = StatusCode::NOT_FOUND;
                Ok(())
            }
            _ => {
                *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{self, Colour};
    use crate::http::{Form, URL_ENCODED_FORM};
    use http::header::CONTENT_TYPE;

    fn app_with(widgets: Vec<Widget>) -> HypermediaApp {
        HypermediaApp::new(&AppSettings::default(), features::routes(), widgets)
    }

    fn app() -> HypermediaApp {
        app_with(vec![
            Widget::new(1, "Sprocket", Colour::Green),
            Widget::new(2, "Anvil", Colour::Red).locked(),
        ])
    }

    fn request(method: http::Method, path: &str, fields: &[(&str, &str)]) -> Request {
        let form: Form = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        http::Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, URL_ENCODED_FORM)
            .body(form)
            .unwrap()
    }

    fn get(path: &str) -> Request {
        request(http::Method::GET, path, &[])
    }

    async fn send(app: &HypermediaApp, mut request: Request) -> Response {
        let mut response = Response::default();
        app.handle(&mut request, &mut response).await.unwrap();
        response
    }

    #[test]
    fn test_target_matching() {
        assert_eq!(Target::of("/"), Target::Home);
        assert_eq!(Target::of("/widgets"), Target::Widgets);
        assert_eq!(Target::of("/widgets/7"), Target::Widget(7));
        assert_eq!(Target::of("/widgets/abc"), Target::Widget(0));
        assert_eq!(Target::of("/NOTFOUND"), Target::ErrorPage(ErrorPage::NotFound));
        assert_eq!(Target::of("/gadgets/1/2"), Target::Unknown);
    }

    #[tokio::test]
    async fn test_get_widget() {
        let response = send(&app(), get("/widgets/1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().contains(r#""@id":"/widgets/1""#));
        assert!(response.body().contains(r#""colour":"Green""#));
    }

    #[tokio::test]
    async fn test_missing_widget_is_placeholder() {
        let response = send(&app(), get("/widgets/99")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.body().contains("Widget 99 does not exist"));
        assert!(response.body().contains(r#""operation":[]"#));
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = app();
        let created = send(
            &app,
            request(http::Method::POST, "/widgets", &[("name", "Cog"), ("colour", "2")]),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.body().contains(r#""@id":"/widgets/3""#));

        let listing = send(&app, get("/widgets")).await;
        assert!(listing.body().contains(r#""dcterms:title":"Cog""#));
    }

    #[tokio::test]
    async fn test_invalid_create_reports_errors() {
        let response = send(&app(), request(http::Method::POST, "/widgets", &[])).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.body().contains(r#""errorMessages":["Name is required"]"#));
    }

    #[tokio::test]
    async fn test_highest_id_exhausts_catalogue() {
        let app = app_with(vec![Widget::new(i32::MAX, "Last", Colour::Blue)]);

        let refused = send(&app, request(http::Method::POST, "/widgets", &[("name", "One more")])).await;
        assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
        assert!(refused.body().contains(CATALOGUE_FULL));

        let listing = send(&app, get("/widgets")).await;
        assert!(!listing.body().contains("One more"));
    }

    #[test]
    fn test_allocate_id_stops_at_max() {
        let mut catalogue = Catalogue::new(vec![Widget::new(i32::MAX - 1, "Nearly", Colour::Red)]);
        assert_eq!(catalogue.allocate_id(), Some(i32::MAX));
        assert_eq!(catalogue.allocate_id(), None);
        assert_eq!(catalogue.allocate_id(), None);
    }

    #[tokio::test]
    async fn test_locked_widget_refuses_delete() {
        let app = app();
        let refused = send(&app, request(http::Method::DELETE, "/widgets/2", &[])).await;
        assert_eq!(refused.status(), StatusCode::CONFLICT);

        let deleted = send(&app, request(http::Method::DELETE, "/widgets/1", &[])).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert_eq!(send(&app, get("/widgets/1")).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let response = send(&app(), request(http::Method::DELETE, "/widgets", &[])).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(send(&app(), get("/gadgets/1/2")).await.status(), StatusCode::NOT_FOUND);
    }
}
