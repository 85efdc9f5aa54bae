use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::StatusCode;
use hydra_recipe::config::ApplicationMode;
use hydra_recipe::http::{
    Form, Handler, HandlerError, Request, RequestExt, Response, ResponseExt, HTML, URL_ENCODED_FORM,
};
use hydra_recipe::lifecycle::pipeline;
use hydra_recipe::middleware::error_pages::{BAD_REQUEST_PAGE, MESSAGE_HEADER, SERVER_ERROR_PAGE};

/// `/boom` fails, `/streaming-boom` fails after starting the response, `/status/{n}`
/// answers with status `n`, anything else echoes the path, method and `message` header.
struct Scripted;

#[async_trait]
impl Handler for Scripted {
    async fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), HandlerError> {
        match request.uri().path() {
            "/boom" => Err(HandlerError::Failed("database unavailable".to_string())),
            "/streaming-boom" => {
                response.start();
                Err(HandlerError::Failed("connection reset".to_string()))
            }
            path if path.starts_with("/status/") => {
                let code = path["/status/".len()..].parse().unwrap_or(200);
                *response.status_mut() = StatusCode::from_u16(code).unwrap_or(StatusCode::OK);
                Ok(())
            }
            path => {
                *response.body_mut() = format!(
                    "{} {} {}",
                    request.method(),
                    path,
                    request.header_str(MESSAGE_HEADER.as_str()).unwrap_or("-")
                );
                Ok(())
            }
        }
    }
}

fn get(path: &str, accept: Option<&str>, content_type: Option<&str>) -> Request {
    let mut builder = http::Request::builder().uri(path);
    if let Some(accept) = accept {
        builder = builder.header(ACCEPT, accept);
    }
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Form::new()).unwrap()
}

async fn run(mode: ApplicationMode, mut request: Request) -> (Result<(), HandlerError>, Response) {
    let handler = pipeline(mode, Scripted);
    let mut response = Response::default();
    let outcome = handler.handle(&mut request, &mut response).await;
    (outcome, response)
}

#[tokio::test]
async fn test_live_swallows_fault_and_shows_server_error() {
    let (outcome, response) = run(ApplicationMode::Production, get("/boom", Some(HTML), None)).await;

    assert!(outcome.is_ok());
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body(),
        &format!("GET {SERVER_ERROR_PAGE} Handler failed: database unavailable")
    );
}

#[tokio::test]
async fn test_live_fault_for_api_client_is_bare_500() {
    let (outcome, response) = run(ApplicationMode::Production, get("/boom", None, None)).await;
    assert!(outcome.is_ok());
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_live_reraises_once_response_started() {
    let (outcome, response) = run(
        ApplicationMode::Production,
        get("/streaming-boom", Some(HTML), None),
    )
    .await;
    assert!(matches!(outcome, Err(HandlerError::Failed(ref m)) if m == "connection reset"));
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_live_bad_request_needs_html_body() {
    let (_, html) = run(ApplicationMode::Production, get("/status/400", None, Some(HTML))).await;
    assert_eq!(html.body(), &format!("GET {BAD_REQUEST_PAGE} -"));

    let (_, json) = run(
        ApplicationMode::Production,
        get("/status/400", Some(HTML), Some("application/json")),
    )
    .await;
    assert_eq!(json.status(), StatusCode::BAD_REQUEST);
    assert!(json.body().is_empty());
}

#[tokio::test]
async fn test_live_unauthorized_goes_to_server_error_page() {
    let (_, response) = run(ApplicationMode::Production, get("/status/401", Some(HTML), None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.body(), &format!("GET {SERVER_ERROR_PAGE} -"));
}

#[tokio::test]
async fn test_test_mode_reraises_fault() {
    let (outcome, response) = run(ApplicationMode::Test, get("/boom", Some(HTML), None)).await;
    assert!(matches!(outcome, Err(HandlerError::Failed(_))));
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_test_mode_ignores_server_errors() {
    let (outcome, response) = run(ApplicationMode::Test, get("/status/503", Some(HTML), None)).await;
    assert!(outcome.is_ok());
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_development_propagates_fault() {
    let (outcome, _) = run(ApplicationMode::Development, get("/boom", None, None)).await;
    assert!(outcome.is_err());
}

#[tokio::test]
async fn test_verb_override_runs_inside_error_pages() {
    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/widgets/1")
        .header(CONTENT_TYPE, URL_ENCODED_FORM)
        .body(Form::from([("_method".to_string(), "delete".to_string())]))
        .unwrap();
    let (_, response) = run(ApplicationMode::Production, request).await;
    assert_eq!(response.body(), "DELETE /widgets/1 -");
}
