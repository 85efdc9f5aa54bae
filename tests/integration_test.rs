use http::header::{ACCEPT, CONTENT_TYPE};
use http::StatusCode;
use hydra_framework::{Envelope, LinkCollection, Method};
use hydra_recipe::app::CATALOGUE_FULL;
use hydra_recipe::config::{AppSettings, ApplicationMode};
use hydra_recipe::features::{Colour, HomeHypermedia, Widget, WidgetHypermedia};
use hydra_recipe::http::{Form, Request, HTML, HYDRA_JSON, URL_ENCODED_FORM};
use hydra_recipe::lifecycle::HypermediaHost;

fn host_with(mode: ApplicationMode, widgets: Vec<Widget>) -> HypermediaHost {
    let settings = AppSettings {
        application_mode: mode,
        ..AppSettings::default()
    };
    HypermediaHost::new(settings, widgets)
}

fn host(mode: ApplicationMode) -> HypermediaHost {
    host_with(
        mode,
        vec![
            Widget::new(1, "Sprocket", Colour::Green),
            Widget::new(2, "Anvil", Colour::Red).locked(),
        ],
    )
}

fn get(path: &str) -> Request {
    http::Request::builder().uri(path).body(Form::new()).unwrap()
}

fn browse(path: &str) -> Request {
    http::Request::builder()
        .uri(path)
        .header(ACCEPT, HTML)
        .body(Form::new())
        .unwrap()
}

fn submit(method: http::Method, path: &str, fields: &[(&str, &str)]) -> Request {
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

/// A client that only follows what the representations advertise.
#[tokio::test]
async fn test_client_discovers_widgets_from_home() {
    let host = host(ApplicationMode::Development);

    let home = host.dispatch(get("/")).await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    assert_eq!(home.headers()[CONTENT_TYPE], HYDRA_JSON);
    let home: Envelope<HomeHypermedia> = serde_json::from_str(home.body()).unwrap();
    assert_eq!(home.context().vocab, "https://schema.org/");
    let widgets_url = home.root().widgets.id.clone();
    assert_eq!(widgets_url, "/widgets");

    let listing = host.dispatch(get(&widgets_url)).await.unwrap();
    let listing: Envelope<LinkCollection> = serde_json::from_str(listing.body()).unwrap();
    assert!(listing.root().can_post());
    let post = listing.root().get_post().unwrap();
    let fields: Vec<&str> = post.expected_properties().iter().map(|p| p.name()).collect();
    assert_eq!(fields, vec!["name", "colour"]);

    let anvil_url = listing.root().members()[1].id.clone();
    let anvil = host.dispatch(get(&anvil_url)).await.unwrap();
    let anvil: Envelope<WidgetHypermedia> = serde_json::from_str(anvil.body()).unwrap();
    assert_eq!(anvil.root().name, "Anvil");
    assert!(anvil.root().can(Method::Put));
    assert!(!anvil.root().can(Method::Delete));
}

#[tokio::test]
async fn test_html_form_updates_and_deletes_through_override() {
    let host = host(ApplicationMode::Production);

    let updated = host
        .dispatch(submit(
            http::Method::POST,
            "/widgets/1",
            &[("_method", "put"), ("name", "Golden sprocket"), ("colour", "2")],
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let widget: Envelope<WidgetHypermedia> = serde_json::from_str(updated.body()).unwrap();
    assert_eq!(widget.root().name, "Golden sprocket");
    assert_eq!(widget.root().colour, "Deep blue");

    let deleted = host
        .dispatch(submit(http::Method::POST, "/widgets/1", &[("_method", "DELETE")]))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = host.dispatch(get("/widgets/1")).await.unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_production_sends_browsers_to_not_found_page() {
    let host = host(ApplicationMode::Production);

    let browser = host.dispatch(browse("/widgets/42")).await.unwrap();
    assert_eq!(browser.status(), StatusCode::NOT_FOUND);
    assert!(browser.body().contains(r#""@id":"/NotFound""#));
    assert!(browser.body().contains(r#""@type":"ErrorPage""#));

    let api = host.dispatch(get("/widgets/42")).await.unwrap();
    assert_eq!(api.status(), StatusCode::NOT_FOUND);
    assert!(api.body().contains("Widget 42 does not exist"));
}

#[tokio::test]
async fn test_development_leaves_errors_untouched() {
    let host = host(ApplicationMode::Development);
    let response = host.dispatch(browse("/nowhere/at/all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.body().is_empty());
}

#[tokio::test]
async fn test_test_mode_rewrites_not_found_for_any_client() {
    let host = host(ApplicationMode::Test);
    let response = host.dispatch(get("/nowhere/at/all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.body().contains(r#""dcterms:title":"Not found""#));
}

#[tokio::test]
async fn test_locked_widget_delete_is_refused() {
    let host = host(ApplicationMode::Development);
    let response = host
        .dispatch(submit(http::Method::DELETE, "/widgets/2", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let widget: Envelope<WidgetHypermedia> = serde_json::from_str(response.body()).unwrap();
    assert!(widget.root().has_errors());
    assert_eq!(host.settings().application_mode, ApplicationMode::Development);
}

#[tokio::test]
async fn test_full_catalogue_refuses_new_widgets() {
    let host = host_with(
        ApplicationMode::Test,
        vec![Widget::new(i32::MAX, "Last", Colour::Blue)],
    );

    let refused = host
        .dispatch(submit(http::Method::POST, "/widgets", &[("name", "Overflow")]))
        .await
        .unwrap();
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    let listing: Envelope<LinkCollection> = serde_json::from_str(refused.body()).unwrap();
    assert!(listing.root().has_errors());
    assert!(refused.body().contains(CATALOGUE_FULL));
    assert_eq!(listing.root().members().len(), 1);
}

