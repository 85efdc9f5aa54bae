//! Demo host: loads settings, seeds a catalogue and walks a client through it.

use http::header::{ACCEPT, CONTENT_TYPE};
use http::Method;
use hydra_framework::tracing::setup_tracing;
use hydra_recipe::config::AppSettings;
use hydra_recipe::features::{Colour, Widget};
use hydra_recipe::http::{Form, Request, HTML, URL_ENCODED_FORM};
use hydra_recipe::lifecycle::HypermediaHost;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = AppSettings::load(std::path::Path::new(".")).map_err(|e| e.to_string())?;
    let host = HypermediaHost::new(
        settings,
        vec![
            Widget::new(1, "Sprocket", Colour::Green),
            Widget::new(2, "Anvil", Colour::Red).locked(),
        ],
    );

    let requests = vec![
        client_request(Method::GET, "/", &[], None)?,
        client_request(Method::GET, "/widgets", &[], None)?,
        client_request(Method::POST, "/widgets", &[("name", "Cog"), ("colour", "2")], None)?,
        client_request(
            Method::POST,
            "/widgets/3",
            &[("_method", "PUT"), ("name", "Big cog"), ("colour", "2")],
            None,
        )?,
        client_request(Method::GET, "/widgets/2", &[], None)?,
        client_request(Method::DELETE, "/widgets/2", &[], None)?,
        client_request(Method::GET, "/widgets/42", &[], Some(HTML))?,
    ];

    for request in requests {
        let span = tracing::info_span!("client", method = %request.method(), path = %request.uri().path());
        let response = host
            .dispatch(request)
            .instrument(span)
            .await
            .map_err(|e| e.to_string())?;
        info!(status = %response.status(), "Received response");
        println!("{} {}", response.status(), response.body());
    }

    Ok(())
}

fn client_request(
    method: Method,
    path: &str,
    fields: &[(&str, &str)],
    accept: Option<&str>,
) -> Result<Request, String> {
    let mut builder = http::Request::builder().method(method).uri(path);
    if !fields.is_empty() {
        builder = builder.header(CONTENT_TYPE, URL_ENCODED_FORM);
    }
    if let Some(accept) = accept {
        builder = builder.header(ACCEPT, accept);
    }
    let form: Form = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    builder.body(form).map_err(|e| e.to_string())
}
