//! # Host Lifecycle
//!
//! Assembles the request pipeline for the configured [`ApplicationMode`] and drives
//! requests through it.
//!
//! | mode        | pipeline (outermost first)                    |
//! |-------------|-----------------------------------------------|
//! | Production  | live error pages, verb override, application  |
//! | Test        | test error pages, verb override, application  |
//! | Development | verb override, application                    |

use crate::app::HypermediaApp;
use crate::config::{AppSettings, ApplicationMode};
use crate::features::{self, Widget};
use crate::http::{Handler, HandlerError, Request, Response};
use crate::middleware::{ErrorPages, VerbOverride};
use tracing::{info, instrument};

/// Wraps `app` in the middleware `mode` calls for.
pub fn pipeline<H: Handler + 'static>(mode: ApplicationMode, app: H) -> Box<dyn Handler> {
    let inner = VerbOverride::new(app);
    match mode {
        ApplicationMode::Production => Box::new(ErrorPages::live(inner)),
        ApplicationMode::Test => Box::new(ErrorPages::test(inner)),
        ApplicationMode::Development => Box::new(inner),
    }
}

/// The running application: settings plus the assembled pipeline.
///
/// # Example
///
/// ```ignore
/// let host = HypermediaHost::new(AppSettings::default(), vec![]);
/// let request = http::Request::builder().uri("/").body(Form::new())?;
/// let response = host.dispatch(request).await?;
/// assert_eq!(response.status(), StatusCode::OK);
/// ```
pub struct HypermediaHost {
    settings: AppSettings,
    pipeline: Box<dyn Handler>,
}

impl HypermediaHost {
    /// Builds the application over an initial widget catalogue.
    pub fn new(settings: AppSettings, widgets: Vec<Widget>) -> Self {
        let app = HypermediaApp::new(&settings, features::routes(), widgets);
        let pipeline = pipeline(settings.application_mode, app);
        info!(mode = %settings.application_mode, "Pipeline assembled");
        Self { settings, pipeline }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    #[instrument(name = "dispatch", skip_all, fields(method = %request.method(), path = %request.uri().path()))]
    pub async fn dispatch(&self, mut request: Request) -> Result<Response, HandlerError> {
        info!("Handling request");
        let mut response = Response::default();
        self.pipeline.handle(&mut request, &mut response).await?;
        info!(status = %response.status(), "Request complete");
        Ok(response)
    }
}
