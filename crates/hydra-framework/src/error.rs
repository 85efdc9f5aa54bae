//! # Framework Errors
//!
//! The representation model itself never fails. These errors belong to the edges:
//! emitting JSON and resolving routes to links.

/// Errors raised while emitting or linking representations.
#[derive(Debug, thiserror::Error)]
pub enum HydraError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
    #[error("Route {route} needs a value for {key}")]
    MissingRouteValue { route: String, key: String },
}
