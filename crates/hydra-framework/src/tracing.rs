//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Engine** (`trace`/`debug`): affordance retraction, envelope emission size
//! - **Linking** (`debug`/`warn`): route resolution, unresolvable routes
//! - **Pipeline** (`info`/`warn`/`error`): request dispatch, error-page re-dispatch,
//!   handler faults
//!
//! ## Usage Examples
//!
//! ```bash
//! # Request flow only
//! RUST_LOG=info cargo run
//!
//! # Include route resolution and envelope sizes
//! RUST_LOG=debug cargo run
//!
//! # Every retracted affordance
//! RUST_LOG=hydra_framework=trace cargo run
//! ```
//!
//! With `RUST_LOG=debug` a request for the widget listing looks like:
//!
//! ```text
//! INFO dispatch: Handling request method=GET path="/widgets"
//! DEBUG dispatch: Resolved link resource_type="Widget" id="/widgets/1"
//! DEBUG dispatch: Envelope serialized bytes=512
//! ```

/// Initializes the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
