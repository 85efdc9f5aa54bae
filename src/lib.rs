//! # Hydra Recipe
//!
//! > **A recipe for self-describing REST resources in Rust.**
//!
//! This crate serves a small widget catalogue as Hydra/JSON-LD hypermedia, built on the
//! [`hydra_framework`] engine. Every response tells the client what it may do next:
//! a locked widget simply has no DELETE operation, and an HTML form can reach PUT and
//! DELETE through the `_method` override.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`hydra_framework`])
//! Resources, operations, supporting properties, links, collections and the envelope.
//! Nothing in it knows about HTTP.
//!
//! ### 2. Features ([`features`])
//! One module per resource. Each builds its representation from domain values and a
//! [`LinkContext`](hydra_framework::LinkContext). [`features::routes`] decides every URL.
//!
//! ### 3. Linking ([`routing`])
//! [`RouteTable`](routing::RouteTable) is the application's linking service: typed and
//! named templates, bound per request.
//!
//! ### 4. Pipeline ([`http`], [`middleware`], [`app`])
//! An async [`Handler`](http::Handler) chain: error pages, verb override, then the
//! application itself.
//!
//! ### 5. Lifecycle ([`lifecycle`], [`config`])
//! [`AppSettings`](config::AppSettings) selects the [`ApplicationMode`](config::ApplicationMode);
//! [`HypermediaHost`](lifecycle::HypermediaHost) assembles the matching pipeline.
//!
//! ## Testing
//!
//! Features are tested against [`MockContext`](hydra_framework::mock::MockContext);
//! the pipeline is tested end to end through [`HypermediaHost`](lifecycle::HypermediaHost)
//! in `tests/`.

pub mod app;
pub mod config;
pub mod features;
pub mod http;
pub mod lifecycle;
pub mod middleware;
pub mod routing;
