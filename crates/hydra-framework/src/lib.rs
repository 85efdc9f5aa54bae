//! # Hydra Framework
//!
//! This crate builds self-describing REST representations in the style of the
//! [Hydra](http://www.w3.org/ns/hydra/core) vocabulary. Every representation carries
//! its data **and** the operations a client may legally perform next, together with the
//! inputs each operation expects. Clients discover affordances instead of hard-coding
//! them.
//!
//! ## Why Hypermedia?
//!
//! - **Discoverability**: a client reads `can_put()` off the response rather than
//!   re-deriving business rules.
//! - **Evolvability**: adding a field to a form is a server-side change only.
//! - **Uniformity**: every resource, whatever its domain, speaks the same CRUD shape.
//!
//! **Further Reading**:
//! - [Hydra Core Vocabulary](https://www.hydra-cg.com/spec/latest/core/)
//! - [REST / HATEOAS](https://www.ics.uci.edu/~fielding/pubs/dissertation/rest_arch_style.htm) - Roy Fielding's dissertation
//!
//! ## Architecture Overview
//!
//! Leaf first:
//!
//! 1. **Input descriptors** ([`SupportingProperty`]) - one expected field, its [`Range`],
//!    default and choices
//! 2. **Affordances** ([`Operation`]) - a [`Method`] plus the fields it expects
//! 3. **References** ([`Link`]) - id, type and title of a resource
//! 4. **Representations** ([`Resource`], [`Collection`]) - identity, affordances, errors
//! 5. **Wire root** ([`Envelope`]) - vocabulary `@context` plus one representation
//! 6. **Linking contract** ([`LinkContext`]) - resolves types and routes to links
//!
//! ## Example
//!
//! ```rust
//! use hydra_framework::{Envelope, Link, LinkCollection, SupportingProperty};
//! use hydra_framework::labeled;
//!
//! labeled! {
//!     pub enum Colour { Red, Green, Blue => "Deep blue" }
//! }
//!
//! let mut widgets = LinkCollection::new().with_id("/widgets");
//! widgets.add_get();
//! widgets.add_post([
//!     SupportingProperty::text("name"),
//!     SupportingProperty::data_from::<Colour>("colour").with_default("0"),
//! ]);
//! widgets.add(Link::titled("/widgets/1", "Widget", "Sprocket"));
//!
//! let json = Envelope::new(widgets).to_json().unwrap();
//! assert!(json.contains(r#""members":[{"@id":"/widgets/1""#));
//! ```
//!
//! ## Error Model
//!
//! Building a representation never fails. Absence is a value (an empty [`Link`], `-1`
//! from [`Resource::integer_id`]), and domain errors are strings accumulated with
//! [`Resource::add_error_message`]. [`HydraError`] only appears at the edges:
//! serialization and route expansion.
//!
//! ## Concurrency Model
//!
//! A representation is built, serialized and dropped within one request. It is never
//! shared, so the model has no locks.
//!
//! ## Testing
//!
//! See the [`mock`] module for an expectation-driven [`LinkContext`].

pub mod collection;
pub mod context;
pub mod envelope;
pub mod error;
pub mod labels;
pub mod link;
pub mod mock;
pub mod operation;
pub mod property;
pub mod resource;
pub mod text;
pub mod tracing;

// Re-export core types for convenience
pub use collection::{Collection, LinkCollection, COLLECTION_TYPE};
pub use context::{LinkContext, LinkContextExt, RouteValues};
pub use envelope::{Envelope, VocabularyContext, HYDRA_NAMESPACE, SCHEMA_ORG_VOCAB};
pub use error::HydraError;
pub use labels::{choices, Labeled};
pub use link::{Link, TypedValue};
pub use operation::{Expects, Method, Operation};
pub use property::{Choice, PropertyKind, Range, SupportingProperty};
pub use resource::{Hypermedia, Resource};
