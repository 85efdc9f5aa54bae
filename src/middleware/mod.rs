//! Pipeline stages wrapped around the application handler.

pub mod error_pages;
pub mod verb_override;

pub use error_pages::{ErrorHandling, ErrorPages};
pub use verb_override::VerbOverride;
