//! # Envelope
//!
//! The top-level wire object: the vocabulary `@context` followed by the fields of one
//! root representation. An envelope is never nested inside another representation.
//!
//! ```
//! use hydra_framework::{Envelope, Resource};
//!
//! let mut home = Resource::new("Home").with_id("/");
//! home.add_get();
//!
//! let json = Envelope::new(home).to_json().unwrap();
//! assert!(json.starts_with(r#"{"@context":{"vocab":"https://schema.org/""#));
//! ```

use crate::error::HydraError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default vocabulary for unprefixed terms.
pub const SCHEMA_ORG_VOCAB: &str = "https://schema.org/";

/// The Hydra core vocabulary.
pub const HYDRA_NAMESPACE: &str = "http://www.w3.org/ns/hydra/core#";

/// Vocabulary metadata emitted as `@context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyContext {
    pub vocab: String,
    pub hydra: String,
}

impl Default for VocabularyContext {
    fn default() -> Self {
        Self {
            vocab: SCHEMA_ORG_VOCAB.to_string(),
            hydra: HYDRA_NAMESPACE.to_string(),
        }
    }
}

/// `@context` plus one root representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<R> {
    #[serde(rename = "@context", default)]
    context: VocabularyContext,
    #[serde(flatten)]
    root: R,
}

impl<R> Envelope<R> {
    pub fn new(root: R) -> Self {
        Self {
            context: VocabularyContext::default(),
            root,
        }
    }

    pub fn context(&self) -> &VocabularyContext {
        &self.context
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn into_root(self) -> R {
        self.root
    }
}

impl<R: Serialize> Envelope<R> {
    /// Serializes the envelope as compact JSON.
    pub fn to_json(&self) -> Result<String, HydraError> {
        let json = serde_json::to_string(self)?;
        debug!(bytes = json.len(), "Envelope serialized");
        Ok(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, HydraError> {
        let json = serde_json::to_string_pretty(self)?;
        debug!(bytes = json.len(), "Envelope serialized");
        Ok(json)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, HydraError> {
        Ok(serde_json::to_value(self)?)
    }
}
