//! Persistence boundary for the chosen language.

use std::error::Error as StdError;

use async_trait::async_trait;
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The language could not be stored.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PersistenceError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl PersistenceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Durably applies a language preference.
#[async_trait]
pub trait PersistenceService: Send + Sync {
    async fn apply_language(&self, code: &str) -> Result<(), PersistenceError>;
}
