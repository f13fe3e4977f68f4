//! Error types for the intent resolver
//!
//! Only configuration problems are errors. An utterance that matches nothing
//! is a normal, unmatched resolution.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sample phrase names a slot its intent never declared
    #[error("Invalid schema - no slot: {slot} for intent: {intent}")]
    UndeclaredSlot { intent: String, slot: String },

    /// Samples were registered for an intent missing from the schema
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),

    #[error("Malformed sample phrase '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn malformed(template: &str, reason: impl Into<String>) -> Self {
        Error::MalformedTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
