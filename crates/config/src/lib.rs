//! Configuration management for the intent resolver
//!
//! Supports loading matcher settings from:
//! - YAML/TOML files
//! - Environment variables (INTENT_RESOLVER_ prefix)

pub mod settings;

pub use settings::{load_settings, MatcherSettings, DEFAULT_STRIP_CHARACTERS};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for intent_resolver_core::Error {
    fn from(err: ConfigError) -> Self {
        intent_resolver_core::Error::Config(err.to_string())
    }
}
