//! Matcher settings

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Characters stripped from an utterance before it is matched
pub const DEFAULT_STRIP_CHARACTERS: &str = "!\"¿?|#$%/()=+-_<>*{}·¡[].,;:";

/// Settings for building and querying an interaction model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherSettings {
    /// Punctuation and symbols removed from utterances before matching
    pub strip_characters: String,

    /// Register default sample phrases for builtin intents without samples
    pub builtin_samples: bool,

    /// Register the builtin number slot type
    pub builtin_number: bool,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            strip_characters: DEFAULT_STRIP_CHARACTERS.to_string(),
            builtin_samples: true,
            builtin_number: true,
        }
    }
}

impl MatcherSettings {
    /// Validate settings
    ///
    /// Stripping letters, digits, whitespace or apostrophes would change the
    /// words of an utterance rather than its punctuation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(c) = self
            .strip_characters
            .chars()
            .find(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        {
            return Err(ConfigError::InvalidValue {
                field: "strip_characters".to_string(),
                message: format!("'{}' is part of words and cannot be stripped", c.escape_default()),
            });
        }
        Ok(())
    }
}

/// Load settings from an optional file and the environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (INTENT_RESOLVER_ prefix, `__` separator)
/// 2. The given settings file (YAML/TOML, format from extension)
/// 3. Defaults
pub fn load_settings(path: Option<&str>) -> Result<MatcherSettings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix("INTENT_RESOLVER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: MatcherSettings = config.try_deserialize()?;

    settings.validate()?;
    tracing::debug!(?path, "Loaded matcher settings");

    Ok(settings)
}
