//! Utterance normalization
//!
//! Strips punctuation and symbols from an utterance before it is matched.
//! Letters, digits, whitespace and apostrophes are never touched, and case is
//! preserved: case-insensitivity belongs to the compiled phrase patterns.

use std::collections::HashSet;

use intent_resolver_config::{MatcherSettings, DEFAULT_STRIP_CHARACTERS};

#[derive(Debug, Clone)]
pub struct UtteranceNormalizer {
    denylist: HashSet<char>,
}

impl UtteranceNormalizer {
    pub fn new(strip_characters: &str) -> Self {
        Self {
            denylist: strip_characters.chars().collect(),
        }
    }

    pub fn from_settings(settings: &MatcherSettings) -> Self {
        Self::new(&settings.strip_characters)
    }

    /// Remove denylisted characters
    pub fn clean(&self, utterance: &str) -> String {
        utterance
            .chars()
            .filter(|c| !self.denylist.contains(c))
            .collect()
    }
}

impl Default for UtteranceNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_STRIP_CHARACTERS)
    }
}
