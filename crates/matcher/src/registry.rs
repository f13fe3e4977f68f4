//! Sample utterance registry
//!
//! Sample phrases grouped by intent, in registration order. Mutation is
//! crate-private: the registry is filled by [`crate::ModelBuilder`] and is
//! read-only once the model is built.

use std::collections::HashMap;

use intent_resolver_core::Result;

use crate::normalize::UtteranceNormalizer;
use crate::phrase::SamplePhrase;

#[derive(Debug, Clone, Default)]
pub struct SampleRegistry {
    /// Intent name to position in `samples`
    index: HashMap<String, usize>,
    /// Samples per intent, in first-registration order of the intent
    samples: Vec<(String, Vec<SamplePhrase>)>,
}

impl SampleRegistry {
    /// Compile and append a sample phrase for `intent`
    pub(crate) fn add_sample(
        &mut self,
        intent: &str,
        template: &str,
        normalizer: &UtteranceNormalizer,
    ) -> Result<()> {
        let phrase = SamplePhrase::compile(intent, template, normalizer)?;

        let position = match self.index.get(intent) {
            Some(position) => *position,
            None => {
                self.samples.push((intent.to_string(), Vec::new()));
                self.index.insert(intent.to_string(), self.samples.len() - 1);
                self.samples.len() - 1
            }
        };
        self.samples[position].1.push(phrase);
        Ok(())
    }

    /// Samples registered for `intent`, empty if none
    pub fn samples_for(&self, intent: &str) -> &[SamplePhrase] {
        self.index
            .get(intent)
            .map(|position| self.samples[*position].1.as_slice())
            .unwrap_or_default()
    }

    pub fn has_samples(&self, intent: &str) -> bool {
        !self.samples_for(intent).is_empty()
    }

    /// Fallback phrase for utterances nothing matched: the first sample of the
    /// first intent registered
    pub fn default_sample(&self) -> Option<&SamplePhrase> {
        self.samples.first().and_then(|(_, phrases)| phrases.first())
    }

    /// Intent names with samples, in registration order
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|(intent, _)| intent.as_str())
    }

    /// Total number of sample phrases
    pub fn len(&self) -> usize {
        self.samples.iter().map(|(_, phrases)| phrases.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(samples: &[(&str, &str)]) -> SampleRegistry {
        let normalizer = UtteranceNormalizer::default();
        let mut registry = SampleRegistry::default();
        for (intent, template) in samples {
            registry.add_sample(intent, template, &normalizer).unwrap();
        }
        registry
    }

    #[test]
    fn test_samples_keep_insertion_order() {
        let registry = registry(&[
            ("Play", "play"),
            ("Hello", "hi"),
            ("Play", "play next"),
            ("Play", "play now"),
        ]);

        let templates: Vec<_> = registry.samples_for("Play").iter().map(|p| p.template()).collect();
        assert_eq!(templates, vec!["play", "play next", "play now"]);
        assert_eq!(registry.intents().collect::<Vec<_>>(), vec!["Play", "Hello"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_unknown_intent_has_no_samples() {
        let registry = registry(&[("Play", "play")]);

        assert!(registry.samples_for("NoSampleUtterances").is_empty());
        assert!(!registry.has_samples("NoSampleUtterances"));
        assert!(registry.has_samples("Play"));
    }

    #[test]
    fn test_default_sample() {
        assert!(SampleRegistry::default().default_sample().is_none());

        let registry = registry(&[("Hello", "hi"), ("Play", "play"), ("Hello", "hello")]);
        let default = registry.default_sample().unwrap();
        assert_eq!(default.intent(), "Hello");
        assert_eq!(default.template(), "hi");
    }

    #[test]
    fn test_malformed_sample_is_rejected() {
        let mut registry = SampleRegistry::default();
        let result = registry.add_sample("Play", "play {", &UtteranceNormalizer::default());

        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
