//! Utterance resolution
//!
//! Evaluates every sample phrase of every intent and keeps the best match:
//! the highest specificity score, then the most typed slots, then the first
//! in schema and registration order.

use intent_resolver_core::{Result, SlotMatch};

use crate::evaluation::PhraseEvaluation;
use crate::model::InteractionModel;

/// Outcome of resolving one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    utterance: String,
    best: Option<MatchedPhrase>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MatchedPhrase {
    intent: String,
    template: String,
    slot_names: Vec<String>,
    slots: Vec<SlotMatch>,
    score: usize,
    typed_slots: usize,
}

impl Resolution {
    fn unmatched(utterance: &str) -> Self {
        Self {
            utterance: utterance.to_string(),
            best: None,
        }
    }

    fn from_evaluation(utterance: &str, evaluation: PhraseEvaluation<'_>) -> Self {
        let phrase = evaluation.phrase();
        let best = MatchedPhrase {
            intent: phrase.intent().to_string(),
            template: phrase.template().to_string(),
            slot_names: phrase.slot_names().to_vec(),
            score: evaluation.score(),
            typed_slots: evaluation.score_slots(),
            slots: evaluation.into_slots(),
        };
        Self {
            utterance: utterance.to_string(),
            best: Some(best),
        }
    }

    /// The utterance as given
    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    pub fn matched(&self) -> bool {
        self.best.is_some()
    }

    pub fn intent(&self) -> Option<&str> {
        self.best.as_ref().map(|best| best.intent.as_str())
    }

    /// Template of the winning sample phrase
    pub fn sample(&self) -> Option<&str> {
        self.best.as_ref().map(|best| best.template.as_str())
    }

    /// Slot value by template position, trimmed
    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slot_match(index)
            .and_then(|slot| slot.value.as_deref())
            .map(str::trim)
    }

    /// Slot value by slot name (case-insensitive), trimmed
    pub fn slot_by_name(&self, name: &str) -> Option<&str> {
        let best = self.best.as_ref()?;
        let name = name.to_lowercase();
        let index = best
            .slot_names
            .iter()
            .position(|slot| slot.to_lowercase() == name)?;
        self.slot(index)
    }

    /// Full slot type match by template position
    pub fn slot_match(&self, index: usize) -> Option<&SlotMatch> {
        self.best.as_ref().and_then(|best| best.slots.get(index))
    }

    pub fn slot_names(&self) -> &[String] {
        self.best.as_ref().map(|best| best.slot_names.as_slice()).unwrap_or_default()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_names().len()
    }

    /// Specificity score of the winning phrase
    pub fn score(&self) -> Option<usize> {
        self.best.as_ref().map(|best| best.score)
    }

    /// Typed-slot score of the winning phrase
    pub fn typed_slots(&self) -> Option<usize> {
        self.best.as_ref().map(|best| best.typed_slots)
    }
}

impl InteractionModel {
    /// Resolve an utterance to an intent and its slot values
    ///
    /// An utterance nothing matches is an unmatched [`Resolution`], not an
    /// error. Errors mean the model itself is malformed.
    pub fn resolve(&self, utterance: &str) -> Result<Resolution> {
        let clean = self.normalizer().clean(utterance);
        let mut best: Option<PhraseEvaluation<'_>> = None;

        for intent in self.schema().intents() {
            for phrase in self.samples().samples_for(&intent.name) {
                let evaluation =
                    PhraseEvaluation::evaluate_normalized(phrase, &clean, self.schema(), self.slot_types())?;

                tracing::trace!(
                    intent = intent.name.as_str(),
                    template = phrase.template(),
                    matched = evaluation.matches(),
                    score = evaluation.score(),
                    typed_slots = evaluation.score_slots(),
                    "Evaluated sample phrase"
                );

                if !evaluation.matches() {
                    continue;
                }

                let better = match &best {
                    None => true,
                    Some(current) => {
                        (evaluation.score(), evaluation.score_slots())
                            > (current.score(), current.score_slots())
                    }
                };
                if better {
                    best = Some(evaluation);
                }
            }
        }

        match best {
            Some(evaluation) => {
                tracing::debug!(
                    utterance,
                    intent = evaluation.phrase().intent(),
                    template = evaluation.phrase().template(),
                    score = evaluation.score(),
                    "Resolved utterance"
                );
                Ok(Resolution::from_evaluation(utterance, evaluation))
            }
            None => {
                tracing::debug!(utterance, "No sample phrase matched");
                Ok(Resolution::unmatched(utterance))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use intent_resolver_core::{Error, Intent, IntentList, SlotType, SlotValue};

    use crate::model::ModelBuilder;

    fn model() -> crate::InteractionModel {
        let schema = IntentList::new(vec![
            Intent::new("Generic", false).with_slot("anything", "FREE_TEXT"),
            Intent::new("Specific", false).with_slot("anything", "FREE_TEXT"),
            Intent::new("Color", false).with_slot("color", "COLOR"),
        ]);

        let mut builder = ModelBuilder::new(schema);
        builder.add_types(vec![SlotType::new(
            "COLOR",
            vec![SlotValue::new("red").with_synonyms(["crimson"])],
        )]);
        builder.add_samples("Generic", ["{anything}", "say {anything}"]).unwrap();
        builder.add_samples("Specific", ["say {anything}", "say {anything} please"]).unwrap();
        builder.add_sample("Color", "{color}").unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_higher_specificity_wins() {
        let resolution = model().resolve("say hello please").unwrap();

        assert_eq!(resolution.intent(), Some("Specific"));
        assert_eq!(resolution.sample(), Some("say {anything} please"));
        assert_eq!(resolution.slot(0), Some("hello"));
        assert_eq!(resolution.score(), Some(9));
    }

    #[test]
    fn test_equal_scores_prefer_first_declared() {
        let resolution = model().resolve("say hello").unwrap();

        assert_eq!(resolution.intent(), Some("Generic"));
        assert_eq!(resolution.sample(), Some("say {anything}"));
    }

    #[test]
    fn test_typed_slots_break_ties() {
        let resolution = model().resolve("Crimson").unwrap();

        assert_eq!(resolution.intent(), Some("Color"));
        assert_eq!(resolution.typed_slots(), Some(1));
        assert_eq!(resolution.slot(0), Some("Crimson"));
        assert_eq!(resolution.slot_match(0).unwrap().canonical_value(), Some("red"));
        assert_eq!(resolution.slot_match(0).unwrap().synonym.as_deref(), Some("crimson"));
    }

    #[test]
    fn test_spelled_out_number_scores_on_its_digits() {
        let schema = IntentList::new(vec![
            Intent::new("Twenty", false).with_slot("x", "FREE_TEXT"),
            Intent::new("NumberSlot", false).with_slot("number", "AMAZON.NUMBER"),
        ]);
        let mut builder = ModelBuilder::new(schema);
        builder.add_sample("Twenty", "twenty {x}").unwrap();
        builder.add_sample("NumberSlot", "{number} test").unwrap();
        let model = builder.build().unwrap();

        let resolution = model.resolve("twenty one test").unwrap();

        assert_eq!(resolution.intent(), Some("NumberSlot"));
        assert_eq!(resolution.slot_by_name("number"), Some("21"));
        // "twenty one test" less "21"
        assert_eq!(resolution.score(), Some(13));
    }

    #[test]
    fn test_unmatched_resolution() {
        let schema = IntentList::new(vec![Intent::new("Play", false)]);
        let mut builder = ModelBuilder::new(schema);
        builder.add_sample("Play", "play").unwrap();
        let model = builder.build().unwrap();

        let resolution = model.resolve("stop the music").unwrap();
        assert!(!resolution.matched());
        assert_eq!(resolution.intent(), None);
        assert_eq!(resolution.slot(0), None);
        assert_eq!(resolution.slot_count(), 0);
        assert_eq!(resolution.utterance(), "stop the music");
        assert_eq!(model.default_sample().unwrap().template(), "play");
    }

    #[test]
    fn test_undeclared_slot_surfaces_on_resolve() {
        let schema = IntentList::new(vec![Intent::new("Play", false)]);
        let mut builder = ModelBuilder::new(schema);
        builder.add_sample("Play", "play {song}").unwrap();
        let model = builder.build().unwrap();

        for utterance in ["play thriller", "hello"] {
            assert!(matches!(model.resolve(utterance), Err(Error::UndeclaredSlot { .. })));
        }
    }
}
