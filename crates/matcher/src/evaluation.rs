//! Sample phrase evaluation
//!
//! Tests one compiled sample phrase against one utterance: apply the pattern,
//! validate each slot against its declared type, and score the result.

use intent_resolver_core::{Error, IntentSchema, Result, SlotMatch, SlotTypes};

use crate::model::InteractionModel;
use crate::phrase::{PhraseToken, SamplePhrase};

/// Result of testing a sample phrase against an utterance
#[derive(Debug, Clone)]
pub struct PhraseEvaluation<'p> {
    phrase: &'p SamplePhrase,
    matched: bool,
    /// Slot matches, aligned with the phrase's slot names
    slots: Vec<SlotMatch>,
    score: usize,
    typed_slots: usize,
}

impl<'p> PhraseEvaluation<'p> {
    /// Evaluate `phrase` against a raw utterance
    pub fn evaluate(phrase: &'p SamplePhrase, utterance: &str, model: &InteractionModel) -> Result<Self> {
        let clean = model.normalizer().clean(utterance);
        Self::evaluate_normalized(phrase, &clean, model.schema(), model.slot_types())
    }

    /// Evaluate against an utterance that has already been normalized
    ///
    /// Slot names are checked against the intent before anything is matched,
    /// so a malformed phrase fails for every utterance.
    pub(crate) fn evaluate_normalized(
        phrase: &'p SamplePhrase,
        utterance: &str,
        schema: &dyn IntentSchema,
        slot_types: &SlotTypes,
    ) -> Result<Self> {
        let type_names = declared_slot_types(phrase, schema)?;

        let Some(captures) = phrase.regex().captures(utterance) else {
            return Ok(Self::unmatched(phrase));
        };
        let matched_text = captures.get(0).map_or("", |m| m.as_str());
        let mut groups = captures.iter().skip(1);

        let mut slots = Vec::with_capacity(type_names.len());
        let mut captured_chars = 0;
        let mut typed_slots = 0;

        let slot_tokens = phrase.tokens().iter().filter(|token| token.slot_name().is_some());
        for (token, type_name) in slot_tokens.zip(type_names) {
            let slot_match = match token {
                PhraseToken::Capture(slot) => {
                    let value = groups.next().flatten().map_or("", |m| m.as_str());

                    if value != matched_text && !is_separated(value) {
                        tracing::trace!(
                            template = phrase.template(),
                            slot = slot.as_str(),
                            value,
                            "Capture not separated by whitespace"
                        );
                        return Ok(Self::unmatched(phrase));
                    }

                    let slot_match = slot_types.match_type(type_name, value);
                    if slot_match.matches {
                        // Measured on the slot value, which a builtin type may have rewritten
                        captured_chars += slot_match.value.as_deref().map_or(0, |v| v.chars().count());
                        if !slot_match.untyped {
                            typed_slots += 1;
                        }
                    }
                    slot_match
                }
                PhraseToken::Alias { literal, .. } => slot_types.match_type(type_name, literal),
                PhraseToken::Literal(_) => continue,
            };

            if !slot_match.matches {
                return Ok(Self::unmatched(phrase));
            }
            slots.push(slot_match);
        }

        Ok(Self {
            phrase,
            matched: true,
            slots,
            score: matched_text.chars().count().saturating_sub(captured_chars),
            typed_slots,
        })
    }

    fn unmatched(phrase: &'p SamplePhrase) -> Self {
        Self {
            phrase,
            matched: false,
            slots: Vec::new(),
            score: 0,
            typed_slots: 0,
        }
    }

    pub fn phrase(&self) -> &'p SamplePhrase {
        self.phrase
    }

    pub fn matches(&self) -> bool {
        self.matched
    }

    /// Characters in the matched text minus the characters of the captured
    /// slot values
    pub fn score(&self) -> usize {
        self.score
    }

    /// Captured slots whose type was defined
    pub fn score_slots(&self) -> usize {
        self.typed_slots
    }

    pub fn slot_matches(&self) -> &[SlotMatch] {
        &self.slots
    }

    pub fn slot_values(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|slot| slot.value.as_deref().unwrap_or(""))
            .collect()
    }

    pub(crate) fn into_slots(self) -> Vec<SlotMatch> {
        self.slots
    }
}

/// Resolve the declared type of every slot the phrase names, in template order
pub(crate) fn declared_slot_types<'s>(
    phrase: &SamplePhrase,
    schema: &'s dyn IntentSchema,
) -> Result<Vec<&'s str>> {
    let intent = schema
        .intent(phrase.intent())
        .ok_or_else(|| Error::UnknownIntent(phrase.intent().to_string()))?;

    phrase
        .slot_names()
        .iter()
        .map(|slot| {
            intent
                .slot_for_name(slot)
                .map(|declared| declared.slot_type.as_str())
                .ok_or_else(|| Error::UndeclaredSlot {
                    intent: intent.name.clone(),
                    slot: slot.clone(),
                })
        })
        .collect()
}

/// A non-blank capture must begin or end with whitespace, otherwise it ate
/// part of an adjacent literal word ("sample {slot}" vs "sampleslot")
fn is_separated(value: &str) -> bool {
    value.trim().is_empty()
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
}
