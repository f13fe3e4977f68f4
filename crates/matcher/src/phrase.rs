//! Sample Phrase Compilation
//!
//! Turns a sample phrase template into a matcher. Templates mix literal text
//! with two kinds of placeholder:
//!
//! - `{slotName}` captures any text (including none) as the slot value
//! - `{literal text|slotName}` matches `literal text` verbatim and labels it
//!   with `slotName`
//!
//! The template is parsed into [`PhraseToken`]s first, and the pattern is
//! rendered from the tokens, with every literal escaped. Literal text is
//! trimmed where it meets a capture, so `"multiple {A} and {B}"` renders as
//! `^multiple(.*)and(.*)$`; separating whitespace ends up inside the captures.

use regex::Regex;

use intent_resolver_core::{Error, Result};

use crate::normalize::UtteranceNormalizer;

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseToken {
    /// Fixed text
    Literal(String),
    /// Slot captured from the utterance
    Capture(String),
    /// Fixed text labelled with a slot name
    Alias { literal: String, slot: String },
}

impl PhraseToken {
    pub fn slot_name(&self) -> Option<&str> {
        match self {
            PhraseToken::Literal(_) => None,
            PhraseToken::Capture(slot) | PhraseToken::Alias { slot, .. } => Some(slot.as_str()),
        }
    }
}

/// A compiled sample phrase belonging to one intent
#[derive(Debug, Clone)]
pub struct SamplePhrase {
    intent: String,
    template: String,
    tokens: Vec<PhraseToken>,
    slot_names: Vec<String>,
    regex: Regex,
}

impl SamplePhrase {
    /// Compile a template for `intent`
    ///
    /// Literal text is cleaned with the same normalizer utterances go through,
    /// so a template containing punctuation still matches itself.
    pub fn compile(intent: &str, template: &str, normalizer: &UtteranceNormalizer) -> Result<Self> {
        let mut tokens = Vec::new();
        parse_template(template, template, &mut tokens)?;

        let tokens: Vec<PhraseToken> = tokens
            .into_iter()
            .map(|token| match token {
                PhraseToken::Literal(text) => PhraseToken::Literal(normalizer.clean(&text)),
                PhraseToken::Alias { literal, slot } => PhraseToken::Alias {
                    literal: normalizer.clean(&literal),
                    slot,
                },
                capture => capture,
            })
            .collect();

        let slot_names = tokens
            .iter()
            .filter_map(|token| token.slot_name().map(str::to_string))
            .collect();

        let pattern = render_pattern(&tokens);
        let regex = Regex::new(&pattern).map_err(|e| Error::Pattern(e.to_string()))?;

        Ok(Self {
            intent: intent.to_string(),
            template: template.to_string(),
            tokens,
            slot_names,
            regex,
        })
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    /// The template as registered
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn tokens(&self) -> &[PhraseToken] {
        &self.tokens
    }

    /// Slot names in template order, aliases included
    pub fn slot_names(&self) -> &[String] {
        &self.slot_names
    }

    pub fn slot_name(&self, index: usize) -> Option<&str> {
        self.slot_names.get(index).map(String::as_str)
    }

    pub fn slot_count(&self) -> usize {
        self.slot_names.len()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Parse the leftmost placeholder of `rest`, then recurse on what follows it
fn parse_template(template: &str, rest: &str, tokens: &mut Vec<PhraseToken>) -> Result<()> {
    let Some(start) = rest.find('{') else {
        if rest.contains('}') {
            return Err(Error::malformed(template, "unmatched '}'"));
        }
        push_literal(tokens, rest);
        return Ok(());
    };

    let prefix = &rest[..start];
    if prefix.contains('}') {
        return Err(Error::malformed(template, "unmatched '}'"));
    }

    let after = &rest[start + 1..];
    let end = after
        .find('}')
        .ok_or_else(|| Error::malformed(template, "unterminated placeholder"))?;
    let body = &after[..end];
    if body.contains('{') {
        return Err(Error::malformed(template, "nested placeholder"));
    }

    push_literal(tokens, prefix);
    tokens.push(parse_placeholder(template, body)?);

    parse_template(template, &after[end + 1..], tokens)
}

fn parse_placeholder(template: &str, body: &str) -> Result<PhraseToken> {
    match body.split_once('|') {
        None => {
            let slot = body.trim();
            if slot.is_empty() {
                return Err(Error::malformed(template, "empty slot name"));
            }
            Ok(PhraseToken::Capture(slot.to_string()))
        }
        Some((literal, slot)) => {
            let (literal, slot) = (literal.trim(), slot.trim());
            if slot.is_empty() {
                return Err(Error::malformed(template, "empty slot name"));
            }
            if literal.is_empty() {
                return Err(Error::malformed(template, "empty literal sample"));
            }
            Ok(PhraseToken::Alias {
                literal: literal.to_string(),
                slot: slot.to_string(),
            })
        }
    }
}

fn push_literal(tokens: &mut Vec<PhraseToken>, text: &str) {
    if !text.is_empty() {
        tokens.push(PhraseToken::Literal(text.to_string()));
    }
}

/// Render tokens as an anchored, case-insensitive pattern
fn render_pattern(tokens: &[PhraseToken]) -> String {
    let mut pattern = String::from("(?i)^");
    // Fixed text pending between captures
    let mut run = String::new();
    let mut after_alias = false;

    for token in tokens {
        match token {
            PhraseToken::Literal(text) if after_alias => {
                let text = text.trim_start();
                if !text.is_empty() {
                    run.push(' ');
                    run.push_str(text);
                }
            }
            PhraseToken::Literal(text) => run.push_str(text),
            PhraseToken::Alias { literal, .. } => {
                run.truncate(run.trim_end().len());
                if !run.is_empty() {
                    run.push(' ');
                }
                run.push_str(literal);
            }
            PhraseToken::Capture(_) => {
                pattern.push_str(&regex::escape(run.trim()));
                pattern.push_str("(.*)");
                run.clear();
            }
        }
        after_alias = matches!(token, PhraseToken::Alias { .. });
    }

    pattern.push_str(&regex::escape(run.trim()));
    pattern.push('$');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(template: &str) -> SamplePhrase {
        SamplePhrase::compile("Test", template, &UtteranceNormalizer::default()).unwrap()
    }

    fn compile_err(template: &str) -> Error {
        SamplePhrase::compile("Test", template, &UtteranceNormalizer::default()).unwrap_err()
    }

    #[test]
    fn test_literal_phrase() {
        let phrase = compile("play next");

        assert_eq!(phrase.regex().as_str(), "(?i)^play next$");
        assert_eq!(phrase.slot_count(), 0);
        assert!(phrase.regex().is_match("Play Next"));
        assert!(!phrase.regex().is_match("play next song"));
        assert!(!phrase.regex().is_match("please play next"));
    }

    #[test]
    fn test_single_slot() {
        let phrase = compile("slot {SlotName}");

        assert_eq!(phrase.regex().as_str(), "(?i)^slot(.*)$");
        assert_eq!(phrase.slot_names(), ["SlotName"]);
        let captures = phrase.regex().captures("slot value").unwrap();
        assert_eq!(&captures[1], " value");
    }

    #[test]
    fn test_multiple_slots_in_template_order() {
        let phrase = compile("reversed {SlotB} then {SlotA}");

        assert_eq!(phrase.regex().as_str(), "(?i)^reversed(.*)then(.*)$");
        assert_eq!(phrase.slot_names(), ["SlotB", "SlotA"]);
        assert_eq!(phrase.slot_name(1), Some("SlotA"));
        assert_eq!(phrase.slot_name(2), None);
    }

    #[test]
    fn test_slot_only_phrase() {
        let phrase = compile("{number}");
        assert_eq!(phrase.regex().as_str(), "(?i)^(.*)$");

        let phrase = compile("{number} test");
        assert_eq!(phrase.regex().as_str(), "(?i)^(.*)test$");
    }

    #[test]
    fn test_literal_alias() {
        let phrase = compile("I'm an {aquarius | sign} today");

        assert_eq!(
            phrase.tokens(),
            [
                PhraseToken::Literal("I'm an ".to_string()),
                PhraseToken::Alias {
                    literal: "aquarius".to_string(),
                    slot: "sign".to_string()
                },
                PhraseToken::Literal(" today".to_string()),
            ]
        );
        assert_eq!(phrase.slot_names(), ["sign"]);
        assert!(phrase.regex().is_match("i'm an Aquarius today"));
        assert_eq!(phrase.regex().captures_len(), 1);
    }

    #[test]
    fn test_alias_next_to_capture() {
        let phrase = compile("{name} is an {aquarius|sign}");

        assert_eq!(phrase.regex().as_str(), "(?i)^(.*)is an aquarius$");
        assert_eq!(phrase.slot_names(), ["name", "sign"]);
    }

    #[test]
    fn test_literals_are_escaped() {
        let phrase = compile("what is 5*3 {x}");

        // '*' is stripped like in utterances; nothing else is treated as regex
        assert_eq!(phrase.regex().as_str(), "(?i)^what is 53(.*)$");

        let phrase = compile("rock & roll");
        assert!(phrase.regex().is_match("Rock & Roll"));
        assert!(!phrase.regex().is_match("rock x roll"));

        let phrase = compile("2^8");
        assert!(phrase.regex().is_match("2^8"));
        assert!(!phrase.regex().is_match("28"));
    }

    #[test]
    fn test_template_punctuation_matches_clean_utterance() {
        let phrase = compile("what's up?");
        assert!(phrase.regex().is_match("What's up"));
    }

    #[test]
    fn test_malformed_templates() {
        assert!(matches!(compile_err("play {song"), Error::MalformedTemplate { .. }));
        assert!(matches!(compile_err("play {}"), Error::MalformedTemplate { .. }));
        assert!(matches!(compile_err("play } now"), Error::MalformedTemplate { .. }));
        assert!(matches!(compile_err("play {a {b}}"), Error::MalformedTemplate { .. }));
        assert!(matches!(compile_err("play {song|}"), Error::MalformedTemplate { .. }));
        assert!(matches!(compile_err("play {|song}"), Error::MalformedTemplate { .. }));
    }
}
