//! Builtin number slot type
//!
//! Accepts digit strings as they are and English number words
//! ("thirteen", "twenty one", "one hundred and five"), resolving both to the
//! canonical digit string.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use intent_resolver_core::{SlotMatch, SlotTypeMatcher};

/// Name of the builtin number slot type
pub const NUMBER_TYPE: &str = "AMAZON.NUMBER";

static NUMBER_WORDS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ])
});

static SCALE_WORDS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([("thousand", 1_000), ("million", 1_000_000), ("billion", 1_000_000_000)])
});

/// Convert digits or English number words to a digit string
///
/// # Examples
/// ```
/// use intent_resolver_matcher::builtin::parse_number;
/// assert_eq!(parse_number("19801"), Some("19801".to_string()));
/// assert_eq!(parse_number(" Thirteen "), Some("13".to_string()));
/// assert_eq!(parse_number("two hundred and five"), Some("205".to_string()));
/// assert_eq!(parse_number("19801a"), None);
/// ```
pub fn parse_number(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(text.to_string());
    }

    words_to_number(&text.to_lowercase()).map(|n| n.to_string())
}

/// Kind of the previous word, which decides what may follow it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word {
    Start,
    Zero,
    Unit,
    Teen,
    Tens,
    TensUnit,
    Hundred,
    Scale,
}

fn words_to_number(text: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut last = Word::Start;
    let mut last_scale = u64::MAX;
    let mut pending_and = false;

    for word in text.split(|c: char| c.is_whitespace() || c == '-').filter(|w| !w.is_empty()) {
        if word == "and" {
            if pending_and || !matches!(last, Word::Hundred | Word::Scale) {
                return None;
            }
            pending_and = true;
            continue;
        }

        if let Some(&value) = NUMBER_WORDS.get(word) {
            last = match (value, last) {
                (0, Word::Start) => Word::Zero,
                (1..=9, Word::Start | Word::Hundred | Word::Scale) => Word::Unit,
                (1..=9, Word::Tens) => Word::TensUnit,
                (10..=19, Word::Start | Word::Hundred | Word::Scale) => Word::Teen,
                (20..=90, Word::Start | Word::Hundred | Word::Scale) => Word::Tens,
                _ => return None,
            };
            current += value;
        } else if word == "hundred" {
            // "hundred", "two hundred", "fifteen hundred"
            if !matches!(last, Word::Start | Word::Unit | Word::Teen) {
                return None;
            }
            current = current.max(1) * 100;
            last = Word::Hundred;
        } else if let Some(&scale) = SCALE_WORDS.get(word) {
            // Scales need a multiplier and must descend: "two million three thousand"
            if matches!(last, Word::Start | Word::Zero | Word::Scale) || scale >= last_scale {
                return None;
            }
            total = total.checked_add(current.checked_mul(scale)?)?;
            current = 0;
            last_scale = scale;
            last = Word::Scale;
        } else {
            return None;
        }
        pending_and = false;
    }

    if last == Word::Start || pending_and {
        return None;
    }
    total.checked_add(current)
}

/// `AMAZON.NUMBER`: numbers in digits or words
#[derive(Debug, Clone, Default)]
pub struct NumberSlotType;

impl SlotTypeMatcher for NumberSlotType {
    fn name(&self) -> &str {
        NUMBER_TYPE
    }

    fn attempt_match(&self, text: &str) -> SlotMatch {
        match parse_number(text) {
            Some(digits) => SlotMatch::free_form(digits),
            None => SlotMatch::no_match(),
        }
    }
}
