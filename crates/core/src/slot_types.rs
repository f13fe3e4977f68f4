//! Slot Types
//!
//! A slot type constrains which text a slot accepts. Three behaviours exist:
//!
//! - **Enumerated** (custom) types are closed: the text must equal a value or
//!   one of its synonyms.
//! - **Builtin** types (reserved `AMAZON` prefix) are open: any text is a
//!   free-form match unless the type enumerates custom values.
//! - **Absent** types (no definition registered) always pass, flagged `untyped`.
//!
//! Value tables for builtin categories (numbers, dates, ...) live outside this
//! crate; they plug in through [`SlotTypeMatcher`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Name prefix reserved for builtin slot types and intents
pub const BUILTIN_PREFIX: &str = "AMAZON";

/// Canonical text and synonyms of one slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValueName {
    /// Canonical value
    pub value: String,
    /// Alternate surface forms resolving to `value`
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// One enumerated value of a slot type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValue {
    /// Opaque identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Value supplied by a builtin catalog rather than the model author
    #[serde(default)]
    pub builtin: bool,
    pub name: SlotValueName,
}

impl SlotValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: None,
            builtin: false,
            name: SlotValueName {
                value: value.into(),
                synonyms: Vec::new(),
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.name.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.name.value
    }

    /// Match text against the canonical value, then the synonyms
    ///
    /// Returns `Some(None)` for a canonical match, `Some(Some(synonym))` for a
    /// synonym match.
    fn matched_form(&self, text: &str) -> Option<Option<&str>> {
        let text = text.to_lowercase();
        if self.name.value.to_lowercase() == text {
            return Some(None);
        }
        self.name
            .synonyms
            .iter()
            .find(|synonym| synonym.to_lowercase() == text)
            .map(|synonym| Some(synonym.as_str()))
    }
}

/// Outcome of testing a text fragment against a slot type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotMatch {
    pub matches: bool,
    /// Matched text, original case preserved (or the canonical form a builtin
    /// type normalized it to)
    pub value: Option<String>,
    /// The enumerated value that matched
    pub enumerated_value: Option<SlotValue>,
    /// The synonym that matched, when not the canonical form
    pub synonym: Option<String>,
    /// No type definition existed for the slot
    pub untyped: bool,
}

impl SlotMatch {
    /// Successful match with no enumerated value attached
    pub fn free_form(value: impl Into<String>) -> Self {
        Self {
            matches: true,
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn enumerated(value: impl Into<String>, slot_value: SlotValue, synonym: Option<String>) -> Self {
        Self {
            matches: true,
            value: Some(value.into()),
            enumerated_value: Some(slot_value),
            synonym,
            untyped: false,
        }
    }

    pub fn untyped(value: impl Into<String>) -> Self {
        Self {
            untyped: true,
            ..Self::free_form(value)
        }
    }

    pub fn no_match() -> Self {
        Self::default()
    }

    /// Canonical value of the enumerated match, if any
    pub fn canonical_value(&self) -> Option<&str> {
        self.enumerated_value.as_ref().map(SlotValue::value)
    }
}

/// Matching capability of a slot type
///
/// Implemented by declarative [`SlotType`]s and by builtin categories that
/// normalize their input (e.g. spelled-out numbers).
pub trait SlotTypeMatcher: Send + Sync + fmt::Debug {
    /// Slot type name
    fn name(&self) -> &str;

    /// Test whether `text` satisfies this type
    fn attempt_match(&self, text: &str) -> SlotMatch;
}

/// Declarative slot type: a name and optional enumerated values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotType {
    pub name: String,
    #[serde(default)]
    pub values: Vec<SlotValue>,
}

impl SlotType {
    pub fn new(name: impl Into<String>, values: Vec<SlotValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn is_builtin(&self) -> bool {
        self.name.starts_with(BUILTIN_PREFIX)
    }

    pub fn is_enumerated(&self) -> bool {
        !self.is_builtin()
    }

    /// Authored by the model: either not builtin, or a builtin extended with
    /// at least one non-builtin value
    pub fn is_custom(&self) -> bool {
        !self.is_builtin() || self.values.iter().any(|value| !value.builtin)
    }

    /// Every enumerated match, in declaration order
    pub fn match_all(&self, text: &str) -> Vec<SlotMatch> {
        let text = text.trim();
        self.values
            .iter()
            .filter_map(|slot_value| {
                slot_value.matched_form(text).map(|synonym| {
                    SlotMatch::enumerated(text, slot_value.clone(), synonym.map(str::to_string))
                })
            })
            .collect()
    }
}

impl SlotTypeMatcher for SlotType {
    fn name(&self) -> &str {
        &self.name
    }

    fn attempt_match(&self, text: &str) -> SlotMatch {
        if let Some(first) = self.match_all(text).into_iter().next() {
            return first;
        }

        // Builtins stay free-form unless the model restricted them
        if self.is_builtin() && !self.is_custom() {
            return SlotMatch::free_form(text);
        }

        SlotMatch::no_match()
    }
}

/// Catalog of slot types, looked up by case-insensitive name
#[derive(Debug, Clone, Default)]
pub struct SlotTypes {
    types: Vec<Arc<dyn SlotTypeMatcher>>,
}

impl SlotTypes {
    pub fn new(types: Vec<SlotType>) -> Self {
        let mut catalog = Self::default();
        catalog.add_types(types);
        catalog
    }

    /// Append declarative types
    pub fn add_types(&mut self, types: Vec<SlotType>) {
        for slot_type in types {
            self.add_type(Arc::new(slot_type));
        }
    }

    /// Register a type. Lookups return the first registration of a name.
    pub fn add_type(&mut self, slot_type: Arc<dyn SlotTypeMatcher>) {
        if self.contains(slot_type.name()) {
            tracing::warn!(
                slot_type = slot_type.name(),
                "Slot type already registered, earlier definition takes precedence"
            );
        }
        self.types.push(slot_type);
    }

    pub fn slot_type(&self, name: &str) -> Option<&Arc<dyn SlotTypeMatcher>> {
        let name = name.to_lowercase();
        self.types
            .iter()
            .find(|slot_type| slot_type.name().to_lowercase() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slot_type(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Match `text` against the named type
    ///
    /// Unknown types never block a match: the result passes with `untyped` set.
    pub fn match_type(&self, type_name: &str, text: &str) -> SlotMatch {
        match self.slot_type(type_name) {
            Some(slot_type) => slot_type.attempt_match(text),
            None => SlotMatch::untyped(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country_codes() -> SlotType {
        SlotType::new(
            "COUNTRY_CODE",
            vec![
                SlotValue::new("US")
                    .with_id("US")
                    .with_synonyms(["USA", "America", "US"]),
                SlotValue::new("DE").with_id("DE").with_synonyms(["Germany", "DE"]),
                SlotValue::new("UK")
                    .with_id("UK")
                    .with_synonyms(["England", "Britain", "UK", "United Kingdom", "Great Britain"]),
            ],
        )
    }

    #[test]
    fn test_canonical_value_match() {
        let result = country_codes().attempt_match("us");

        assert!(result.matches);
        assert_eq!(result.value.as_deref(), Some("us"));
        assert_eq!(result.canonical_value(), Some("US"));
        assert!(result.synonym.is_none());
        assert!(!result.untyped);
    }

    #[test]
    fn test_synonym_match_keeps_original_text() {
        let result = country_codes().attempt_match(" great britain ");

        assert!(result.matches);
        assert_eq!(result.value.as_deref(), Some("great britain"));
        assert_eq!(result.canonical_value(), Some("UK"));
        assert_eq!(result.synonym.as_deref(), Some("Great Britain"));
    }

    #[test]
    fn test_enumerated_type_is_closed() {
        let result = country_codes().attempt_match("France");
        assert!(!result.matches);
        assert!(result.value.is_none());
    }

    #[test]
    fn test_open_builtin_accepts_free_form() {
        let first_name = SlotType::new("AMAZON.US_FIRST_NAME", vec![]);
        let result = first_name.attempt_match("Ada");

        assert!(first_name.is_builtin());
        assert!(!first_name.is_custom());
        assert!(result.matches);
        assert!(result.enumerated_value.is_none());
    }

    #[test]
    fn test_builtin_with_builtin_values_stays_open() {
        let colors = SlotType::new(
            "AMAZON.Color",
            vec![SlotValue::new("red").builtin(), SlotValue::new("blue").builtin()],
        );

        assert!(!colors.is_custom());
        assert_eq!(colors.attempt_match("Blue").canonical_value(), Some("blue"));
        assert!(colors.attempt_match("teal").matches);
    }

    #[test]
    fn test_builtin_restricted_by_custom_values() {
        let genres = SlotType::new(
            "AMAZON.Genre",
            vec![SlotValue::new("jazz"), SlotValue::new("rock").builtin()],
        );

        assert!(genres.is_custom());
        assert!(genres.attempt_match("Jazz").matches);
        assert!(!genres.attempt_match("polka").matches);
    }

    #[test]
    fn test_first_declared_value_wins() {
        let ambiguous = SlotType::new(
            "SIDE",
            vec![
                SlotValue::new("left").with_synonyms(["port"]),
                SlotValue::new("harbor").with_synonyms(["port"]),
            ],
        );

        let all = ambiguous.match_all("port");
        assert_eq!(all.len(), 2);
        assert_eq!(ambiguous.attempt_match("port").canonical_value(), Some("left"));
    }

    #[test]
    fn test_catalog_unknown_type_is_untyped_pass() {
        let catalog = SlotTypes::new(vec![country_codes()]);
        let result = catalog.match_type("SLOT_TYPE", "anything at all");

        assert!(result.matches);
        assert!(result.untyped);
        assert_eq!(result.value.as_deref(), Some("anything at all"));
    }

    #[test]
    fn test_catalog_lookup_ignores_case() {
        let catalog = SlotTypes::new(vec![country_codes()]);

        assert!(catalog.contains("country_code"));
        let result = catalog.match_type("Country_Code", "Germany");
        assert_eq!(result.canonical_value(), Some("DE"));
        assert!(!catalog.match_type("COUNTRY_CODE", "Mars").matches);
    }

    #[test]
    fn test_slot_value_builtin_defaults_to_false() {
        let json = r#"{
            "name": "COUNTRY_CODE",
            "values": [{"id": "US", "name": {"value": "US", "synonyms": ["USA"]}}]
        }"#;
        let slot_type: SlotType = serde_json::from_str(json).unwrap();

        assert!(!slot_type.values[0].builtin);
        assert_eq!(slot_type.values[0].id.as_deref(), Some("US"));
        assert!(slot_type.is_custom());
    }
}
