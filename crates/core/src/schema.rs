//! Intent Schema
//!
//! Intents and the slots they declare. The schema is supplied by whoever
//! loads the interaction model; the resolver only needs lookup by name,
//! an existence check and the full listing in declaration order.

use serde::{Deserialize, Serialize};

/// Intent definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name (case-sensitive identity)
    pub name: String,
    /// Reserved/builtin intent (e.g. `AMAZON.HelpIntent`)
    #[serde(default)]
    pub builtin: bool,
    /// Declared slots, in declaration order
    #[serde(default)]
    pub slots: Vec<IntentSlot>,
}

impl Intent {
    pub fn new(name: impl Into<String>, builtin: bool) -> Self {
        Self {
            name: name.into(),
            builtin,
            slots: Vec::new(),
        }
    }

    /// Builder-style slot declaration
    pub fn with_slot(mut self, name: impl Into<String>, slot_type: impl Into<String>) -> Self {
        self.add_slot(IntentSlot::new(name, slot_type));
        self
    }

    pub fn add_slot(&mut self, slot: IntentSlot) {
        self.slots.push(slot);
    }

    /// Find a declared slot, ignoring case
    pub fn slot_for_name(&self, name: &str) -> Option<&IntentSlot> {
        let name = name.to_lowercase();
        self.slots
            .iter()
            .find(|slot| slot.name.to_lowercase() == name)
    }
}

/// A slot declared on one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSlot {
    /// Slot name
    pub name: String,
    /// Name of the slot type constraining its values
    #[serde(rename = "type")]
    pub slot_type: String,
}

impl IntentSlot {
    pub fn new(name: impl Into<String>, slot_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot_type: slot_type.into(),
        }
    }
}

/// Read-only view over the intents of an interaction model
pub trait IntentSchema: Send + Sync {
    /// All intents, in declaration order
    fn intents(&self) -> &[Intent];

    /// Look up an intent by exact name
    fn intent(&self, name: &str) -> Option<&Intent> {
        self.intents().iter().find(|intent| intent.name == name)
    }

    /// Check if an intent exists
    fn has_intent(&self, name: &str) -> bool {
        self.intent(name).is_some()
    }
}

/// Plain in-memory intent schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentList {
    intents: Vec<Intent>,
}

impl IntentList {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

impl From<Vec<Intent>> for IntentList {
    fn from(intents: Vec<Intent>) -> Self {
        Self::new(intents)
    }
}

impl IntentSchema for IntentList {
    fn intents(&self) -> &[Intent] {
        &self.intents
    }
}
