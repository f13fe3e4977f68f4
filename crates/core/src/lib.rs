//! Core types for the intent resolver
//!
//! This crate provides the interaction model shared by the other crates:
//! - Intent schema (intents and their declared slots)
//! - Slot types with enumerated values and synonyms
//! - The slot type catalog and its matching contract
//! - Error types

pub mod error;
pub mod schema;
pub mod slot_types;

pub use error::{Error, Result};
pub use schema::{Intent, IntentList, IntentSchema, IntentSlot};
pub use slot_types::{
    SlotMatch, SlotType, SlotTypeMatcher, SlotTypes, SlotValue, SlotValueName, BUILTIN_PREFIX,
};
