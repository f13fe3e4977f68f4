//! Builtin intents and slot types
//!
//! Interaction models reference reserved intents (`AMAZON.HelpIntent`, ...)
//! and slot types (`AMAZON.NUMBER`, ...) without defining them. This module
//! supplies default sample phrases for the common reserved intents and a
//! number slot type that understands spelled-out numbers.

pub mod intents;
pub mod number;

pub use intents::builtin_samples;
pub use number::{parse_number, NumberSlotType, NUMBER_TYPE};
