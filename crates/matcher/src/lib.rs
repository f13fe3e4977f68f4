//! Offline utterance resolution for voice/chat interaction models
//!
//! Routes a spoken or typed utterance to one of a model's intents the way an
//! NLU service would, using only the model's sample phrases and slot types:
//! - **Phrase compilation**: `{slot}` and `{literal|slot}` templates become
//!   anchored, case-insensitive patterns
//! - **Slot validation**: captured text is checked against the declared slot
//!   type (enumerated values and synonyms, or open builtin categories)
//! - **Scoring**: the most specific matching phrase across all intents wins
//!
//! # Example
//!
//! ```
//! use intent_resolver_core::{Intent, IntentList};
//! use intent_resolver_matcher::ModelBuilder;
//!
//! let schema = IntentList::new(vec![
//!     Intent::new("Play", false),
//!     Intent::new("Volume", false).with_slot("level", "AMAZON.NUMBER"),
//! ]);
//!
//! let mut builder = ModelBuilder::new(schema);
//! builder.add_sample("Play", "play").unwrap();
//! builder.add_sample("Volume", "set volume to {level}").unwrap();
//! let model = builder.build().unwrap();
//!
//! let resolution = model.resolve("Set volume to seven!").unwrap();
//! assert_eq!(resolution.intent(), Some("Volume"));
//! assert_eq!(resolution.slot_by_name("level"), Some("7"));
//! ```

pub mod builtin;
pub mod evaluation;
pub mod model;
pub mod normalize;
pub mod phrase;
pub mod registry;
pub mod resolver;

pub use builtin::NumberSlotType;
pub use evaluation::PhraseEvaluation;
pub use model::{InteractionModel, ModelBuilder};
pub use normalize::UtteranceNormalizer;
pub use phrase::{PhraseToken, SamplePhrase};
pub use registry::SampleRegistry;
pub use resolver::Resolution;

pub use intent_resolver_config::MatcherSettings;
pub use intent_resolver_core::{Error, Result};
