//! Interaction model
//!
//! [`ModelBuilder`] collects slot types and sample phrases; [`ModelBuilder::build`]
//! turns it into an immutable [`InteractionModel`] that answers queries. Only
//! the builder can register anything, so a model cannot change while it is
//! being queried.

use std::fmt;
use std::sync::Arc;

use intent_resolver_config::{load_settings, MatcherSettings};
use intent_resolver_core::{Error, IntentSchema, Result, SlotType, SlotTypeMatcher, SlotTypes};

use crate::builtin::{builtin_samples, NumberSlotType, NUMBER_TYPE};
use crate::evaluation::declared_slot_types;
use crate::normalize::UtteranceNormalizer;
use crate::phrase::SamplePhrase;
use crate::registry::SampleRegistry;

/// Build-time registration of slot types and sample phrases
pub struct ModelBuilder {
    schema: Arc<dyn IntentSchema>,
    slot_types: SlotTypes,
    samples: SampleRegistry,
    settings: MatcherSettings,
    normalizer: UtteranceNormalizer,
}

impl ModelBuilder {
    pub fn new(schema: impl IntentSchema + 'static) -> Self {
        Self::with_settings(Arc::new(schema), MatcherSettings::default())
    }

    /// Create a builder over a shared schema with explicit settings
    pub fn with_settings(schema: Arc<dyn IntentSchema>, settings: MatcherSettings) -> Self {
        Self {
            schema,
            slot_types: SlotTypes::default(),
            samples: SampleRegistry::default(),
            normalizer: UtteranceNormalizer::from_settings(&settings),
            settings,
        }
    }

    /// Create a builder with settings loaded from an optional file and the
    /// environment
    pub fn from_settings_file(schema: Arc<dyn IntentSchema>, path: Option<&str>) -> Result<Self> {
        let settings = load_settings(path)?;
        Ok(Self::with_settings(schema, settings))
    }

    pub fn add_types(&mut self, slot_types: Vec<SlotType>) -> &mut Self {
        self.slot_types.add_types(slot_types);
        self
    }

    /// Register a slot type with its own matching logic
    pub fn add_type(&mut self, slot_type: Arc<dyn SlotTypeMatcher>) -> &mut Self {
        self.slot_types.add_type(slot_type);
        self
    }

    /// Compile and register a sample phrase for `intent`
    pub fn add_sample(&mut self, intent: &str, template: &str) -> Result<&mut Self> {
        self.samples.add_sample(intent, template, &self.normalizer)?;
        Ok(self)
    }

    pub fn add_samples<I, S>(&mut self, intent: &str, templates: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for template in templates {
            self.add_sample(intent, template.as_ref())?;
        }
        Ok(self)
    }

    /// Freeze the model
    ///
    /// Fails if samples were registered for an intent the schema lacks. Adds
    /// builtin intent samples and the builtin number type as configured.
    pub fn build(mut self) -> Result<InteractionModel> {
        if let Some(unknown) = self.samples.intents().find(|intent| !self.schema.has_intent(intent)) {
            return Err(Error::UnknownIntent(unknown.to_string()));
        }

        if self.settings.builtin_samples {
            self.register_builtin_samples()?;
        }

        if self.settings.builtin_number && !self.slot_types.contains(NUMBER_TYPE) {
            self.slot_types.add_type(Arc::new(NumberSlotType));
        }

        tracing::debug!(
            intents = self.schema.intents().len(),
            samples = self.samples.len(),
            slot_types = self.slot_types.len(),
            "Built interaction model"
        );

        Ok(InteractionModel {
            schema: self.schema,
            slot_types: self.slot_types,
            samples: self.samples,
            normalizer: self.normalizer,
        })
    }

    /// Builtin intents without samples of their own get the default ones
    fn register_builtin_samples(&mut self) -> Result<()> {
        let pending: Vec<(String, &'static [&'static str])> = self
            .schema
            .intents()
            .iter()
            .filter(|intent| intent.builtin && !self.samples.has_samples(&intent.name))
            .filter_map(|intent| builtin_samples(&intent.name).map(|samples| (intent.name.clone(), samples)))
            .collect();

        for (intent, templates) in pending {
            tracing::trace!(intent = intent.as_str(), count = templates.len(), "Adding builtin samples");
            for template in templates {
                self.samples.add_sample(&intent, template, &self.normalizer)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ModelBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("intents", &self.schema.intents().len())
            .field("samples", &self.samples.len())
            .field("slot_types", &self.slot_types.len())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Immutable intent schema, slot type catalog and sample registry
pub struct InteractionModel {
    schema: Arc<dyn IntentSchema>,
    slot_types: SlotTypes,
    samples: SampleRegistry,
    normalizer: UtteranceNormalizer,
}

impl InteractionModel {
    pub fn schema(&self) -> &dyn IntentSchema {
        self.schema.as_ref()
    }

    pub fn slot_types(&self) -> &SlotTypes {
        &self.slot_types
    }

    pub fn samples(&self) -> &SampleRegistry {
        &self.samples
    }

    pub fn normalizer(&self) -> &UtteranceNormalizer {
        &self.normalizer
    }

    pub fn has_intent(&self, intent: &str) -> bool {
        self.schema.has_intent(intent)
    }

    /// Phrase to fall back on when an utterance resolves to nothing
    pub fn default_sample(&self) -> Option<&SamplePhrase> {
        self.samples.default_sample()
    }

    /// Check every sample phrase against the schema up front
    ///
    /// Resolution reports the same problems, but only once it reaches the
    /// offending phrase.
    pub fn validate(&self) -> Result<()> {
        for intent in self.samples.intents() {
            for phrase in self.samples.samples_for(intent) {
                declared_slot_types(phrase, self.schema())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for InteractionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionModel")
            .field("intents", &self.schema.intents().len())
            .field("samples", &self.samples.len())
            .field("slot_types", &self.slot_types.len())
            .finish_non_exhaustive()
    }
}
