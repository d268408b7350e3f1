use super::{ProcessEngine, end_flag_warning};
use crate::config::{EngineConfig, StringOrdering};
use crate::definition::{ElementIndex, IntoProcess, ProcessDefinition};
use crate::error::DefinitionError;
use crate::evaluator::ConditionEvaluator;
use std::sync::Arc;
use tracing::{debug, warn};

/// Assembles a [`ProcessEngine`] from a definition and configuration.
///
/// All definition checks run in [`build`](Self::build), so a malformed definition
/// is rejected before any evaluation takes place.
pub struct ProcessEngineBuilder {
    definition: ProcessDefinition,
    config: EngineConfig,
}

impl ProcessEngineBuilder {
    pub fn new(definition: ProcessDefinition) -> Self {
        Self {
            definition,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_string_ordering(mut self, ordering: StringOrdering) -> Self {
        self.config.string_ordering = ordering;
        self
    }

    pub fn with_field_projection(mut self, enabled: bool) -> Self {
        self.config.project_fields = enabled;
        self
    }

    pub fn with_strict_end_flags(mut self, strict: bool) -> Self {
        self.config.strict_end_flags = strict;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    pub fn build(self) -> Result<ProcessEngine, DefinitionError> {
        let index = ElementIndex::build(&self.definition)?;

        for element in &self.definition.elements {
            if let Some(warning) = end_flag_warning(element) {
                if self.config.strict_end_flags {
                    return Err(DefinitionError::EndFlagMismatch {
                        element: element.name.clone(),
                    });
                }
                warn!(process = %self.definition.name, "{}", warning);
            }
        }

        debug!(
            process = %self.definition.name,
            elements = index.len(),
            "process engine built"
        );

        Ok(ProcessEngine {
            definition: Arc::new(self.definition),
            index,
            evaluator: ConditionEvaluator::new(self.config.string_ordering),
            config: self.config,
        })
    }
}

impl ProcessEngine {
    pub fn builder(definition: ProcessDefinition) -> ProcessEngineBuilder {
        ProcessEngineBuilder::new(definition)
    }

    /// Builds an engine with the default configuration.
    pub fn new(definition: impl IntoProcess) -> Result<Self, DefinitionError> {
        ProcessEngineBuilder::new(definition.into_process()?).build()
    }

    /// Parses a JSON definition and builds an engine with the default configuration.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Self::new(ProcessDefinition::from_json(json)?)
    }
}
