use super::model::{Element, ProcessDefinition};
use crate::error::{DefinitionError, EvaluationError};
use ahash::AHashMap;
use itertools::Itertools;

/// Read-only name -> position lookup over a definition's elements.
///
/// Building the index checks that names are unique, that every successor link
/// resolves and that no gateway carries an empty group, so later lookups of a
/// linked name cannot fail and evaluation never meets an empty group.
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    positions: AHashMap<String, usize>,
}

impl ElementIndex {
    pub fn build(definition: &ProcessDefinition) -> Result<Self, DefinitionError> {
        if let Some(duplicate) = definition.elements.iter().map(|e| &e.name).duplicates().next() {
            return Err(DefinitionError::DuplicateElement(duplicate.clone()));
        }

        let positions: AHashMap<String, usize> = definition
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();

        for element in &definition.elements {
            if let Some(gateway) = element.as_gateway() {
                gateway.condition.validate(&element.name)?;
            }
            for successor in element.successors() {
                if !positions.contains_key(successor) {
                    return Err(DefinitionError::UnknownElement {
                        missing: successor.to_string(),
                        referenced_by: element.name.clone(),
                    });
                }
            }
        }

        Ok(Self { positions })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Looks up `name` in `definition`, which must be the definition this index was
    /// built from.
    pub fn get<'d>(
        &self,
        definition: &'d ProcessDefinition,
        name: &str,
    ) -> Result<&'d Element, EvaluationError> {
        self.position(name)
            .and_then(|i| definition.elements.get(i))
            .ok_or_else(|| EvaluationError::UnknownElement(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
