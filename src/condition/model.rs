use super::{ComparisonOperator, LogicalOperator, Value};
use crate::error::DefinitionError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A single comparison between a context field and a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub field_name: String,
    pub operator: ComparisonOperator,
    pub comparative_value: Value,
}

impl Condition {
    pub fn new(
        field_name: impl Into<String>,
        operator: ComparisonOperator,
        comparative_value: impl Into<Value>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            operator,
            comparative_value: comparative_value.into(),
        }
    }
}

/// An ordered list of conditions joined by one operator.
///
/// Fields are public so that callers can assemble groups directly; an empty
/// `conditions` list is rejected by the evaluator rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub operator: LogicalOperator,
    pub conditions: Vec<Condition>,
}

impl ConditionGroup {
    /// Returns `None` when `conditions` is empty.
    pub fn new(operator: LogicalOperator, conditions: Vec<Condition>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Self {
                operator,
                conditions,
            })
        }
    }
}

/// The condition carried by a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayCondition {
    /// `isGroup = false`: one ungrouped condition.
    Single(Condition),
    /// `isGroup = true`: groups combined with a top-level operator.
    Grouped {
        combination: LogicalOperator,
        groups: Vec<ConditionGroup>,
    },
}

impl GatewayCondition {
    /// Returns `None` when `groups` is empty or any group has no conditions.
    pub fn grouped(combination: LogicalOperator, groups: Vec<ConditionGroup>) -> Option<Self> {
        if groups.is_empty() || groups.iter().any(|g| g.conditions.is_empty()) {
            return None;
        }
        Some(GatewayCondition::Grouped {
            combination,
            groups,
        })
    }

    /// Collects every field name referenced anywhere in this condition.
    pub fn referenced_fields<'a>(&'a self, fields: &mut AHashSet<&'a str>) {
        match self {
            GatewayCondition::Single(condition) => {
                fields.insert(condition.field_name.as_str());
            }
            GatewayCondition::Grouped { groups, .. } => {
                for condition in groups.iter().flat_map(|g| g.conditions.iter()) {
                    fields.insert(condition.field_name.as_str());
                }
            }
        }
    }

    /// Checks the shape invariants the public fields cannot enforce: a grouped
    /// condition needs at least one group, and every group at least one condition.
    pub fn validate(&self, element: &str) -> Result<(), DefinitionError> {
        match self {
            GatewayCondition::Single(_) => Ok(()),
            GatewayCondition::Grouped { groups, .. } => {
                if groups.is_empty() || groups.iter().any(|g| g.conditions.is_empty()) {
                    return Err(DefinitionError::EmptyGroup {
                        element: element.to_string(),
                    });
                }
                Ok(())
            }
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, GatewayCondition::Grouped { .. })
    }
}
