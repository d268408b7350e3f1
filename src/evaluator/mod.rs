use crate::condition::{Condition, ConditionGroup, EvaluationTrace, GatewayCondition};
use crate::config::StringOrdering;
use crate::data::{DataContext, FieldLookup};
use crate::error::EvaluationError;
use ahash::AHashSet;

mod engine;

pub(crate) use engine::ConditionEngine;

/// Evaluates gateway conditions against runtime data.
///
/// A `ConditionEvaluator` holds no state besides its string ordering policy, so a
/// single instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConditionEvaluator {
    pub string_ordering: StringOrdering,
}

impl ConditionEvaluator {
    pub fn new(string_ordering: StringOrdering) -> Self {
        Self { string_ordering }
    }

    /// Evaluates one comparison. Missing fields and type mismatches yield `false`.
    pub fn condition<L: FieldLookup + ?Sized>(&self, condition: &Condition, context: &L) -> bool {
        ConditionEngine::new(context, self.string_ordering).condition(condition)
    }

    /// Evaluates a group, short-circuiting in list order.
    ///
    /// # Errors
    ///
    /// `EvaluationError::EmptyGroup` if the group has no conditions.
    pub fn group<L: FieldLookup + ?Sized>(
        &self,
        group: &ConditionGroup,
        context: &L,
    ) -> Result<bool, EvaluationError> {
        ConditionEngine::new(context, self.string_ordering).group(group)
    }

    /// Evaluates a full gateway condition.
    ///
    /// # Errors
    ///
    /// `EvaluationError::EmptyGroup` if the group list or any group is empty.
    pub fn gateway<L: FieldLookup + ?Sized>(
        &self,
        condition: &GatewayCondition,
        context: &L,
    ) -> Result<bool, EvaluationError> {
        ConditionEngine::new(context, self.string_ordering).gateway(condition)
    }

    /// Like [`gateway`](Self::gateway), but returns a trace of every comparison made.
    pub fn explain<L: FieldLookup + ?Sized>(
        &self,
        condition: &GatewayCondition,
        context: &L,
    ) -> Result<EvaluationTrace, EvaluationError> {
        ConditionEngine::new(context, self.string_ordering).trace_gateway(condition)
    }
}

pub fn evaluate_condition<L: FieldLookup + ?Sized>(condition: &Condition, context: &L) -> bool {
    ConditionEvaluator::default().condition(condition, context)
}

pub fn evaluate_group<L: FieldLookup + ?Sized>(
    group: &ConditionGroup,
    context: &L,
) -> Result<bool, EvaluationError> {
    ConditionEvaluator::default().group(group, context)
}

pub fn evaluate_gateway<L: FieldLookup + ?Sized>(
    condition: &GatewayCondition,
    context: &L,
) -> Result<bool, EvaluationError> {
    ConditionEvaluator::default().gateway(condition, context)
}

pub fn explain_gateway<L: FieldLookup + ?Sized>(
    condition: &GatewayCondition,
    context: &L,
) -> Result<EvaluationTrace, EvaluationError> {
    ConditionEvaluator::default().explain(condition, context)
}

/// Copies only the fields `condition` references out of `context`, reading each once.
pub fn project<L: FieldLookup + ?Sized>(condition: &GatewayCondition, context: &L) -> DataContext {
    let mut fields = AHashSet::new();
    condition.referenced_fields(&mut fields);
    fields
        .into_iter()
        .filter_map(|name| context.lookup(name).map(|value| (name, value.clone())))
        .collect()
}
