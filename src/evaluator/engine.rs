use crate::condition::{
    ComparisonOperator, Condition, ConditionGroup, EvaluationTrace, GatewayCondition,
    LogicalOperator, Value,
};
use crate::config::StringOrdering;
use crate::data::FieldLookup;
use crate::error::{EvaluationError, GroupLevel};
use std::cmp::Ordering;
use tracing::trace;

/// Applies `operator` to a looked-up field and a literal.
///
/// Missing fields and mismatched types compare `false` for every operator.
pub(crate) fn compare(
    found: Option<&Value>,
    operator: ComparisonOperator,
    expected: &Value,
    string_ordering: StringOrdering,
) -> bool {
    let Some(found) = found else {
        return false;
    };
    match operator {
        ComparisonOperator::Equal => found.strict_eq(expected).unwrap_or(false),
        ComparisonOperator::NotEqual => found.strict_eq(expected).is_some_and(|eq| !eq),
        relational => {
            let allow_strings = string_ordering == StringOrdering::Lexicographic;
            match found.ordering(expected, allow_strings) {
                Some(ordering) => matches_ordering(relational, ordering),
                None => false,
            }
        }
    }
}

fn matches_ordering(operator: ComparisonOperator, ordering: Ordering) -> bool {
    match operator {
        ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
        ComparisonOperator::LessThan => ordering == Ordering::Less,
        ComparisonOperator::GreaterThanOrEqual => ordering != Ordering::Less,
        ComparisonOperator::LessThanOrEqual => ordering != Ordering::Greater,
        ComparisonOperator::Equal => ordering == Ordering::Equal,
        ComparisonOperator::NotEqual => ordering != Ordering::Equal,
    }
}

/// Folds `items` with `operator`, stopping at the first decisive result.
fn reduce<T, F>(
    operator: LogicalOperator,
    items: &[T],
    level: GroupLevel,
    mut eval: F,
) -> Result<bool, EvaluationError>
where
    F: FnMut(&T) -> Result<bool, EvaluationError>,
{
    if items.is_empty() {
        return Err(EvaluationError::EmptyGroup { level });
    }
    let decisive = operator.short_circuit_on();
    for item in items {
        if eval(item)? == decisive {
            return Ok(decisive);
        }
    }
    Ok(!decisive)
}

/// Traced counterpart of [`reduce`]; keeps the evaluated children in order.
fn reduce_traced<T, F>(
    operator: LogicalOperator,
    items: &[T],
    level: GroupLevel,
    mut eval: F,
) -> Result<EvaluationTrace, EvaluationError>
where
    F: FnMut(&T) -> Result<EvaluationTrace, EvaluationError>,
{
    if items.is_empty() {
        return Err(EvaluationError::EmptyGroup { level });
    }
    let decisive = operator.short_circuit_on();
    let mut children = Vec::with_capacity(items.len());
    for item in items {
        let child = eval(item)?;
        let outcome = child.outcome();
        children.push(child);
        if outcome == decisive {
            let skipped = items.len() - children.len();
            return Ok(EvaluationTrace::Group {
                operator,
                children,
                skipped,
                outcome: decisive,
            });
        }
    }
    Ok(EvaluationTrace::Group {
        operator,
        children,
        skipped: 0,
        outcome: !decisive,
    })
}

/// The recursive reducer over GatewayCondition -> ConditionGroup -> Condition.
pub(crate) struct ConditionEngine<'a, L: FieldLookup + ?Sized> {
    context: &'a L,
    string_ordering: StringOrdering,
}

impl<'a, L: FieldLookup + ?Sized> ConditionEngine<'a, L> {
    pub(crate) fn new(context: &'a L, string_ordering: StringOrdering) -> Self {
        Self {
            context,
            string_ordering,
        }
    }

    pub(crate) fn condition(&self, condition: &Condition) -> bool {
        let found = self.context.lookup(&condition.field_name);
        let outcome = compare(
            found,
            condition.operator,
            &condition.comparative_value,
            self.string_ordering,
        );
        trace!(
            field = %condition.field_name,
            operator = condition.operator.as_ref(),
            outcome,
            "condition evaluated"
        );
        outcome
    }

    pub(crate) fn group(&self, group: &ConditionGroup) -> Result<bool, EvaluationError> {
        reduce(
            group.operator,
            &group.conditions,
            GroupLevel::Conditions,
            |c| Ok(self.condition(c)),
        )
    }

    pub(crate) fn gateway(&self, condition: &GatewayCondition) -> Result<bool, EvaluationError> {
        match condition {
            GatewayCondition::Single(c) => Ok(self.condition(c)),
            GatewayCondition::Grouped {
                combination,
                groups,
            } => reduce(*combination, groups, GroupLevel::Groups, |g| self.group(g)),
        }
    }

    pub(crate) fn trace_condition(&self, condition: &Condition) -> EvaluationTrace {
        let found = self.context.lookup(&condition.field_name);
        let outcome = compare(
            found,
            condition.operator,
            &condition.comparative_value,
            self.string_ordering,
        );
        EvaluationTrace::Comparison {
            field: condition.field_name.clone(),
            operator: condition.operator,
            found: found.cloned(),
            expected: condition.comparative_value.clone(),
            outcome,
        }
    }

    pub(crate) fn trace_group(
        &self,
        group: &ConditionGroup,
    ) -> Result<EvaluationTrace, EvaluationError> {
        reduce_traced(
            group.operator,
            &group.conditions,
            GroupLevel::Conditions,
            |c| Ok(self.trace_condition(c)),
        )
    }

    pub(crate) fn trace_gateway(
        &self,
        condition: &GatewayCondition,
    ) -> Result<EvaluationTrace, EvaluationError> {
        match condition {
            GatewayCondition::Single(c) => Ok(self.trace_condition(c)),
            GatewayCondition::Grouped {
                combination,
                groups,
            } => reduce_traced(*combination, groups, GroupLevel::Groups, |g| {
                self.trace_group(g)
            }),
        }
    }
}
