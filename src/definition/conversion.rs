use super::model::*;
use super::raw::*;
use crate::condition::{
    ComparisonOperator, Condition, ConditionGroup, GatewayCondition, LogicalOperator, Value,
};
use crate::error::DefinitionError;
use std::str::FromStr;

/// A trait for custom data models that can be converted into a `ProcessDefinition`.
///
/// This is the extension point for loading definitions stored in a format other than
/// the JSON layout understood by [`ProcessDefinition::from_json`].
///
/// # Example
///
/// ```rust,no_run
/// use bunki::definition::{Element, ElementKind, IntoProcess, OpaqueJson, ProcessDefinition, Task};
/// use bunki::error::DefinitionError;
///
/// struct MyStep { id: String, then: Option<String> }
/// struct MyFlow { steps: Vec<MyStep> }
///
/// impl IntoProcess for MyFlow {
///     fn into_process(self) -> Result<ProcessDefinition, DefinitionError> {
///         let elements = self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, step)| Element {
///                 name: step.id,
///                 label: String::new(),
///                 kind: ElementKind::Task(Task {
///                     element_type: "manual".to_string(),
///                     is_start: i == 0,
///                     is_end: step.then.is_none(),
///                     block: false,
///                     next: step.then,
///                     events: OpaqueJson::default(),
///                     actors: OpaqueJson::default(),
///                     request: None,
///                     model_patch_fields: vec![],
///                 }),
///             })
///             .collect();
///         Ok(ProcessDefinition { name: "my-flow".to_string(), label: String::new(), elements })
///     }
/// }
/// ```
pub trait IntoProcess {
    /// Consumes the object and converts it into a process definition.
    fn into_process(self) -> Result<ProcessDefinition, DefinitionError>;
}

impl IntoProcess for ProcessDefinition {
    fn into_process(self) -> Result<ProcessDefinition, DefinitionError> {
        Ok(self)
    }
}

impl IntoProcess for RawProcess {
    fn into_process(self) -> Result<ProcessDefinition, DefinitionError> {
        let elements = self
            .elements
            .into_iter()
            .map(convert_element)
            .collect::<Result<_, _>>()?;
        Ok(ProcessDefinition {
            name: self.name,
            label: self.label,
            elements,
        })
    }
}

impl ProcessDefinition {
    /// Parses and converts a JSON process definition.
    ///
    /// Operators, literals and condition shapes are checked here. Graph-level checks
    /// (duplicate names, dangling successors) happen when an
    /// [`ElementIndex`](super::ElementIndex) is built.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let raw: RawProcess =
            serde_json::from_str(json).map_err(|e| DefinitionError::JsonParseError(e.to_string()))?;
        raw.into_process()
    }
}

fn convert_element(raw: RawElement) -> Result<Element, DefinitionError> {
    match raw {
        RawElement::Task(task) => Ok(Element {
            name: task.name,
            label: task.label,
            kind: ElementKind::Task(Task {
                element_type: task.element_type,
                is_start: task.start,
                is_end: task.end,
                block: task.block,
                next: task.next,
                events: OpaqueJson::new(&task.events),
                actors: OpaqueJson::new(&task.actors),
                request: task.request.map(|r| RequestDescriptor {
                    url: r.url,
                    method: r.method,
                    query_params: r
                        .query_params
                        .into_iter()
                        .map(|q| QueryParam {
                            model_field: q.model_field,
                            param_name: q.param_name,
                        })
                        .collect(),
                    body: r.body,
                }),
                model_patch_fields: task.model_patch_field,
            }),
        }),
        RawElement::Gateway(gateway) => {
            let condition = convert_gateway_condition(&gateway.name, gateway.gateway_condition)?;
            Ok(Element {
                name: gateway.name,
                label: gateway.label,
                kind: ElementKind::Gateway(Gateway {
                    element_type: gateway.element_type,
                    condition,
                    next_if_true: gateway.next_is_true,
                    next_if_false: gateway.next_is_false,
                }),
            })
        }
    }
}

fn convert_gateway_condition(
    element: &str,
    raw: RawGatewayCondition,
) -> Result<GatewayCondition, DefinitionError> {
    let is_group = raw.is_group.ok_or_else(|| DefinitionError::MissingGroupFlag {
        element: element.to_string(),
    })?;

    if !is_group {
        if raw.condition_groups.is_some() || raw.group_combination_operator.is_some() {
            return Err(malformed(
                element,
                "'isGroup' is false but group fields are given",
            ));
        }
        let condition = raw
            .condition
            .ok_or_else(|| malformed(element, "'isGroup' is false but no 'condition' is given"))?;
        return Ok(GatewayCondition::Single(convert_condition(
            element, condition,
        )?));
    }

    if raw.condition.is_some() {
        return Err(malformed(
            element,
            "'isGroup' is true but a single 'condition' is given",
        ));
    }
    let operator = raw.group_combination_operator.ok_or_else(|| {
        malformed(
            element,
            "'isGroup' is true but no 'groupCombinationOperator' is given",
        )
    })?;
    let combination = parse_logical(element, &operator)?;
    let raw_groups = raw
        .condition_groups
        .ok_or_else(|| malformed(element, "'isGroup' is true but no 'conditionGroups' are given"))?;

    let groups = raw_groups
        .into_iter()
        .map(|group| {
            let operator = parse_logical(element, &group.group_operator)?;
            let conditions = group
                .conditions
                .into_iter()
                .map(|c| convert_condition(element, c))
                .collect::<Result<Vec<_>, _>>()?;
            ConditionGroup::new(operator, conditions).ok_or_else(|| empty(element))
        })
        .collect::<Result<Vec<_>, _>>()?;

    GatewayCondition::grouped(combination, groups).ok_or_else(|| empty(element))
}

fn convert_condition(element: &str, raw: RawCondition) -> Result<Condition, DefinitionError> {
    let operator = ComparisonOperator::from_str(&raw.operator).map_err(|_| {
        DefinitionError::InvalidOperator {
            element: element.to_string(),
            operator: raw.operator.clone(),
        }
    })?;
    let comparative_value = Value::from_json(&raw.comparative_value).ok_or_else(|| {
        DefinitionError::InvalidComparativeValue {
            element: element.to_string(),
            field: raw.field_name.clone(),
            found: raw.comparative_value.to_string(),
        }
    })?;
    Ok(Condition {
        field_name: raw.field_name,
        operator,
        comparative_value,
    })
}

fn parse_logical(element: &str, operator: &str) -> Result<LogicalOperator, DefinitionError> {
    LogicalOperator::from_str(operator).map_err(|_| DefinitionError::InvalidOperator {
        element: element.to_string(),
        operator: operator.to_string(),
    })
}

fn malformed(element: &str, message: &str) -> DefinitionError {
    DefinitionError::MalformedCondition {
        element: element.to_string(),
        message: message.to_string(),
    }
}

fn empty(element: &str) -> DefinitionError {
    DefinitionError::EmptyGroup {
        element: element.to_string(),
    }
}
