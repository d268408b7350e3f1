use crate::condition::GatewayCondition;
use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a process, ready for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub name: String,
    pub label: String,
    pub elements: Vec<Element>,
}

impl ProcessDefinition {
    /// Elements flagged as the start of the process.
    pub fn start_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|e| matches!(&e.kind, ElementKind::Task(t) if t.is_start))
    }
}

/// A named node in the process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub label: String,
    pub kind: ElementKind,
}

impl Element {
    /// Successor names this element links to, in declaration order.
    pub fn successors(&self) -> Vec<&str> {
        match &self.kind {
            ElementKind::Task(task) => task.next.as_deref().into_iter().collect(),
            ElementKind::Gateway(gateway) => gateway
                .next_if_true
                .as_deref()
                .into_iter()
                .chain(gateway.next_if_false.as_deref())
                .collect(),
        }
    }

    pub fn as_task(&self) -> Option<&Task> {
        match &self.kind {
            ElementKind::Task(task) => Some(task),
            ElementKind::Gateway(_) => None,
        }
    }

    pub fn as_gateway(&self) -> Option<&Gateway> {
        match &self.kind {
            ElementKind::Gateway(gateway) => Some(gateway),
            ElementKind::Task(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Task(Task),
    Gateway(Gateway),
}

/// A unit of work. The core only reads `next`, `is_start` and `is_end`; the other
/// fields are carried for task executors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// e.g. `"manual"` or `"rpc"`.
    pub element_type: String,
    pub is_start: bool,
    pub is_end: bool,
    pub block: bool,
    pub next: Option<String>,
    pub events: OpaqueJson,
    pub actors: OpaqueJson,
    pub request: Option<RequestDescriptor>,
    pub model_patch_fields: Vec<String>,
}

impl Task {
    /// True when `next` and `is_end` agree about whether this task terminates.
    pub fn end_flag_consistent(&self) -> bool {
        self.next.is_none() == self.is_end
    }
}

/// A branching element whose successor depends on `condition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    /// e.g. `"or"`.
    pub element_type: String,
    pub condition: GatewayCondition,
    pub next_if_true: Option<String>,
    pub next_if_false: Option<String>,
}

impl Gateway {
    pub fn successor(&self, outcome: bool) -> Option<&str> {
        if outcome {
            self.next_if_true.as_deref()
        } else {
            self.next_if_false.as_deref()
        }
    }
}

/// Outbound call description for remote-call tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: String,
    pub query_params: Vec<QueryParam>,
    pub body: Vec<String>,
}

/// Maps a model field onto a query-string parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub model_field: String,
    pub param_name: String,
}

/// JSON preserved verbatim as compact text, so it survives the binary artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpaqueJson(String);

impl OpaqueJson {
    pub fn new(value: &serde_json::Value) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> serde_json::Result<serde_json::Value> {
        if self.0.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.0)
    }
}
