//! Deserialization structs matching the JSON process definition format.
//!
//! Operators and literals stay as raw strings / JSON here; they are checked when the
//! raw process is converted into a [`ProcessDefinition`](super::ProcessDefinition).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProcess {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawElement {
    Task(RawTask),
    Gateway(RawGateway),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub element_type: String,
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub end: bool,
    #[serde(default)]
    pub block: bool,
    #[serde(default)]
    pub events: serde_json::Value,
    #[serde(default)]
    pub actors: serde_json::Value,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub request: Option<RawRequest>,
    #[serde(default, alias = "modelPatchFields")]
    pub model_patch_field: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub query_params: Vec<RawQueryParam>,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryParam {
    pub model_field: String,
    pub param_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGateway {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub element_type: String,
    pub gateway_condition: RawGatewayCondition,
    #[serde(default)]
    pub next_is_true: Option<String>,
    #[serde(default)]
    pub next_is_false: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGatewayCondition {
    pub is_group: Option<bool>,
    pub group_combination_operator: Option<String>,
    pub condition_groups: Option<Vec<RawConditionGroup>>,
    pub condition: Option<RawCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConditionGroup {
    pub group_operator: String,
    #[serde(default)]
    pub conditions: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCondition {
    pub field_name: String,
    pub operator: String,
    #[serde(default)]
    pub comparative_value: serde_json::Value,
}
