//! Common test utilities for building process definitions and data contexts.
use bunki::prelude::*;
use std::cell::Cell;

/// The enrollment process: two tasks, one grouped gateway, two end tasks.
///
/// Gateway `gate1`: `(age > 18 AND isStudent == false) AND (country == "USA" OR city == "London")`
#[allow(dead_code)]
pub const ENROLLMENT_PROCESS_JSON: &str = r#"
{
  "name": "process1",
  "label": "Test process",
  "elements": [
    {
      "name": "task1", "label": "", "type": "task", "elementType": "manual",
      "start": true, "end": false, "events": [], "actors": [], "next": "task2"
    },
    {
      "name": "task2", "label": "", "type": "task", "elementType": "rpc",
      "start": false, "end": false, "block": true, "events": [], "actors": [],
      "next": "gate1",
      "request": {
        "url": "http://localhost:3000/api/payment",
        "method": "POST",
        "queryParams": [{ "modelField": "processInstanceId", "paramName": "processInstanceId" }],
        "body": ["modelField"]
      },
      "modelPatchField": ["status"]
    },
    {
      "name": "gate1", "label": "", "type": "gateway", "elementType": "or",
      "gatewayCondition": {
        "isGroup": true,
        "groupCombinationOperator": "AND",
        "conditionGroups": [
          {
            "groupOperator": "AND",
            "conditions": [
              { "fieldName": "age", "operator": "greaterThan", "comparativeValue": 18 },
              { "fieldName": "isStudent", "operator": "equal", "comparativeValue": false }
            ]
          },
          {
            "groupOperator": "OR",
            "conditions": [
              { "fieldName": "country", "operator": "equal", "comparativeValue": "USA" },
              { "fieldName": "city", "operator": "equal", "comparativeValue": "London" }
            ]
          }
        ]
      },
      "nextIsTrue": "task3",
      "nextIsFalse": "task4"
    },
    {
      "name": "task3", "label": "Enroll in the program", "type": "task", "elementType": "manual",
      "start": false, "end": true, "events": [], "actors": [], "next": null
    },
    {
      "name": "task4", "label": "Send program benefits", "type": "task", "elementType": "manual",
      "start": false, "end": true, "events": [], "actors": [], "next": null
    }
  ]
}
"#;

#[allow(dead_code)]
pub fn enrollment_definition() -> ProcessDefinition {
    ProcessDefinition::from_json(ENROLLMENT_PROCESS_JSON).expect("enrollment process is valid")
}

#[allow(dead_code)]
pub fn enrollment_engine() -> ProcessEngine {
    ProcessEngine::new(enrollment_definition()).expect("enrollment process builds")
}

/// The condition carried by `gate1`.
#[allow(dead_code)]
pub fn enrollment_condition() -> GatewayCondition {
    enrollment_definition()
        .elements
        .into_iter()
        .find(|e| e.name == "gate1")
        .and_then(|e| e.as_gateway().map(|g| g.condition.clone()))
        .expect("gate1 is a gateway")
}

#[allow(dead_code)]
pub fn applicant(age: i32, is_student: bool, country: &str, city: &str) -> DataContext {
    DataContext::new()
        .with("age", age)
        .with("isStudent", is_student)
        .with("country", country)
        .with("city", city)
}

/// A manual task element with the given successor.
#[allow(dead_code)]
pub fn task(name: &str, next: Option<&str>, is_start: bool, is_end: bool) -> Element {
    Element {
        name: name.to_string(),
        label: String::new(),
        kind: ElementKind::Task(Task {
            element_type: "manual".to_string(),
            is_start,
            is_end,
            block: false,
            next: next.map(str::to_string),
            events: OpaqueJson::default(),
            actors: OpaqueJson::default(),
            request: None,
            model_patch_fields: vec![],
        }),
    }
}

#[allow(dead_code)]
pub fn gateway(
    name: &str,
    condition: GatewayCondition,
    if_true: Option<&str>,
    if_false: Option<&str>,
) -> Element {
    Element {
        name: name.to_string(),
        label: String::new(),
        kind: ElementKind::Gateway(Gateway {
            element_type: "or".to_string(),
            condition,
            next_if_true: if_true.map(str::to_string),
            next_if_false: if_false.map(str::to_string),
        }),
    }
}

#[allow(dead_code)]
pub fn definition(elements: Vec<Element>) -> ProcessDefinition {
    ProcessDefinition {
        name: "test".to_string(),
        label: String::new(),
        elements,
    }
}

/// A `FieldLookup` that counts how many lookups were made.
#[allow(dead_code)]
pub struct CountingContext {
    pub inner: DataContext,
    pub lookups: Cell<usize>,
}

#[allow(dead_code)]
impl CountingContext {
    pub fn new(inner: DataContext) -> Self {
        Self {
            inner,
            lookups: Cell::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.lookups.get()
    }
}

impl FieldLookup for CountingContext {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup(field)
    }
}
