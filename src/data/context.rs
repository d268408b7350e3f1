use crate::condition::Value;
use crate::error::ContextError;
use ahash::AHashMap;
use std::collections::HashMap;
use std::fs;

/// Read access to runtime field values.
///
/// The evaluator only ever reads through this trait, which lets callers plug in
/// their own storage. A missing field is `None`, never a default value.
pub trait FieldLookup {
    fn lookup(&self, field: &str) -> Option<&Value>;
}

impl FieldLookup for AHashMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl FieldLookup for HashMap<String, Value> {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.get(field)
    }
}

impl<T: FieldLookup + ?Sized> FieldLookup for &T {
    fn lookup(&self, field: &str) -> Option<&Value> {
        (**self).lookup(field)
    }
}

/// The runtime key-value snapshot used for one traversal decision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContext {
    fields: AHashMap<String, Value>,
}

impl DataContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object whose members are numbers, booleans or strings.
    ///
    /// `null` members are treated as absent fields.
    pub fn from_json(json: &str) -> Result<Self, ContextError> {
        let raw: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ContextError::JsonParseError(e.to_string()))?;
        Self::from_json_value(&raw)
    }

    pub fn from_json_value(raw: &serde_json::Value) -> Result<Self, ContextError> {
        let object = raw.as_object().ok_or(ContextError::NotAnObject)?;
        let mut fields = AHashMap::with_capacity(object.len());
        for (name, value) in object {
            if value.is_null() {
                continue;
            }
            let value =
                Value::from_json(value).ok_or_else(|| ContextError::UnsupportedValue(name.clone()))?;
            fields.insert(name.clone(), value);
        }
        Ok(Self { fields })
    }

    /// Load a data context from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ContextError> {
        let content = fs::read_to_string(path).map_err(|e| ContextError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Merges `other` into `self`, overwriting existing fields.
    pub fn extend(&mut self, other: DataContext) {
        self.fields.extend(other.fields);
    }

    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }
}

impl FieldLookup for DataContext {
    fn lookup(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
