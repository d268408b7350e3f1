use thiserror::Error;

/// Errors raised while loading or validating a process definition.
///
/// These indicate a malformed definition and should block deployment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Failed to parse process definition JSON: {0}")]
    JsonParseError(String),

    #[error("Element name '{0}' is used by more than one element")]
    DuplicateElement(String),

    #[error("Element '{missing}' not found, which is referenced as a successor by '{referenced_by}'")]
    UnknownElement {
        missing: String,
        referenced_by: String,
    },

    #[error("Gateway '{element}' uses an unrecognized operator: '{operator}'")]
    InvalidOperator { element: String, operator: String },

    #[error("Gateway '{element}' has an empty condition group or group list")]
    EmptyGroup { element: String },

    #[error("Gateway '{element}' has a gateway condition without an 'isGroup' flag")]
    MissingGroupFlag { element: String },

    #[error("Gateway '{element}' has a malformed gateway condition: {message}")]
    MalformedCondition { element: String, message: String },

    #[error(
        "Gateway '{element}' compares field '{field}' against an unsupported literal: {found}"
    )]
    InvalidComparativeValue {
        element: String,
        field: String,
        found: String,
    },

    #[error("Task '{element}' has inconsistent 'next' and 'end' values")]
    EndFlagMismatch { element: String },

    #[error("Expected exactly one start element, found {count}")]
    StartElement { count: usize },

    #[error("Invalid custom definition: {0}")]
    Conversion(String),
}

/// Which nesting level of a gateway condition was found empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLevel {
    Conditions,
    Groups,
}

/// Errors that can occur while resolving or driving a traversal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Element '{0}' not found in the process definition")]
    UnknownElement(String),

    #[error("Cannot evaluate an empty {level:?} list")]
    EmptyGroup { level: GroupLevel },

    #[error("Traversal exceeded the limit of {limit} steps")]
    StepLimitExceeded { limit: usize },

    #[error("Task '{element}' failed: {message}")]
    TaskFailed { element: String, message: String },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Errors raised while saving or loading a compiled process artifact.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Artifact I/O failed for '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Artifact codec failure: {0}")]
    Codec(String),

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Errors raised while decoding a data context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    #[error("Failed to parse data context JSON: {0}")]
    JsonParseError(String),

    #[error("Data context must be a JSON object")]
    NotAnObject,

    #[error("Field '{0}' holds a nested value; only numbers, booleans and strings are allowed")]
    UnsupportedValue(String),

    #[error("Could not read data context file '{path}': {message}")]
    Io { path: String, message: String },
}
