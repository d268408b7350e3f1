//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the bunki crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use bunki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let engine = ProcessEngine::from_json(&std::fs::read_to_string("path/to/process.json")?)?;
//! let context = DataContext::from_file("path/to/context.json")?;
//! let next = engine.resolve_next("gate1", &context)?;
//! println!("Next element: {:?}", next);
//! # Ok(())
//! # }
//! ```

// Engine and configuration
pub use crate::config::{EngineConfig, StringOrdering};
pub use crate::traversal::{
    IntegrityWarning, PassthroughExecutor, ProcessEngine, ProcessEngineBuilder, Resolution,
    RunOutcome, TaskExecutor, TaskOutcome, Via,
};

// Condition model and evaluation
pub use crate::condition::{
    ComparisonOperator, Condition, ConditionGroup, EvaluationTrace, GatewayCondition,
    LogicalOperator, Value,
};
pub use crate::evaluator::{
    ConditionEvaluator, evaluate_condition, evaluate_gateway, evaluate_group, explain_gateway,
};

// Definitions and data
pub use crate::data::{DataContext, FieldLookup};
pub use crate::definition::{
    CompiledProcess, Element, ElementIndex, ElementKind, Gateway, IntoProcess, OpaqueJson,
    ProcessDefinition, QueryParam, RequestDescriptor, Task,
};

// Error types
pub use crate::error::{ArtifactError, ContextError, DefinitionError, EvaluationError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
