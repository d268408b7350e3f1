//! # Bunki - Gateway Condition Evaluation and Traversal Core
//!
//! **Bunki** is the decision core of a business-process interpreter. Given a
//! declarative process definition (a graph of tasks and gateways) and a runtime data
//! context, it decides which element runs next. Gateways carry a condition, either a
//! single comparison or named groups of comparisons combined with AND/OR at two
//! levels, which is reduced to a boolean to choose between `nextIsTrue` and
//! `nextIsFalse`.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Parse a JSON definition with `ProcessDefinition::from_json`, or
//!     implement `IntoProcess` for your own format.
//! 2.  **Build**: `ProcessEngine::builder(definition)` validates the definition
//!     (unique names, resolvable successors, known operators, non-empty groups) and
//!     fails before any evaluation if it is malformed.
//! 3.  **Resolve**: call `resolve_next` with the current element and a data context.
//!     Evaluation is pure; one engine can serve many threads at once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bunki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("path/to/process.json")?;
//!     let engine = ProcessEngine::builder(ProcessDefinition::from_json(&json)?)
//!         .with_string_ordering(StringOrdering::Reject)
//!         .build()?;
//!
//!     let context = DataContext::new()
//!         .with("age", 25)
//!         .with("isStudent", false)
//!         .with("country", "USA");
//!
//!     let resolution = engine.resolve("gate1", &context)?;
//!     println!("Next element: {:?}", resolution.next);
//!     if let Via::Gateway { trace, .. } = &resolution.via {
//!         println!("Reason: {}", TraceFormatter::format_trace(trace));
//!     }
//!     Ok(())
//! }
//! ```

pub mod condition;
pub mod config;
pub mod data;
pub mod definition;
pub mod error;
pub mod evaluator;
pub mod prelude;
pub mod trace;
pub mod traversal;
