use crate::condition::EvaluationTrace;
use crate::config::EngineConfig;
use crate::data::FieldLookup;
use crate::definition::{Element, ElementIndex, ElementKind, Gateway, ProcessDefinition};
use crate::error::EvaluationError;
use crate::evaluator::{self, ConditionEvaluator};
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

mod builder;
mod driver;

pub use builder::ProcessEngineBuilder;
pub use driver::{PassthroughExecutor, RunOutcome, TaskError, TaskExecutor, TaskOutcome};

/// A non-fatal inconsistency between a task's `next` link and its `end` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// The task has no successor but is not marked as an end task.
    MissingNext { element: String },
    /// The task is marked as an end task but still names a successor.
    NextOnEndTask { element: String, next: String },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::MissingNext { element } => {
                write!(f, "task '{}' has no next element but is not an end task", element)
            }
            IntegrityWarning::NextOnEndTask { element, next } => write!(
                f,
                "task '{}' is an end task but links to '{}'",
                element, next
            ),
        }
    }
}

pub(crate) fn end_flag_warning(element: &Element) -> Option<IntegrityWarning> {
    let task = element.as_task()?;
    match (&task.next, task.is_end) {
        (None, false) => Some(IntegrityWarning::MissingNext {
            element: element.name.clone(),
        }),
        (Some(next), true) => Some(IntegrityWarning::NextOnEndTask {
            element: element.name.clone(),
            next: next.clone(),
        }),
        _ => None,
    }
}

/// How a successor was chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Via {
    /// A task's `next` link, taken without evaluating anything.
    Task,
    /// A gateway condition evaluated to `outcome`.
    Gateway {
        outcome: bool,
        trace: EvaluationTrace,
    },
}

/// The detailed result of one traversal step.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub from: &'a str,
    /// `None` ends the branch.
    pub next: Option<&'a str>,
    pub via: Via,
    pub warning: Option<IntegrityWarning>,
}

/// Resolves traversal steps over one immutable process definition.
///
/// The engine is `Send + Sync`; any number of threads may resolve against it at
/// once, each with its own data context.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    definition: Arc<ProcessDefinition>,
    index: ElementIndex,
    config: EngineConfig,
    evaluator: ConditionEvaluator,
}

impl ProcessEngine {
    pub fn definition(&self) -> &ProcessDefinition {
        &self.definition
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Looks up an element by name.
    pub fn element(&self, name: &str) -> Result<&Element, EvaluationError> {
        self.index.get(&self.definition, name)
    }

    /// Returns the name of the element that follows `element_name` for `context`.
    ///
    /// Tasks return their `next` link verbatim. Gateways evaluate their condition and
    /// return `nextIsTrue` or `nextIsFalse`. `None` means the branch ends here.
    ///
    /// # Errors
    ///
    /// * `EvaluationError::UnknownElement` if `element_name` is not in the definition.
    /// * `EvaluationError::EmptyGroup` if a gateway condition has an empty group.
    pub fn resolve_next<L: FieldLookup + ?Sized>(
        &self,
        element_name: &str,
        context: &L,
    ) -> Result<Option<&str>, EvaluationError> {
        let element = self.element(element_name)?;
        let next = match &element.kind {
            ElementKind::Task(task) => task.next.as_deref(),
            ElementKind::Gateway(gateway) => {
                let outcome = self.evaluate_gateway(gateway, context)?;
                gateway.successor(outcome)
            }
        };
        debug!(from = element_name, next = ?next, "resolved next element");
        Ok(next)
    }

    /// Like [`resolve_next`](Self::resolve_next), but also reports how the successor
    /// was chosen and any integrity warning on the element.
    pub fn resolve<L: FieldLookup + ?Sized>(
        &self,
        element_name: &str,
        context: &L,
    ) -> Result<Resolution<'_>, EvaluationError> {
        let element = self.element(element_name)?;
        let resolution = match &element.kind {
            ElementKind::Task(task) => Resolution {
                from: element.name.as_str(),
                next: task.next.as_deref(),
                via: Via::Task,
                warning: end_flag_warning(element),
            },
            ElementKind::Gateway(gateway) => {
                let trace = self.explain_gateway(gateway, context)?;
                let outcome = trace.outcome();
                Resolution {
                    from: element.name.as_str(),
                    next: gateway.successor(outcome),
                    via: Via::Gateway { outcome, trace },
                    warning: None,
                }
            }
        };
        debug!(
            from = element_name,
            next = ?resolution.next,
            "resolved next element"
        );
        Ok(resolution)
    }

    /// Resolves the same element against many contexts in parallel.
    ///
    /// Results are returned in the order of `contexts`.
    pub fn resolve_batch<L>(
        &self,
        element_name: &str,
        contexts: &[L],
    ) -> Vec<Result<Option<&str>, EvaluationError>>
    where
        L: FieldLookup + Sync,
    {
        contexts
            .par_iter()
            .map(|context| self.resolve_next(element_name, context))
            .collect()
    }

    fn evaluate_gateway<L: FieldLookup + ?Sized>(
        &self,
        gateway: &Gateway,
        context: &L,
    ) -> Result<bool, EvaluationError> {
        if self.config.project_fields {
            let projected = evaluator::project(&gateway.condition, context);
            self.evaluator.gateway(&gateway.condition, &projected)
        } else {
            self.evaluator.gateway(&gateway.condition, context)
        }
    }

    fn explain_gateway<L: FieldLookup + ?Sized>(
        &self,
        gateway: &Gateway,
        context: &L,
    ) -> Result<EvaluationTrace, EvaluationError> {
        if self.config.project_fields {
            let projected = evaluator::project(&gateway.condition, context);
            self.evaluator.explain(&gateway.condition, &projected)
        } else {
            self.evaluator.explain(&gateway.condition, context)
        }
    }
}
