use super::{IntegrityWarning, ProcessEngine};
use crate::data::DataContext;
use crate::definition::{Element, ElementKind, Task};
use crate::error::{DefinitionError, EvaluationError};
use tracing::{debug, info};

pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// What a task executor hands back after performing a task's side effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskOutcome {
    /// The context to use for the following transitions.
    pub context: DataContext,
    /// Model fields the caller should persist.
    pub patched_fields: Vec<String>,
}

/// Performs task side effects between transitions.
///
/// Implementations own all I/O (manual completion signals, outbound calls built
/// from the task's request descriptor, model patches); the engine only computes
/// transitions.
pub trait TaskExecutor {
    fn execute(
        &mut self,
        element: &Element,
        task: &Task,
        context: DataContext,
    ) -> Result<TaskOutcome, TaskError>;
}

impl<F> TaskExecutor for F
where
    F: FnMut(&Element, &Task, DataContext) -> Result<TaskOutcome, TaskError>,
{
    fn execute(
        &mut self,
        element: &Element,
        task: &Task,
        context: DataContext,
    ) -> Result<TaskOutcome, TaskError> {
        self(element, task, context)
    }
}

/// Completes every task immediately, leaving the context untouched and reporting
/// the task's `modelPatchField` list as patched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExecutor;

impl TaskExecutor for PassthroughExecutor {
    fn execute(
        &mut self,
        _element: &Element,
        task: &Task,
        context: DataContext,
    ) -> Result<TaskOutcome, TaskError> {
        Ok(TaskOutcome {
            context,
            patched_fields: task.model_patch_fields.clone(),
        })
    }
}

/// The result of driving a process from its start element until it halts.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Element names in visiting order, ending with the halting element.
    pub visited: Vec<String>,
    pub context: DataContext,
    pub patched_fields: Vec<String>,
    pub warnings: Vec<IntegrityWarning>,
}

impl RunOutcome {
    pub fn halted_at(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}

impl ProcessEngine {
    /// The unique task flagged as the start of the process.
    pub fn start_element(&self) -> Result<&Element, DefinitionError> {
        let mut starts = self.definition.start_elements();
        match (starts.next(), starts.next()) {
            (Some(start), None) => Ok(start),
            (None, _) => Err(DefinitionError::StartElement { count: 0 }),
            (Some(_), Some(_)) => Err(DefinitionError::StartElement {
                count: self.definition.start_elements().count(),
            }),
        }
    }

    /// Drives the process from its start element, running each task through
    /// `executor` and resolving transitions until an end task or a missing
    /// successor halts it.
    ///
    /// # Errors
    ///
    /// * `EvaluationError::Definition` if the definition does not have exactly one
    ///   start element.
    /// * `EvaluationError::TaskFailed` if the executor fails.
    /// * `EvaluationError::StepLimitExceeded` if `max_steps` elements were visited
    ///   without halting.
    pub fn run<E: TaskExecutor + ?Sized>(
        &self,
        context: DataContext,
        executor: &mut E,
    ) -> Result<RunOutcome, EvaluationError> {
        let start = self.start_element()?;
        let mut current = start.name.as_str();
        let mut outcome = RunOutcome {
            visited: Vec::new(),
            context,
            patched_fields: Vec::new(),
            warnings: Vec::new(),
        };

        for _ in 0..self.config.max_steps {
            let element = self.element(current)?;
            outcome.visited.push(element.name.clone());

            let mut halt = false;
            if let ElementKind::Task(task) = &element.kind {
                let context = std::mem::take(&mut outcome.context);
                let result = executor.execute(element, task, context).map_err(|e| {
                    EvaluationError::TaskFailed {
                        element: element.name.clone(),
                        message: e.to_string(),
                    }
                })?;
                outcome.context = result.context;
                outcome.patched_fields.extend(result.patched_fields);
                halt = task.is_end;
            }

            let resolution = self.resolve(current, &outcome.context)?;
            if let Some(warning) = resolution.warning {
                outcome.warnings.push(warning);
            }

            match resolution.next {
                Some(next) if !halt => {
                    debug!(from = current, to = next, "transition");
                    current = next;
                }
                _ => {
                    info!(
                        process = %self.definition.name,
                        halted_at = current,
                        steps = outcome.visited.len(),
                        "process run halted"
                    );
                    return Ok(outcome);
                }
            }
        }

        Err(EvaluationError::StepLimitExceeded {
            limit: self.config.max_steps,
        })
    }
}
