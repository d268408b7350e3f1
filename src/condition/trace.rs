use super::{ComparisonOperator, LogicalOperator, Value};

/// A record of how a gateway condition was evaluated, including the values read.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationTrace {
    Comparison {
        field: String,
        operator: ComparisonOperator,
        /// `None` when the field was absent from the context.
        found: Option<Value>,
        expected: Value,
        outcome: bool,
    },
    /// Only the children that were actually evaluated are kept; a short-circuit
    /// leaves the rest out and counts them in `skipped`.
    Group {
        operator: LogicalOperator,
        children: Vec<EvaluationTrace>,
        skipped: usize,
        outcome: bool,
    },
}

impl EvaluationTrace {
    pub fn outcome(&self) -> bool {
        match self {
            EvaluationTrace::Comparison { outcome, .. } => *outcome,
            EvaluationTrace::Group { outcome, .. } => *outcome,
        }
    }

    /// Number of comparisons that were evaluated.
    pub fn comparisons(&self) -> usize {
        match self {
            EvaluationTrace::Comparison { .. } => 1,
            EvaluationTrace::Group { children, .. } => {
                children.iter().map(EvaluationTrace::comparisons).sum()
            }
        }
    }
}
