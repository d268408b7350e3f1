use crate::condition::{EvaluationTrace, Value};
use itertools::Itertools;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format an evaluation trace into a one-line explanation.
    pub fn format_trace(trace: &EvaluationTrace) -> String {
        Self::format_recursive(trace, true)
    }

    /// Nested groups with more than one evaluated child are parenthesized.
    fn format_recursive(trace: &EvaluationTrace, top_level: bool) -> String {
        match trace {
            EvaluationTrace::Comparison {
                field,
                operator,
                found,
                expected,
                ..
            } => format!(
                "${} (was {}) {} {}",
                field,
                Self::format_found(found.as_ref()),
                operator.symbol(),
                expected
            ),
            EvaluationTrace::Group {
                operator, children, ..
            } => {
                let separator = format!(" {} ", operator.as_ref());
                let body = children
                    .iter()
                    .map(|child| Self::format_recursive(child, false))
                    .join(&separator);
                if !top_level && children.len() > 1 {
                    format!("({})", body)
                } else {
                    body
                }
            }
        }
    }

    fn format_found(found: Option<&Value>) -> String {
        match found {
            Some(value) => value.to_string(),
            None => "undefined".to_string(),
        }
    }
}
