use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Comparison applied between a context field and a comparative literal.
///
/// Wire names are camelCase (`"greaterThanOrEqual"`), matching process definitions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[strum(serialize_all = "camelCase")]
pub enum ComparisonOperator {
    GreaterThan,
    Equal,
    LessThan,
    NotEqual,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl ComparisonOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThanOrEqual => "<=",
        }
    }

    /// True for the four ordering operators.
    pub fn is_relational(&self) -> bool {
        !matches!(
            self,
            ComparisonOperator::Equal | ComparisonOperator::NotEqual
        )
    }
}

/// Boolean combinator for condition lists and group lists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// The value that ends a short-circuiting scan: `false` for AND, `true` for OR.
    pub fn short_circuit_on(&self) -> bool {
        matches!(self, LogicalOperator::Or)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            ComparisonOperator::from_str("greaterThanOrEqual").unwrap(),
            ComparisonOperator::GreaterThanOrEqual
        );
        assert_eq!(
            ComparisonOperator::from_str("notEqual").unwrap(),
            ComparisonOperator::NotEqual
        );
        assert_eq!(LogicalOperator::from_str("OR").unwrap(), LogicalOperator::Or);
        assert!(ComparisonOperator::from_str("contains").is_err());
        assert!(LogicalOperator::from_str("XOR").is_err());
    }

    #[test]
    fn wire_names_round_trip_through_as_ref() {
        assert_eq!(ComparisonOperator::LessThanOrEqual.as_ref(), "lessThanOrEqual");
        assert_eq!(LogicalOperator::And.as_ref(), "AND");
    }
}
