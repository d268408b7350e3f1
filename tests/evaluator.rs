//! Tests for the condition evaluation engine.
mod common;
use bunki::error::GroupLevel;
use bunki::evaluator::project;
use bunki::prelude::*;
use common::*;

fn cond(field: &str, operator: ComparisonOperator, value: impl Into<Value>) -> Condition {
    Condition::new(field, operator, value)
}

#[test]
fn test_equal_requires_same_type_and_value() {
    let ctx = DataContext::new()
        .with("score", 60)
        .with("flag", true)
        .with("label", "60");

    assert!(evaluate_condition(&cond("score", ComparisonOperator::Equal, 60), &ctx));
    assert!(!evaluate_condition(&cond("score", ComparisonOperator::Equal, 61), &ctx));
    assert!(!evaluate_condition(&cond("label", ComparisonOperator::Equal, 60), &ctx));
    assert!(!evaluate_condition(&cond("score", ComparisonOperator::Equal, "60"), &ctx));
    assert!(!evaluate_condition(&cond("flag", ComparisonOperator::Equal, 1), &ctx));
    assert!(evaluate_condition(&cond("flag", ComparisonOperator::Equal, true), &ctx));
}

#[test]
fn test_relational_operators_on_numbers() {
    let ctx = DataContext::new().with("score", 60);
    let cases = [
        (ComparisonOperator::GreaterThan, 59, true),
        (ComparisonOperator::GreaterThan, 60, false),
        (ComparisonOperator::LessThan, 61, true),
        (ComparisonOperator::LessThan, 60, false),
        (ComparisonOperator::GreaterThanOrEqual, 60, true),
        (ComparisonOperator::LessThanOrEqual, 60, true),
        (ComparisonOperator::LessThanOrEqual, 59, false),
        (ComparisonOperator::NotEqual, 59, true),
        (ComparisonOperator::NotEqual, 60, false),
    ];
    for (operator, literal, expected) in cases {
        assert_eq!(
            evaluate_condition(&cond("score", operator, literal), &ctx),
            expected,
            "score {} {}",
            operator.symbol(),
            literal
        );
    }
}

#[test]
fn test_scenario_d_single_condition_greater_or_equal() {
    let condition = GatewayCondition::Single(cond(
        "score",
        ComparisonOperator::GreaterThanOrEqual,
        60,
    ));
    let ctx = DataContext::new().with("score", 60);
    assert_eq!(evaluate_gateway(&condition, &ctx), Ok(true));
}

#[test]
fn test_scenario_e_missing_field_is_false_not_an_error() {
    let ctx = DataContext::new()
        .with("isStudent", false)
        .with("country", "USA")
        .with("city", "London");
    assert_eq!(evaluate_gateway(&enrollment_condition(), &ctx), Ok(false));
    assert!(!evaluate_condition(
        &cond("age", ComparisonOperator::NotEqual, 18),
        &ctx
    ));
}

#[test]
fn test_string_ordering_policy() {
    let ctx = DataContext::new().with("date", "2024-03-01");
    let after = cond("date", ComparisonOperator::GreaterThan, "2024-01-15");

    assert!(ConditionEvaluator::new(StringOrdering::Lexicographic).condition(&after, &ctx));
    assert!(!ConditionEvaluator::new(StringOrdering::Reject).condition(&after, &ctx));

    // Equality is unaffected by the ordering policy.
    let same = cond("date", ComparisonOperator::Equal, "2024-03-01");
    assert!(ConditionEvaluator::new(StringOrdering::Reject).condition(&same, &ctx));
}

#[test]
fn test_empty_group_is_an_error() {
    let ctx = DataContext::new().with("age", 25);
    for operator in [LogicalOperator::And, LogicalOperator::Or] {
        let group = ConditionGroup {
            operator,
            conditions: vec![],
        };
        assert_eq!(
            evaluate_group(&group, &ctx),
            Err(EvaluationError::EmptyGroup {
                level: GroupLevel::Conditions
            })
        );
    }
    assert!(ConditionGroup::new(LogicalOperator::And, vec![]).is_none());

    let no_groups = GatewayCondition::Grouped {
        combination: LogicalOperator::And,
        groups: vec![],
    };
    assert_eq!(
        evaluate_gateway(&no_groups, &ctx),
        Err(EvaluationError::EmptyGroup {
            level: GroupLevel::Groups
        })
    );
    assert!(GatewayCondition::grouped(LogicalOperator::Or, vec![]).is_none());
}

#[test]
fn test_and_group_short_circuits_on_first_failure() {
    let group = ConditionGroup::new(
        LogicalOperator::And,
        vec![
            cond("age", ComparisonOperator::GreaterThan, 18),
            cond("isStudent", ComparisonOperator::Equal, false),
            cond("country", ComparisonOperator::Equal, "USA"),
        ],
    )
    .unwrap();
    let ctx = CountingContext::new(applicant(16, false, "USA", "London"));

    assert_eq!(evaluate_group(&group, &ctx), Ok(false));
    assert_eq!(ctx.count(), 1);
}

#[test]
fn test_or_group_short_circuits_on_first_success() {
    let group = ConditionGroup::new(
        LogicalOperator::Or,
        vec![
            cond("country", ComparisonOperator::Equal, "USA"),
            cond("city", ComparisonOperator::Equal, "London"),
            cond("age", ComparisonOperator::GreaterThan, 18),
        ],
    )
    .unwrap();
    let ctx = CountingContext::new(applicant(25, false, "USA", "Paris"));

    assert_eq!(evaluate_group(&group, &ctx), Ok(true));
    assert_eq!(ctx.count(), 1);
}

#[test]
fn test_group_level_short_circuit() {
    // Group 1 fails on its first condition, so group 2 is never read.
    let ctx = CountingContext::new(applicant(16, false, "USA", "London"));
    assert_eq!(evaluate_gateway(&enrollment_condition(), &ctx), Ok(false));
    assert_eq!(ctx.count(), 1);
}

#[test]
fn test_evaluation_is_idempotent() {
    let condition = enrollment_condition();
    let ctx = applicant(25, false, "Canada", "London");
    let first = evaluate_gateway(&condition, &ctx);
    for _ in 0..10 {
        assert_eq!(evaluate_gateway(&condition, &ctx), first);
    }
    assert_eq!(first, Ok(true));
}

#[test]
fn test_grouped_and_matches_isolated_group_results() {
    let condition = enrollment_condition();
    let GatewayCondition::Grouped { groups, .. } = &condition else {
        panic!("gate1 is grouped");
    };
    let contexts = [
        applicant(25, false, "USA", "London"),
        applicant(16, false, "USA", "London"),
        applicant(25, true, "Canada", "Paris"),
        applicant(25, false, "Canada", "Paris"),
        applicant(30, false, "France", "London"),
    ];
    for ctx in &contexts {
        let isolated = evaluate_group(&groups[0], ctx).unwrap() && evaluate_group(&groups[1], ctx).unwrap();
        assert_eq!(evaluate_gateway(&condition, ctx), Ok(isolated));
    }
}

#[test]
fn test_grouped_or_combination() {
    let condition = GatewayCondition::grouped(
        LogicalOperator::Or,
        vec![
            ConditionGroup::new(
                LogicalOperator::And,
                vec![cond("tier", ComparisonOperator::Equal, "gold")],
            )
            .unwrap(),
            ConditionGroup::new(
                LogicalOperator::And,
                vec![
                    cond("spend", ComparisonOperator::GreaterThanOrEqual, 1000),
                    cond("spend", ComparisonOperator::LessThan, 5000),
                ],
            )
            .unwrap(),
        ],
    )
    .unwrap();

    let gold = DataContext::new().with("tier", "gold");
    let big_spender = DataContext::new().with("tier", "silver").with("spend", 1200);
    let neither = DataContext::new().with("tier", "silver").with("spend", 6000);

    assert_eq!(evaluate_gateway(&condition, &gold), Ok(true));
    assert_eq!(evaluate_gateway(&condition, &big_spender), Ok(true));
    assert_eq!(evaluate_gateway(&condition, &neither), Ok(false));
}

#[test]
fn test_projection_does_not_change_results() {
    let condition = enrollment_condition();
    let ctx = applicant(25, false, "Canada", "London").with("unrelated", 42);
    let projected = project(&condition, &ctx);

    assert_eq!(projected.len(), 4);
    assert!(projected.get("unrelated").is_none());
    assert_eq!(
        evaluate_gateway(&condition, &projected),
        evaluate_gateway(&condition, &ctx)
    );
}

#[test]
fn test_explain_matches_evaluation() {
    let condition = enrollment_condition();
    let ctx = applicant(25, false, "USA", "London");
    let trace = explain_gateway(&condition, &ctx).unwrap();

    assert!(trace.outcome());
    // Group 2 stops after the country check.
    assert_eq!(trace.comparisons(), 3);
    assert_eq!(
        TraceFormatter::format_trace(&trace),
        r#"($age (was 25) > 18 AND $isStudent (was false) == false) AND $country (was "USA") == "USA""#
    );
}

#[test]
fn test_plain_hash_maps_are_lookups() {
    let mut map = std::collections::HashMap::new();
    map.insert("age".to_string(), Value::Number(20.0));
    let condition = cond("age", ComparisonOperator::GreaterThan, 18);
    assert!(evaluate_condition(&condition, &map));

    let mut amap = ahash::AHashMap::new();
    amap.insert("age".to_string(), Value::Number(10.0));
    assert!(!evaluate_condition(&condition, &amap));
}
