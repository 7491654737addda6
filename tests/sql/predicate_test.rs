//! Predicate text scenarios against a real-looking catalogue.

use chrono::NaiveDate;
use lsql::model::{
    Column, ColumnDataType, Filter, FilterGroup, FilterOperator, FilterValue, ValueKind,
};
use lsql::sql::compile_predicate;

#[test]
fn test_contains_scenario() {
    let column = Column::new("\"T\".\"C\"", "C", ColumnDataType::Varchar);
    let f = Filter::new(
        &column,
        Some("x".into()),
        FilterOperator::Contains,
        ValueKind::Value,
    )
    .unwrap();
    assert_eq!(compile_predicate(&f.into()), "\"T\".\"C\" LIKE '%x%'");
}

#[test]
fn test_date_equal_scenario() {
    let column = Column::new("D", "D", ColumnDataType::Date);
    let f = Filter::new(
        &column,
        Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().into()),
        FilterOperator::Equal,
        ValueKind::Value,
    )
    .unwrap();
    assert_eq!(compile_predicate(&f.into()), "D = date '2020-01-01'");
}

#[test]
fn test_every_comparison_operator_template() {
    let column = Column::new("N", "N", ColumnDataType::Integer);
    let cases = [
        (FilterOperator::Equal, "N = 7"),
        (FilterOperator::NotEqual, "N <> 7"),
        (FilterOperator::Greater, "N > 7"),
        (FilterOperator::GreaterOrEqual, "N >= 7"),
        (FilterOperator::Less, "N < 7"),
        (FilterOperator::LessOrEqual, "N <= 7"),
    ];
    for (op, expected) in cases {
        let f = Filter::new(&column, Some(7i64.into()), op, ValueKind::Value).unwrap();
        assert_eq!(compile_predicate(&f.into()), expected);
    }
}

#[test]
fn test_deep_tree_grouping() {
    let region = Column::new("R", "R", ColumnDataType::Varchar);
    let amount = Column::new("N", "N", ColumnDataType::Integer);

    let east = Filter::new(
        &region,
        Some(vec!["East", "West"].into()),
        FilterOperator::In,
        ValueKind::Value,
    )
    .unwrap();
    let big = Filter::new(
        &amount,
        Some(100i64.into()),
        FilterOperator::Greater,
        ValueKind::Value,
    )
    .unwrap();
    let small = Filter::new(
        &amount,
        Some(10i64.into()),
        FilterOperator::Less,
        ValueKind::Value,
    )
    .unwrap();

    let extremes = FilterGroup::or(vec![big.into(), small.into()]);
    let tree = FilterGroup::and(vec![east.into(), extremes.into()]);
    assert_eq!(
        compile_predicate(&tree.into()),
        "R in ('East', 'West') and (N > 100 or N < 10)"
    );
}

#[test]
fn test_group_of_only_unusable_children_is_empty() {
    let region = Column::new("R", "R", ColumnDataType::Varchar);
    let empty = Filter::new(
        &region,
        Some(FilterValue::List(Vec::new())),
        FilterOperator::In,
        ValueKind::Value,
    )
    .unwrap();
    let group = FilterGroup::or(vec![empty.into()]);
    assert_eq!(compile_predicate(&group.into()), "");
}
