//! End-to-end compilation shape tests.

use insta::assert_snapshot;
use lsql::model::{
    Column, ColumnDataType, Filter, FilterGroup, FilterOperator, Query, Sort, SortDirection,
    ValueKind,
};
use lsql::sql::CompileContext;

fn region() -> Column {
    Column::new("\"Sales\".\"Region\"", "Region", ColumnDataType::Varchar)
        .with_subject_area("Sales")
}

fn revenue() -> Column {
    Column::new("\"Sales\".\"Revenue\"", "Revenue", ColumnDataType::Double)
        .with_subject_area("Sales")
        .with_aggregation("sum")
}

fn greater_than(column: &Column, value: i64) -> Filter {
    Filter::new(
        column,
        Some(value.into()),
        FilterOperator::Greater,
        ValueKind::Value,
    )
    .unwrap()
}

#[test]
fn test_full_statement_shape() {
    let query = Query::new(vec![region(), revenue()])
        .with_filters(vec![greater_than(&revenue(), 1000).into()])
        .with_sort(vec![Sort::by_name("Revenue", SortDirection::Desc)])
        .with_max_rows(50);
    assert_snapshot!(
        query.compile(&CompileContext::new()),
        @r#"SELECT "Sales"."Region", "Sales"."Revenue" FROM "Sales" WHERE "Sales"."Revenue" > 1000 ORDER BY 2 DESC NULLS LAST FETCH FIRST 50 ROWS ONLY"#
    );
}

#[test]
fn test_where_contains_comparison_substring() {
    let query = Query::new(vec![revenue()]).with_filters(vec![greater_than(&revenue(), 5).into()]);
    let sql = query.compile(&CompileContext::new());
    assert!(sql.contains("\"Sales\".\"Revenue\" > 5"), "got: {}", sql);
}

#[test]
fn test_implicit_grouping_matches_explicit_and_group() {
    let a = greater_than(&revenue(), 5);
    let b = Filter::new(
        &region(),
        Some(vec!["East"].into()),
        FilterOperator::In,
        ValueKind::Value,
    )
    .unwrap();

    let bare = Query::new(vec![region(), revenue()])
        .with_filters(vec![a.clone().into(), b.clone().into()]);
    let grouped = Query::new(vec![region(), revenue()])
        .with_filters(vec![FilterGroup::and(vec![a.into(), b.into()]).into()]);

    assert_eq!(
        bare.compile(&CompileContext::new()),
        grouped.compile(&CompileContext::new())
    );
}

#[test]
fn test_default_sort_is_positional() {
    let query = Query::new(vec![region(), revenue()]).with_max_rows(10);
    assert_snapshot!(
        query.compile(&CompileContext::new()),
        @r#"SELECT "Sales"."Region", "Sales"."Revenue" FROM "Sales" ORDER BY 1 ASC NULLS LAST, 2 ASC NULLS LAST FETCH FIRST 10 ROWS ONLY"#
    );
}

#[test]
fn test_empty_filter_list_emits_no_where() {
    let query = Query::new(vec![region()]);
    assert!(!query.compile(&CompileContext::new()).contains("WHERE"));
}

#[test]
fn test_presentation_variable_in_select() {
    let column = Column::new(
        "\"Dates\".@{grain}{\"Dates\".\"Month\"}",
        "Grain",
        ColumnDataType::Varchar,
    )
    .with_subject_area("Sales");
    let query = Query::new(vec![column]).with_max_rows(10);

    // unbound: default wins
    let sql = query.compile(&CompileContext::new());
    assert!(sql.starts_with("SELECT \"Dates\".\"Dates\".\"Month\" FROM \"Sales\""));

    // bound: the binding wins
    let ctx = CompileContext::new().bind("grain", "\"Week\"");
    let sql = query.compile(&ctx);
    assert!(sql.starts_with("SELECT \"Dates\".\"Week\" FROM \"Sales\""));
}

#[test]
fn test_compile_is_pure_given_query_and_context() {
    let query = Query::new(vec![region(), revenue()])
        .with_filters(vec![greater_than(&revenue(), 5).into()]);
    let ctx = CompileContext::new();
    assert_eq!(query.compile(&ctx), query.compile(&ctx));
}
