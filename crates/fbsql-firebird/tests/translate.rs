mod common;

use common::text;
use fbsql_core::plan::{
    Aggregate, AggregatePlan, DeletePlan, InsertField, InsertPlan, PrimaryKey, SelectPlan,
    UpdatePlan,
};
use fbsql_core::{col, CompileError, QueryPlan, SqlCompiler, SqlValue};
use fbsql_firebird::{FirebirdCompiler, FirebirdOptions, MAX_ROWS};

fn compiler() -> FirebirdCompiler {
    FirebirdCompiler::from_options(&FirebirdOptions::default())
}

fn compile_one(plan: QueryPlan) -> String {
    let rendered = compiler().compile(&plan).unwrap();
    assert_eq!(rendered.statements().len(), 1);
    rendered.statements()[0].sql.clone()
}

fn people() -> InsertPlan {
    InsertPlan::new(
        "people",
        PrimaryKey::auto("id"),
        vec![InsertField::new("name"), InsertField::new("age")],
    )
}

// Pagination

#[test]
fn test_first_value_is_row_count() {
    for (low, high) in [(0_u64, 1_u64), (0, 20), (5, 6), (40, 60), (7, 7)] {
        let sql = compile_one(QueryPlan::Select(
            SelectPlan::new("t", &["a"]).slice(low, Some(high)),
        ));
        assert!(
            sql.starts_with(&format!("SELECT FIRST {} ", high - low)),
            "{sql}"
        );
        assert_eq!(sql.contains("SKIP"), low > 0, "{sql}");
    }
}

#[test]
fn test_skip_without_high_mark_uses_sentinel() {
    let sql = compile_one(QueryPlan::Select(
        SelectPlan::new("t", &["a"]).slice(3, None),
    ));
    assert_eq!(sql, format!("SELECT FIRST {MAX_ROWS} SKIP 3 a FROM t"));
}

#[test]
fn test_custom_no_limit_value() {
    let options = FirebirdOptions {
        no_limit_value: Some(500),
        ..FirebirdOptions::default()
    };
    let compiler = FirebirdCompiler::from_options(&options);
    assert_eq!(compiler.pagination_tokens(3, None), vec!["FIRST 500", "SKIP 3"]);
}

#[test]
fn test_unsliced_select_has_no_tokens() {
    let sql = compile_one(QueryPlan::Select(
        SelectPlan::new("t", &["a", "b"])
            .filter(col("a").gt(1))
            .order_by(&["b"]),
    ));
    assert_eq!(sql, "SELECT a, b FROM t WHERE a > ? ORDER BY b");
    assert!(!sql.contains("FIRST"));
    assert!(!sql.contains("LIMIT"));
}

#[test]
fn test_tokens_come_before_distinct() {
    let sql = compile_one(QueryPlan::Select(
        SelectPlan::new("t", &["a"]).distinct().slice(2, Some(4)),
    ));
    assert_eq!(sql, "SELECT FIRST 2 SKIP 2 DISTINCT a FROM t");
}

#[test]
fn test_paginated_aggregate_limits_inner_query() {
    let source = SelectPlan::new("t", &["a"]).slice(0, Some(10));
    let sql = compile_one(QueryPlan::Aggregate(AggregatePlan::new(
        source,
        vec![Aggregate::count_all("n")],
    )));
    assert_eq!(
        sql,
        "SELECT COUNT(*) AS n FROM (SELECT FIRST 10 a FROM t) subquery"
    );
}

// Inserts

#[test]
fn test_batched_insert_params_are_row_major() {
    let options = FirebirdOptions {
        has_bulk_insert: Some(true),
        ..FirebirdOptions::default()
    };
    let compiler = FirebirdCompiler::from_options(&options);
    let plan = people()
        .row(vec![text("ann"), SqlValue::Int(30)])
        .row(vec![text("bob"), SqlValue::Int(40)])
        .row(vec![text("cyd"), SqlValue::Int(50)]);
    let rendered = compiler.compile(&QueryPlan::Insert(plan)).unwrap();
    let stmts = rendered.statements();
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        stmts[0].sql,
        "INSERT INTO \"PEOPLE\" (\"NAME\", \"AGE\") \
         SELECT ?, ? FROM RDB$DATABASE UNION ALL \
         SELECT ?, ? FROM RDB$DATABASE UNION ALL \
         SELECT ?, ? FROM RDB$DATABASE"
    );
    assert_eq!(
        stmts[0].params,
        vec![
            text("ann"),
            SqlValue::Int(30),
            text("bob"),
            SqlValue::Int(40),
            text("cyd"),
            SqlValue::Int(50),
        ]
    );
    assert_eq!(stmts[0].placeholder_count(), stmts[0].params.len());
}

#[test]
fn test_rows_get_one_statement_each_by_default() {
    let plan = people()
        .row(vec![text("ann"), SqlValue::Int(30)])
        .row(vec![text("bob"), SqlValue::Int(40)]);
    let rendered = compiler().compile(&QueryPlan::Insert(plan)).unwrap();
    let stmts = rendered.statements();
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0].params, vec![text("ann"), SqlValue::Int(30)]);
    assert_eq!(stmts[1].params, vec![text("bob"), SqlValue::Int(40)]);
    for stmt in stmts {
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"PEOPLE\" (\"NAME\", \"AGE\") VALUES (?, ?)"
        );
    }
}

#[test]
fn test_custom_placeholders_disable_batching() {
    let options = FirebirdOptions {
        has_bulk_insert: Some(true),
        ..FirebirdOptions::default()
    };
    let compiler = FirebirdCompiler::from_options(&options);
    let plan = InsertPlan::new(
        "people",
        PrimaryKey::auto("id"),
        vec![InsertField::with_placeholder("name", "upper(?)")],
    )
    .row(vec![text("ann")])
    .row(vec![text("bob")]);
    let stmts = compiler.insert(&plan).unwrap();
    assert_eq!(stmts.len(), 2);
    assert_eq!(
        stmts[0].sql,
        "INSERT INTO \"PEOPLE\" (\"NAME\") VALUES (upper(?))"
    );
}

#[test]
fn test_returning_contract() {
    let plan = people()
        .row(vec![text("ann"), SqlValue::Int(30)])
        .returning_id(true);
    let stmts = compiler().insert(&plan).unwrap();
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].sql.ends_with(" RETURNING \"PEOPLE\".\"ID\""));
    assert_eq!(stmts[0].params, vec![text("ann"), SqlValue::Int(30)]);
}

#[test]
fn test_no_returning_clause_without_server_support() {
    let compiler = FirebirdCompiler::from_options(&FirebirdOptions::for_version(2, 0));
    let plan = people()
        .row(vec![text("ann"), SqlValue::Int(30)])
        .returning_id(true);
    let stmts = compiler.insert(&plan).unwrap();
    assert_eq!(stmts.len(), 1);
    assert!(!stmts[0].sql.contains("RETURNING"));
}

#[test]
fn test_return_id_over_many_rows_is_rejected() {
    let plan = people()
        .row(vec![text("ann"), SqlValue::Int(30)])
        .row(vec![text("bob"), SqlValue::Int(40)])
        .returning_id(true);
    assert_eq!(
        compiler().compile(&QueryPlan::Insert(plan)),
        Err(CompileError::ReturnIdForManyRows { rows: 2 })
    );
}

#[test]
fn test_identity_only_insert_writes_key_default() {
    let plan = InsertPlan::identity_only("counters", PrimaryKey::auto("id"), 1);
    let sql = compile_one(QueryPlan::Insert(plan));
    assert_eq!(sql, "INSERT INTO \"COUNTERS\" (\"ID\") VALUES (NULL)");
}

#[test]
fn test_booleans_bind_as_integers_before_v3() {
    let plan = InsertPlan::new("flags", PrimaryKey::auto("id"), vec![InsertField::new("on")])
        .row(vec![SqlValue::Bool(true)]);
    let rendered = compiler().compile(&QueryPlan::Insert(plan)).unwrap();
    assert_eq!(rendered.statements()[0].params, vec![SqlValue::Int(1)]);
}

// Delegated statements

#[test]
fn test_update_and_delete_are_generic() {
    let update = compile_one(QueryPlan::Update(
        UpdatePlan::new("people")
            .set("name", text("x"))
            .filter(col("id").eq(1)),
    ));
    assert_eq!(update, "UPDATE \"PEOPLE\" SET \"NAME\" = ? WHERE id = ?");

    let delete = compile_one(QueryPlan::Delete(
        DeletePlan::new("people").filter(col("id").eq(1)),
    ));
    assert_eq!(delete, "DELETE FROM \"PEOPLE\" WHERE id = ?");
}
