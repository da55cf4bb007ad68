//! Firebird statement translation.
//!
//! Firebird limits rows with `FIRST n SKIP m` placed right after the
//! `SELECT` keyword instead of trailing `LIMIT`/`OFFSET` clauses, and a
//! `SKIP` is only accepted together with a `FIRST`. Inserts into tables with
//! a generated key are rendered here as well; everything else is delegated
//! to the generic compiler.

use fbsql_core::compiler::check_insert;
use fbsql_core::plan::{InsertPlan, SelectPlan};
use fbsql_core::{
    CompileError, Dialect, GenericCompiler, QueryPlan, Rendered, RenderedStatement, SqlCompiler,
    SqlValue,
};

use crate::dialect::FirebirdDialect;
use crate::options::FirebirdOptions;

/// Translates query plans into Firebird SQL.
#[derive(Debug, Clone, Default)]
pub struct FirebirdCompiler {
    generic: GenericCompiler<FirebirdDialect>,
}

impl FirebirdCompiler {
    /// Creates a compiler for `dialect`.
    #[must_use]
    pub const fn new(dialect: FirebirdDialect) -> Self {
        Self {
            generic: GenericCompiler::new(dialect),
        }
    }

    /// Creates a compiler from backend options.
    #[must_use]
    pub fn from_options(options: &FirebirdOptions) -> Self {
        Self::new(FirebirdDialect::from_options(options))
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &FirebirdDialect {
        self.generic.dialect()
    }

    /// Returns the row-limiting tokens for a `low..high` range, in the
    /// order they must follow `SELECT`.
    #[must_use]
    pub fn pagination_tokens(&self, low_mark: u64, high_mark: Option<u64>) -> Vec<String> {
        let mut tokens = vec![];
        if let Some(high) = high_mark {
            tokens.push(format!("FIRST {}", high.saturating_sub(low_mark)));
        }
        if low_mark > 0 {
            if high_mark.is_none() {
                if let Some(max) = self.dialect().no_limit_value() {
                    tokens.push(format!("FIRST {max}"));
                }
            }
            tokens.push(format!("SKIP {low_mark}"));
        }
        tokens
    }

    /// Renders a SELECT with its row range moved to the front.
    ///
    /// An unsliced plan renders exactly as the generic compiler would.
    #[must_use]
    pub fn select(&self, plan: &SelectPlan) -> RenderedStatement {
        let stmt = self.generic.select(plan, false);
        let tokens = self.pagination_tokens(plan.low_mark, plan.high_mark);
        if tokens.is_empty() {
            return stmt;
        }
        let body = stmt.sql.strip_prefix("SELECT").unwrap_or(&stmt.sql).trim();
        RenderedStatement::new(format!("SELECT {} {body}", tokens.join(" ")), stmt.params)
    }

    /// Renders an INSERT into a table whose primary key the engine
    /// generates.
    ///
    /// Without explicit fields the key column alone is written with the
    /// dialect's default key value. Rows share one statement only when no
    /// field has a custom placeholder, no id is requested and the dialect
    /// allows it; otherwise each row gets its own statement, in input order.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for malformed plans, including a returned
    /// id requested over more than one row.
    pub fn insert(&self, plan: &InsertPlan) -> Result<Vec<RenderedStatement>, CompileError> {
        check_insert(plan)?;
        let dialect = self.dialect();
        let table = dialect.quote_identifier(&plan.table);
        let has_fields = !plan.fields.is_empty();

        let (columns, placeholders): (Vec<String>, Vec<&str>) = if has_fields {
            plan.fields
                .iter()
                .map(|f| {
                    let placeholder = f
                        .placeholder
                        .as_deref()
                        .unwrap_or_else(|| dialect.parameter_placeholder());
                    (dialect.quote_identifier(&f.column), placeholder)
                })
                .unzip()
        } else {
            (
                vec![dialect.quote_identifier(&plan.primary_key.column)],
                vec![dialect.pk_default_value()],
            )
        };
        let rows = self.generic.prepare_rows(&plan.rows);
        let head = format!("INSERT INTO {table} ({})", columns.join(", "));
        let row_sql = placeholders.join(", ");

        if plan.return_id && dialect.can_return_id_from_insert() {
            let column = format!(
                "{table}.{}",
                dialect.quote_identifier(&plan.primary_key.column)
            );
            let (returning, returning_params) = dialect.return_insert_id(&column);
            let params: Vec<SqlValue> = rows.into_iter().flatten().collect();
            let statement = RenderedStatement::new(format!("{head} VALUES ({row_sql})"), params)
                .append(&returning, returning_params);
            return Ok(vec![statement]);
        }

        let can_bulk =
            !plan.has_custom_placeholders() && !plan.return_id && dialect.has_bulk_insert();
        if can_bulk {
            let tail = dialect.bulk_insert_sql(&row_sql, rows.len());
            let params = rows.into_iter().flatten().collect();
            return Ok(vec![RenderedStatement::new(format!("{head} {tail}"), params)]);
        }

        Ok(rows
            .into_iter()
            .map(|params| RenderedStatement::new(format!("{head} VALUES ({row_sql})"), params))
            .collect())
    }

    /// Renders any insert: tables with a generated key go through
    /// [`Self::insert`], the rest through the generic compiler.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for malformed plans.
    pub fn compile_insert(
        &self,
        plan: &InsertPlan,
    ) -> Result<Vec<RenderedStatement>, CompileError> {
        if plan.primary_key.auto {
            self.insert(plan)
        } else {
            self.generic.insert(plan)
        }
    }
}

impl SqlCompiler for FirebirdCompiler {
    fn compile(&self, plan: &QueryPlan) -> Result<Rendered, CompileError> {
        match plan {
            QueryPlan::Select(select) => Ok(Rendered::Single(self.select(select))),
            QueryPlan::Aggregate(aggregate) => {
                let inner = self.select(&aggregate.source);
                Ok(Rendered::Single(self.generic.aggregate(aggregate, inner)))
            }
            QueryPlan::Insert(insert) => self.compile_insert(insert).map(Rendered::from_statements),
            QueryPlan::Update(update) => Ok(Rendered::Single(self.generic.update(update))),
            QueryPlan::Delete(delete) => Ok(Rendered::Single(self.generic.delete(delete))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MAX_ROWS;
    use fbsql_core::col;
    use fbsql_core::plan::{InsertField, PrimaryKey};

    fn compiler() -> FirebirdCompiler {
        FirebirdCompiler::new(FirebirdDialect::new())
    }

    fn users() -> SelectPlan {
        SelectPlan::new("users", &["id", "name"])
    }

    #[test]
    fn test_unsliced_select_is_untouched() {
        let plan = users().filter(col("active").eq(true));
        let generic = GenericCompiler::new(FirebirdDialect::new()).select(&plan, false);
        assert_eq!(compiler().select(&plan), generic);
    }

    #[test]
    fn test_first_only() {
        let stmt = compiler().select(&users().slice(0, Some(5)));
        assert_eq!(stmt.sql, "SELECT FIRST 5 id, name FROM users");
    }

    #[test]
    fn test_first_is_a_row_count() {
        let stmt = compiler().select(&users().slice(10, Some(25)));
        assert_eq!(stmt.sql, "SELECT FIRST 15 SKIP 10 id, name FROM users");
    }

    #[test]
    fn test_skip_only_pairs_with_sentinel_first() {
        let stmt = compiler().select(&users().slice(10, None));
        assert_eq!(
            stmt.sql,
            format!("SELECT FIRST {MAX_ROWS} SKIP 10 id, name FROM users")
        );
    }

    #[test]
    fn test_tokens_precede_distinct() {
        let stmt = compiler().select(&users().distinct().slice(0, Some(3)));
        assert_eq!(stmt.sql, "SELECT FIRST 3 DISTINCT id, name FROM users");
    }

    #[test]
    fn test_pagination_keeps_params() {
        let plan = users().filter(col("name").eq("x")).slice(2, Some(4));
        let stmt = compiler().select(&plan);
        assert_eq!(stmt.sql, "SELECT FIRST 2 SKIP 2 id, name FROM users WHERE name = ?");
        assert_eq!(stmt.params, vec![SqlValue::Text(String::from("x"))]);
    }

    #[test]
    fn test_pagination_tokens_grid() {
        let compiler = compiler();
        for low in [0_u64, 1, 7] {
            for high in [None, Some(low), Some(low + 3)] {
                let tokens = compiler.pagination_tokens(low, high).join(" ");
                let has_count = high.map(|h| format!("FIRST {}", h - low));
                if let Some(count) = has_count {
                    assert!(tokens.starts_with(&count), "{tokens}");
                }
                assert_eq!(tokens.contains(&format!("SKIP {low}")), low > 0, "{tokens}");
                if low == 0 && high.is_none() {
                    assert!(tokens.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_identity_only_insert() {
        let plan = InsertPlan::identity_only("users", PrimaryKey::auto("id"), 2);
        let stmts = compiler().insert(&plan).unwrap();
        assert_eq!(stmts.len(), 2);
        for stmt in &stmts {
            assert_eq!(stmt.sql, "INSERT INTO \"USERS\" (\"ID\") VALUES (NULL)");
            assert!(stmt.params.is_empty());
        }
    }

    #[test]
    fn test_returning_insert() {
        let plan = InsertPlan::new("users", PrimaryKey::auto("id"), vec![InsertField::new("name")])
            .row(vec![SqlValue::Text(String::from("ann"))])
            .returning_id(true);
        let stmts = compiler().insert(&plan).unwrap();
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].sql,
            "INSERT INTO \"USERS\" (\"NAME\") VALUES (?) RETURNING \"USERS\".\"ID\""
        );
        assert_eq!(stmts[0].params, vec![SqlValue::Text(String::from("ann"))]);
    }

    #[test]
    fn test_manual_key_delegates_to_generic() {
        let plan = InsertPlan::new("tags", PrimaryKey::manual("code"), vec![InsertField::new("code")])
            .row(vec![SqlValue::Text(String::from("a"))]);
        let rendered = compiler().compile(&QueryPlan::Insert(plan)).unwrap();
        assert_eq!(
            rendered.statements()[0].sql,
            "INSERT INTO \"TAGS\" (\"CODE\") VALUES (?)"
        );
    }
}
