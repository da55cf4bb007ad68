//! Dialect-driven default rendering.

use super::{count_placeholders, CompileError, Rendered, RenderedStatement, SqlCompiler};
use crate::builder::SqlValue;
use crate::dialect::Dialect;
use crate::plan::{AggregatePlan, DeletePlan, InsertPlan, QueryPlan, SelectPlan, UpdatePlan};

/// The shared rendering every engine compiler delegates to.
///
/// Pagination is rendered as trailing `LIMIT`/`OFFSET` clauses and inserts
/// never return generated keys; engines that differ override those parts.
#[derive(Debug, Clone, Default)]
pub struct GenericCompiler<D> {
    dialect: D,
}

impl<D: Dialect> GenericCompiler<D> {
    /// Creates a compiler for `dialect`.
    #[must_use]
    pub const fn new(dialect: D) -> Self {
        Self { dialect }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Renders a SELECT. With `with_limits` unset the plan's row range is
    /// ignored and the text starts with the bare `SELECT ` prefix.
    #[must_use]
    pub fn select(&self, plan: &SelectPlan, with_limits: bool) -> RenderedStatement {
        let mut sql = String::from("SELECT ");
        let mut params = vec![];

        if plan.distinct {
            sql.push_str("DISTINCT ");
        }

        sql.push_str(&plan.columns.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&plan.table);

        for join in &plan.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if let Some(ref filter) = plan.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter.sql());
            params.extend(filter.params().iter().cloned());
        }

        if !plan.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&plan.group_by.join(", "));
        }

        if !plan.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&plan.order_by.join(", "));
        }

        if with_limits {
            let limit = plan
                .high_mark
                .map(|high| high.saturating_sub(plan.low_mark))
                .or_else(|| {
                    (plan.low_mark > 0)
                        .then(|| self.dialect.no_limit_value())
                        .flatten()
                });
            if let Some(n) = limit {
                sql.push_str(&format!(" LIMIT {n}"));
            }
            if plan.low_mark > 0 {
                sql.push_str(&format!(" OFFSET {}", plan.low_mark));
            }
        }

        RenderedStatement::new(sql, params)
    }

    /// Wraps an already-rendered source SELECT in the plan's aggregates.
    #[must_use]
    pub fn aggregate(&self, plan: &AggregatePlan, inner: RenderedStatement) -> RenderedStatement {
        let outputs: Vec<String> = plan.aggregates.iter().map(|a| a.to_sql()).collect();
        RenderedStatement::new(
            format!("SELECT {} FROM ({}) subquery", outputs.join(", "), inner.sql),
            inner.params,
        )
    }

    /// Renders an INSERT of explicit fields: one multi-row statement when
    /// the dialect allows it and no field needs a custom placeholder, one
    /// statement per row otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the plan has no rows or fields, a row
    /// of the wrong length, a malformed placeholder, or asks for a returned
    /// id over several rows.
    pub fn insert(&self, plan: &InsertPlan) -> Result<Vec<RenderedStatement>, CompileError> {
        check_insert(plan)?;
        if plan.fields.is_empty() {
            return Err(CompileError::NoFields {
                table: plan.table.clone(),
            });
        }

        let columns: Vec<String> = plan
            .fields
            .iter()
            .map(|f| self.dialect.quote_identifier(&f.column))
            .collect();
        let head = format!(
            "INSERT INTO {} ({})",
            self.dialect.quote_identifier(&plan.table),
            columns.join(", ")
        );
        let placeholders: Vec<&str> = plan
            .fields
            .iter()
            .map(|f| {
                f.placeholder
                    .as_deref()
                    .unwrap_or_else(|| self.dialect.parameter_placeholder())
            })
            .collect();
        let rows = self.prepare_rows(&plan.rows);

        if !plan.has_custom_placeholders() && self.dialect.has_bulk_insert() {
            let tail = self
                .dialect
                .bulk_insert_sql(&placeholders.join(", "), rows.len());
            let params = rows.into_iter().flatten().collect();
            return Ok(vec![RenderedStatement::new(
                format!("{head} {tail}"),
                params,
            )]);
        }

        let values = format!("VALUES ({})", placeholders.join(", "));
        Ok(rows
            .into_iter()
            .map(|params| RenderedStatement::new(format!("{head} {values}"), params))
            .collect())
    }

    /// Renders an UPDATE.
    #[must_use]
    pub fn update(&self, plan: &UpdatePlan) -> RenderedStatement {
        let mut params = vec![];
        let assignments: Vec<String> = plan
            .assignments
            .iter()
            .map(|(column, value)| {
                params.push(self.dialect.prepare_value(value.clone()));
                format!(
                    "{} = {}",
                    self.dialect.quote_identifier(column),
                    self.dialect.parameter_placeholder()
                )
            })
            .collect();

        let mut sql = format!(
            "UPDATE {} SET {}",
            self.dialect.quote_identifier(&plan.table),
            assignments.join(", ")
        );
        if let Some(ref filter) = plan.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter.sql());
            params.extend(filter.params().iter().cloned());
        }
        RenderedStatement::new(sql, params)
    }

    /// Renders a DELETE.
    #[must_use]
    pub fn delete(&self, plan: &DeletePlan) -> RenderedStatement {
        let mut sql = format!("DELETE FROM {}", self.dialect.quote_identifier(&plan.table));
        let mut params = vec![];
        if let Some(ref filter) = plan.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter.sql());
            params.extend(filter.params().iter().cloned());
        }
        RenderedStatement::new(sql, params)
    }

    /// Runs every value through the dialect's value preparation.
    #[must_use]
    pub fn prepare_rows(&self, rows: &[Vec<SqlValue>]) -> Vec<Vec<SqlValue>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|v| self.dialect.prepare_value(v.clone()))
                    .collect()
            })
            .collect()
    }
}

impl<D: Dialect> SqlCompiler for GenericCompiler<D> {
    fn compile(&self, plan: &QueryPlan) -> Result<Rendered, CompileError> {
        match plan {
            QueryPlan::Select(select) => Ok(Rendered::Single(self.select(select, true))),
            QueryPlan::Aggregate(aggregate) => {
                let inner = self.select(&aggregate.source, true);
                Ok(Rendered::Single(self.aggregate(aggregate, inner)))
            }
            QueryPlan::Insert(insert) => self.insert(insert).map(Rendered::from_statements),
            QueryPlan::Update(update) => Ok(Rendered::Single(self.update(update))),
            QueryPlan::Delete(delete) => Ok(Rendered::Single(self.delete(delete))),
        }
    }
}

/// Validates the shape of an insert plan shared by every dialect.
///
/// # Errors
///
/// See [`GenericCompiler::insert`].
pub fn check_insert(plan: &InsertPlan) -> Result<(), CompileError> {
    if plan.rows.is_empty() {
        return Err(CompileError::NoRows {
            table: plan.table.clone(),
        });
    }
    if plan.return_id && plan.rows.len() != 1 {
        return Err(CompileError::ReturnIdForManyRows {
            rows: plan.rows.len(),
        });
    }
    for (row, values) in plan.rows.iter().enumerate() {
        if values.len() != plan.fields.len() {
            return Err(CompileError::RowArity {
                row,
                expected: plan.fields.len(),
                found: values.len(),
            });
        }
    }
    for field in &plan.fields {
        if let Some(ref placeholder) = field.placeholder {
            let found = count_placeholders(placeholder);
            if found != 1 {
                return Err(CompileError::PlaceholderArity {
                    column: field.column.clone(),
                    found,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::col;
    use crate::dialect::GenericDialect;
    use crate::plan::{Aggregate, InsertField, PrimaryKey};

    fn compiler() -> GenericCompiler<GenericDialect> {
        GenericCompiler::new(GenericDialect::new())
    }

    #[test]
    fn test_select_without_limits() {
        let plan = SelectPlan::new("users", &["id", "name"])
            .filter(col("active").eq(true))
            .order_by(&["name"])
            .slice(5, Some(10));
        let stmt = compiler().select(&plan, false);
        assert_eq!(
            stmt.sql,
            "SELECT id, name FROM users WHERE active = ? ORDER BY name"
        );
        assert_eq!(stmt.params, vec![SqlValue::Bool(true)]);
    }

    #[test]
    fn test_select_with_limit_offset() {
        let plan = SelectPlan::new("users", &["id"]).slice(20, Some(30));
        let stmt = compiler().select(&plan, true);
        assert_eq!(stmt.sql, "SELECT id FROM users LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_select_offset_only() {
        let plan = SelectPlan::new("users", &["id"]).slice(20, None);
        let stmt = compiler().select(&plan, true);
        assert_eq!(stmt.sql, "SELECT id FROM users OFFSET 20");
    }

    #[test]
    fn test_aggregate_wraps_source() {
        let plan = AggregatePlan::new(
            SelectPlan::new("orders", &["id"]).filter(col("status").eq("open")),
            vec![Aggregate::count_all("n")],
        );
        let rendered = compiler().compile(&QueryPlan::Aggregate(plan)).unwrap();
        let stmt = &rendered.statements()[0];
        assert_eq!(
            stmt.sql,
            "SELECT COUNT(*) AS n FROM (SELECT id FROM orders WHERE status = ?) subquery"
        );
        assert_eq!(stmt.params.len(), 1);
    }

    #[test]
    fn test_insert_bulk() {
        let plan = InsertPlan::new(
            "users",
            PrimaryKey::manual("id"),
            vec![InsertField::new("id"), InsertField::new("name")],
        )
        .row(vec![SqlValue::Int(1), SqlValue::Text(String::from("a"))])
        .row(vec![SqlValue::Int(2), SqlValue::Text(String::from("b"))]);
        let stmts = compiler().insert(&plan).unwrap();
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].sql,
            "INSERT INTO \"users\" (\"id\", \"name\") VALUES (?, ?), (?, ?)"
        );
        assert_eq!(stmts[0].params.len(), 4);
        assert_eq!(stmts[0].placeholder_count(), 4);
    }

    #[test]
    fn test_insert_custom_placeholder_is_per_row() {
        let plan = InsertPlan::new(
            "docs",
            PrimaryKey::manual("id"),
            vec![InsertField::with_placeholder("body", "UPPER(?)")],
        )
        .row(vec![SqlValue::Text(String::from("a"))])
        .row(vec![SqlValue::Text(String::from("b"))]);
        let stmts = compiler().insert(&plan).unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[1].sql, "INSERT INTO \"docs\" (\"body\") VALUES (UPPER(?))");
        assert_eq!(stmts[1].params, vec![SqlValue::Text(String::from("b"))]);
    }

    #[test]
    fn test_insert_rejects_bad_placeholder() {
        let plan = InsertPlan::new(
            "docs",
            PrimaryKey::manual("id"),
            vec![InsertField::with_placeholder("body", "COALESCE(?, ?)")],
        )
        .row(vec![SqlValue::Null]);
        assert!(matches!(
            compiler().insert(&plan),
            Err(CompileError::PlaceholderArity { found: 2, .. })
        ));
    }

    #[test]
    fn test_insert_rejects_ragged_rows() {
        let plan = InsertPlan::new("t", PrimaryKey::manual("id"), vec![InsertField::new("a")])
            .row(vec![SqlValue::Int(1), SqlValue::Int(2)]);
        assert_eq!(
            compiler().insert(&plan),
            Err(CompileError::RowArity {
                row: 0,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_update_and_delete() {
        let update = UpdatePlan::new("users")
            .set("name", SqlValue::Text(String::from("x")))
            .filter(col("id").eq(1));
        let stmt = compiler().update(&update);
        assert_eq!(stmt.sql, "UPDATE \"users\" SET \"name\" = ? WHERE id = ?");
        assert_eq!(stmt.params.len(), 2);

        let delete = DeletePlan::new("users").filter(col("id").eq(1));
        let stmt = compiler().delete(&delete);
        assert_eq!(stmt.sql, "DELETE FROM \"users\" WHERE id = ?");
        assert_eq!(stmt.params, vec![SqlValue::Int(1)]);
    }
}
