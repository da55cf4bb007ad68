//! Insert execution.
//!
//! Renders an insert, issues its statements in order and, when asked,
//! recovers the generated key the way the server version allows: from the
//! `RETURNING` row, from a key fetched up front, or by reading the table's
//! sequence afterwards. A key the caller bound explicitly is returned as is.

use fbsql_core::compiler::check_insert;
use fbsql_core::plan::{InsertField, InsertPlan};
use fbsql_core::{CompileError, Connection, Dialect, RenderedStatement, Row, SqlValue};
use tracing::{debug, info};

use crate::compiler::FirebirdCompiler;
use crate::error::{Error, Result};
use crate::keys;
use crate::options::KeyGeneration;

/// Executes inserts against a connection.
#[derive(Debug, Clone, Copy)]
pub struct InsertExecutor<'a> {
    compiler: &'a FirebirdCompiler,
}

impl<'a> InsertExecutor<'a> {
    /// Creates an executor rendering through `compiler`.
    #[must_use]
    pub const fn new(compiler: &'a FirebirdCompiler) -> Self {
        Self { compiler }
    }

    /// Inserts the plan's rows and, if `return_id` is set, returns the key
    /// of the single inserted row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compile`] if `return_id` is set for more than one
    /// row (before anything is executed), [`Error::Database`] if any
    /// statement fails, and [`Error::UnexpectedResult`] if no key can be
    /// read back.
    pub fn execute_insert<C: Connection>(
        &self,
        conn: &mut C,
        plan: &InsertPlan,
        return_id: bool,
    ) -> Result<Option<i64>> {
        let plan = plan.clone().returning_id(return_id);
        check_insert(&plan)?;

        if self.preassigns_keys(&plan) {
            let first = self.insert_with_preassigned_keys(conn, &plan)?;
            return Ok(return_id.then_some(first));
        }

        let (statements, last_rows) = self.run(conn, &plan)?;
        if !return_id {
            return Ok(None);
        }
        // A key bound by the caller is the one inserted, whatever the sequence says.
        if !plan.primary_key.auto || key_position(&plan).is_some() {
            return supplied_key(&plan).map(Some);
        }
        if self.compiler.dialect().can_return_id_from_insert() {
            return keys::required_i64(&last_rows, &statements[0].sql).map(Some);
        }
        keys::last_insert_id(conn, &plan.table).map(Some)
    }

    /// Renders `plan` and issues its statements in order, returning them
    /// with the rows produced by the last one.
    fn run<C: Connection>(
        &self,
        conn: &mut C,
        plan: &InsertPlan,
    ) -> Result<(Vec<RenderedStatement>, Vec<Row>)> {
        let statements = self.compiler.compile_insert(plan)?;
        let mut last_rows: Vec<Row> = vec![];
        for statement in &statements {
            debug!(sql = %statement.sql, params = statement.params.len(), "Executing SQL");
            last_rows = conn.execute_rendered(statement).map_err(Error::database)?;
        }
        info!(
            table = %plan.table,
            rows = plan.rows.len(),
            statements = statements.len(),
            "Inserted rows"
        );
        Ok((statements, last_rows))
    }

    /// Inserts row by row, fetching each key right before its INSERT so the
    /// `MAX + 1` fallback sees the previous row. Returns the first key.
    fn insert_with_preassigned_keys<C: Connection>(
        &self,
        conn: &mut C,
        plan: &InsertPlan,
    ) -> Result<i64> {
        let dialect = self.compiler.dialect();
        let mut fields = plan.fields.clone();
        fields.insert(0, InsertField::new(&plan.primary_key.column));

        let mut first = None;
        for values in &plan.rows {
            let id = keys::next_primary_key(conn, dialect, &plan.table, &plan.primary_key.column)?;
            let mut keyed = Vec::with_capacity(values.len() + 1);
            keyed.push(SqlValue::Int(id));
            keyed.extend(values.iter().cloned());
            let row_plan =
                InsertPlan::new(&plan.table, plan.primary_key.clone(), fields.clone()).row(keyed);
            self.run(conn, &row_plan)?;
            first.get_or_insert(id);
        }
        first.ok_or_else(|| {
            Error::Compile(CompileError::NoRows {
                table: plan.table.clone(),
            })
        })
    }

    fn preassigns_keys(&self, plan: &InsertPlan) -> bool {
        let dialect = self.compiler.dialect();
        plan.primary_key.auto
            && !dialect.can_return_id_from_insert()
            && dialect.key_generation() == KeyGeneration::Preassign
            && key_position(plan).is_none()
    }
}

fn key_position(plan: &InsertPlan) -> Option<usize> {
    plan.fields
        .iter()
        .position(|f| f.column.eq_ignore_ascii_case(&plan.primary_key.column))
}

/// The caller-supplied key of the first row.
fn supplied_key(plan: &InsertPlan) -> Result<i64> {
    let value = key_position(plan)
        .and_then(|i| plan.rows.first().and_then(|row| row.get(i)))
        .ok_or_else(|| {
            Error::UnexpectedResult(format!("no primary key value supplied for '{}'", plan.table))
        })?;
    value.as_i64().ok_or_else(|| {
        Error::UnexpectedResult(format!(
            "primary key of '{}' is not an integer: {value:?}",
            plan.table
        ))
    })
}
