//! Transport seam.
//!
//! Statement execution belongs to the driver layer. Everything here that
//! talks to a database does so through [`Connection`], synchronously and on
//! the caller's thread.

use crate::builder::SqlValue;
use crate::compiler::RenderedStatement;

/// One result row, in select-list order.
pub type Row = Vec<SqlValue>;

/// A database connection able to run one statement with positional
/// parameters and hand back the rows it produced.
pub trait Connection {
    /// Error type reported by the driver.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes `sql` with `params` bound to its `?` markers and returns
    /// every row produced (empty for statements that return none).
    ///
    /// # Errors
    ///
    /// Returns the driver's error unchanged.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, Self::Error>;

    /// Executes a rendered statement.
    ///
    /// # Errors
    ///
    /// Returns the driver's error unchanged.
    fn execute_rendered(&mut self, statement: &RenderedStatement) -> Result<Vec<Row>, Self::Error> {
        self.execute(&statement.sql, &statement.params)
    }
}

impl<C: Connection + ?Sized> Connection for &mut C {
    type Error = C::Error;

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, Self::Error> {
        (**self).execute(sql, params)
    }
}
