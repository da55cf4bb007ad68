//! Compile error types.

use thiserror::Error;

/// Contract violations detected while rendering a plan.
///
/// These are programming errors in the caller's plan, not database errors,
/// and are raised before any SQL reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A generated id was requested for an insert of several rows.
    #[error("cannot return a generated id for an insert of {rows} rows")]
    ReturnIdForManyRows {
        /// Number of rows in the insert.
        rows: usize,
    },

    /// The insert carries no rows.
    #[error("insert into '{table}' has no rows")]
    NoRows {
        /// Target table.
        table: String,
    },

    /// The insert names no fields and the table has no generated key to
    /// fall back on.
    #[error("insert into '{table}' has no fields")]
    NoFields {
        /// Target table.
        table: String,
    },

    /// A row's value count does not match the field count.
    #[error("row {row} has {found} values, expected {expected}")]
    RowArity {
        /// Zero-based row index.
        row: usize,
        /// Number of fields.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// A custom placeholder expression does not bind exactly one value.
    #[error("placeholder for column '{column}' binds {found} values, expected 1")]
    PlaceholderArity {
        /// Column carrying the placeholder.
        column: String,
        /// Number of `?` markers found.
        found: usize,
    },
}
