//! Generated primary keys.
//!
//! Every table with a generated key is paired with a sequence (a
//! "generator" on older servers) named `<TABLE>_SEQ`.
//!
//! # Known limitation
//!
//! [`next_primary_key`] falls back to `MAX(pk) + 1` when the sequence cannot
//! be read. That read-then-scan is not atomic: two connections taking the
//! fallback path for the same table at the same time can compute the same
//! key, and the second INSERT then fails on the key constraint. Only a
//! working sequence avoids this; it is not papered over with in-process
//! locking because other processes may share the database.

use fbsql_core::{Connection, Dialect, Row, SqlValue};
use tracing::{debug, warn};

use crate::dialect::FirebirdDialect;
use crate::error::{Error, Result};

/// The sequence backing a table's generated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
}

impl Sequence {
    /// Returns the sequence for `table`.
    #[must_use]
    pub fn for_table(table: &str) -> Self {
        Self {
            name: format!("{}_SEQ", table.to_uppercase()),
        }
    }

    /// Returns the sequence name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SQL reading the next value, incrementing the sequence.
    #[must_use]
    pub fn next_value_sql(&self, dialect: &FirebirdDialect) -> String {
        if dialect.has_next_value_for() {
            format!("SELECT NEXT VALUE FOR {} FROM rdb$database", self.name)
        } else {
            format!("SELECT GEN_ID({}, 1) FROM rdb$database", self.name)
        }
    }

    /// SQL reading the current value without incrementing.
    #[must_use]
    pub fn current_value_sql(&self) -> String {
        format!("SELECT GEN_ID({}, 0) FROM rdb$database", self.name)
    }
}

/// Outcome of reading a table's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRead {
    /// The sequence produced this value.
    Value(i64),
    /// The sequence is missing or unusable; the caller must fall back.
    FallbackRequired,
}

/// Reads the next value of `table`'s sequence.
///
/// A failing sequence query is an expected outcome, reported as
/// [`SequenceRead::FallbackRequired`] rather than an error.
///
/// # Errors
///
/// Returns [`Error::UnexpectedResult`] if the query succeeds but yields no
/// integer.
pub fn read_next_value<C: Connection>(
    conn: &mut C,
    dialect: &FirebirdDialect,
    table: &str,
) -> Result<SequenceRead> {
    let sequence = Sequence::for_table(table);
    let sql = sequence.next_value_sql(dialect);
    debug!(sql = %sql, "Executing SQL");
    match conn.execute(&sql, &[]) {
        Ok(rows) => Ok(SequenceRead::Value(required_i64(&rows, &sql)?)),
        Err(err) => {
            warn!(
                table = %table,
                sequence = %sequence.name(),
                error = %err,
                "Sequence unavailable, falling back to MAX + 1"
            );
            Ok(SequenceRead::FallbackRequired)
        }
    }
}

/// Returns the next key for `table`: the sequence's next value, or
/// `MAX(pk_column) + 1` (1 for an empty table) when the sequence cannot be
/// read. See the module docs for the concurrency caveat.
///
/// # Errors
///
/// Returns [`Error::Database`] if the fallback scan fails.
pub fn next_primary_key<C: Connection>(
    conn: &mut C,
    dialect: &FirebirdDialect,
    table: &str,
    pk_column: &str,
) -> Result<i64> {
    match read_next_value(conn, dialect, table)? {
        SequenceRead::Value(id) => Ok(id),
        SequenceRead::FallbackRequired => {
            let sql = format!(
                "SELECT MAX({}) FROM {}",
                dialect.quote_identifier(pk_column),
                dialect.quote_identifier(table)
            );
            debug!(sql = %sql, "Executing SQL");
            let rows = conn.execute(&sql, &[]).map_err(Error::database)?;
            Ok(optional_i64(&rows, &sql)?.unwrap_or(0) + 1)
        }
    }
}

/// Returns the key most recently generated for `table`, read from its
/// sequence without incrementing it.
///
/// # Errors
///
/// Returns [`Error::Database`] if the query fails.
pub fn last_insert_id<C: Connection>(conn: &mut C, table: &str) -> Result<i64> {
    let sql = Sequence::for_table(table).current_value_sql();
    debug!(sql = %sql, "Executing SQL");
    let rows = conn.execute(&sql, &[]).map_err(Error::database)?;
    required_i64(&rows, &sql)
}

/// Reads the first column of the first row as an integer, NULL as `None`.
pub(crate) fn optional_i64(rows: &[Row], sql: &str) -> Result<Option<i64>> {
    match rows.first().and_then(|row| row.first()) {
        None | Some(SqlValue::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            Error::UnexpectedResult(format!("expected an integer from `{sql}`, got {value:?}"))
        }),
    }
}

/// Reads the first column of the first row as a non-NULL integer.
pub(crate) fn required_i64(rows: &[Row], sql: &str) -> Result<i64> {
    optional_i64(rows, sql)?
        .ok_or_else(|| Error::UnexpectedResult(format!("no value returned by `{sql}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FirebirdOptions;

    #[test]
    fn test_sequence_name() {
        assert_eq!(Sequence::for_table("blog_post").name(), "BLOG_POST_SEQ");
    }

    #[test]
    fn test_next_value_sql_by_version() {
        let sequence = Sequence::for_table("users");
        assert_eq!(
            sequence.next_value_sql(&FirebirdDialect::new()),
            "SELECT NEXT VALUE FOR USERS_SEQ FROM rdb$database"
        );
        let legacy = FirebirdDialect::from_options(&FirebirdOptions::for_version(1, 5));
        assert_eq!(
            sequence.next_value_sql(&legacy),
            "SELECT GEN_ID(USERS_SEQ, 1) FROM rdb$database"
        );
    }

    #[test]
    fn test_current_value_sql() {
        assert_eq!(
            Sequence::for_table("users").current_value_sql(),
            "SELECT GEN_ID(USERS_SEQ, 0) FROM rdb$database"
        );
    }

    #[test]
    fn test_scalar_readers() {
        let rows = vec![vec![SqlValue::Int(41)]];
        assert_eq!(optional_i64(&rows, "q").unwrap(), Some(41));
        assert_eq!(optional_i64(&[vec![SqlValue::Null]], "q").unwrap(), None);
        assert_eq!(optional_i64(&[], "q").unwrap(), None);
        assert!(required_i64(&[], "q").is_err());
        assert!(matches!(
            optional_i64(&[vec![SqlValue::Text(String::from("x"))]], "q"),
            Err(Error::UnexpectedResult(_))
        ));
    }
}
