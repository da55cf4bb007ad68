//! SQL dialect capabilities.
//!
//! Engines differ in pagination syntax, bulk insert support and how a
//! generated key can be read back. Compilers consult a [`Dialect`] for
//! those decisions instead of hard-coding one engine.

mod generic;

pub use generic::GenericDialect;

use crate::builder::SqlValue;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        SqlValue::placeholder()
    }

    /// Quotes an identifier, leaving already-quoted names alone.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        if name.starts_with(quote) && name.ends_with(quote) && name.len() > 1 {
            return String::from(name);
        }
        format!("{quote}{name}{quote}")
    }

    /// Returns whether several rows can be inserted by one statement.
    fn has_bulk_insert(&self) -> bool {
        true
    }

    /// Returns whether an INSERT can hand back the generated key itself.
    fn can_return_id_from_insert(&self) -> bool {
        false
    }

    /// Returns the row count meaning "no limit", for engines that need an
    /// explicit row limit whenever an offset is given.
    fn no_limit_value(&self) -> Option<u64> {
        None
    }

    /// Returns the inline value used for the key column of an
    /// identity-only insert.
    fn pk_default_value(&self) -> &'static str {
        "DEFAULT"
    }

    /// Renders the tail of a multi-row INSERT, given one row's rendered
    /// value list (e.g. `"?, ?"`) and the number of rows.
    fn bulk_insert_sql(&self, row: &str, rows: usize) -> String {
        let tuples = vec![format!("({row})"); rows];
        format!("VALUES {}", tuples.join(", "))
    }

    /// Returns the fragment that makes an INSERT return `column`, plus the
    /// parameters that fragment binds.
    fn return_insert_id(&self, column: &str) -> (String, Vec<SqlValue>) {
        (format!("RETURNING {column}"), vec![])
    }

    /// Converts an application value into the form the engine stores.
    fn prepare_value(&self, value: SqlValue) -> SqlValue {
        value
    }
}
