//! Schema introspection for Firebird.
//!
//! Reads the `RDB$` system tables through a [`Connection`] and turns the raw
//! rows into engine-agnostic descriptors. The catalog stores names as
//! blank-padded `CHAR`, so every name is trimmed; table names are also
//! lower-cased to undo the server's upper-case folding.

pub mod catalog;
pub mod types;

use fbsql_core::{
    ColumnDescriptor, Connection, IndexDescriptor, Indexes, Introspect, RelationDescriptor,
    Relations, Row, SqlValue,
};
use tracing::debug;

use crate::error::{Error, Result};

pub use types::{field_kind, remap_type_code, split_description};

/// Introspects a Firebird database over a connection.
#[derive(Debug)]
pub struct FirebirdIntrospector<C> {
    conn: C,
}

impl<C: Connection> FirebirdIntrospector<C> {
    /// Wraps `conn`.
    #[must_use]
    pub const fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Returns the wrapped connection.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.conn
    }

    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        debug!(sql = %sql, params = params.len(), "Executing SQL");
        self.conn.execute(sql, params).map_err(Error::database)
    }
}

impl<C: Connection> Introspect for FirebirdIntrospector<C> {
    type Error = Error;

    fn table_list(&mut self) -> Result<Vec<String>> {
        let rows = self.query(catalog::TABLE_LIST, &[])?;
        rows.iter()
            .map(|row| Ok(text(row, 0, "table name")?.trim().to_lowercase()))
            .collect()
    }

    fn table_description(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = self.query(catalog::COLUMN_DESCRIPTION, &[table_param(table)])?;
        let columns = rows.iter().map(column).collect::<Result<Vec<_>>>()?;
        debug!(table = %table, columns = columns.len(), "Described table");
        Ok(columns)
    }

    fn relations(&mut self, table: &str) -> Result<Relations> {
        let rows = self.query(catalog::RELATIONS, &[table_param(table)])?;
        let mut relations = Relations::new();
        for row in &rows {
            let local = position(row, 0)?;
            let relation = RelationDescriptor {
                foreign_column: position(row, 1)?,
                foreign_table: text(row, 2, "foreign table")?.trim().to_lowercase(),
            };
            relations.insert(local, relation);
        }
        Ok(relations)
    }

    fn indexes(&mut self, table: &str) -> Result<Indexes> {
        let rows = self.query(catalog::INDEXES, &[table_param(table)])?;
        let mut indexes = Indexes::new();
        for row in &rows {
            let column = text(row, 0, "index column")?.trim().to_owned();
            let kind = text(row, 1, "index kind")?.trim();
            let entry = indexes.entry(column).or_insert(IndexDescriptor {
                primary_key: false,
                unique: false,
            });
            // A column in both a primary key and a unique index reports the key.
            if kind == catalog::PRIMARY_KEY {
                entry.primary_key = true;
                entry.unique = false;
            } else if !entry.primary_key {
                entry.unique = kind == catalog::UNIQUE;
            }
        }
        Ok(indexes)
    }
}

/// Catalog names are stored upper-case; fold before binding.
pub(crate) fn table_param(table: &str) -> SqlValue {
    SqlValue::Text(table.trim().to_uppercase())
}

fn column(row: &Row) -> Result<ColumnDescriptor> {
    let name = text(row, 0, "column name")?.trim().to_owned();
    let source = text(row, 1, "field source")?;
    let field_type = int(row, 2)?.ok_or_else(|| missing("field type"))?;
    let sub_type = int(row, 3)?;
    let type_code = remap_type_code(source, field_type, sub_type);
    let (label, annotation) = split_description(optional_text(row, 8)?);
    Ok(ColumnDescriptor {
        name,
        type_code,
        kind: field_kind(type_code),
        length: int(row, 4)?,
        precision: int(row, 5)?,
        scale: int(row, 6)?,
        nullable: int(row, 7)? != Some(1),
        label,
        annotation,
    })
}

fn cell<'r>(row: &'r Row, index: usize) -> Result<&'r SqlValue> {
    row.get(index).ok_or_else(|| {
        Error::UnexpectedResult(format!(
            "catalog row has {} columns, expected at least {}",
            row.len(),
            index + 1
        ))
    })
}

fn missing(what: &str) -> Error {
    Error::UnexpectedResult(format!("catalog row has no {what}"))
}

fn optional_text(row: &Row, index: usize) -> Result<Option<&str>> {
    match cell(row, index)? {
        SqlValue::Null => Ok(None),
        SqlValue::Text(s) => Ok(Some(s)),
        other => Err(Error::UnexpectedResult(format!(
            "expected text in catalog column {index}, got {other:?}"
        ))),
    }
}

fn text<'r>(row: &'r Row, index: usize, what: &str) -> Result<&'r str> {
    optional_text(row, index)?.ok_or_else(|| missing(what))
}

fn int(row: &Row, index: usize) -> Result<Option<i32>> {
    match cell(row, index)? {
        SqlValue::Null => Ok(None),
        value => value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                Error::UnexpectedResult(format!(
                    "expected an integer in catalog column {index}, got {value:?}"
                ))
            }),
    }
}

fn position(row: &Row, index: usize) -> Result<usize> {
    int(row, index)?
        .and_then(|p| usize::try_from(p).ok())
        .ok_or_else(|| missing("field position"))
}
