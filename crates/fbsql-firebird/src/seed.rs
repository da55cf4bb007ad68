//! Form layout seeding.
//!
//! Applications built on this backend keep per-column form settings in
//! `FRAMEWORK_FORM_GROUP_FIELDS`. [`FormGroupSeeder`] registers a table's
//! columns there with default settings. It only writes when asked to;
//! describing a table never seeds it.

use fbsql_core::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::introspection::catalog;
use crate::introspection::table_param;

/// Registers table columns in the form layout table.
#[derive(Debug)]
pub struct FormGroupSeeder<C> {
    conn: C,
}

impl<C: Connection> FormGroupSeeder<C> {
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

    /// Registers every column of `table` that is not registered yet. Running
    /// it twice leaves the layout table unchanged the second time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the insert fails, for example when the
    /// layout table does not exist.
    pub fn seed(&mut self, table: &str) -> Result<()> {
        let sql = catalog::SEED_FORM_GROUP_FIELDS;
        debug!(sql = %sql, "Executing SQL");
        self.conn
            .execute(sql, &[table_param(table)])
            .map_err(Error::database)?;
        info!(table = %table, "Seeded form group fields");
        Ok(())
    }
}
