//! Firebird dialect implementation.

use fbsql_core::{Dialect, SqlValue};

use crate::options::{FirebirdOptions, KeyGeneration};

/// Largest row count Firebird accepts in `FIRST`, used when only `SKIP`
/// is wanted.
pub const MAX_ROWS: u64 = 2_147_483_647;

/// Firebird dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebirdDialect {
    version: (u8, u8),
    no_limit_value: u64,
    has_bulk_insert: bool,
    can_return_id_from_insert: bool,
    key_generation: KeyGeneration,
}

impl FirebirdDialect {
    /// Creates a dialect for the default server version.
    #[must_use]
    pub fn new() -> Self {
        Self::from_options(&FirebirdOptions::default())
    }

    /// Derives capability flags from `options`.
    #[must_use]
    pub fn from_options(options: &FirebirdOptions) -> Self {
        let version = options.server_version;
        Self {
            version,
            no_limit_value: options.no_limit_value.unwrap_or(MAX_ROWS),
            // Firebird has no multi-row VALUES; the UNION ALL form is opt-in.
            has_bulk_insert: options.has_bulk_insert.unwrap_or(false),
            can_return_id_from_insert: options
                .can_return_id_from_insert
                .unwrap_or(version >= (2, 1)),
            key_generation: options.key_generation,
        }
    }

    /// Returns the server version as `(major, minor)`.
    #[must_use]
    pub const fn version(&self) -> (u8, u8) {
        self.version
    }

    /// Returns the key generation strategy.
    #[must_use]
    pub const fn key_generation(&self) -> KeyGeneration {
        self.key_generation
    }

    /// Returns whether `NEXT VALUE FOR` is available (2.0+); older servers
    /// only know `GEN_ID`.
    #[must_use]
    pub const fn has_next_value_for(&self) -> bool {
        self.version.0 >= 2
    }

    /// Returns whether the server has a native BOOLEAN type (3.0+).
    #[must_use]
    pub const fn has_native_boolean(&self) -> bool {
        self.version.0 >= 3
    }
}

impl Default for FirebirdDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "firebird"
    }

    /// Firebird folds unquoted identifiers to upper case, so quoted names
    /// are upper-cased to keep matching the catalog.
    fn quote_identifier(&self, name: &str) -> String {
        if name.starts_with('"') && name.ends_with('"') && name.len() > 1 {
            return String::from(name);
        }
        format!("\"{}\"", name.to_uppercase())
    }

    fn has_bulk_insert(&self) -> bool {
        self.has_bulk_insert
    }

    fn can_return_id_from_insert(&self) -> bool {
        self.can_return_id_from_insert
    }

    fn no_limit_value(&self) -> Option<u64> {
        Some(self.no_limit_value)
    }

    fn pk_default_value(&self) -> &'static str {
        "NULL"
    }

    fn bulk_insert_sql(&self, row: &str, rows: usize) -> String {
        vec![format!("SELECT {row} FROM RDB$DATABASE"); rows].join(" UNION ALL ")
    }

    fn prepare_value(&self, value: SqlValue) -> SqlValue {
        match value {
            SqlValue::Bool(b) if !self.has_native_boolean() => SqlValue::Int(i64::from(b)),
            other => other,
        }
    }
}
