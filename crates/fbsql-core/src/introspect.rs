//! Schema introspection types.
//!
//! Driver crates implement [`Introspect`] against their engine's catalog.
//! The descriptors are plain snapshots: they hold no handle back to the
//! database and are rebuilt on every call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Engine-agnostic kind of a column, as a schema tool would model it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// 16-bit integer.
    SmallInteger,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInteger,
    /// Floating point.
    Float,
    /// Fixed-point numeric.
    Decimal,
    /// Fixed or variable length character data.
    Char,
    /// Unbounded text.
    Text,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    DateTime,
    /// Boolean flag.
    Boolean,
    /// IP address.
    IpAddress,
    /// A type code with no known mapping.
    Unknown(i32),
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Engine type code after remapping.
    pub type_code: i32,
    /// Engine-agnostic kind derived from `type_code`.
    pub kind: FieldKind,
    /// Declared length in bytes.
    pub length: Option<i32>,
    /// Numeric precision.
    pub precision: Option<i32>,
    /// Numeric scale, as a non-negative digit count.
    pub scale: Option<i32>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Primary label from the column description.
    pub label: Option<String>,
    /// Secondary annotation from the column description.
    pub annotation: Option<String>,
}

impl ColumnDescriptor {
    /// Returns the declared length, or 0 when the catalog has none.
    #[must_use]
    pub fn internal_size(&self) -> i32 {
        self.length.unwrap_or(0)
    }
}

/// Key/uniqueness facts for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Backed by a primary-key constraint.
    pub primary_key: bool,
    /// Backed by a plain unique index.
    pub unique: bool,
}

/// The target of one foreign-key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    /// Zero-based position of the referenced column.
    pub foreign_column: usize,
    /// Referenced table.
    pub foreign_table: String,
}

/// Foreign keys keyed by zero-based local column position.
pub type Relations = BTreeMap<usize, RelationDescriptor>;

/// Uniqueness facts keyed by column name.
pub type Indexes = BTreeMap<String, IndexDescriptor>;

/// Reads schema metadata from a live database.
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Lists user tables so that a table never precedes one it references.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    fn table_list(&mut self) -> Result<Vec<String>, Self::Error>;

    /// Describes the columns of `table`, in column order.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    fn table_description(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, Self::Error>;

    /// Returns the foreign keys of `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    fn relations(&mut self, table: &str) -> Result<Relations, Self::Error>;

    /// Returns the primary-key and unique columns of `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read.
    fn indexes(&mut self, table: &str) -> Result<Indexes, Self::Error>;
}
