//! # fbsql-core
//!
//! Engine-agnostic building blocks for dialect adaptation layers.
//!
//! This crate provides:
//! - [`QueryPlan`]s: finished, immutable descriptions of one statement
//! - The [`Dialect`] capability trait and a [`GenericCompiler`] that renders
//!   plans using only those capabilities
//! - The synchronous [`Connection`] seam used by anything that executes SQL
//! - Schema descriptors and the [`Introspect`] trait for catalog readers
//!
//! ## Compiling a plan
//!
//! ```rust
//! use fbsql_core::builder::col;
//! use fbsql_core::compiler::{GenericCompiler, SqlCompiler};
//! use fbsql_core::dialect::GenericDialect;
//! use fbsql_core::plan::{QueryPlan, SelectPlan};
//!
//! let plan = SelectPlan::new("users", &["id", "name"])
//!     .filter(col("active").eq(true))
//!     .slice(0, Some(10));
//!
//! let compiler = GenericCompiler::new(GenericDialect::new());
//! let rendered = compiler.compile(&QueryPlan::Select(plan)).unwrap();
//! let stmt = &rendered.statements()[0];
//!
//! assert_eq!(stmt.sql, "SELECT id, name FROM users WHERE active = ? LIMIT 10");
//! assert_eq!(stmt.params.len(), stmt.placeholder_count());
//! ```

pub mod builder;
pub mod compiler;
pub mod connection;
pub mod dialect;
pub mod introspect;
pub mod plan;

pub use builder::{col, Condition, SqlValue, ToSqlValue};
pub use compiler::{CompileError, GenericCompiler, Rendered, RenderedStatement, SqlCompiler};
pub use connection::{Connection, Row};
pub use dialect::{Dialect, GenericDialect};
pub use introspect::{
    ColumnDescriptor, FieldKind, IndexDescriptor, Indexes, Introspect, RelationDescriptor,
    Relations,
};
pub use plan::QueryPlan;
