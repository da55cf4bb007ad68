//! Values and resolved conditions carried by query plans.
//!
//! # Example
//!
//! ```rust
//! use fbsql_core::builder::{col, SqlValue};
//!
//! let cond = col("active").eq(true).and(col("age").gt(18));
//! assert_eq!(cond.sql(), "active = ? AND age > ?");
//! assert_eq!(cond.params(), &[SqlValue::Bool(true), SqlValue::Int(18)]);
//! ```

mod expr;
pub mod value;

pub use expr::{col, ColumnRef, Condition};
pub use value::{SqlValue, ToSqlValue};
