//! # fbsql-firebird
//!
//! Firebird dialect for `fbsql-core`.
//!
//! # How Firebird differs from other dialects
//!
//! - **Row limiting**: no `LIMIT`/`OFFSET`. Firebird writes
//!   `SELECT FIRST n SKIP m ...` right after the `SELECT` keyword, where `n`
//!   is a row count, and a `SKIP` needs a `FIRST` next to it. See
//!   [`FirebirdCompiler::select`].
//! - **Generated keys**: each table with an auto key has a sequence named
//!   `<TABLE>_SEQ` (a generator on 1.x servers). `INSERT ... RETURNING` is
//!   available from 2.1; older servers read the key back from the sequence.
//!   See [`keys`] and [`InsertExecutor`].
//! - **No multi-row `VALUES`**: rows are inserted one statement each unless
//!   the `UNION ALL` form is enabled in [`FirebirdOptions`].
//! - **Booleans**: no native `BOOLEAN` before 3.0, so booleans bind as 0/1.
//! - **Catalog**: schema facts live in the `RDB$` system tables with
//!   blank-padded upper-case names. See [`FirebirdIntrospector`].
//!
//! ## Example
//!
//! ```rust
//! use fbsql_core::plan::{QueryPlan, SelectPlan};
//! use fbsql_core::SqlCompiler;
//! use fbsql_firebird::{FirebirdCompiler, FirebirdOptions};
//!
//! let compiler = FirebirdCompiler::from_options(&FirebirdOptions::default());
//! let plan = SelectPlan::new("users", &["id", "name"]).slice(10, Some(25));
//!
//! let rendered = compiler.compile(&QueryPlan::Select(plan)).unwrap();
//! assert_eq!(
//!     rendered.statements()[0].sql,
//!     "SELECT FIRST 15 SKIP 10 id, name FROM users"
//! );
//! ```

pub mod compiler;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod introspection;
pub mod keys;
pub mod options;
pub mod seed;

pub use compiler::FirebirdCompiler;
pub use dialect::{FirebirdDialect, MAX_ROWS};
pub use error::{Error, Result};
pub use executor::InsertExecutor;
pub use introspection::FirebirdIntrospector;
pub use keys::{Sequence, SequenceRead};
pub use options::{FirebirdOptions, KeyGeneration};
pub use seed::FormGroupSeeder;
