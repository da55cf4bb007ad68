//! Statement compilation.
//!
//! A [`SqlCompiler`] turns a [`QueryPlan`] into SQL text plus an ordered
//! parameter list. [`GenericCompiler`] provides the shared, dialect-driven
//! rendering; engine compilers hold one and delegate to it for everything
//! they do not rewrite.

mod error;
mod generic;

pub use error::CompileError;
pub use generic::{check_insert, GenericCompiler};

use crate::builder::SqlValue;
use crate::plan::QueryPlan;

/// One physical statement: SQL text and its positional parameters.
///
/// The parameter list always has one entry per `?` marker, in
/// left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    /// SQL text.
    pub sql: String,
    /// Positional parameters.
    pub params: Vec<SqlValue>,
}

impl RenderedStatement {
    /// Creates a rendered statement.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns the number of `?` markers in the SQL text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql)
    }

    /// Appends a trailing clause and the values bound by its markers.
    ///
    /// The clause's parameters follow the existing ones, matching marker
    /// order when the clause comes last in the statement.
    #[must_use]
    pub fn append(mut self, clause: &str, params: Vec<SqlValue>) -> Self {
        if !clause.is_empty() {
            self.sql.push(' ');
            self.sql.push_str(clause);
        }
        self.params.extend(params);
        self
    }
}

/// The output of compiling one plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// A single statement.
    Single(RenderedStatement),
    /// Several statements, to be issued in order.
    Batch(Vec<RenderedStatement>),
}

impl Rendered {
    /// Wraps a statement list, collapsing a one-element list.
    #[must_use]
    pub fn from_statements(mut statements: Vec<RenderedStatement>) -> Self {
        if statements.len() == 1 {
            if let Some(only) = statements.pop() {
                return Self::Single(only);
            }
        }
        Self::Batch(statements)
    }

    /// Returns the statements in issue order.
    #[must_use]
    pub fn statements(&self) -> &[RenderedStatement] {
        match self {
            Self::Single(statement) => std::slice::from_ref(statement),
            Self::Batch(statements) => statements,
        }
    }

    /// Consumes the output and returns the statements in issue order.
    #[must_use]
    pub fn into_statements(self) -> Vec<RenderedStatement> {
        match self {
            Self::Single(statement) => vec![statement],
            Self::Batch(statements) => statements,
        }
    }
}

/// Compiles plans into dialect-correct SQL.
pub trait SqlCompiler {
    /// Compiles one logical statement.
    fn compile(&self, plan: &QueryPlan) -> Result<Rendered, CompileError>;
}

/// Counts `?` markers outside single-quoted literals.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    let mut in_literal = false;
    let mut count = 0;
    for ch in sql.chars() {
        match ch {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal => count += 1,
            _ => {}
        }
    }
    count
}
