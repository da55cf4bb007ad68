//! Error types for the Firebird backend.

use fbsql_core::CompileError;

/// Errors raised while translating, executing or introspecting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The plan violates a rendering contract.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// The driver rejected a statement. The engine's error is kept as-is.
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A catalog or key query returned rows of an unexpected shape.
    #[error("unexpected result: {0}")]
    UnexpectedResult(String),

    /// Options could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Wraps a driver error.
    pub fn database<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Database(Box::new(err))
    }
}

/// Result type for Firebird backend operations.
pub type Result<T> = std::result::Result<T, Error>;
