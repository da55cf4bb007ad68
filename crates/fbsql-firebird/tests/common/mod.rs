#![allow(dead_code)]

use std::collections::VecDeque;

use fbsql_core::{Connection, Row, SqlValue};

/// Error replayed by [`ScriptedConnection`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ScriptedError(pub String);

/// In-memory connection replaying canned responses in order and recording
/// every statement it was asked to run. Once the script runs out, every
/// statement succeeds with no rows.
#[derive(Debug, Default)]
pub struct ScriptedConnection {
    responses: VecDeque<Result<Vec<Row>, ScriptedError>>,
    pub executed: Vec<(String, Vec<SqlValue>)>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn returns(mut self, rows: Vec<Row>) -> Self {
        self.responses.push_back(Ok(rows));
        self
    }

    /// Queues a single-value response.
    pub fn returns_int(self, value: i64) -> Self {
        self.returns(vec![vec![SqlValue::Int(value)]])
    }

    /// Queues a failure.
    pub fn fails(mut self, message: &str) -> Self {
        self.responses
            .push_back(Err(ScriptedError(String::from(message))));
        self
    }

    pub fn sql(&self) -> Vec<&str> {
        self.executed.iter().map(|(sql, _)| sql.as_str()).collect()
    }
}

impl Connection for ScriptedConnection {
    type Error = ScriptedError;

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, Self::Error> {
        self.executed.push((String::from(sql), params.to_vec()));
        self.responses.pop_front().unwrap_or_else(|| Ok(vec![]))
    }
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(String::from(value))
}

/// Installs a test-writer subscriber so `tracing` output shows up in
/// failing tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
