//! Resolved filter conditions.
//!
//! The query-building layer hands over conditions that are already resolved
//! to a SQL fragment plus the parameters it binds. The helpers here only
//! exist so plans can be assembled in tests and by thin callers.

use super::value::{SqlValue, ToSqlValue};

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> ColumnRef {
    ColumnRef {
        table: None,
        name: String::from(name),
    }
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl ColumnRef {
    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(table: &str, name: &str) -> Self {
        Self {
            table: Some(String::from(table)),
            name: String::from(name),
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match &self.table {
            Some(t) => format!("{t}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Creates an equality condition.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "=", value.to_sql_value().into())
    }

    /// Creates an inequality condition.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "<>", value.to_sql_value().into())
    }

    /// Creates a less-than condition.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "<", value.to_sql_value().into())
    }

    /// Creates a greater-than condition.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), ">", value.to_sql_value().into())
    }

    /// Creates an IS NULL condition.
    #[must_use]
    pub fn is_null(self) -> Condition {
        let operand: Condition = self.into();
        Condition {
            sql: format!("{} IS NULL", operand.sql),
            params: operand.params,
        }
    }

    /// Creates an IN condition.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Condition {
        let values: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        let placeholders = vec![SqlValue::placeholder(); values.len()].join(", ");
        Condition {
            sql: format!("{} IN ({placeholders})", self.to_sql()),
            params: values,
        }
    }
}

/// A resolved condition: a SQL fragment and the parameters it binds, in
/// placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    sql: String,
    params: Vec<SqlValue>,
}

impl Condition {
    /// Creates a condition from a fragment and its parameters.
    ///
    /// **Warning**: `sql` must not contain user input; bind it through `params`.
    #[must_use]
    pub fn raw(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    fn binary(left: Self, op: &str, right: Self) -> Self {
        let mut params = left.params;
        params.extend(right.params);
        Self {
            sql: format!("{} {op} {}", left.sql, right.sql),
            params,
        }
    }

    /// Creates an AND condition.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::binary(self, "AND", other)
    }

    /// Creates an OR condition, parenthesized.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        let joined = Self::binary(self, "OR", other);
        Self {
            sql: format!("({})", joined.sql),
            params: joined.params,
        }
    }

    /// Returns the SQL fragment.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

impl From<ColumnRef> for Condition {
    fn from(col: ColumnRef) -> Self {
        Self {
            sql: col.to_sql(),
            params: vec![],
        }
    }
}

impl From<SqlValue> for Condition {
    fn from(value: SqlValue) -> Self {
        Self {
            sql: String::from(SqlValue::placeholder()),
            params: vec![value],
        }
    }
}
