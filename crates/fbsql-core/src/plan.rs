//! Engine-agnostic query plans.
//!
//! A plan is the finished description of one logical statement, produced by
//! the query-building layer. Compilers only read plans; the builder-style
//! methods here consume and return `self` so a plan is never mutated once it
//! has been handed over.

use crate::builder::{Condition, SqlValue};

/// One logical statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryPlan {
    /// A row-returning SELECT.
    Select(SelectPlan),
    /// Aggregates computed over a SELECT.
    Aggregate(AggregatePlan),
    /// An INSERT of one or more rows.
    Insert(InsertPlan),
    /// An UPDATE.
    Update(UpdatePlan),
    /// A DELETE.
    Delete(DeletePlan),
}

/// A SELECT with its pagination bounds.
///
/// `low_mark`/`high_mark` describe a zero-based, half-open row range;
/// `high_mark == None` means "to the end of the result set".
#[derive(Debug, Clone, PartialEq)]
pub struct SelectPlan {
    /// Whether to select distinct rows.
    pub distinct: bool,
    /// Output columns, already resolved.
    pub columns: Vec<String>,
    /// Source table (may carry an alias).
    pub table: String,
    /// Rendered join clauses.
    pub joins: Vec<String>,
    /// WHERE condition.
    pub filter: Option<Condition>,
    /// GROUP BY columns.
    pub group_by: Vec<String>,
    /// ORDER BY terms (e.g. `"name"`, `"id DESC"`).
    pub order_by: Vec<String>,
    /// First row of the range.
    pub low_mark: u64,
    /// One past the last row of the range.
    pub high_mark: Option<u64>,
}

impl SelectPlan {
    /// Creates a plan selecting `columns` from `table`.
    #[must_use]
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            distinct: false,
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            table: String::from(table),
            joins: vec![],
            filter: None,
            group_by: vec![],
            order_by: vec![],
            low_mark: 0,
            high_mark: None,
        }
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("LEFT JOIN {table} ON {on}"));
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    /// Sets the GROUP BY columns.
    #[must_use]
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.group_by = cols.iter().map(|c| String::from(*c)).collect();
        self
    }

    /// Sets the ORDER BY terms.
    #[must_use]
    pub fn order_by(mut self, terms: &[&str]) -> Self {
        self.order_by = terms.iter().map(|t| String::from(*t)).collect();
        self
    }

    /// Restricts the plan to rows `low..high` (`high == None`: to the end).
    ///
    /// A `high` below `low` is clamped to `low`, which yields an empty range.
    #[must_use]
    pub fn slice(mut self, low: u64, high: Option<u64>) -> Self {
        self.low_mark = low;
        self.high_mark = high.map(|h| h.max(low));
        self
    }

    /// Returns `true` when the plan restricts the row range at all.
    #[must_use]
    pub const fn is_sliced(&self) -> bool {
        self.low_mark > 0 || self.high_mark.is_some()
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT
    Count,
    /// SUM
    Sum,
    /// AVG
    Avg,
    /// MIN
    Min,
    /// MAX
    Max,
}

impl AggregateFunction {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

/// One aggregate output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// The function.
    pub function: AggregateFunction,
    /// The aggregated column; `None` means `*`.
    pub column: Option<String>,
    /// Output alias.
    pub alias: String,
}

impl Aggregate {
    /// `COUNT(*) AS alias`.
    #[must_use]
    pub fn count_all(alias: &str) -> Self {
        Self {
            function: AggregateFunction::Count,
            column: None,
            alias: String::from(alias),
        }
    }

    /// `FUNC(column) AS alias`.
    #[must_use]
    pub fn of(function: AggregateFunction, column: &str, alias: &str) -> Self {
        Self {
            function,
            column: Some(String::from(column)),
            alias: String::from(alias),
        }
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let arg = self.column.as_deref().unwrap_or("*");
        format!("{}({arg}) AS {}", self.function.as_sql(), self.alias)
    }
}

/// Aggregates computed over the rows of `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatePlan {
    /// The rows being aggregated, including their pagination.
    pub source: SelectPlan,
    /// Output aggregates.
    pub aggregates: Vec<Aggregate>,
}

impl AggregatePlan {
    /// Creates an aggregate plan.
    #[must_use]
    pub const fn new(source: SelectPlan, aggregates: Vec<Aggregate>) -> Self {
        Self { source, aggregates }
    }
}

/// The primary key of an insert target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Column name.
    pub column: String,
    /// Whether the engine generates the value.
    pub auto: bool,
}

impl PrimaryKey {
    /// An engine-generated key.
    #[must_use]
    pub fn auto(column: &str) -> Self {
        Self {
            column: String::from(column),
            auto: true,
        }
    }

    /// A key supplied by the caller.
    #[must_use]
    pub fn manual(column: &str) -> Self {
        Self {
            column: String::from(column),
            auto: false,
        }
    }
}

/// A column written by an INSERT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertField {
    /// Column name.
    pub column: String,
    /// Custom placeholder expression wrapping the bound value, e.g.
    /// `CAST(? AS BLOB SUB_TYPE TEXT)`. Must contain exactly one `?`.
    pub placeholder: Option<String>,
}

impl InsertField {
    /// A plain bound column.
    #[must_use]
    pub fn new(column: &str) -> Self {
        Self {
            column: String::from(column),
            placeholder: None,
        }
    }

    /// A column bound through a custom placeholder expression.
    #[must_use]
    pub fn with_placeholder(column: &str, placeholder: &str) -> Self {
        Self {
            column: String::from(column),
            placeholder: Some(String::from(placeholder)),
        }
    }
}

/// An INSERT of one or more objects.
///
/// `rows` holds one entry per object; each entry has one value per field.
/// When `fields` is empty the insert is identity-only and each entry is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    /// Target table.
    pub table: String,
    /// Target primary key.
    pub primary_key: PrimaryKey,
    /// Explicit fields, in column order.
    pub fields: Vec<InsertField>,
    /// One value list per object.
    pub rows: Vec<Vec<SqlValue>>,
    /// Whether the generated primary key must be returned.
    pub return_id: bool,
}

impl InsertPlan {
    /// Creates an insert with explicit fields and no rows yet.
    #[must_use]
    pub fn new(table: &str, primary_key: PrimaryKey, fields: Vec<InsertField>) -> Self {
        Self {
            table: String::from(table),
            primary_key,
            fields,
            rows: vec![],
            return_id: false,
        }
    }

    /// Creates an identity-only insert of `objects` rows.
    #[must_use]
    pub fn identity_only(table: &str, primary_key: PrimaryKey, objects: usize) -> Self {
        Self {
            table: String::from(table),
            primary_key,
            fields: vec![],
            rows: vec![vec![]; objects],
            return_id: false,
        }
    }

    /// Appends one object's values.
    #[must_use]
    pub fn row(mut self, values: Vec<SqlValue>) -> Self {
        self.rows.push(values);
        self
    }

    /// Requests the generated primary key back.
    #[must_use]
    pub const fn returning_id(mut self, return_id: bool) -> Self {
        self.return_id = return_id;
        self
    }

    /// Returns `true` if any field needs a custom placeholder expression.
    #[must_use]
    pub fn has_custom_placeholders(&self) -> bool {
        self.fields.iter().any(|f| f.placeholder.is_some())
    }
}

/// An UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    /// Target table.
    pub table: String,
    /// `column = value` assignments.
    pub assignments: Vec<(String, SqlValue)>,
    /// WHERE condition.
    pub filter: Option<Condition>,
}

impl UpdatePlan {
    /// Creates an update with no assignments yet.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            assignments: vec![],
            filter: None,
        }
    }

    /// Adds an assignment.
    #[must_use]
    pub fn set(mut self, column: &str, value: SqlValue) -> Self {
        self.assignments.push((String::from(column), value));
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }
}

/// A DELETE.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePlan {
    /// Target table.
    pub table: String,
    /// WHERE condition.
    pub filter: Option<Condition>,
}

impl DeletePlan {
    /// Creates a delete of every row in `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            filter: None,
        }
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }
}
