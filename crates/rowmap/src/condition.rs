//! Query condition types for WHERE clauses.
//!
//! This module provides [`Operator`] and [`Condition`], the predicate
//! fragment consumed by the SELECT, UPDATE and DELETE builders.

use crate::value::Value;
use std::fmt;

/// Comparison operator of a [`Condition`].
///
/// # Example
/// ```
/// use rowmap::{Condition, Operator};
///
/// let c = Condition::new("id", Operator::GreaterEqual, "1");
/// assert_eq!(c.to_sql(), "id>=?");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
}

impl Operator {
    /// SQL token of the operator.
    pub fn sql(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::NotEqual => "!=",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// A single `<column><operator>?` predicate with its bound value.
///
/// Conditions are plain data: the column is not validated and the value is
/// never inlined into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Operator,
    value: Value,
}

impl Condition {
    /// Create a new condition.
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Equal, value)
    }

    /// `column != value`
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::NotEqual, value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Greater, value)
    }

    /// `column >= value`
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::GreaterEqual, value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Less, value)
    }

    /// `column <= value`
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::LessEqual, value)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Render the predicate with a `?` placeholder.
    pub fn to_sql(&self) -> String {
        format!("{}{}?", self.column, self.operator.sql())
    }
}

/// Render `conditions` as ` AND `-joined predicates (no leading `WHERE`).
pub(crate) fn render_predicates(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(Condition::to_sql)
        .collect::<Vec<_>>()
        .join(" AND ")
}
