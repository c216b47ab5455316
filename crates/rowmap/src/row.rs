//! Materialized query results.
//!
//! A [`TabularResult`] is built by draining a backend cursor once; it holds
//! no live backend resource afterwards.

use crate::error::{OrmError, OrmResult};
use crate::value::{FromValue, Value};
use std::sync::Arc;

/// One result row: values in the column order the backend returned.
///
/// Rows of the same result share one column list.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Position of `column`; the first match wins when names repeat.
    ///
    /// Falls back to an ASCII case-insensitive match, since backends fold
    /// unquoted identifiers (PostgreSQL returns `customName` as `customname`).
    fn position(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(column)))
    }

    /// Untyped lookup by column name.
    pub fn get_value(&self, column: &str) -> Option<&Value> {
        self.position(column).map(|idx| &self.values[idx])
    }

    /// Untyped lookup by position.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Typed lookup by column name.
    pub fn get<T: FromValue>(&self, column: &str) -> OrmResult<T> {
        let value = self
            .get_value(column)
            .ok_or_else(|| OrmError::decode(column, "no such column"))?;
        T::from_value(value).map_err(|e| OrmError::decode(column, e.to_string()))
    }

    /// Typed lookup by position.
    pub fn get_at<T: FromValue>(&self, index: usize) -> OrmResult<T> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| OrmError::index(index, self.values.len()))?;
        T::from_value(value).map_err(|e| OrmError::decode(self.columns[index].as_str(), e.to_string()))
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// An ordered, fully materialized sequence of [`Row`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularResult {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl TabularResult {
    /// Assemble a result from a column list and row values.
    ///
    /// Fails when a row's width does not match the column list.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<Value>>) -> OrmResult<Self> {
        let columns: Arc<[String]> = columns.into();
        let rows = rows
            .into_iter()
            .map(|values| {
                if values.len() != columns.len() {
                    return Err(OrmError::Other(format!(
                        "row has {} values for {} columns",
                        values.len(),
                        columns.len()
                    )));
                }
                Ok(Row::new(columns.clone(), values))
            })
            .collect::<OrmResult<Vec<_>>>()?;
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, or an [`OrmError::Index`] when out of range.
    pub fn row_at(&self, index: usize) -> OrmResult<&Row> {
        self.rows
            .get(index)
            .ok_or_else(|| OrmError::index(index, self.rows.len()))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl IntoIterator for TabularResult {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a TabularResult {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
