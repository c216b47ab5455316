use crate::condition::{Condition, render_predicates};
use crate::value::Value;

/// Ordered WHERE predicates shared by the SELECT, UPDATE and DELETE builders.
///
/// Placeholders and bound values are both produced by walking `conditions`
/// front to back, so the n-th `?` always binds the n-th value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    conditions: Vec<Condition>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Append ` WHERE <preds>` to `sql` when there is at least one condition.
    pub fn write_sql(&self, sql: &mut String) {
        if self.conditions.is_empty() {
            return;
        }
        sql.push_str(" WHERE ");
        sql.push_str(&render_predicates(&self.conditions));
    }

    /// Append the bound values in placeholder order.
    pub fn extend_params(&self, params: &mut Vec<Value>) {
        params.extend(self.conditions.iter().map(|c| c.value().clone()));
    }
}
