use super::StatementKind;
use super::traits::SqlStatement;
use super::where_clause::WhereClause;
use crate::condition::Condition;
use crate::value::Value;

/// UPDATE builder.
///
/// `set` has map semantics: setting a column twice keeps its first position
/// and replaces the value. SET values bind before WHERE values.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    table: String,
    /// SET assignments in first-insertion order
    sets: Vec<(String, Value)>,
    where_clause: WhereClause,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.sets.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.sets.push((column, value)),
        }
        self
    }

    pub fn and_where(&mut self, condition: Condition) -> &mut Self {
        self.where_clause.push(condition);
        self
    }

    pub fn build(&self) -> UpdateStatement {
        UpdateStatement {
            table: self.table.clone(),
            sets: self.sets.clone(),
            where_clause: self.where_clause.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateStatement {
    table: String,
    sets: Vec<(String, Value)>,
    where_clause: WhereClause,
}

impl UpdateStatement {
    pub fn table(&self) -> &str {
        &self.table
    }

    /// SET columns in render order.
    pub fn set_columns(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|(c, _)| c.as_str())
    }

    pub fn conditions(&self) -> &[Condition] {
        self.where_clause.conditions()
    }
}

impl SqlStatement for UpdateStatement {
    fn sql(&self) -> String {
        let mut sql = String::from("UPDATE ");
        sql.push_str(&self.table);

        if !self.sets.is_empty() {
            let assignments: Vec<String> = self.sets.iter().map(|(c, _)| format!("{c}=?")).collect();
            sql.push_str(" SET ");
            sql.push_str(&assignments.join(","));
        }

        self.where_clause.write_sql(&mut sql);
        sql.push(';');
        sql
    }

    fn params(&self) -> Vec<Value> {
        let mut params: Vec<Value> = Vec::with_capacity(self.sets.len() + self.where_clause.len());
        params.extend(self.sets.iter().map(|(_, v)| v.clone()));
        self.where_clause.extend_params(&mut params);
        params
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }
}
