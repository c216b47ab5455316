use super::StatementKind;
use super::traits::SqlStatement;
use super::where_clause::WhereClause;
use crate::condition::Condition;
use crate::value::Value;

/// DELETE builder. Without conditions the statement deletes every row.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    table: String,
    where_clause: WhereClause,
}

impl DeleteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    pub fn and_where(&mut self, condition: Condition) -> &mut Self {
        self.where_clause.push(condition);
        self
    }

    pub fn build(&self) -> DeleteStatement {
        DeleteStatement {
            table: self.table.clone(),
            where_clause: self.where_clause.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteStatement {
    table: String,
    where_clause: WhereClause,
}

impl DeleteStatement {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn conditions(&self) -> &[Condition] {
        self.where_clause.conditions()
    }
}

impl SqlStatement for DeleteStatement {
    fn sql(&self) -> String {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(&self.table);
        self.where_clause.write_sql(&mut sql);
        sql.push(';');
        sql
    }

    fn params(&self) -> Vec<Value> {
        let mut params = Vec::with_capacity(self.where_clause.len());
        self.where_clause.extend_params(&mut params);
        params
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }
}
