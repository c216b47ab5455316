use super::StatementKind;
use super::traits::SqlStatement;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct DropBuilder {
    table: String,
}

impl DropBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drop(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    pub fn build(&self) -> DropStatement {
        DropStatement {
            table: self.table.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DropStatement {
    table: String,
}

impl DropStatement {
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl SqlStatement for DropStatement {
    fn sql(&self) -> String {
        format!("DROP TABLE {};", self.table)
    }

    fn params(&self) -> Vec<Value> {
        Vec::new()
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }
}

/// Caller-provided SQL executed as-is, without parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    sql: String,
}

impl RawStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }
}

impl SqlStatement for RawStatement {
    fn sql(&self) -> String {
        self.sql.clone()
    }

    fn params(&self) -> Vec<Value> {
        Vec::new()
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Raw
    }
}
