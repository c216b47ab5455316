use super::StatementKind;
use super::traits::SqlStatement;
use crate::value::Value;

/// INSERT builder.
///
/// Columns are optional; without them the statement binds positionally.
/// Either way it renders one placeholder per value.
///
/// ```
/// use rowmap::builder::{InsertBuilder, SqlStatement};
///
/// let stmt = InsertBuilder::into("test").value(1).value("Jack").value("0000").build();
/// assert_eq!(stmt.sql(), "INSERT INTO test VALUES (?,?,?);");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an insert into `table`.
    pub fn into(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    pub fn column(&mut self, column: impl Into<String>) -> &mut Self {
        self.columns.push(column.into());
        self
    }

    pub fn columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    pub fn values<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn build(&self) -> InsertStatement {
        InsertStatement {
            table: self.table.clone(),
            columns: self.columns.clone(),
            values: self.values.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsertStatement {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertStatement {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl SqlStatement for InsertStatement {
    fn sql(&self) -> String {
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&self.table);

        if !self.columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&self.columns.join(","));
            sql.push(')');
        }

        // one placeholder per bound value; a column count mismatch is left
        // for the backend to reject
        sql.push_str(" VALUES (");
        sql.push_str(&vec!["?"; self.values.len()].join(","));
        sql.push_str(");");
        sql
    }

    fn params(&self) -> Vec<Value> {
        self.values.clone()
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }
}
