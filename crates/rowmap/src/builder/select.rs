use super::StatementKind;
use super::traits::SqlStatement;
use super::where_clause::WhereClause;
use crate::condition::Condition;
use crate::fragment::{Function, Join, Order, render_orders};
use crate::value::Value;

/// Structured SELECT builder.
///
/// ```
/// use rowmap::builder::{SelectBuilder, SqlStatement};
/// use rowmap::Condition;
///
/// let stmt = SelectBuilder::new()
///     .select("name")
///     .from("test")
///     .and_where(Condition::gte("id", "1"))
///     .limit(2)
///     .build();
/// assert_eq!(stmt.sql(), "SELECT name FROM test WHERE id>=? LIMIT 2;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    /// SELECT columns / expressions
    selects: Vec<String>,
    /// Aggregate functions rendered after the columns
    functions: Vec<Function>,
    /// Table name
    table: String,
    /// JOIN clauses
    joins: Vec<Join>,
    /// WHERE predicates
    where_clause: WhereClause,
    /// ORDER BY body
    order_by: Option<String>,
    /// LIMIT body
    limit: Option<String>,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one column or a comma-separated expression list.
    pub fn select(&mut self, column: impl Into<String>) -> &mut Self {
        self.selects.push(column.into());
        self
    }

    /// Append several columns.
    pub fn select_all<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selects.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Append an aggregate function.
    pub fn function(&mut self, function: Function) -> &mut Self {
        self.functions.push(function);
        self
    }

    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    pub fn join(&mut self, join: Join) -> &mut Self {
        self.joins.push(join);
        self
    }

    /// Add an AND-ed predicate.
    pub fn and_where(&mut self, condition: Condition) -> &mut Self {
        self.where_clause.push(condition);
        self
    }

    /// Set the ORDER BY terms, replacing any previous ones.
    pub fn order_by(&mut self, orders: &[Order]) -> &mut Self {
        self.order_by = if orders.is_empty() {
            None
        } else {
            Some(render_orders(orders))
        };
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Set the LIMIT body verbatim (e.g. `"10 OFFSET 20"`).
    pub fn limit_str(&mut self, limit: impl Into<String>) -> &mut Self {
        self.limit = Some(limit.into());
        self
    }

    /// Freeze the builder into a statement. The builder stays usable.
    pub fn build(&self) -> SelectStatement {
        SelectStatement {
            selects: self.selects.clone(),
            functions: self.functions.clone(),
            table: self.table.clone(),
            joins: self.joins.clone(),
            where_clause: self.where_clause.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit.clone(),
        }
    }
}

/// A frozen SELECT statement.
#[derive(Debug, Clone)]
pub struct SelectStatement {
    selects: Vec<String>,
    functions: Vec<Function>,
    table: String,
    joins: Vec<Join>,
    where_clause: WhereClause,
    order_by: Option<String>,
    limit: Option<String>,
}

impl SelectStatement {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.selects
    }

    pub fn conditions(&self) -> &[Condition] {
        self.where_clause.conditions()
    }
}

impl SqlStatement for SelectStatement {
    fn sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        sql.push_str(&self.selects.join(","));

        if !self.functions.is_empty() {
            if !self.selects.is_empty() {
                sql.push_str(", ");
            }
            let functions: Vec<String> = self.functions.iter().map(Function::to_string).collect();
            sql.push_str(&functions.join(","));
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }

        self.where_clause.write_sql(&mut sql);

        if let Some(order_by) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }

        if let Some(limit) = &self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(limit);
        }

        sql.push(';');
        sql
    }

    fn params(&self) -> Vec<Value> {
        let mut params = Vec::with_capacity(self.where_clause.len());
        self.where_clause.extend_params(&mut params);
        params
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }
}
