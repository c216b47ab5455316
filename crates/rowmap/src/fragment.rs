//! ORDER BY, JOIN and aggregate fragments consumed by the SELECT builder.

use std::fmt;

/// Sort direction of an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column: String,
    direction: Direction,
}

impl Order {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction.sql())
    }
}

/// Render orders as the comma-joined body of an `ORDER BY` clause.
pub(crate) fn render_orders(orders: &[Order]) -> String {
    orders
        .iter()
        .map(Order::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Kind of a [`Join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Left,
    Right,
}

impl JoinKind {
    pub fn sql(&self) -> &'static str {
        match self {
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// `<KIND> JOIN <table> ON <left>=<right>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    kind: JoinKind,
    table: String,
    left_column: String,
    right_column: String,
}

impl Join {
    pub fn new(
        kind: JoinKind,
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            table: table.into(),
            left_column: left_column.into(),
            right_column: right_column.into(),
        }
    }

    pub fn left(
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self::new(JoinKind::Left, table, left_column, right_column)
    }

    pub fn right(
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self::new(JoinKind::Right, table, left_column, right_column)
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn left_column(&self) -> &str {
        &self.left_column
    }

    pub fn right_column(&self) -> &str {
        &self.right_column
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ON {}={}",
            self.kind.sql(),
            self.table,
            self.left_column,
            self.right_column
        )
    }
}

/// Aggregate function kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl FunctionKind {
    pub fn sql(&self) -> &'static str {
        match self {
            FunctionKind::Sum => "SUM",
            FunctionKind::Avg => "AVG",
            FunctionKind::Min => "MIN",
            FunctionKind::Max => "MAX",
            FunctionKind::Count => "COUNT",
        }
    }
}

/// `<KIND>(<column>)[ AS <alias>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    kind: FunctionKind,
    column: String,
    alias: Option<String>,
}

impl Function {
    pub fn new(kind: FunctionKind, column: impl Into<String>) -> Self {
        Self {
            kind,
            column: column.into(),
            alias: None,
        }
    }

    /// Set the `AS` alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind.sql(), self.column)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_rendering() {
        let orders = [Order::asc("id"), Order::desc("name")];
        assert_eq!(render_orders(&orders), "id ASC,name DESC");
    }

    #[test]
    fn test_join_rendering() {
        let join = Join::left("test_data", "test_data.id", "test.id");
        assert_eq!(join.to_string(), "LEFT JOIN test_data ON test_data.id=test.id");
        let join = Join::right("b", "b.a_id", "a.id");
        assert_eq!(join.to_string(), "RIGHT JOIN b ON b.a_id=a.id");
    }

    #[test]
    fn test_function_rendering() {
        assert_eq!(
            Function::new(FunctionKind::Min, "test.id")
                .alias("average")
                .to_string(),
            "MIN(test.id) AS average"
        );
        assert_eq!(Function::new(FunctionKind::Count, "*").to_string(), "COUNT(*)");
    }
}
