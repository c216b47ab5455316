use super::StatementKind;
use super::traits::SqlStatement;
use crate::value::Value;

/// CREATE TABLE builder.
///
/// Column option tokens are rendered verbatim, space-joined in the order
/// given; the builder does not know about dialects.
///
/// ```
/// use rowmap::builder::{CreateBuilder, SqlStatement};
///
/// let stmt = CreateBuilder::new()
///     .create("test")
///     .if_not_exists(true)
///     .value("id", &["int", "auto_increment"])
///     .value("name", &["varchar(255)"])
///     .primary_key("id")
///     .build();
/// assert_eq!(
///     stmt.sql(),
///     "CREATE TABLE IF NOT EXISTS test (id int auto_increment,name varchar(255),PRIMARY KEY (id));"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreateBuilder {
    table: String,
    if_not_exists: bool,
    /// (column, option tokens)
    columns: Vec<(String, Vec<String>)>,
    primary_keys: Vec<String>,
}

impl CreateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    pub fn if_not_exists(&mut self, flag: bool) -> &mut Self {
        self.if_not_exists = flag;
        self
    }

    /// Add a column with its option tokens (type first, then constraints).
    pub fn value<S: AsRef<str>>(&mut self, column: impl Into<String>, options: &[S]) -> &mut Self {
        let options = options.iter().map(|o| o.as_ref().to_string()).collect();
        self.columns.push((column.into(), options));
        self
    }

    pub fn primary_key(&mut self, column: impl Into<String>) -> &mut Self {
        self.primary_keys.push(column.into());
        self
    }

    pub fn build(&self) -> CreateStatement {
        CreateStatement {
            table: self.table.clone(),
            if_not_exists: self.if_not_exists,
            columns: self.columns.clone(),
            primary_keys: self.primary_keys.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateStatement {
    table: String,
    if_not_exists: bool,
    columns: Vec<(String, Vec<String>)>,
    primary_keys: Vec<String>,
}

impl CreateStatement {
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }
}

impl SqlStatement for CreateStatement {
    fn sql(&self) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.table);
        sql.push_str(" (");

        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|(column, options)| {
                // bare column: no trailing space before the separator
                if options.is_empty() {
                    column.clone()
                } else {
                    format!("{} {}", column, options.join(" "))
                }
            })
            .collect();

        if !self.primary_keys.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", self.primary_keys.join(",")));
        }

        sql.push_str(&parts.join(","));
        sql.push_str(");");
        sql
    }

    fn params(&self) -> Vec<Value> {
        Vec::new()
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }
}
