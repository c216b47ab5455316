use crate::value::Value;
use std::fmt;

/// The SQL verb of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Create,
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Raw,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Create => "CREATE",
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Drop => "DROP",
            StatementKind::Raw => "RAW",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base trait for frozen statements.
///
/// `sql()` and `params()` walk the same frozen state in the same order, so
/// the n-th `?` in the text binds the n-th parameter.
pub trait SqlStatement: Sync {
    /// Render the SQL text with `?` placeholders.
    fn sql(&self) -> String;

    /// Parameters in placeholder order.
    fn params(&self) -> Vec<Value>;

    fn kind(&self) -> StatementKind;

    /// Number of `?` placeholders the statement binds.
    fn param_count(&self) -> usize {
        self.params().len()
    }
}
