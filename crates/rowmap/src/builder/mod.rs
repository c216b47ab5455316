//! Structured SQL builders.
//!
//! Each verb has a mutable builder that accumulates fragments and a frozen
//! statement produced by `build()`. Statements render SQL text with `?`
//! placeholders and expose their parameters in the same order.
//!
//! ## Design
//!
//! - Builders never fail; malformed SQL surfaces when the statement runs.
//! - `build()` takes `&self`, so calling it twice yields equal statements.
//! - Placeholders are always `?`; backends that number them do so at
//!   execution time.

pub mod create;
pub mod delete;
pub mod drop;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;
pub mod where_clause;

pub use create::{CreateBuilder, CreateStatement};
pub use delete::{DeleteBuilder, DeleteStatement};
pub use drop::{DropBuilder, DropStatement, RawStatement};
pub use insert::{InsertBuilder, InsertStatement};
pub use select::{SelectBuilder, SelectStatement};
pub use traits::{SqlStatement, StatementKind};
pub use update::{UpdateBuilder, UpdateStatement};
pub use where_clause::WhereClause;

use crate::value::Value;

/// Any frozen statement, one variant per verb.
#[derive(Debug, Clone)]
pub enum Statement {
    Create(CreateStatement),
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Drop(DropStatement),
    Raw(RawStatement),
}

impl Statement {
    fn inner(&self) -> &dyn SqlStatement {
        match self {
            Statement::Create(s) => s,
            Statement::Select(s) => s,
            Statement::Insert(s) => s,
            Statement::Update(s) => s,
            Statement::Delete(s) => s,
            Statement::Drop(s) => s,
            Statement::Raw(s) => s,
        }
    }
}

impl SqlStatement for Statement {
    fn sql(&self) -> String {
        self.inner().sql()
    }

    fn params(&self) -> Vec<Value> {
        self.inner().params()
    }

    fn kind(&self) -> StatementKind {
        self.inner().kind()
    }
}

macro_rules! impl_into_statement {
    ($($variant:ident => $ty:ty),* $(,)?) => {$(
        impl From<$ty> for Statement {
            fn from(s: $ty) -> Self {
                Statement::$variant(s)
            }
        }
    )*};
}

impl_into_statement!(
    Create => CreateStatement,
    Select => SelectStatement,
    Insert => InsertStatement,
    Update => UpdateStatement,
    Delete => DeleteStatement,
    Drop => DropStatement,
    Raw => RawStatement,
);

#[cfg(test)]
mod tests;
