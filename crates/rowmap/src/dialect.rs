//! SQL dialect rules.
//!
//! Statements render the same text for every backend. The few places where
//! backends disagree (column type names, identity columns and placeholder
//! syntax) are resolved here.

use crate::mapper::SqlType;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;

/// Backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Networked PostgreSQL server.
    #[default]
    Postgres,
    /// Embedded SQLite database file.
    Sqlite,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Column type name, or `None` for types with no SQL mapping.
    pub fn sql_type_name(&self, ty: SqlType) -> Option<&'static str> {
        let name = match (self, ty) {
            (_, SqlType::Unknown) => return None,
            (_, SqlType::Integer) => "INTEGER",
            (_, SqlType::VarChar) => "VARCHAR(255)",
            (_, SqlType::Boolean) => "BOOLEAN",
            (_, SqlType::BigInt) => "BIGINT",
            (_, SqlType::SmallInt) => "SMALLINT",
            (_, SqlType::Char) => "CHAR",
            (Dialect::Postgres, SqlType::Double) => "DOUBLE PRECISION",
            (Dialect::Sqlite, SqlType::Double) => "DOUBLE",
            (Dialect::Postgres, SqlType::Float) => "REAL",
            (Dialect::Sqlite, SqlType::Float) => "FLOAT",
            (Dialect::Postgres, SqlType::TinyInt) => "SMALLINT",
            (Dialect::Sqlite, SqlType::TinyInt) => "TINYINT",
            (Dialect::Postgres, SqlType::Timestamp) => "TIMESTAMP",
            (Dialect::Sqlite, SqlType::Timestamp) => "DATETIME",
        };
        Some(name)
    }

    /// Inline token for an auto-increment column, if the dialect has one.
    ///
    /// SQLite has none: an `INTEGER PRIMARY KEY` is already the rowid alias.
    pub fn auto_increment_token(&self) -> Option<&'static str> {
        match self {
            Dialect::Postgres => Some("GENERATED BY DEFAULT AS IDENTITY"),
            Dialect::Sqlite => None,
        }
    }

    /// Rewrite `?` placeholders into the backend's syntax.
    pub fn bind_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self {
            Dialect::Postgres => Cow::Owned(number_placeholders(sql)),
            Dialect::Sqlite => Cow::Borrowed(sql),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Replace each `?` outside quoted literals and identifiers with `$1..$n`.
pub fn number_placeholders(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut quote: Option<char> = None;
    let mut n = 0usize;

    for ch in sql.chars() {
        match quote {
            Some(q) => {
                // a doubled quote re-enters the literal on the next char
                if ch == q {
                    quote = None;
                }
                out.push(ch);
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    out.push(ch);
                }
                '?' => {
                    n += 1;
                    out.push('$');
                    out.push_str(&n.to_string());
                }
                _ => out.push(ch),
            },
        }
    }
    out
}
