//! Error types for rowmap

use std::time::Duration;
use thiserror::Error;

/// Result type alias for rowmap operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for statement execution and row mapping
#[derive(Debug, Error)]
pub enum OrmError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backend rejected a statement
    #[error("Query error: {0}")]
    Query(String),

    /// Pool error
    #[error("Pool error: {0}")]
    Pool(String),

    /// Connection acquisition or statement timeout
    #[error("Query timeout after {0:?}")]
    Timeout(Duration),

    /// The pool or dispatcher has been shut down
    #[error("Closed: {0}")]
    Closed(String),

    /// A record type does not describe a table
    #[error("Schema error: {0}")]
    Schema(String),

    /// A row could not be materialized into a record
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Value decode/conversion error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Row index out of range
    #[error("Row index {index} out of range for result of {len} rows")]
    Index { index: usize, len: usize },

    /// A submitted background task failed
    #[error("Task error: {0}")]
    Task(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Create a mapping error
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an index error
    pub fn index(index: usize, len: usize) -> Self {
        Self::Index { index, len }
    }

    /// Create a closed error
    pub fn closed(what: impl Into<String>) -> Self {
        Self::Closed(what.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Check if this is a mapping error
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Parse a tokio_postgres error, keeping the constraint name for violations
    #[cfg(feature = "postgres")]
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let message = db_err.message();
            return match db_err.constraint() {
                Some(constraint) => Self::Query(format!(
                    "{} ({}): {}",
                    db_err.code().code(),
                    constraint,
                    message
                )),
                None => Self::Query(format!("{}: {}", db_err.code().code(), message)),
            };
        }
        if err.is_closed() {
            return Self::Connection(err.to_string());
        }
        Self::Query(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for OrmError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::from_db_error(err)
    }
}

#[cfg(feature = "postgres")]
impl From<deadpool_postgres::PoolError> for OrmError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        match err {
            deadpool_postgres::PoolError::Closed => Self::closed("connection pool"),
            deadpool_postgres::PoolError::Backend(e) => Self::from_db_error(e),
            other => Self::Pool(other.to_string()),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for OrmError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(message)) => Self::Query(message),
            other => Self::Query(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(OrmError::Timeout(Duration::from_millis(5)).is_timeout());
        assert!(OrmError::schema("no table").is_schema());
        assert!(OrmError::mapping("bad row").is_mapping());
        assert!(!OrmError::Other("x".into()).is_mapping());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            OrmError::decode("id", "expected integer").to_string(),
            "Decode error on column 'id': expected integer"
        );
        assert_eq!(
            OrmError::index(3, 2).to_string(),
            "Row index 3 out of range for result of 2 rows"
        );
    }
}
