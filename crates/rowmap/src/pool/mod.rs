//! Connection pools.
//!
//! The client only needs "acquire a connection, run one statement, give it
//! back". Each backend implements [`ConnectionPool`] and [`Connection`]
//! over its own driver; [`Client::with_pool`](crate::Client::with_pool)
//! accepts any other implementation.

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use postgres::PgPool;
#[cfg(feature = "sqlite")]
pub use sqlite::SqlitePool;

use crate::config::ClientConfig;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::row::TabularResult;
use crate::value::Value;
use async_trait::async_trait;
use std::sync::Arc;

/// A single pooled backend connection.
///
/// `sql` uses `?` placeholders; implementations translate them if their
/// driver expects another syntax.
#[async_trait]
pub trait Connection: Send {
    /// Run a statement and return the affected-row count.
    async fn execute(&mut self, sql: &str, params: &[Value]) -> OrmResult<u64>;

    /// Run a statement and drain every returned row.
    async fn query(&mut self, sql: &str, params: &[Value]) -> OrmResult<TabularResult>;
}

/// A connection checked out of a pool. Dropping it returns it.
pub type PooledConnection = Box<dyn Connection>;

#[async_trait]
pub trait ConnectionPool: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Check out a connection, waiting for a free slot.
    async fn acquire(&self) -> OrmResult<PooledConnection>;

    /// Hand a connection back.
    fn release(&self, conn: PooledConnection) {
        drop(conn);
    }

    fn is_open(&self) -> bool;

    /// Close the pool; later `acquire` calls fail.
    fn shutdown(&self);
}

/// Build the pool matching `config.dialect`.
pub fn create_pool(config: &ClientConfig) -> OrmResult<Arc<dyn ConnectionPool>> {
    match config.dialect {
        #[cfg(feature = "postgres")]
        Dialect::Postgres => Ok(Arc::new(PgPool::new(config)?)),
        #[cfg(feature = "sqlite")]
        Dialect::Sqlite => Ok(Arc::new(SqlitePool::new(config)?)),
        #[allow(unreachable_patterns)]
        other => Err(OrmError::Connection(format!(
            "rowmap was built without the `{}` feature",
            other.name()
        ))),
    }
}
