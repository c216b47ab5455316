//! Execution façade: run statements on a pooled connection.

use crate::builder::{RawStatement, SqlStatement, StatementKind};
use crate::config::ClientConfig;
use crate::dialect::Dialect;
use crate::dispatch::{Dispatcher, TaskHandle};
use crate::error::{OrmError, OrmResult};
use crate::mapper::Mapper;
use crate::pool::{ConnectionPool, PooledConnection, create_pool};
use crate::row::TabularResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Entry point for running statements.
///
/// Each call checks out exactly one connection for one statement and hands
/// it back on every exit path. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct Client {
    pool: Arc<dyn ConnectionPool>,
    config: Arc<ClientConfig>,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("dialect", &self.pool.dialect())
            .field("open", &self.pool.is_open())
            .finish()
    }
}

impl Client {
    /// Build the pool for `config` and check that one connection can be opened.
    ///
    /// Must be called from inside a tokio runtime.
    pub async fn connect(config: ClientConfig) -> OrmResult<Self> {
        let pool = create_pool(&config)?;
        let client = Self::with_pool(pool, config)?;
        let conn = client.acquire().await?;
        client.pool.release(conn);
        Ok(client)
    }

    /// Use an existing pool. The pool's dialect overrides `config.dialect`.
    pub fn with_pool(pool: Arc<dyn ConnectionPool>, mut config: ClientConfig) -> OrmResult<Self> {
        config.dialect = pool.dialect();
        Ok(Self {
            pool,
            config: Arc::new(config),
            dispatcher: Dispatcher::current()?,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.pool.dialect()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Record mapper bound to this client.
    pub fn mapper(&self) -> Mapper<'_> {
        Mapper::new(self)
    }

    async fn acquire(&self) -> OrmResult<PooledConnection> {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, self.pool.acquire()).await {
            Ok(conn) => conn,
            Err(_) => Err(OrmError::Timeout(timeout)),
        }
    }

    async fn with_timeout<T, F>(&self, future: F) -> OrmResult<T>
    where
        F: Future<Output = OrmResult<T>> + Send,
    {
        let timeout: Duration = self.config.timeout();
        tokio::pin!(future);
        tokio::select! {
            result = &mut future => result,
            _ = tokio::time::sleep(timeout) => Err(OrmError::Timeout(timeout)),
        }
    }

    fn log_failure(&self, kind: StatementKind, err: &OrmError) {
        if self.config.log_errors {
            tracing::warn!(target: "rowmap.sql", kind = %kind, error = %err, "statement failed");
        }
    }

    /// Run a statement and return the affected-row count.
    pub async fn try_execute<S>(&self, statement: &S) -> OrmResult<u64>
    where
        S: SqlStatement + ?Sized,
    {
        let sql = statement.sql();
        let params = statement.params();
        self.config
            .sql_logger
            .statement(statement.kind(), &sql, params.len());

        let mut conn = self.acquire().await?;
        let result = self.with_timeout(conn.execute(&sql, &params)).await;
        self.pool.release(conn);
        result
    }

    /// Run a statement; `false` on any failure.
    pub async fn execute<S>(&self, statement: &S) -> bool
    where
        S: SqlStatement + ?Sized,
    {
        match self.try_execute(statement).await {
            Ok(_) => true,
            Err(err) => {
                self.log_failure(statement.kind(), &err);
                false
            }
        }
    }

    /// Run a statement and materialize every returned row.
    pub async fn query<S>(&self, statement: &S) -> OrmResult<TabularResult>
    where
        S: SqlStatement + ?Sized,
    {
        let sql = statement.sql();
        let params = statement.params();
        self.config
            .sql_logger
            .statement(statement.kind(), &sql, params.len());

        let result = async {
            let mut conn = self.acquire().await?;
            let result = self.with_timeout(conn.query(&sql, &params)).await;
            self.pool.release(conn);
            result
        }
        .await;

        if let Err(err) = &result {
            self.log_failure(statement.kind(), err);
        }
        result
    }

    /// Run caller-provided SQL without parameters; `false` on failure.
    pub async fn execute_sql(&self, sql: &str) -> bool {
        self.execute(&RawStatement::new(sql)).await
    }

    /// Query with caller-provided SQL without parameters.
    pub async fn query_sql(&self, sql: &str) -> OrmResult<TabularResult> {
        self.query(&RawStatement::new(sql)).await
    }

    /// Run `work` on the dispatcher and return a handle to its result.
    pub fn submit<F, T>(&self, work: F) -> OrmResult<TaskHandle<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.dispatcher.submit(work)
    }

    /// Run `work` on the dispatcher without waiting for it.
    pub fn dispatch<F>(&self, work: F) -> OrmResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.dispatcher.dispatch(work)
    }

    pub fn is_connected(&self) -> bool {
        self.pool.is_open()
    }

    /// Stop accepting background work and close the pool.
    pub fn close(&self) {
        self.dispatcher.shutdown();
        self.pool.shutdown();
    }
}
