//! SQLite pool on rusqlite.
//!
//! Connections open lazily, up to `pool_size` at once, and go back to an
//! idle list when dropped. Statements run on tokio's blocking pool; a
//! statement whose caller gave up is interrupted and its connection still
//! goes back to the idle list.
//!
//! Every `:memory:` connection is a separate database, so in-memory pools
//! should use `pool_size(1)`.

use super::{Connection, ConnectionPool, PooledConnection};
use crate::config::ClientConfig;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::row::TabularResult;
use crate::value::{TIMESTAMP_FORMAT, Value};
use async_trait::async_trait;
use rusqlite::InterruptHandle;
use rusqlite::types::{ToSqlOutput, ValueRef};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

const MEMORY: &str = ":memory:";

/// Pool of SQLite connections to one database file.
#[derive(Clone)]
pub struct SqlitePool {
    inner: Arc<Inner>,
}

struct Inner {
    path: String,
    busy_timeout: Duration,
    idle: Mutex<Vec<rusqlite::Connection>>,
    permits: Arc<Semaphore>,
    open: AtomicBool,
}

impl SqlitePool {
    /// Create the pool, creating the database's parent directory if needed.
    pub fn new(config: &ClientConfig) -> OrmResult<Self> {
        let path = config.database.clone();
        if path != MEMORY {
            if let Some(parent) = Path::new(&path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        OrmError::Connection(format!(
                            "cannot create directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                busy_timeout: config.timeout(),
                idle: Mutex::new(Vec::new()),
                permits: Arc::new(Semaphore::new(config.pool_size.max(1))),
                open: AtomicBool::new(true),
            }),
        })
    }

    pub fn path(&self) -> &str {
        &self.inner.path
    }

    fn open_connection(&self) -> OrmResult<rusqlite::Connection> {
        let conn = rusqlite::Connection::open(&self.inner.path)
            .map_err(|e| OrmError::Connection(e.to_string()))?;
        conn.busy_timeout(self.inner.busy_timeout)?;
        Ok(conn)
    }

    fn take_idle(&self) -> Option<rusqlite::Connection> {
        self.inner.idle.lock().ok().and_then(|mut idle| idle.pop())
    }
}

#[async_trait]
impl ConnectionPool for SqlitePool {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn acquire(&self) -> OrmResult<PooledConnection> {
        if !self.is_open() {
            return Err(OrmError::closed("sqlite pool"));
        }
        let permit = self
            .inner
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| OrmError::closed("sqlite pool"))?;

        let conn = match self.take_idle() {
            Some(conn) => conn,
            None => self.open_connection()?,
        };
        Ok(Box::new(SqliteConnection {
            lease: Some(Lease {
                conn: Some(conn),
                pool: self.inner.clone(),
                _permit: permit,
            }),
        }))
    }

    fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::Acquire)
    }

    fn shutdown(&self) {
        self.inner.open.store(false, Ordering::Release);
        self.inner.permits.close();
        if let Ok(mut idle) = self.inner.idle.lock() {
            idle.clear();
        }
    }
}

/// A checked-out SQLite connection.
pub struct SqliteConnection {
    lease: Option<Lease>,
}

/// The rusqlite connection and its pool permit.
///
/// Dropping a lease puts the connection back on the idle list before the
/// permit is released, wherever the drop happens.
struct Lease {
    conn: Option<rusqlite::Connection>,
    pool: Arc<Inner>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for Lease {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        if !self.pool.open.load(Ordering::Acquire) {
            return;
        }
        if let Ok(mut idle) = self.pool.idle.lock() {
            idle.push(conn);
        }
    }
}

/// Interrupts the running statement unless disarmed.
struct InterruptOnDrop(Option<InterruptHandle>);

impl InterruptOnDrop {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for InterruptOnDrop {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.interrupt();
        }
    }
}

impl SqliteConnection {
    /// Run `f` on the blocking pool with the lease moved in and back.
    ///
    /// If this future is dropped first (a query timeout), the statement is
    /// interrupted and the blocking task returns the connection to the pool
    /// when it finishes.
    async fn run<T, F>(&mut self, f: F) -> OrmResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Connection) -> OrmResult<T> + Send + 'static,
    {
        let lease = self
            .lease
            .take()
            .ok_or_else(|| OrmError::closed("sqlite connection"))?;
        let interrupt = InterruptOnDrop(lease.conn.as_ref().map(|c| c.get_interrupt_handle()));

        let (lease, result) = tokio::task::spawn_blocking(move || {
            let result = match lease.conn.as_ref() {
                Some(conn) => f(conn),
                None => Err(OrmError::closed("sqlite connection")),
            };
            (lease, result)
        })
        .await
        .map_err(|e| OrmError::Task(e.to_string()))?;
        interrupt.disarm();
        self.lease = Some(lease);
        result
    }
}

#[async_trait]
impl Connection for SqliteConnection {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> OrmResult<u64> {
        let sql = sql.to_string();
        let params = params.to_vec();
        self.run(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            if stmt.column_count() == 0 {
                let changed = stmt.execute(rusqlite::params_from_iter(params.iter()))?;
                return Ok(changed as u64);
            }
            // statements that return rows still have to be stepped to completion
            let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
            while rows.next()?.is_some() {}
            Ok(0)
        })
        .await
    }

    async fn query(&mut self, sql: &str, params: &[Value]) -> OrmResult<TabularResult> {
        let sql = sql.to_string();
        let params = params.to_vec();
        self.run(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
            let width = columns.len();

            let mut values = Vec::new();
            let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
            while let Some(row) = rows.next()? {
                let row_values = (0..width)
                    .map(|idx| row.get_ref(idx).map(value_from_ref))
                    .collect::<Result<Vec<_>, _>>()?;
                values.push(row_values);
            }
            TabularResult::from_parts(columns, values)
        })
        .await
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int(v),
        ValueRef::Real(v) => Value::Float(v),
        ValueRef::Text(text) => Value::Text(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(bytes) => Value::Bytes(bytes.to_vec()),
    }
}

impl rusqlite::ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use rusqlite::types::Value as Sql;

        Ok(match self {
            Value::Null => ToSqlOutput::Owned(Sql::Null),
            Value::Bool(b) => ToSqlOutput::Owned(Sql::Integer(i64::from(*b))),
            Value::Int(v) => ToSqlOutput::Owned(Sql::Integer(*v)),
            Value::Float(v) => ToSqlOutput::Owned(Sql::Real(*v)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Timestamp(t) => ToSqlOutput::Owned(Sql::Text(t.format(TIMESTAMP_FORMAT).to_string())),
            Value::Bytes(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_pool() -> SqlitePool {
        SqlitePool::new(&ClientConfig::sqlite(MEMORY).pool_size(1)).unwrap()
    }

    #[tokio::test]
    async fn test_execute_and_query() {
        let pool = memory_pool();
        let mut conn = pool.acquire().await.unwrap();
        conn.execute("CREATE TABLE t (id INTEGER, name VARCHAR(255));", &[])
            .await
            .unwrap();
        let n = conn
            .execute(
                "INSERT INTO t VALUES (?,?);",
                &[Value::Int(1), Value::Text("a".into())],
            )
            .await
            .unwrap();
        assert_eq!(n, 1);

        let result = conn
            .query("SELECT id, name FROM t WHERE id=?;", &[Value::Text("1".into())])
            .await
            .unwrap();
        assert_eq!(result.size(), 1);
        assert_eq!(result.columns(), ["id", "name"]);
        assert_eq!(result.row_at(0).unwrap().get::<String>("name").unwrap(), "a");
    }

    #[tokio::test]
    async fn test_connection_returns_to_pool() {
        let pool = memory_pool();
        {
            let mut conn = pool.acquire().await.unwrap();
            conn.execute("CREATE TABLE kept (x INTEGER);", &[]).await.unwrap();
        }
        // same in-memory database means the connection was reused
        let mut conn = pool.acquire().await.unwrap();
        let result = conn.query("SELECT x FROM kept;", &[]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_statement_keeps_connection() {
        let pool = memory_pool();
        {
            let mut conn = pool.acquire().await.unwrap();
            conn.execute("CREATE TABLE kept (x INTEGER);", &[]).await.unwrap();
            let slow = conn.execute(
                "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x+1 FROM c) SELECT COUNT(*) FROM c;",
                &[],
            );
            let abandoned = tokio::time::timeout(Duration::from_millis(100), slow).await;
            assert!(abandoned.is_err());
        }
        // waits for the interrupted task to hand the permit back
        let mut conn = pool.acquire().await.unwrap();
        let result = conn.query("SELECT x FROM kept;", &[]).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_rejects_acquire() {
        let pool = memory_pool();
        pool.shutdown();
        assert!(!pool.is_open());
        assert!(matches!(pool.acquire().await, Err(OrmError::Closed(_))));
    }

    #[tokio::test]
    async fn test_bool_and_timestamp_binding() {
        let pool = memory_pool();
        let mut conn = pool.acquire().await.unwrap();
        conn.execute("CREATE TABLE f (b BOOLEAN, t DATETIME);", &[]).await.unwrap();
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        conn.execute("INSERT INTO f VALUES (?,?);", &[Value::Bool(true), Value::Timestamp(ts)])
            .await
            .unwrap();
        let result = conn.query("SELECT b, t FROM f;", &[]).await.unwrap();
        let row = result.row_at(0).unwrap();
        assert!(row.get::<bool>("b").unwrap());
        assert_eq!(row.get::<chrono::NaiveDateTime>("t").unwrap(), ts);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("rowmap-{}", std::process::id()));
        let path = dir.join("nested").join("app.db");
        let _ = std::fs::remove_dir_all(&dir);
        SqlitePool::new(&ClientConfig::sqlite(path.to_string_lossy())).unwrap();
        assert!(path.parent().unwrap().exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
