//! PostgreSQL pool on deadpool-postgres.

use super::{Connection, ConnectionPool, PooledConnection};
use crate::config::ClientConfig;
use crate::dialect::{Dialect, number_placeholders};
use crate::error::{OrmError, OrmResult};
use crate::row::TabularResult;
use crate::value::Value;
use async_trait::async_trait;
use bytes::BytesMut;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use std::error::Error;
use tokio_postgres::NoTls;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// Pool of PostgreSQL connections.
#[derive(Clone)]
pub struct PgPool {
    pool: Pool,
}

impl PgPool {
    /// Create the pool. No connection is opened until the first acquire.
    pub fn new(config: &ClientConfig) -> OrmResult<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .user(&config.user)
            .password(&config.password)
            .dbname(&config.database)
            .connect_timeout(config.timeout());
        if let Some(name) = &config.pool_name {
            pg_config.application_name(name);
        }

        let mgr = Manager::from_config(pg_config, NoTls, default_manager_config());
        let pool = Pool::builder(mgr)
            .max_size(config.pool_size.max(1))
            .build()
            .map_err(|e| OrmError::Pool(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing deadpool pool.
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn inner(&self) -> &Pool {
        &self.pool
    }
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}

#[async_trait]
impl ConnectionPool for PgPool {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn acquire(&self) -> OrmResult<PooledConnection> {
        let client = self.pool.get().await?;
        Ok(Box::new(PgConnection { client }))
    }

    fn is_open(&self) -> bool {
        !self.pool.is_closed()
    }

    fn shutdown(&self) {
        self.pool.close();
    }
}

/// A checked-out PostgreSQL connection; returned to the pool on drop.
pub struct PgConnection {
    client: Object,
}

impl PgConnection {
    async fn prepare(&self, sql: &str) -> OrmResult<tokio_postgres::Statement> {
        let sql = number_placeholders(sql);
        Ok(self.client.prepare_cached(&sql).await?)
    }
}

fn param_refs(params: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

#[async_trait]
impl Connection for PgConnection {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> OrmResult<u64> {
        let stmt = self.prepare(sql).await?;
        Ok(self.client.execute(&stmt, &param_refs(params)).await?)
    }

    async fn query(&mut self, sql: &str, params: &[Value]) -> OrmResult<TabularResult> {
        let stmt = self.prepare(sql).await?;
        let rows = self.client.query(&stmt, &param_refs(params)).await?;

        let columns: Vec<String> = stmt.columns().iter().map(|c| c.name().to_string()).collect();
        let values = rows
            .iter()
            .map(|row| {
                stmt.columns()
                    .iter()
                    .enumerate()
                    .map(|(idx, col)| decode_column(row, idx, col.name(), col.type_()))
                    .collect::<OrmResult<Vec<_>>>()
            })
            .collect::<OrmResult<Vec<_>>>()?;
        TabularResult::from_parts(columns, values)
    }
}

fn decode_column(
    row: &tokio_postgres::Row,
    idx: usize,
    name: &str,
    ty: &Type,
) -> OrmResult<Value> {
    fn get<'a, T: tokio_postgres::types::FromSql<'a>>(
        row: &'a tokio_postgres::Row,
        idx: usize,
        name: &str,
    ) -> OrmResult<Option<T>> {
        row.try_get::<_, Option<T>>(idx)
            .map_err(|e| OrmError::decode(name, e.to_string()))
    }

    let value = match *ty {
        Type::BOOL => get::<bool>(row, idx, name)?.map(Value::Bool),
        Type::INT2 => get::<i16>(row, idx, name)?.map(|v| Value::Int(v.into())),
        Type::INT4 => get::<i32>(row, idx, name)?.map(|v| Value::Int(v.into())),
        Type::INT8 => get::<i64>(row, idx, name)?.map(Value::Int),
        Type::FLOAT4 => get::<f32>(row, idx, name)?.map(|v| Value::Float(v.into())),
        Type::FLOAT8 => get::<f64>(row, idx, name)?.map(Value::Float),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, idx, name)?.map(Value::Text)
        }
        Type::TIMESTAMP => get::<chrono::NaiveDateTime>(row, idx, name)?.map(Value::Timestamp),
        Type::TIMESTAMPTZ => get::<chrono::DateTime<chrono::Utc>>(row, idx, name)?
            .map(|t| Value::Timestamp(t.naive_utc())),
        Type::BYTEA => get::<Vec<u8>>(row, idx, name)?.map(Value::Bytes),
        _ => {
            return Err(OrmError::decode(
                name,
                format!("unsupported column type {}", ty),
            ));
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

type BoxError = Box<dyn Error + Sync + Send>;

fn coerce_error(value: &Value, ty: &Type) -> BoxError {
    format!("cannot bind {} value to a {} parameter", value.kind(), ty).into()
}

/// Binds a tagged value as whatever type the server inferred for the
/// placeholder, so `Value::Text("1")` can fill an INTEGER parameter.
impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        if self.is_null() {
            return Ok(IsNull::Yes);
        }
        let int = || self.as_i64().ok_or_else(|| coerce_error(self, ty));
        let float = || self.as_f64().ok_or_else(|| coerce_error(self, ty));

        match *ty {
            Type::BOOL => self
                .as_bool()
                .ok_or_else(|| coerce_error(self, ty))?
                .to_sql(ty, out),
            Type::INT2 => i16::try_from(int()?)?.to_sql(ty, out),
            Type::INT4 => i32::try_from(int()?)?.to_sql(ty, out),
            Type::INT8 => int()?.to_sql(ty, out),
            Type::FLOAT4 => (float()? as f32).to_sql(ty, out),
            Type::FLOAT8 => float()?.to_sql(ty, out),
            Type::TIMESTAMP => self
                .as_timestamp()
                .ok_or_else(|| coerce_error(self, ty))?
                .to_sql(ty, out),
            Type::TIMESTAMPTZ => self
                .as_timestamp()
                .ok_or_else(|| coerce_error(self, ty))?
                .and_utc()
                .to_sql(ty, out),
            Type::BYTEA => match self {
                Value::Bytes(b) => b.to_sql(ty, out),
                other => other
                    .to_text()
                    .ok_or_else(|| coerce_error(self, ty))?
                    .into_bytes()
                    .to_sql(ty, out),
            },
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => self
                .to_text()
                .ok_or_else(|| coerce_error(self, ty))?
                .to_sql(ty, out),
            _ => Err(coerce_error(self, ty)),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: Value, ty: &Type) -> Result<Option<Vec<u8>>, BoxError> {
        let mut buf = BytesMut::new();
        match value.to_sql(ty, &mut buf)? {
            IsNull::Yes => Ok(None),
            IsNull::No => Ok(Some(buf.to_vec())),
        }
    }

    #[test]
    fn test_text_coerces_to_int4() {
        let bytes = encode(Value::Text("1".into()), &Type::INT4).unwrap().unwrap();
        assert_eq!(bytes, 1_i32.to_be_bytes());
    }

    #[test]
    fn test_int_coerces_to_text() {
        let bytes = encode(Value::Int(42), &Type::VARCHAR).unwrap().unwrap();
        assert_eq!(bytes, b"42");
    }

    #[test]
    fn test_null_and_mismatch() {
        assert!(encode(Value::Null, &Type::INT8).unwrap().is_none());
        assert!(encode(Value::Text("abc".into()), &Type::INT8).is_err());
        assert!(encode(Value::Int(70_000), &Type::INT2).is_err());
        assert!(encode(Value::Int(1), &Type::NUMERIC).is_err());
    }

    #[test]
    fn test_pool_from_config_is_lazy() {
        let pool = PgPool::new(&ClientConfig::new().pool_size(2)).unwrap();
        assert!(pool.is_open());
        assert_eq!(pool.inner().status().max_size, 2);
        pool.shutdown();
        assert!(!pool.is_open());
    }
}
