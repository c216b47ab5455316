//! Record mapping.
//!
//! A [`Model`] describes its table through a static [`ModelDef`]. The
//! [`Mapper`] derives a [`TableSpec`] from it on every call, builds the
//! matching statement and runs it through the owning [`Client`].
//!
//! Execution failures come back as `Ok(false)` from the statement-style
//! operations; schema and mapping problems are returned as errors.

pub mod model;
pub mod schema;

pub use model::{ColumnOption, FieldDef, Model, ModelDef, SqlType, TableOption};
pub use schema::{ColumnSpec, TableSpec};

use crate::client::Client;
use crate::condition::Condition;
use crate::error::OrmResult;
use crate::fragment::Order;

/// Optional clauses of a mapped SELECT.
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub limit: Option<u64>,
    pub orders: Vec<Order>,
    pub conditions: Vec<Condition>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Runs record-level operations through a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    client: &'a Client,
}

impl<'a> Mapper<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Schema of `T` for the client's dialect.
    pub fn schema<T: Model>(&self) -> OrmResult<TableSpec> {
        TableSpec::derive::<T>(self.client.dialect())
    }

    /// CREATE TABLE for `T`.
    pub async fn create<T: Model>(&self) -> OrmResult<bool> {
        let spec = self.schema::<T>()?;
        Ok(self.client.execute(&spec.create_statement()).await)
    }

    /// Load records of `T`.
    ///
    /// The whole call fails if any row cannot be turned into a record.
    pub async fn select<T: Model>(&self, options: SelectOptions) -> OrmResult<Vec<T>> {
        let spec = self.schema::<T>()?;
        let result = self.client.query(&spec.select_statement(&options)).await?;
        result.iter().map(|row| spec.materialize(row)).collect()
    }

    pub async fn select_all<T: Model>(&self) -> OrmResult<Vec<T>> {
        self.select(SelectOptions::default()).await
    }

    /// INSERT `record`.
    pub async fn insert<T: Model>(&self, record: &T) -> OrmResult<bool> {
        let spec = self.schema::<T>()?;
        let statement = spec.insert_statement(record)?;
        Ok(self.client.execute(&statement).await)
    }

    /// UPDATE the row of `record`, identified by its primary key.
    pub async fn update<T: Model>(&self, record: &T) -> OrmResult<bool> {
        self.update_with(record, None, &[]).await
    }

    /// UPDATE with an optional column allow-list and explicit conditions.
    ///
    /// Empty `conditions` fall back to primary-key equality, or to no WHERE
    /// clause when `T` has no primary key.
    pub async fn update_with<T: Model>(
        &self,
        record: &T,
        columns: Option<&[&str]>,
        conditions: &[Condition],
    ) -> OrmResult<bool> {
        let spec = self.schema::<T>()?;
        match spec.update_statement(record, columns, conditions)? {
            Some(statement) => Ok(self.client.execute(&statement).await),
            None => Ok(false),
        }
    }

    /// DELETE rows of `T` matching `conditions` (all rows when empty).
    pub async fn delete<T: Model>(&self, conditions: &[Condition]) -> OrmResult<bool> {
        let spec = self.schema::<T>()?;
        Ok(self.client.execute(&spec.delete_statement(conditions)).await)
    }

    /// DROP the table of `T`.
    pub async fn drop<T: Model>(&self) -> OrmResult<bool> {
        let spec = self.schema::<T>()?;
        Ok(self.client.execute(&spec.drop_statement()).await)
    }
}
