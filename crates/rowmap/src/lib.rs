//! # rowmap
//!
//! SQL statement builders and a record mapper for PostgreSQL and SQLite.
//!
//! ## Features
//!
//! - **Builders**: CREATE / SELECT / INSERT / UPDATE / DELETE / DROP render
//!   exact SQL text with `?` placeholders and an ordered parameter list
//! - **Materialized results**: every query drains into a [`TabularResult`]
//! - **Record mapping**: `#[derive(Model)]` describes a table; the
//!   [`Mapper`] creates, selects, inserts, updates and deletes records
//! - **Two dialects**: PostgreSQL (deadpool + tokio-postgres) and SQLite
//!   (rusqlite), selected in [`ClientConfig`]
//!
//! ## Builders
//!
//! ```
//! use rowmap::builder::{SqlStatement, UpdateBuilder};
//! use rowmap::Condition;
//!
//! let stmt = UpdateBuilder::new()
//!     .update("test")
//!     .set("name", "Jacky")
//!     .set("uuid", "0000")
//!     .and_where(Condition::eq("id", 1))
//!     .build();
//! assert_eq!(stmt.sql(), "UPDATE test SET name=?,uuid=? WHERE id=?;");
//! assert_eq!(stmt.params().len(), 3);
//! ```
//!
//! ## Mapping
//!
//! ```ignore
//! use rowmap::{Client, ClientConfig, Model};
//!
//! #[derive(Debug, Default, Model)]
//! #[orm(table = "test", create_if_not_exists)]
//! struct Test {
//!     #[orm(column, primary_key, auto_increment)]
//!     id: i32,
//!     #[orm(column = "custom_name", not_null)]
//!     name: String,
//! }
//!
//! let client = Client::connect(ClientConfig::sqlite("app.db")).await?;
//! let mapper = client.mapper();
//! mapper.create::<Test>().await?;
//! mapper.insert(&Test { id: 0, name: "Jack".into() }).await?;
//! let rows: Vec<Test> = mapper.select_all().await?;
//! ```

// Lets `#[derive(Model)]` output (which names `::rowmap`) compile inside this crate.
extern crate self as rowmap;

pub mod builder;
pub mod client;
pub mod condition;
pub mod config;
pub mod dialect;
pub mod dispatch;
pub mod error;
pub mod fragment;
pub mod log;
pub mod mapper;
pub mod pool;
pub mod prelude;
pub mod row;
pub mod value;

pub use builder::{
    CreateBuilder, DeleteBuilder, DropBuilder, InsertBuilder, RawStatement, SelectBuilder,
    SqlStatement, Statement, StatementKind, UpdateBuilder,
};
pub use client::Client;
pub use condition::{Condition, Operator};
pub use config::ClientConfig;
pub use dialect::Dialect;
pub use dispatch::{Dispatcher, TaskHandle};
pub use error::{OrmError, OrmResult};
pub use fragment::{Direction, Function, FunctionKind, Join, JoinKind, Order};
pub use log::SqlLogger;
pub use mapper::{
    ColumnOption, FieldDef, Mapper, Model, ModelDef, SelectOptions, SqlType, TableOption,
    TableSpec,
};
pub use pool::{Connection, ConnectionPool, PooledConnection};
pub use row::{Row, TabularResult};
pub use value::{FromValue, ToValue, Value};

#[cfg(feature = "derive")]
pub use rowmap_derive::Model;
