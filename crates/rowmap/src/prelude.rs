//! Common imports:
//!
//! ```ignore
//! use rowmap::prelude::*;
//! ```

pub use crate::builder::{
    CreateBuilder, DeleteBuilder, DropBuilder, InsertBuilder, SelectBuilder, SqlStatement,
    UpdateBuilder,
};
pub use crate::{
    Client, ClientConfig, Condition, Dialect, Join, Model, OrmError, OrmResult, Operator, Order,
    SelectOptions, TabularResult, Value,
};
pub use crate::{Function, FunctionKind};
