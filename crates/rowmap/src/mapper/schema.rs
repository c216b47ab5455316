//! Table schema derived from a [`ModelDef`](super::ModelDef).

use super::SelectOptions;
use super::SqlType;
use super::model::{ColumnOption, Model, TableOption};
use crate::builder::{
    CreateBuilder, CreateStatement, DeleteBuilder, DeleteStatement, DropBuilder, DropStatement,
    InsertBuilder, InsertStatement, SelectBuilder, SelectStatement, UpdateBuilder,
    UpdateStatement,
};
use crate::condition::Condition;
use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::row::Row;
use crate::value::Value;

/// One mapped column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Rust field the column is read from and written to.
    pub field: &'static str,
    pub name: &'static str,
    pub sql_type: SqlType,
    /// Rendered tokens: type name first, then constraints in declaration order.
    pub options: Vec<&'static str>,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub readonly: bool,
}

/// Table schema of a record type for one dialect.
///
/// Derived on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table: &'static str,
    pub create_if_not_exists: bool,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Derive the schema of `T`.
    ///
    /// Fields with an unknown SQL type are skipped. Fails with a schema
    /// error when `T` names no table.
    pub fn derive<T: Model>(dialect: Dialect) -> OrmResult<Self> {
        let def = T::model();
        let table = def.table.ok_or_else(|| {
            OrmError::schema(format!(
                "{} is not mapped to a table",
                std::any::type_name::<T>()
            ))
        })?;

        let columns = def
            .fields
            .iter()
            .filter_map(|field| {
                let type_name = dialect.sql_type_name(field.sql_type)?;
                let mut options = vec![type_name];
                for option in field.options {
                    match option {
                        ColumnOption::NotNull => options.push("NOT NULL"),
                        ColumnOption::Unique => options.push("UNIQUE"),
                        ColumnOption::AutoIncrement => {
                            options.extend(dialect.auto_increment_token());
                        }
                        ColumnOption::PrimaryKey => {}
                    }
                }
                Some(ColumnSpec {
                    field: field.field,
                    name: field.column_name(),
                    sql_type: field.sql_type,
                    options,
                    primary_key: field.has_option(ColumnOption::PrimaryKey),
                    auto_increment: field.has_option(ColumnOption::AutoIncrement),
                    readonly: field.readonly,
                })
            })
            .collect();

        Ok(Self {
            table,
            create_if_not_exists: def.options.contains(&TableOption::CreateIfNotExists),
            columns,
        })
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// CREATE TABLE statement for this schema.
    pub fn create_statement(&self) -> CreateStatement {
        let mut builder = CreateBuilder::new();
        builder
            .create(self.table)
            .if_not_exists(self.create_if_not_exists);
        for column in &self.columns {
            builder.value(column.name, column.options.as_slice());
        }
        for column in self.primary_keys() {
            builder.primary_key(column.name);
        }
        builder.build()
    }

    /// SELECT of every mapped column.
    pub fn select_statement(&self, options: &SelectOptions) -> SelectStatement {
        let mut builder = SelectBuilder::new();
        builder.select_all(self.column_names()).from(self.table);
        for condition in &options.conditions {
            builder.and_where(condition.clone());
        }
        if !options.orders.is_empty() {
            builder.order_by(&options.orders);
        }
        if let Some(limit) = options.limit {
            builder.limit(limit);
        }
        builder.build()
    }

    /// INSERT of `record`'s mapped fields, skipping auto-increment columns.
    pub fn insert_statement<T: Model>(&self, record: &T) -> OrmResult<InsertStatement> {
        let mut builder = InsertBuilder::into(self.table);
        for column in self.columns.iter().filter(|c| !c.auto_increment) {
            builder.column(column.name).value(read_field(record, column)?);
        }
        Ok(builder.build())
    }

    /// UPDATE of `record`'s non-key columns.
    ///
    /// `columns` restricts the SET list (matched by column or field name).
    /// Without conditions the row is identified by its primary key values;
    /// a table without a primary key then gets no WHERE clause and every row
    /// is updated. Returns `None` when there is nothing to set.
    pub fn update_statement<T: Model>(
        &self,
        record: &T,
        columns: Option<&[&str]>,
        conditions: &[Condition],
    ) -> OrmResult<Option<UpdateStatement>> {
        let allowed = |column: &ColumnSpec| match columns {
            Some(list) => list.iter().any(|c| *c == column.name || *c == column.field),
            None => true,
        };

        let mut builder = UpdateBuilder::new();
        builder.update(self.table);
        let mut sets = 0usize;
        for column in self.columns.iter().filter(|c| !c.primary_key && allowed(*c)) {
            builder.set(column.name, read_field(record, column)?);
            sets += 1;
        }
        if sets == 0 {
            return Ok(None);
        }

        if conditions.is_empty() {
            for column in self.primary_keys() {
                builder.and_where(Condition::eq(column.name, read_field(record, column)?));
            }
        } else {
            for condition in conditions {
                builder.and_where(condition.clone());
            }
        }
        Ok(Some(builder.build()))
    }

    pub fn delete_statement(&self, conditions: &[Condition]) -> DeleteStatement {
        let mut builder = DeleteBuilder::new();
        builder.from(self.table);
        for condition in conditions {
            builder.and_where(condition.clone());
        }
        builder.build()
    }

    pub fn drop_statement(&self) -> DropStatement {
        DropBuilder::new().drop(self.table).build()
    }

    /// Build a record from one row.
    ///
    /// Read-only columns are skipped and columns missing from the row keep
    /// the instance's default.
    pub fn materialize<T: Model>(&self, row: &Row) -> OrmResult<T> {
        let mut record = T::instantiate()
            .map_err(|e| OrmError::mapping(format!("cannot instantiate {}: {}", self.table, e)))?;
        for column in self.columns.iter().filter(|c| !c.readonly) {
            let Some(value) = row.get_value(column.name) else {
                continue;
            };
            record.set_field(column.field, value).map_err(|e| {
                OrmError::mapping(format!("{}.{}: {}", self.table, column.name, e))
            })?;
        }
        Ok(record)
    }
}

fn read_field<T: Model>(record: &T, column: &ColumnSpec) -> OrmResult<Value> {
    record.field_value(column.field).ok_or_else(|| {
        OrmError::mapping(format!("field {} has no readable value", column.field))
    })
}
