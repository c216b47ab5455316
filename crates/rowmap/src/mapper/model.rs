//! Static schema descriptors for mapped record types.

use crate::error::OrmResult;
use crate::value::Value;

/// Column type of a mapped field.
///
/// Fields whose Rust type has no SQL counterpart are [`SqlType::Unknown`];
/// they take no part in schema, insert, update or select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// `i32`
    Integer,
    /// `String`
    VarChar,
    /// `bool`
    Boolean,
    /// `i64`
    BigInt,
    /// `f64`
    Double,
    /// `f32`
    Float,
    /// `i8` / `u8`
    TinyInt,
    /// `i16`
    SmallInt,
    /// `char`
    Char,
    /// `chrono::NaiveDateTime`
    Timestamp,
    Unknown,
}

/// Table-level option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableOption {
    CreateIfNotExists,
}

/// Column-level option, kept in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnOption {
    NotNull,
    AutoIncrement,
    Unique,
    PrimaryKey,
}

/// One declared field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field name.
    pub field: &'static str,
    /// Explicit column name; defaults to `field`.
    pub column: Option<&'static str>,
    pub sql_type: SqlType,
    pub options: &'static [ColumnOption],
    /// `Option<T>` field.
    pub nullable: bool,
    /// Never assigned when rows are materialized.
    pub readonly: bool,
}

impl FieldDef {
    pub const fn new(field: &'static str, sql_type: SqlType) -> Self {
        Self {
            field,
            column: None,
            sql_type,
            options: &[],
            nullable: false,
            readonly: false,
        }
    }

    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    pub const fn options(mut self, options: &'static [ColumnOption]) -> Self {
        self.options = options;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn column_name(&self) -> &'static str {
        self.column.unwrap_or(self.field)
    }

    pub fn has_option(&self, option: ColumnOption) -> bool {
        self.options.contains(&option)
    }
}

/// Schema descriptor of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDef {
    /// Table name; `None` when the type is not marked as a table.
    pub table: Option<&'static str>,
    pub options: &'static [TableOption],
    /// Mapped fields in declaration order.
    pub fields: &'static [FieldDef],
}

/// A record type that maps to table rows.
///
/// Usually derived:
///
/// ```ignore
/// use rowmap::Model;
///
/// #[derive(Debug, Default, Model)]
/// #[orm(table = "test", create_if_not_exists)]
/// struct Test {
///     #[orm(column, unique, primary_key, auto_increment)]
///     id: i32,
///     #[orm(column = "custom_name", not_null)]
///     name: String,
///     #[orm(column = "custom_uuid")]
///     uuid: String,
/// }
/// ```
pub trait Model: Sized {
    fn model() -> ModelDef;

    /// Fresh instance that row values are assigned into.
    fn instantiate() -> OrmResult<Self>;

    /// Current value of a mapped field, `None` for unknown names.
    fn field_value(&self, field: &str) -> Option<Value>;

    /// Assign a mapped field from a row value.
    fn set_field(&mut self, field: &str, value: &Value) -> OrmResult<()>;
}
