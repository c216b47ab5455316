//! Derive macros for rowmap
//!
//! Provides `#[derive(Model)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod common;
mod model;
mod sql_ident;

/// Derive the `rowmap::Model` schema descriptor and field accessors.
///
/// # Example
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
///     // not a column
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Attributes
///
/// Struct level (optional; without `table` every mapping call fails with a
/// schema error):
/// - `#[orm(table = "name")]` - table name
/// - `#[orm(create_if_not_exists)]` - render `CREATE TABLE IF NOT EXISTS`
///
/// Field level (only fields with `column` are mapped):
/// - `#[orm(column)]` / `#[orm(column = "name")]` - map the field
/// - `not_null`, `unique`, `auto_increment`, `primary_key` - column options,
///   kept in the order written
/// - `readonly` - never assigned when rows are loaded
///
/// The struct must implement `Default`. `Option<T>` fields are nullable.
/// Fields whose type has no SQL mapping are left out of every statement.
#[proc_macro_derive(Model, attributes(orm))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
