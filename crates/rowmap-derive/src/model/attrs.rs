//! Attribute parsing for the Model derive macro.
//!
//! Handles struct-level and field-level `#[orm(...)]` attributes.

use crate::sql_ident::{parse_sql_ident, parse_sql_ident_with_span};
use syn::spanned::Spanned;
use syn::{DeriveInput, LitStr, Result};

/// Struct-level `#[orm(table = "...", create_if_not_exists)]`.
#[derive(Default)]
pub(super) struct TableAttr {
    pub table: Option<String>,
    pub create_if_not_exists: bool,
}

pub(super) fn parse_table_attr(input: &DeriveInput) -> Result<TableAttr> {
    let mut out = TableAttr::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: LitStr = meta.value()?.parse()?;
                out.table = Some(parse_sql_ident(&lit, "table")?);
                Ok(())
            } else if meta.path.is_ident("create_if_not_exists") {
                out.create_if_not_exists = true;
                Ok(())
            } else {
                Err(meta.error("unknown table attribute (expected `table` or `create_if_not_exists`)"))
            }
        })?;
    }
    Ok(out)
}

/// Column option flags, in the order written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ColumnFlag {
    NotNull,
    AutoIncrement,
    Unique,
    PrimaryKey,
}

impl ColumnFlag {
    pub fn variant(&self) -> &'static str {
        match self {
            ColumnFlag::NotNull => "NotNull",
            ColumnFlag::AutoIncrement => "AutoIncrement",
            ColumnFlag::Unique => "Unique",
            ColumnFlag::PrimaryKey => "PrimaryKey",
        }
    }
}

/// Field-level `#[orm(column[ = "..."], <flags>)]`.
#[derive(Default)]
pub(super) struct FieldAttr {
    /// `column` was present.
    pub mapped: bool,
    /// Explicit column name.
    pub column: Option<String>,
    pub flags: Vec<ColumnFlag>,
    pub readonly: bool,
}

pub(super) fn parse_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            let flag = if meta.path.is_ident("column") {
                out.mapped = true;
                if meta.input.peek(syn::Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.column = Some(parse_sql_ident(&lit, "column")?);
                }
                return Ok(());
            } else if meta.path.is_ident("readonly") {
                out.readonly = true;
                return Ok(());
            } else if meta.path.is_ident("not_null") {
                ColumnFlag::NotNull
            } else if meta.path.is_ident("auto_increment") {
                ColumnFlag::AutoIncrement
            } else if meta.path.is_ident("unique") {
                ColumnFlag::Unique
            } else if meta.path.is_ident("primary_key") {
                ColumnFlag::PrimaryKey
            } else {
                return Err(meta.error(
                    "unknown field attribute (expected `column`, `not_null`, `auto_increment`, `unique`, `primary_key` or `readonly`)",
                ));
            };
            if out.flags.contains(&flag) {
                return Err(meta.error("duplicate column option"));
            }
            out.flags.push(flag);
            Ok(())
        })?;
    }

    if !out.mapped && (!out.flags.is_empty() || out.readonly) {
        return Err(syn::Error::new(
            field.span(),
            "column options require `column` in the same #[orm(...)]",
        ));
    }
    if out.mapped && out.column.is_none() {
        if let Some(ident) = &field.ident {
            // raw identifiers map to their bare name
            let name = ident.to_string();
            let name = name.strip_prefix("r#").unwrap_or(&name);
            parse_sql_ident_with_span(name, ident.span(), "column")?;
        }
    }
    Ok(out)
}
