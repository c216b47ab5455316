//! Model derive macro implementation.

mod attrs;

use crate::common::syn_types::{option_inner, sql_type_variant};
use attrs::{parse_field_attr, parse_table_attr};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

struct MappedField {
    ident: Ident,
    field: String,
    column: Option<String>,
    sql_type: &'static str,
    flags: Vec<&'static str>,
    nullable: bool,
    readonly: bool,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let table = parse_table_attr(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Model can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Model can only be derived for structs",
            ));
        }
    };

    let mut mapped = Vec::new();
    for field in fields {
        let attr = parse_field_attr(field)?;
        if !attr.mapped {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let field_name = ident.to_string();
        let field_name = field_name
            .strip_prefix("r#")
            .unwrap_or(&field_name)
            .to_string();
        mapped.push(MappedField {
            ident,
            field: field_name,
            column: attr.column,
            sql_type: sql_type_variant(&field.ty),
            flags: attr.flags.iter().map(|f| f.variant()).collect(),
            nullable: option_inner(&field.ty).is_some(),
            readonly: attr.readonly,
        });
    }

    let table_tokens = match &table.table {
        Some(t) => quote! { ::core::option::Option::Some(#t) },
        None => quote! { ::core::option::Option::None },
    };
    let table_options = if table.create_if_not_exists {
        quote! { ::rowmap::TableOption::CreateIfNotExists }
    } else {
        quote! {}
    };

    let field_defs = mapped.iter().map(|f| {
        let field = &f.field;
        let column = match &f.column {
            Some(c) => quote! { ::core::option::Option::Some(#c) },
            None => quote! { ::core::option::Option::None },
        };
        let sql_type = Ident::new(f.sql_type, Span::call_site());
        let flags = f.flags.iter().map(|v| {
            let v = Ident::new(v, Span::call_site());
            quote! { ::rowmap::ColumnOption::#v }
        });
        let nullable = f.nullable;
        let readonly = f.readonly;
        quote! {
            ::rowmap::FieldDef {
                field: #field,
                column: #column,
                sql_type: ::rowmap::SqlType::#sql_type,
                options: &[#(#flags),*],
                nullable: #nullable,
                readonly: #readonly,
            }
        }
    });

    // Unknown-typed fields keep their descriptor entry but get no accessors.
    let known: Vec<&MappedField> = mapped.iter().filter(|f| f.sql_type != "Unknown").collect();

    let read_arms = known.iter().map(|f| {
        let ident = &f.ident;
        let field = &f.field;
        quote! {
            #field => ::core::option::Option::Some(::rowmap::ToValue::to_value(&self.#ident)),
        }
    });

    let write_arms = known.iter().filter(|f| !f.readonly).map(|f| {
        let ident = &f.ident;
        let field = &f.field;
        quote! {
            #field => {
                self.#ident = ::rowmap::FromValue::from_value(value)?;
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::rowmap::Model for #name #ty_generics #where_clause {
            fn model() -> ::rowmap::ModelDef {
                const FIELDS: &[::rowmap::FieldDef] = &[#(#field_defs),*];
                ::rowmap::ModelDef {
                    table: #table_tokens,
                    options: &[#table_options],
                    fields: FIELDS,
                }
            }

            fn instantiate() -> ::rowmap::OrmResult<Self> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }

            fn field_value(&self, field: &str) -> ::core::option::Option<::rowmap::Value> {
                match field {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_field(&mut self, field: &str, value: &::rowmap::Value) -> ::rowmap::OrmResult<()> {
                match field {
                    #(#write_arms)*
                    _ => {}
                }
                ::core::result::Result::Ok(())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_expand_ok() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "test", create_if_not_exists)]
            struct Test {
                #[orm(column, unique, primary_key, auto_increment)]
                id: i32,
                #[orm(column = "custom_name", not_null)]
                name: String,
                cache: Vec<u8>,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("CreateIfNotExists"));
        assert!(out.contains("\"custom_name\""));
        assert!(!out.contains("cache"));
    }

    #[test]
    fn test_options_without_column_rejected() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "test")]
            struct Test {
                #[orm(primary_key)]
                id: i32,
            }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn test_invalid_table_name_rejected() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "bad name")]
            struct Test {
                #[orm(column)]
                id: i32,
            }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn test_enum_rejected() {
        let input: DeriveInput = parse_quote! {
            enum E { A }
        };
        assert!(expand(input).is_err());
    }
}
