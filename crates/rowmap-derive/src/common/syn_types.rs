//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Name of the `rowmap::SqlType` variant for a field type.
///
/// `Option<T>` maps like `T`. Types outside the fixed table map to `Unknown`.
pub fn sql_type_variant(ty: &syn::Type) -> &'static str {
    let ty = option_inner(ty).unwrap_or(ty);
    let syn::Type::Path(type_path) = ty else {
        return "Unknown";
    };
    if type_path.qself.is_some() {
        return "Unknown";
    }
    let Some(seg) = type_path.path.segments.last() else {
        return "Unknown";
    };
    if !seg.arguments.is_none() {
        return "Unknown";
    }
    match seg.ident.to_string().as_str() {
        "i32" => "Integer",
        "String" => "VarChar",
        "bool" => "Boolean",
        "i64" => "BigInt",
        "f64" => "Double",
        "f32" => "Float",
        "i8" | "u8" => "TinyInt",
        "i16" => "SmallInt",
        "char" => "Char",
        "NaiveDateTime" => "Timestamp",
        _ => "Unknown",
    }
}
