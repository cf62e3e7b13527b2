//! Procedural macros for the `rowcast` tuple mapping library.
//!
//! This crate provides `#[derive(Mappable)]`: a derive macro that inspects a
//! struct's `#[db]` field annotations and generates its `Mappable`
//! implementation, i.e. the binding set the mapper runs per row.
//!
//! Supported field annotations:
//! - `#[db]`: Maps the field; the column label is the snake_case of the
//!   field name.
//! - `#[db(column = "...")]`: Maps the field under an explicit label. An
//!   empty label falls back to the derived one.
//! - `#[db(flatten)]`: Merges the bindings of an embedded `Mappable` type.
//!
//! Unannotated fields are left untouched and keep their `Default` value.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr, Type};

// --- Helper Structs & Functions for Parsing ---

/// Helper to get the inner type of an `Option<T>`.
fn get_option_inner(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        let path = &type_path.path;
        if path.segments.last().is_some_and(|s| s.ident == "Option") {
            if let Some(segment) = path.segments.last() {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner_ty)) = args.args.first() {
                        return Some(inner_ty);
                    }
                }
            }
        }
    }
    None
}

/// Holds parsed metadata about a single struct field.
struct FieldMetadata {
    ident: Ident,
    ty: Type,
    /// Explicit non-empty `column = "..."` override.
    column: Option<String>,
    mapped: bool,
    flatten: bool,
}

/// Parses all named fields from a `DeriveInput` struct.
fn parse_field_metadata(input: &DeriveInput) -> Vec<FieldMetadata> {
    let fields = match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => named,
            _ => panic!("#[derive(Mappable)] only supports structs with named fields."),
        },
        _ => panic!("#[derive(Mappable)] can only be used on structs."),
    };

    fields
        .named
        .iter()
        .map(|field| {
            let ident = field.ident.as_ref().unwrap().clone();
            let ty = field.ty.clone();
            let mut column = None;
            let mut mapped = false;
            let mut flatten = false;

            for attr in &field.attrs {
                if attr.path().is_ident("db") {
                    mapped = true;
                    if let Ok(list) = attr.meta.require_list() {
                        // Propagate parse errors to cause a compile error for invalid meta, e.g., #[db(column)]
                        list.parse_nested_meta(|meta| {
                            if meta.path.is_ident("column") {
                                let value = meta
                                    .value()
                                    .expect("Invalid #[db(column = \"...\")] syntax");
                                let s: LitStr = value
                                    .parse()
                                    .expect("Invalid #[db(column = \"...\")] value");
                                // An empty override falls back to the derived label.
                                if !s.value().is_empty() {
                                    column = Some(s.value());
                                }
                            } else if meta.path.is_ident("flatten") {
                                flatten = true;
                            }
                            Ok(())
                        })
                        .expect("Invalid #[db(...)] attribute syntax");
                    }
                }
            }

            if flatten && column.is_some() {
                panic!(
                    "Field `{}`: #[db(flatten)] cannot be combined with a `column` override.",
                    ident
                );
            }

            FieldMetadata {
                ident,
                ty,
                column,
                mapped,
                flatten,
            }
        })
        .collect()
}

// --- `Mappable` derive macro ---

#[proc_macro_derive(Mappable, attributes(db))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        panic!("#[derive(Mappable)] does not support generic structs.");
    }

    let fields_metadata = parse_field_metadata(&input);

    // Flattened types merge first, in declaration order, so the struct's own
    // fields overwrite any label they share with an embedded one.
    let merges: Vec<_> = fields_metadata
        .iter()
        .filter(|f| f.flatten)
        .map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            quote! {
                set.merge(
                    <#ty as ::rowcast_core::Mappable>::bindings(),
                    |target: &mut Self| &mut target.#ident,
                );
            }
        })
        .collect();

    let binds: Vec<_> = fields_metadata
        .iter()
        .filter(|f| f.mapped && !f.flatten)
        .map(|f| {
            let ident = &f.ident;
            let field_name = LitStr::new(&ident.to_string(), ident.span());
            let label = match &f.column {
                Some(column) => {
                    let lit = LitStr::new(column, ident.span());
                    quote! { #lit.to_string() }
                }
                None => quote! { ::rowcast_core::camel_to_snake(#field_name) },
            };
            let apply = match get_option_inner(&f.ty) {
                // Option<V>: NULL and absent store None and are a success.
                Some(inner) => quote! {
                    ::std::boxed::Box::new(
                        |target: &mut Self,
                         row: &dyn ::rowcast_core::TupleRow,
                         converters: &::rowcast_core::ConverterRegistry,
                         label: &str|
                         -> ::core::result::Result<(), ::rowcast_core::ConvertError> {
                            target.#ident = converters.extract::<#inner>(row, label)?;
                            ::core::result::Result::Ok(())
                        },
                    )
                },
                // Plain V: NULL is a per-field failure and the field keeps
                // its default.
                None => {
                    let ty = &f.ty;
                    quote! {
                        ::std::boxed::Box::new(
                            |target: &mut Self,
                             row: &dyn ::rowcast_core::TupleRow,
                             converters: &::rowcast_core::ConverterRegistry,
                             label: &str|
                             -> ::core::result::Result<(), ::rowcast_core::ConvertError> {
                                match converters.extract::<#ty>(row, label)? {
                                    ::core::option::Option::Some(value) => {
                                        target.#ident = value;
                                        ::core::result::Result::Ok(())
                                    }
                                    ::core::option::Option::None => ::core::result::Result::Err(
                                        ::rowcast_core::ConvertError::NullValue,
                                    ),
                                }
                            },
                        )
                    }
                }
            };
            quote! {
                set.bind(#label, #field_name, #apply);
            }
        })
        .collect();

    let expanded = quote! {
        impl ::rowcast_core::Mappable for #struct_name {
            fn bindings() -> ::rowcast_core::BindingSet<Self> {
                let mut set = ::rowcast_core::BindingSet::new();
                #(#merges)*
                #(#binds)*
                set
            }
        }
    };

    expanded.into()
}
