// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, PathArguments, Type};

/// Container options from `#[shape(...)]`.
#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    no_default: bool,
}

/// Field options from `#[shape(...)]`.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    read_only: bool,
    write_only: bool,
}

/// `#[derive(Shape)]` macro: generates the runtime descriptor and value
/// conversions for a struct with named fields.
///
/// Field types must implement `Shape` (scalars, `String`, `Vec<T>`,
/// `Option<T>`, or other derived structs). `Option<T>` fields are optional.
///
/// Attributes:
/// - `#[shape(name = "crate::Path")]` on the struct overrides the qualified
///   name (defaults to `module_path!()::Ident`);
/// - `#[shape(no_default)]` on the struct marks it as not constructible, so
///   conventions never build it from scratch;
/// - `#[shape(rename = "...")]`, `#[shape(read_only)]`,
///   `#[shape(write_only)]` on fields.
///
/// Self-referential types are not supported.
///
/// Example:
/// ```ignore
/// use shapemap::Shape;
///
/// #[derive(Shape)]
/// struct GuestProfile {
///     guest_id: String,
///     full_name: String,
///     #[shape(read_only)]
///     loyalty_tier: u8,
/// }
/// ```
#[proc_macro_derive(Shape, attributes(shape))]
pub fn derive_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Shape cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let container = parse_container_attrs(input)?;
    let short_name = name.to_string();
    let qualified = match &container.name {
        Some(custom) => quote! { #custom },
        None => quote! { concat!(module_path!(), "::", #short_name) },
    };
    let constructible = !container.no_default;

    let mut descriptors = Vec::new();
    let mut encoders = Vec::new();
    let mut decoders = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let ty = &field.ty;
        let attrs = parse_field_attrs(field)?;
        if attrs.read_only && attrs.write_only {
            return Err(syn::Error::new_spanned(
                field,
                "a field cannot be both read_only and write_only",
            ));
        }

        let field_name = attrs.rename.unwrap_or_else(|| ident.to_string());
        let optional = is_option(ty).then(|| quote! { let field = field.optional(); });
        let read_only = attrs.read_only.then(|| quote! { let field = field.read_only(); });
        let write_only = attrs.write_only.then(|| quote! { let field = field.write_only(); });

        descriptors.push(quote! {
            {
                let field = ::shapemap::types::FieldDescriptor::new(
                    #field_name,
                    <#ty as ::shapemap::types::Shape>::descriptor(),
                );
                #optional
                #read_only
                #write_only
                field
            }
        });
        encoders.push(quote! {
            ::shapemap::types::Shape::to_value(&self.#ident)
        });
        decoders.push(quote! {
            #ident: <#ty as ::shapemap::types::Shape>::from_value(
                fields.next().unwrap_or(::shapemap::types::Value::Null),
            )?
        });
    }

    let field_count = descriptors.len();

    Ok(quote! {
        impl ::shapemap::types::Shape for #name {
            fn descriptor() -> ::shapemap::types::TypeHandle {
                ::shapemap::types::memoize::<Self>(|| {
                    #[allow(unused_mut)]
                    let mut fields = ::std::vec::Vec::with_capacity(#field_count);
                    #( fields.push(#descriptors); )*
                    ::shapemap::types::TypeDescriptor::struct_type(
                        #short_name,
                        #qualified,
                        fields,
                        #constructible,
                    )
                })
            }

            fn to_value(&self) -> ::shapemap::types::Value {
                ::shapemap::types::Value::Struct(::shapemap::types::StructValue::from_fields(
                    &<Self as ::shapemap::types::Shape>::descriptor(),
                    ::std::vec![#(#encoders),*],
                ))
            }

            fn from_value(
                value: ::shapemap::types::Value,
            ) -> ::std::result::Result<Self, ::shapemap::types::ValueError> {
                let value = ::shapemap::types::StructValue::expect(
                    value,
                    &<Self as ::shapemap::types::Shape>::descriptor(),
                )?;
                #[allow(unused_mut, unused_variables)]
                let mut fields = value.into_fields().into_iter();
                ::std::result::Result::Ok(Self {
                    #(#decoders),*
                })
            }
        }
    })
}

fn parse_container_attrs(input: &DeriveInput) -> syn::Result<ContainerAttrs> {
    let mut attrs = ContainerAttrs::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("no_default") {
                attrs.no_default = true;
                Ok(())
            } else {
                Err(meta.error("unsupported shape attribute; expected `name` or `no_default`"))
            }
        })?;
    }
    Ok(attrs)
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("shape")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("read_only") {
                attrs.read_only = true;
                Ok(())
            } else if meta.path.is_ident("write_only") {
                attrs.write_only = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported shape attribute; expected `rename`, `read_only` or `write_only`",
                ))
            }
        })?;
    }
    Ok(attrs)
}

/// `Option<T>` (including `std::option::Option<T>`).
fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    type_path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Option" && matches!(segment.arguments, PathArguments::AngleBracketed(_))
    })
}
