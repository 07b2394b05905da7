//! Derive macros used across tactile.
//!
//! `#[derive(WithBuilders)]` gives a struct with named fields one chainable
//! `with_<field>(value)` method per field, so style records can be written as
//! `Presentation::default().with_font_size(14.0)`.
//!
//! Per-field options go in `#[with_builders(...)]`:
//! - `skip` leaves the field without a builder
//! - `into` makes the builder accept `impl Into<FieldType>` (handy for `String`)
//!
//! ```ignore
//! use tactile_macros::WithBuilders;
//!
//! #[derive(Clone, Debug, Default, WithBuilders)]
//! pub struct Badge {
//!     pub radius: f32,
//!     #[with_builders(into)]
//!     pub caption: String,
//!     #[with_builders(skip)]
//!     pub generation: u64,
//! }
//!
//! let badge = Badge::default().with_radius(4.0).with_caption("new");
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Field, Fields};

#[derive(Default)]
struct FieldOptions {
    skip: bool,
    into: bool,
}

/// Generate consuming `with_<field>` setters for every named field
#[proc_macro_derive(WithBuilders, attributes(with_builders))]
pub fn derive_with_builders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "WithBuilders needs named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "WithBuilders can only be derived for structs",
            ))
        }
    };

    let methods = fields
        .iter()
        .map(builder_method)
        .collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#methods)*
        }
    })
}

/// The setter for one field, or nothing when the field opts out
fn builder_method(field: &Field) -> syn::Result<TokenStream2> {
    let options = parse_options(field)?;
    let Some(field_name) = field.ident.as_ref() else {
        return Ok(TokenStream2::new());
    };
    if options.skip {
        return Ok(TokenStream2::new());
    }

    let ty = &field.ty;
    let method = format_ident!("with_{}", field_name);
    let doc = format!("Returns `self` with `{field_name}` replaced.");

    let (param_ty, value) = if options.into {
        (
            quote!(impl ::core::convert::Into<#ty>),
            quote!(::core::convert::Into::into(value)),
        )
    } else {
        (quote!(#ty), quote!(value))
    };

    Ok(quote! {
        #[doc = #doc]
        #[inline]
        #[must_use]
        pub fn #method(mut self, value: #param_ty) -> Self {
            self.#field_name = #value;
            self
        }
    })
}

fn parse_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("with_builders"))
    {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("into") {
                options.into = true;
            } else {
                return Err(meta.error("unknown option, expected `skip` or `into`"));
            }
            Ok(())
        })?;
    }

    if options.skip && options.into {
        return Err(syn::Error::new(
            field.span(),
            "`skip` and `into` are mutually exclusive",
        ));
    }
    Ok(options)
}
