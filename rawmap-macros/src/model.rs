//! `#[raw_model]` expansion: the struct rewriting pipeline.
//!
//! Rewrites every eligible stored field of a named-field struct into a
//! getter/setter pair over a private backing map, then synthesizes the
//! aggregate surface: `from_raw` constructor, read-only `raw` accessor,
//! the `RawRepresentable`/`RawCodable` impls, and (on request) `PartialEq`
//! and `Hash` over the rewritten members.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, Data, DeriveInput, Error, Fields, Result};

use crate::accessors;
use crate::attrs::{resolve_field, strip_raw_attrs, FieldSpec};
use crate::shape::classify;

/// Declaration-level conformance selection, from the macro argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conformance {
    None,
    Equatable,
    /// Implies equatable.
    Hashable,
}

fn parse_conformance(attr: TokenStream) -> Result<Conformance> {
    if attr.is_empty() {
        return Ok(Conformance::None);
    }
    let ident: syn::Ident = parse2(attr)?;
    match ident.to_string().as_str() {
        "equatable" => Ok(Conformance::Equatable),
        "hashable" => Ok(Conformance::Hashable),
        other => Err(Error::new(
            ident.span(),
            format!("unknown raw_model option `{other}`; expected `equatable` or `hashable`"),
        )),
    }
}

/// Checks the declaration's derive list for a conformance the user already
/// declared, so generation does not redeclare it.
fn already_derives(input: &DeriveInput, trait_name: &str) -> bool {
    use quote::ToTokens;
    input.attrs.iter().any(|attr| {
        attr.path().is_ident("derive")
            && attr.meta.to_token_stream().to_string().contains(trait_name)
    })
}

pub fn expand_raw_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    match try_expand(attr, item) {
        Ok(expanded) => expanded,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let conformance = parse_conformance(attr)?;
    let input: DeriveInput = parse2(item.clone())?;

    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() || input.generics.where_clause.is_some() {
        return Err(Error::new_spanned(
            &input.generics,
            "raw_model does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => &fields_named.named,
            _ => {
                return Err(Error::new_spanned(
                    name,
                    "raw_model only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(name, "raw_model can only be applied to structs"));
        }
    };

    // Idempotence guard: a struct that already carries the backing field was
    // expanded before (or manages one by hand); re-emit it untouched.
    if fields.iter().any(|field| field.ident.as_ref().is_some_and(|id| id == "raw_storage")) {
        return Ok(item);
    }

    let mut specs: Vec<FieldSpec> = Vec::with_capacity(fields.len());
    for field in fields {
        specs.push(resolve_field(field)?);
    }

    let mut accessor_fns = Vec::new();
    let mut eligible_getters = Vec::new();
    let mut encode_exprs = Vec::new();
    let mut retained_fields = Vec::new();

    for (field, spec) in fields.iter().zip(&specs) {
        if spec.eligible() {
            let shape = classify(&spec.ty)?;
            let accessor = accessors::emit(spec, &shape)?;
            eligible_getters.push(accessor.getter_ident.clone());
            encode_exprs.push(accessor.encode_expr.clone());
            accessor_fns.push(accessor.getter);
            accessor_fns.push(accessor.setter);
        } else {
            retained_fields.push(strip_raw_attrs(field));
        }
    }

    let struct_attrs = &input.attrs;
    let retained_idents: Vec<_> =
        retained_fields.iter().map(|field| field.ident.clone().unwrap()).collect();

    let equality_impl = if conformance != Conformance::None && !already_derives(&input, "PartialEq")
    {
        quote! {
            impl ::core::cmp::PartialEq for #name {
                fn eq(&self, other: &Self) -> bool {
                    true #(&& self.#eligible_getters() == other.#eligible_getters())*
                }
            }
        }
    } else {
        quote! {}
    };

    let hash_impl = if conformance == Conformance::Hashable && !already_derives(&input, "Hash") {
        quote! {
            impl ::core::hash::Hash for #name {
                fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    #(rawmap_core::codec::hash_value(&#encode_exprs, state);)*
                }
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        #(#struct_attrs)*
        #vis struct #name {
            raw_storage: rawmap_core::RawMap,
            #(#retained_fields),*
        }

        impl #name {
            /// Builds an instance over the given backing map. Retained
            /// fields start at their `Default` value; map entries are taken
            /// as-is without validation.
            #vis fn from_raw(raw: rawmap_core::RawMap) -> Self {
                Self {
                    raw_storage: raw,
                    #(#retained_idents: ::core::default::Default::default()),*
                }
            }

            /// Read-only view of the backing map, unknown keys included.
            #vis fn raw(&self) -> &rawmap_core::RawMap {
                &self.raw_storage
            }

            #(#accessor_fns)*
        }

        impl rawmap_core::RawRepresentable for #name {
            fn from_raw(raw: rawmap_core::RawMap) -> Self {
                #name::from_raw(raw)
            }

            fn raw(&self) -> &rawmap_core::RawMap {
                &self.raw_storage
            }
        }

        impl rawmap_core::RawCodable for #name {
            fn decode(value: &serde_json::Value) -> Option<Self> {
                value.as_object().cloned().map(#name::from_raw)
            }

            fn encode(&self) -> serde_json::Value {
                serde_json::Value::Object(self.raw_storage.clone())
            }
        }

        #equality_impl

        #hash_impl
    })
}
