//! Accessor code generation for rewritten fields.
//!
//! Every eligible field becomes a getter/setter pair routing through the
//! backing map. Four strategies exist, selected by the field's shape and
//! element primitiveness:
//!
//! - primitive scalar: soft serde decode, default (or `None`) fallback
//! - composite scalar: `RawCodable` decode, default (or `None`) fallback
//! - primitive array: lossy element projection through serde
//! - composite array: lossy element projection through `RawCodable`
//!
//! Reads never fail: a missing or mistyped entry yields the field's default
//! expression (re-evaluated on each read, never cached). Writes always
//! store the encoded value verbatim; an optional write of `None` stores the
//! `Null` absent sentinel rather than an empty value.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Error, Expr, LitStr, Result};

use crate::attrs::FieldSpec;
use crate::shape::{Shape, TypeShape};

/// Generated accessor pair for one field, plus the encode expression the
/// aggregate `Hash` impl folds.
#[derive(Debug)]
pub struct Accessor {
    pub getter: TokenStream,
    pub setter: TokenStream,
    /// Expression of type `serde_json::Value` encoding `self.<getter>()`.
    pub encode_expr: TokenStream,
    pub getter_ident: syn::Ident,
}

/// Emits the accessor pair for one eligible field.
pub fn emit(spec: &FieldSpec, shape: &TypeShape) -> Result<Accessor> {
    let ident = &spec.ident;
    let vis = &spec.vis;
    let setter_ident = format_ident!("set_{}", ident);
    let key = LitStr::new(&spec.key, Span::call_site());
    let ty = &spec.ty;
    let elem = &shape.elem;

    // Non-optional scalars cannot synthesize a read fallback on their own.
    if shape.shape == Shape::Scalar && spec.default.is_none() {
        return Err(Error::new_spanned(
            ident,
            format!(
                "field `{ident}` has a non-optional type and no fallback; \
                 add #[raw(default = ...)] or make the type Option<...>"
            ),
        ));
    }

    let elem_decode = if shape.elem_primitive {
        quote! { rawmap_core::codec::decode_value::<#elem> }
    } else {
        quote! { <#elem as rawmap_core::RawCodable>::decode }
    };
    let elem_encode = if shape.elem_primitive {
        quote! { rawmap_core::codec::encode_value::<#elem> }
    } else {
        quote! { rawmap_core::RawCodable::encode }
    };

    let (read_expr, write_expr) = match shape.shape {
        Shape::Scalar => {
            let default = spec.default.as_ref().unwrap();
            let read = quote! {
                self.raw_storage
                    .get(#key)
                    .and_then(#elem_decode)
                    .unwrap_or_else(|| #default)
            };
            let write = quote! { #elem_encode(&value) };
            (read, write)
        }
        Shape::Optional => {
            let fallback = optional_fallback(spec.default.as_ref());
            let read = quote! {
                self.raw_storage
                    .get(#key)
                    .and_then(#elem_decode)
                    #fallback
            };
            let write = quote! { rawmap_core::codec::encode_option(&value, #elem_encode) };
            (read, write)
        }
        Shape::Array => {
            let default = match spec.default.as_ref() {
                Some(expr) => quote! { #expr },
                None => quote! { ::std::vec::Vec::new() },
            };
            let read = quote! {
                self.raw_storage
                    .get(#key)
                    .and_then(|value| rawmap_core::codec::decode_array(value, #elem_decode))
                    .unwrap_or_else(|| #default)
            };
            let write = quote! { rawmap_core::codec::encode_array(&value, #elem_encode) };
            (read, write)
        }
        Shape::OptionalArray => {
            let fallback = optional_fallback(spec.default.as_ref());
            let read = quote! {
                self.raw_storage
                    .get(#key)
                    .and_then(|value| rawmap_core::codec::decode_array(value, #elem_decode))
                    #fallback
            };
            let write = quote! {
                rawmap_core::codec::encode_option(&value, |items| {
                    rawmap_core::codec::encode_array(items, #elem_encode)
                })
            };
            (read, write)
        }
    };

    let getter = quote! {
        #vis fn #ident(&self) -> #ty {
            #read_expr
        }
    };
    let setter = quote! {
        #vis fn #setter_ident(&mut self, value: #ty) {
            self.raw_storage.insert(#key.to_string(), #write_expr);
        }
    };

    // Hash folds the member as it would be written back to storage, so a
    // value read through a default and the same value stored explicitly
    // hash alike.
    let encode_expr = match shape.shape {
        Shape::Scalar => quote! { { let value = self.#ident(); #elem_encode(&value) } },
        Shape::Optional => {
            quote! { { let value = self.#ident(); rawmap_core::codec::encode_option(&value, #elem_encode) } }
        }
        Shape::Array => {
            quote! { { let value = self.#ident(); rawmap_core::codec::encode_array(&value, #elem_encode) } }
        }
        Shape::OptionalArray => quote! { {
            let value = self.#ident();
            rawmap_core::codec::encode_option(&value, |items| {
                rawmap_core::codec::encode_array(items, #elem_encode)
            })
        } },
    };

    Ok(Accessor { getter, setter, encode_expr, getter_ident: ident.clone() })
}

/// The fallback stands in for the whole optional read, so the default
/// expression on an `Option` field must be `Option`-typed itself.
fn optional_fallback(default: Option<&Expr>) -> TokenStream {
    match default {
        Some(expr) => quote! { .or_else(|| #expr) },
        None => quote! {},
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;
    use crate::attrs::resolve_field;
    use crate::shape::classify;

    fn emit_for(field: syn::Field) -> Result<Accessor> {
        let spec = resolve_field(&field)?;
        let shape = classify(&spec.ty)?;
        emit(&spec, &shape)
    }

    #[test]
    fn primitive_scalar_with_default() {
        let accessor =
            emit_for(parse_quote! { #[raw(default = 0)] pub var: i64 }).unwrap();
        let getter = accessor.getter.to_string();
        assert!(getter.contains("decode_value"));
        assert!(getter.contains("unwrap_or_else"));
        assert!(accessor.setter.to_string().contains("set_var"));
    }

    #[test]
    fn missing_default_on_non_optional_scalar_is_fatal() {
        let err = emit_for(parse_quote! { pub var: i64 }).unwrap_err();
        assert!(err.to_string().contains("`var`"));
        assert!(err.to_string().contains("default"));
    }

    #[test]
    fn optional_scalar_needs_no_default() {
        let accessor = emit_for(parse_quote! { pub note: Option<String> }).unwrap();
        assert!(!accessor.getter.to_string().contains("unwrap_or_else"));
    }

    #[test]
    fn optional_default_replaces_the_whole_read() {
        let accessor =
            emit_for(parse_quote! { #[raw(default = Some(9))] pub var: Option<i64> }).unwrap();
        let getter = accessor.getter.to_string();
        assert!(getter.contains("or_else"));
        assert!(getter.contains("Some (9)"));
    }

    #[test]
    fn composite_scalar_uses_raw_codable() {
        let accessor =
            emit_for(parse_quote! { #[raw(default = Location::origin())] pub home: Location })
                .unwrap();
        assert!(accessor.getter.to_string().contains("RawCodable"));
    }

    #[test]
    fn array_defaults_to_empty_vec() {
        let accessor = emit_for(parse_quote! { pub history: Vec<Location> }).unwrap();
        let getter = accessor.getter.to_string();
        assert!(getter.contains("decode_array"));
        assert!(getter.contains("Vec :: new"));
    }

    #[test]
    fn key_override_lands_in_both_accessors() {
        let accessor =
            emit_for(parse_quote! { #[raw("type", default = 0)] pub kind: i64 }).unwrap();
        assert!(accessor.getter.to_string().contains("\"type\""));
        assert!(accessor.setter.to_string().contains("\"type\""));
    }

    #[test]
    fn optional_array_write_goes_through_encode_option() {
        let accessor = emit_for(parse_quote! { pub tags: Option<Vec<String>> }).unwrap();
        assert!(accessor.setter.to_string().contains("encode_option"));
    }
}
