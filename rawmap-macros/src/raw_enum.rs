//! `#[derive(RawEnum)]` expansion: string raw values for enums.
//!
//! Two variant states are supported: bare variants (no payload) and
//! single-`String`-payload variants. A payload variant with a
//! `#[raw(prefix = "...")]` override matches any raw value carrying that
//! prefix and strips it; a payload variant without a prefix is the
//! unconditional fallback bucket for everything no earlier arm matched.
//!
//! Parsing walks variants in declaration order and first match wins, so a
//! fallback variant ends the parse chain. A second fallback variant would
//! be unreachable and is rejected outright instead of silently shadowed.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse2, Data, DeriveInput, Error, Fields, LitStr, Result, Type, Variant};

use crate::attrs::resolve_variant;

/// Payload state of one variant.
enum VariantKind {
    Bare,
    SingleStringPayload,
}

fn variant_kind(variant: &Variant) -> Result<VariantKind> {
    match &variant.fields {
        Fields::Unit => Ok(VariantKind::Bare),
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let ty = &fields.unnamed.first().unwrap().ty;
            if is_string(ty) {
                Ok(VariantKind::SingleStringPayload)
            } else {
                Err(Error::new_spanned(
                    variant,
                    format!(
                        "variant `{}` must carry a single String payload to participate in RawEnum",
                        variant.ident
                    ),
                ))
            }
        }
        _ => Err(Error::new_spanned(
            variant,
            format!(
                "variant `{}` is not supported by RawEnum; use a unit variant or a single String payload",
                variant.ident
            ),
        )),
    }
}

fn is_string(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => {
            type_path.path.segments.last().is_some_and(|segment| segment.ident == "String")
        }
        _ => false,
    }
}

pub fn derive_raw_enum(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(Error::new_spanned(&input, "RawEnum can only be derived for enums"));
    };

    if data_enum.variants.is_empty() {
        return Err(Error::new_spanned(&input, "RawEnum requires at least one variant"));
    }

    let mut raw_value_arms = Vec::new();
    let mut parse_arms = Vec::new();
    let mut fallback: Option<syn::Ident> = None;

    for variant in &data_enum.variants {
        let kind = variant_kind(variant)?;
        let spec = resolve_variant(variant)?;
        let ident = &spec.ident;
        let label = LitStr::new(&spec.label, Span::call_site());

        match kind {
            VariantKind::Bare => {
                raw_value_arms.push(quote! {
                    #name::#ident => #label.to_string(),
                });
                if fallback.is_none() {
                    parse_arms.push(quote! {
                        if raw == #label {
                            return Some(#name::#ident);
                        }
                    });
                }
            }
            VariantKind::SingleStringPayload => match &spec.prefix {
                Some(prefix) => {
                    let prefix = LitStr::new(prefix, Span::call_site());
                    raw_value_arms.push(quote! {
                        #name::#ident(payload) => format!("{}{}", #prefix, payload),
                    });
                    if fallback.is_none() {
                        parse_arms.push(quote! {
                            if let Some(payload) = raw.strip_prefix(#prefix) {
                                return Some(#name::#ident(payload.to_string()));
                            }
                        });
                    }
                }
                None => {
                    // the raw value IS the payload in this branch; a custom
                    // label has nothing to apply to
                    raw_value_arms.push(quote! {
                        #name::#ident(payload) => payload.clone(),
                    });
                    if let Some(first) = &fallback {
                        return Err(Error::new_spanned(
                            variant,
                            format!(
                                "duplicate fallback variant `{}`: variant `{first}` already \
                                 captures unmatched raw values; give one of them a \
                                 #[raw(prefix = \"...\")]",
                                variant.ident
                            ),
                        ));
                    }
                    fallback = Some(ident.clone());
                    parse_arms.push(quote! {
                        return Some(#name::#ident(raw.to_string()));
                    });
                }
            },
        }
    }

    Ok(quote! {
        impl rawmap_core::RawEnum for #name {
            fn raw_value(&self) -> String {
                match self {
                    #(#raw_value_arms)*
                }
            }

            #[allow(unreachable_code)]
            fn from_raw_value(raw: &str) -> Option<Self> {
                #(#parse_arms)*
                None
            }
        }

        impl rawmap_core::RawCodable for #name {
            fn decode(value: &serde_json::Value) -> Option<Self> {
                value.as_str().and_then(<#name as rawmap_core::RawEnum>::from_raw_value)
            }

            fn encode(&self) -> serde_json::Value {
                serde_json::Value::String(rawmap_core::RawEnum::raw_value(self))
            }
        }
    })
}
