//! Procedural macros for rawmap dictionary-backed models
//!
//! This crate provides the macro implementations that rewrite stored fields
//! into raw-map-backed accessors and synthesize string raw values for
//! enums. Most users depend on `rawmap-core`, which re-exports everything
//! here behind its default `macros` feature.

use proc_macro::TokenStream;

mod accessors;
mod attrs;
mod model;
mod raw_enum;
mod shape;

/// Attribute macro turning a struct into a dictionary-backed model
///
/// Every eligible field (public, not `#[raw(skip)]`) is removed from the
/// struct and replaced by a getter/setter pair reading and writing a
/// private `rawmap_core::RawMap`. The macro also generates:
/// - `from_raw(RawMap) -> Self` and a read-only `raw()` accessor
/// - `RawRepresentable` and `RawCodable` impls, so models nest
/// - `PartialEq` over the rewritten fields with `#[raw_model(equatable)]`
/// - additionally `Hash` with `#[raw_model(hashable)]`
///
/// Non-`Option` scalar fields must declare a `#[raw(default = ...)]` read
/// fallback; `Vec` fields fall back to empty. On an `Option` field the
/// fallback replaces the whole optional read, so the expression must be
/// `Option`-typed itself (`default = Some(...)`). Unknown keys in the map
/// are preserved verbatim across reads and writes.
///
/// # Example
///
/// ```rust,ignore
/// use rawmap_core::prelude::*;
///
/// #[raw_model(equatable)]
/// pub struct Device {
///     #[raw("type", default = MessageKind::Text)]
///     pub kind: MessageKind,
///
///     #[raw(default = 0)]
///     pub var: i64,
///
///     pub history: Vec<Location>,
///
///     #[raw(skip)]
///     pub cached: u32,
/// }
/// ```
#[proc_macro_attribute]
pub fn raw_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model::expand_raw_model(attr.into(), item.into()).into()
}

/// Derive macro for string raw values on enums
///
/// Generates `rawmap_core::RawEnum` (a `raw_value` accessor and a
/// `from_raw_value` parser walking variants in declaration order) and
/// `rawmap_core::RawCodable`, so the enum participates in raw models as a
/// composite scalar.
///
/// Unit variants match their identifier, or the `#[raw("label")]` override.
/// A single-`String`-payload variant with `#[raw(prefix = "p-")]` matches
/// raw values by prefix and carries the remainder; without a prefix it is
/// the fallback bucket for any otherwise-unmatched raw value.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(RawEnum, Debug, PartialEq)]
/// enum Visa {
///     #[raw("tourist")]
///     Tourist,
///     #[raw("business")]
///     Business,
///     Other(String),
/// }
///
/// assert_eq!(Visa::from_raw_value("unknown-x"), Some(Visa::Other("unknown-x".into())));
/// ```
#[proc_macro_derive(RawEnum, attributes(raw))]
pub fn derive_raw_enum(input: TokenStream) -> TokenStream {
    raw_enum::derive_raw_enum(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
