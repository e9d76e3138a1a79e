//! Storage alias and capability traits for raw-backed models.
//!
//! Everything `#[raw_model]` and `#[derive(RawEnum)]` generate conforms to
//! the traits in this module. User code rarely implements them by hand; the
//! macros emit the impls.

use serde_json::Value;

use crate::error::RawMapError;

/// The backing dictionary of a raw-backed model.
///
/// A plain string-keyed JSON object map. Every rewritten property reads and
/// writes one entry of this map; keys the model does not declare are simply
/// carried along.
pub type RawMap = serde_json::Map<String, Value>;

/// Capability of types whose entire state is a [`RawMap`].
///
/// `#[raw_model]` implements this for the annotated struct. It is also the
/// contract that lets raw-backed models nest: a composite field only needs
/// its type to be constructible from (and expressible as) a raw map.
pub trait RawRepresentable: Sized {
    /// Builds an instance directly over the given map. No validation is
    /// performed; reads fall back to field defaults where entries are
    /// missing or untyped.
    fn from_raw(raw: RawMap) -> Self;

    /// Read-only view of the entire backing map, including unknown keys.
    fn raw(&self) -> &RawMap;
}

/// The encode/decode registry for composite values.
///
/// Composite field types (anything outside the primitive set) must expose
/// this capability so the generated accessors can project them through the
/// storage map.
///
/// Contract: [`decode`](RawCodable::decode) returns `None` on any shape
/// mismatch instead of erroring, and encoding an absent value must produce
/// [`Value::Null`], never panic.
pub trait RawCodable: Sized {
    /// Attempts to rebuild a value from its raw representation.
    fn decode(value: &Value) -> Option<Self>;

    /// Projects the value into its raw representation.
    fn encode(&self) -> Value;
}

/// String raw-value capability for enums.
///
/// Implemented by `#[derive(RawEnum)]`. Parsing walks the variants in
/// declaration order: exact labels first-match, prefixed payload variants
/// strip their prefix, and a payload variant without prefix captures
/// everything that remains.
pub trait RawEnum: Sized {
    /// The string this value serializes to.
    fn raw_value(&self) -> String;

    /// Parses a raw string back into a variant. `None` when nothing matches
    /// and no fallback variant exists.
    fn from_raw_value(raw: &str) -> Option<Self>;
}

/// Parses JSON text into a [`RawMap`].
///
/// Convenience for constructing models from wire payloads:
///
/// ```rust,ignore
/// let device = Device::from_raw(rawmap_core::from_json_str(body)?);
/// ```
pub fn from_json_str(text: &str) -> Result<RawMap, RawMapError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(RawMapError::NotAnObject { found: type_name(&other) }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
