//! Encode/decode helpers the generated accessors route values through.
//!
//! Two value paths exist:
//!
//! - **primitive** values (the closed set of scalars plus `String`) go
//!   through [`decode_value`] / [`encode_value`], which are thin serde
//!   shims over `serde_json::Value`;
//! - **composite** values go through their
//!   [`RawCodable`](crate::RawCodable) impl, supplied to the array helpers
//!   as a projection function.
//!
//! All helpers are lossy by design: a value that does not decode yields
//! `None` (or is dropped from a sequence) rather than an error, so unknown
//! data can still round-trip through the backing map untouched.

use std::hash::{Hash, Hasher};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Soft-decodes a primitive from a raw value. `None` on any type mismatch.
pub fn decode_value<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

/// Encodes a primitive into a raw value.
///
/// Values with no JSON representation collapse to `Value::Null` (the
/// "absent" sentinel) instead of panicking.
pub fn encode_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Decodes every element of a raw array through `decode`, dropping elements
/// that fail and preserving the relative order of the ones that succeed.
///
/// `None` when the raw value is not an array at all (absent key, `Null`, or
/// a scalar stored under an array key).
pub fn decode_array<T>(value: &Value, decode: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    let items = value.as_array()?;
    let mut decoded = Vec::with_capacity(items.len());
    for item in items {
        match decode(item) {
            Some(element) => decoded.push(element),
            None => log::debug!("rawmap: dropping undecodable array element: {item}"),
        }
    }
    Some(decoded)
}

/// Encodes a sequence element-by-element into a raw array.
pub fn encode_array<T>(items: &[T], encode: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(encode).collect())
}

/// Encodes an optional value; `None` becomes the `Null` absent sentinel.
pub fn encode_option<T>(value: &Option<T>, encode: impl Fn(&T) -> Value) -> Value {
    match value {
        Some(inner) => encode(inner),
        None => Value::Null,
    }
}

/// Feeds a raw value into a hasher through its canonical JSON rendering.
///
/// `serde_json::Value` itself is not `Hash` (numbers include floats), so
/// generated `Hash` impls fold each member's encoded value through this.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    value.to_string().hash(state);
}
