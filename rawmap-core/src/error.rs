//! Error type for raw-map construction.

/// Errors from building a [`RawMap`](crate::RawMap) out of JSON text.
///
/// Note that reads and writes through generated accessors never produce
/// errors: missing or mistyped entries fall back to the field default, and
/// undecodable array elements are dropped. Only the initial parse of
/// external text is fallible.
#[derive(Debug, thiserror::Error)]
pub enum RawMapError {
    /// The text was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The text parsed, but the top-level value was not an object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },
}
