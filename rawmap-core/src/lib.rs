//! Rawmap - Core
//!
//! Runtime support for dictionary-backed data models in Rust.
//!
//! # Overview
//!
//! Rawmap is a "raw first" modeling library - your structs do not hold their
//! fields directly. Instead, `#[raw_model]` rewrites every eligible field
//! into a getter/setter pair that reads and writes a string-keyed
//! [`RawMap`] owned by the instance. Unknown keys are never dropped: data
//! that your model does not understand survives a full round-trip through
//! [`RawRepresentable::raw`].
//!
//! # Quick Start
//!
//! Add `rawmap-core` to your `Cargo.toml` (includes the macros by default):
//!
//! ```toml,ignore
//! [dependencies]
//! rawmap-core = "0.1"
//! serde_json = "1.0"
//! ```
//!
//! Then define a model:
//!
//! ```rust,ignore
//! use rawmap_core::prelude::*;
//!
//! #[raw_model(equatable)]
//! pub struct Location {
//!     #[raw(default = 0.0)]
//!     pub latitude: f64,
//!     #[raw(default = 0.0)]
//!     pub longitude: f64,
//! }
//!
//! let loc = Location::from_raw(rawmap_core::from_json_str(
//!     r#"{"latitude": 50, "longitude": 60}"#,
//! )?);
//! assert_eq!(loc.latitude(), 50.0);
//! ```
//!
//! # Architecture
//!
//! - [`model`] - the [`RawMap`] storage alias and the capability traits the
//!   generated code conforms to
//! - [`codec`] - the encode/decode helpers the generated accessors route
//!   values through
//! - [`error`] - error type for constructing a [`RawMap`] from JSON text
//!
//! The macros themselves live in `rawmap-macros` and are re-exported here
//! behind the default `macros` feature.

pub mod codec;
pub mod error;
pub mod model;
pub mod prelude;

pub use error::RawMapError;
pub use model::{from_json_str, RawCodable, RawEnum, RawMap, RawRepresentable};

// Re-export the proc macros so users only depend on rawmap-core
#[cfg(feature = "macros")]
pub use rawmap_macros::{raw_model, RawEnum};
