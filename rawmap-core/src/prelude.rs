//! Prelude module for convenient imports.
//!
//! Import everything you need with a single line:
//!
//! ```rust,ignore
//! use rawmap_core::prelude::*;
//! ```

// === Macros (from rawmap-macros) ===
#[cfg(feature = "macros")]
pub use rawmap_macros::{raw_model, RawEnum};

// === Storage and capability traits ===
pub use crate::model::RawCodable;
pub use crate::model::RawEnum;
pub use crate::model::RawMap;
pub use crate::model::RawRepresentable;

// === JSON text entry point ===
pub use crate::error::RawMapError;
pub use crate::model::from_json_str;
