#![forbid(unsafe_code)]
//! Field-accessible trees built from parsed configuration values.
//!
//! A configuration parser hands over a nested [`Value`]: mappings, sequences and
//! scalars. [`DeepStruct`] turns every mapping in it into a node whose fields can be
//! read by name, turns sequences into sequences of converted elements, and keeps
//! scalars as they are. Each node also remembers the values it was built from, so
//! [`DeepStruct::to_snapshot`] reconstructs the original mapping exactly.
//!
//! Parsing itself is left to serde formats such as `serde-saphyr` or `serde_json`.
//! For YAML, enable `strict_booleans` so that keys like `y` or `on` stay strings
//! instead of turning into YAML 1.1 booleans:
//!
//! ```rust
//! use deep_struct::DeepStruct;
//!
//! let yaml = "
//! server:
//!   host: example.org
//!   on: startup
//!   listeners:
//!     - port: 80
//!     - port: 443
//! ";
//! let options = serde_saphyr::options! { strict_booleans: true };
//! let config: DeepStruct = serde_saphyr::from_str_with_options(yaml, options).unwrap();
//!
//! let server = config.get("server").unwrap().as_struct().unwrap();
//! assert_eq!(server.get("host").unwrap().as_str(), Some("example.org"));
//! assert_eq!(config.dig("server.listeners[1].port").unwrap().as_i64(), Some(443));
//! assert_eq!(config.dig("server.on").unwrap().as_str(), Some("startup"));
//! assert!(config.get("client").is_err());
//! ```
//!
//! Input is expected to come from trusted, internally authored configuration files.

pub mod deep_struct;
pub mod error;
pub mod field;
mod key;
mod macros;
pub mod options;
pub mod path;
pub mod value;

pub use deep_struct::{DeepStruct, Snapshot};
pub use error::Error;
pub use field::Field;
pub use options::{DuplicateKeyPolicy, KeyPolicy, Options};
pub use path::{FieldPath, Segment};
pub use value::{Key, Mapping, Value, ValueKind};

/// Build a [`DeepStruct`] from a parsed document with default [`Options`].
///
/// Shorthand for [`DeepStruct::from_value`].
pub fn from_value(value: &Value) -> Result<DeepStruct, Error> {
    DeepStruct::from_value(value)
}

/// Build a [`DeepStruct`] from a mapping with default [`Options`].
pub fn from_mapping(mapping: &Mapping) -> Result<DeepStruct, Error> {
    DeepStruct::from_mapping(mapping)
}
