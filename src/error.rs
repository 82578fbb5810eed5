//! Error type shared by construction and field access.
use thiserror::Error;

use crate::path::FieldPath;
use crate::value::ValueKind;

/// Everything that can go wrong while building or reading a [`DeepStruct`](crate::DeepStruct).
///
/// Construction errors (`KeyConversion`, `DuplicateKey`, `NotAMapping`) abort the whole
/// tree; there is no partially built node. Access errors only affect the access that
/// raised them.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A mapping key could not be normalized into a field name.
    #[error("cannot use {kind} key `{key}` at {path} as a field name")]
    KeyConversion {
        key: String,
        kind: ValueKind,
        path: FieldPath,
    },
    /// A field was requested that the node does not have.
    #[error("no field `{name}` at {path}")]
    FieldNotFound { name: String, path: FieldPath },
    /// Two keys collapsed into the same field name under
    /// [`DuplicateKeyPolicy::Error`](crate::DuplicateKeyPolicy::Error).
    #[error("duplicate field `{key}` at {path} after key normalization")]
    DuplicateKey { key: String, path: FieldPath },
    /// Only mappings (and null, for an empty node) can become a node.
    #[error("expected a mapping or null, found {kind}")]
    NotAMapping { kind: ValueKind },
    #[error("index {index} is out of range for sequence of length {len} at {path}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        path: FieldPath,
    },
    /// Path lookup reached a value that has no children under that segment.
    #[error("cannot look up `{segment}` in {kind} at {path}")]
    NotTraversable {
        segment: String,
        kind: ValueKind,
        path: FieldPath,
    },
    #[error("invalid field path `{path}`: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

impl Error {
    /// Path of the node the error was raised at, when it has one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Error::KeyConversion { path, .. }
            | Error::FieldNotFound { path, .. }
            | Error::DuplicateKey { path, .. }
            | Error::IndexOutOfRange { path, .. }
            | Error::NotTraversable { path, .. } => Some(path),
            Error::NotAMapping { .. } | Error::InvalidPath { .. } => None,
        }
    }
}
