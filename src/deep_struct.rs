//! The field-accessible node built from a configuration mapping.
//!
//! A [`DeepStruct`] holds two maps with identical keys, both in input order:
//!
//! - `fields`: field name to the converted [`Field`] (nested mappings are nodes
//!   themselves, sequences are converted element by element);
//! - `snapshot`: field name to the original [`Value`] exactly as it was supplied.
//!
//! The snapshot holds clones of the input values, which share the input's nested
//! containers. [`DeepStruct::to_snapshot`] hands out a copy of the outer map only, so
//! callers may reshape what they get back without touching the node.
//!
//! ```rust
//! use deep_struct::{DeepStruct, Mapping, Value};
//!
//! let db: Mapping = [("host", "localhost")].into_iter().collect();
//! let input: Mapping = [
//!     ("name", Value::from("app")),
//!     ("database", Value::from(db)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = DeepStruct::from_mapping(&input).unwrap();
//! assert_eq!(config.dig("database.host").unwrap().as_str(), Some("localhost"));
//! assert_eq!(config.to_value(), Value::from(input));
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};

use crate::error::Error;
use crate::field::Field;
use crate::key::canonical_key;
use crate::options::{DuplicateKeyPolicy, Options};
use crate::path::{FieldPath, Segment};
use crate::value::{Key, Mapping, Value, ValueKind};

/// Field name to original value, as returned by [`DeepStruct::to_snapshot`].
pub type Snapshot = IndexMap<String, Value>;

/// A mapping converted into named fields, remembering the values it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeepStruct {
    fields: IndexMap<String, Field>,
    snapshot: Snapshot,
}

impl DeepStruct {
    /// A node without fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from an optional mapping; `None` gives an empty node.
    pub fn new(input: Option<&Mapping>) -> Result<Self, Error> {
        match input {
            Some(mapping) => Self::from_mapping(mapping),
            None => Ok(Self::empty()),
        }
    }

    pub fn from_mapping(mapping: &Mapping) -> Result<Self, Error> {
        Self::from_mapping_with_options(mapping, &Options::default())
    }

    pub fn from_mapping_with_options(mapping: &Mapping, options: &Options) -> Result<Self, Error> {
        Self::build(mapping, options, &mut FieldPath::root())
    }

    /// Build from a parsed document: a mapping converts, null gives an empty node, and
    /// anything else is [`Error::NotAMapping`].
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        Self::from_value_with_options(value, &Options::default())
    }

    pub fn from_value_with_options(value: &Value, options: &Options) -> Result<Self, Error> {
        match value {
            Value::Mapping(mapping) => Self::from_mapping_with_options(mapping, options),
            Value::Null => Ok(Self::empty()),
            other => Err(Error::NotAMapping { kind: other.kind() }),
        }
    }

    /// Convert `mapping`, located at `path`. The first failing key aborts the whole build.
    pub(crate) fn build(
        mapping: &Mapping,
        options: &Options,
        path: &mut FieldPath,
    ) -> Result<Self, Error> {
        let mut node = Self {
            fields: IndexMap::with_capacity(mapping.len()),
            snapshot: IndexMap::with_capacity(mapping.len()),
        };

        for (key, value) in mapping {
            let name = canonical_key(key, options.key_policy).ok_or_else(|| key_error(key, path))?;

            if node.snapshot.contains_key(&name) {
                match options.duplicate_keys {
                    DuplicateKeyPolicy::Error => {
                        return Err(Error::DuplicateKey {
                            key: name,
                            path: path.clone(),
                        });
                    }
                    DuplicateKeyPolicy::FirstWins => continue,
                    DuplicateKeyPolicy::LastWins => {}
                }
            }

            path.push(Segment::Field(name.clone()));
            let field = Field::convert(value, options, path);
            path.pop();

            node.fields.insert(name.clone(), field?);
            node.snapshot.insert(name, value.clone());
        }

        Ok(node)
    }

    /// Converted value of the field `name`.
    ///
    /// A node does not know where it sits in the tree, so a [`Error::FieldNotFound`]
    /// from here reports the root path even for a nested node. Use [`dig`](Self::dig)
    /// from the top-level node to get errors that carry the full location.
    pub fn get(&self, name: &str) -> Result<&Field, Error> {
        self.fields.get(name).ok_or_else(|| Error::FieldNotFound {
            name: name.to_owned(),
            path: FieldPath::root(),
        })
    }

    /// Like [`get`](Self::get), but `None` instead of an error.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Original value the field `name` was converted from. Errors are relative to this
    /// node, as for [`get`](Self::get).
    pub fn original(&self, name: &str) -> Result<&Value, Error> {
        self.snapshot.get(name).ok_or_else(|| Error::FieldNotFound {
            name: name.to_owned(),
            path: FieldPath::root(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in input order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> + '_ {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Follow a path such as `server.listeners[0].port` through nested nodes and
    /// sequences. See [`FieldPath`] for the syntax.
    pub fn dig(&self, path: &str) -> Result<&Field, Error> {
        self.dig_path(&FieldPath::parse(path)?)
    }

    pub fn dig_path(&self, path: &FieldPath) -> Result<&Field, Error> {
        let Some((first, rest)) = path.segments().split_first() else {
            return Err(Error::InvalidPath {
                path: String::new(),
                reason: "path is empty",
            });
        };

        let mut at = FieldPath::root();
        let mut current = self.lookup(first, &at)?;
        at.push(first.clone());
        for segment in rest {
            current = current.child(segment, &at)?;
            at.push(segment.clone());
        }
        Ok(current)
    }

    /// One step of [`dig_path`](Self::dig_path); `at` is the path of this node.
    pub(crate) fn lookup(&self, segment: &Segment, at: &FieldPath) -> Result<&Field, Error> {
        match segment {
            Segment::Field(name) => {
                self.fields
                    .get(name.as_str())
                    .ok_or_else(|| Error::FieldNotFound {
                        name: name.clone(),
                        path: at.clone(),
                    })
            }
            Segment::Index(_) => Err(Error::NotTraversable {
                segment: segment.to_string(),
                kind: ValueKind::Mapping,
                path: at.clone(),
            }),
        }
    }

    /// Copy of the field name to original value map.
    ///
    /// Only the outer map is copied: adding, removing or reordering its entries does
    /// not affect this node, while nested sequences and mappings are the very ones the
    /// node was built from.
    pub fn to_snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    /// Same as [`to_snapshot`](Self::to_snapshot).
    pub fn to_mapping(&self) -> Snapshot {
        self.to_snapshot()
    }

    /// The snapshot as a [`Value::Mapping`] with string keys, directly comparable with
    /// the input this node was built from.
    pub fn to_value(&self) -> Value {
        let mapping: Mapping = self
            .snapshot
            .iter()
            .map(|(name, value)| (Key::from(name.as_str()), value.clone()))
            .collect();
        Value::Mapping(Arc::new(mapping))
    }
}

fn key_error(key: &Key, path: &FieldPath) -> Error {
    Error::KeyConversion {
        key: key.to_string(),
        kind: key.kind(),
        path: path.clone(),
    }
}

impl<'a> IntoIterator for &'a DeepStruct {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl TryFrom<&Mapping> for DeepStruct {
    type Error = Error;

    fn try_from(mapping: &Mapping) -> Result<Self, Self::Error> {
        Self::from_mapping(mapping)
    }
}

impl TryFrom<&Value> for DeepStruct {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Renders like `#<DeepStruct name="app", ports=[80, 443]>`.
impl fmt::Display for DeepStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<DeepStruct")?;
        for (i, (name, field)) in self.fields.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{name}={field}")?;
        }
        f.write_str(">")
    }
}

/// Serializes the snapshot, i.e. the configuration as it was read.
impl Serialize for DeepStruct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.snapshot.iter())
    }
}

impl<'de> Deserialize<'de> for DeepStruct {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}
