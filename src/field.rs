//! Converted field values.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::deep_struct::DeepStruct;
use crate::error::Error;
use crate::options::Options;
use crate::path::{FieldPath, Segment};
use crate::value::{Value, ValueKind};

/// The converted form of a value stored under a field.
///
/// Mappings become nested [`DeepStruct`]s, sequences are converted element by element,
/// and scalars are stored as they were given.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// A scalar value; never a sequence or mapping.
    Scalar(Value),
    Struct(DeepStruct),
    Sequence(Vec<Field>),
}

impl Field {
    /// Apply the conversion rule to `value`, which sits at `path`.
    pub(crate) fn convert(
        value: &Value,
        options: &Options,
        path: &mut FieldPath,
    ) -> Result<Self, Error> {
        match value {
            Value::Mapping(mapping) => DeepStruct::build(mapping, options, path).map(Field::Struct),
            Value::Sequence(items) => {
                let mut converted = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push(Segment::Index(index));
                    let field = Field::convert(item, options, path);
                    path.pop();
                    converted.push(field?);
                }
                Ok(Field::Sequence(converted))
            }
            scalar => Ok(Field::Scalar(scalar.clone())),
        }
    }

    /// Step into this field by one path segment. `at` is the path of `self`.
    pub(crate) fn child(&self, segment: &Segment, at: &FieldPath) -> Result<&Field, Error> {
        match self {
            Field::Struct(node) => node.lookup(segment, at),
            Field::Sequence(items) => {
                let index = segment.as_index().ok_or_else(|| Error::NotTraversable {
                    segment: segment.to_string(),
                    kind: ValueKind::Sequence,
                    path: at.clone(),
                })?;
                items.get(index).ok_or_else(|| Error::IndexOutOfRange {
                    index,
                    len: items.len(),
                    path: at.clone(),
                })
            }
            Field::Scalar(value) => Err(Error::NotTraversable {
                segment: segment.to_string(),
                kind: value.kind(),
                path: at.clone(),
            }),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Field::Scalar(value) => value.kind(),
            Field::Struct(_) => ValueKind::Mapping,
            Field::Sequence(_) => ValueKind::Sequence,
        }
    }

    pub fn as_struct(&self) -> Option<&DeepStruct> {
        match self {
            Field::Struct(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Field]> {
        match self {
            Field::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// The scalar value, if this field holds one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_value().and_then(Value::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Scalar(Value::Null))
    }
}

impl PartialEq<Value> for Field {
    /// Scalars compare with the value they hold; containers never equal a `Value`.
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Scalar(value) => write!(f, "{value}"),
            Field::Struct(node) => write!(f, "{node}"),
            Field::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Scalar(value) => value.serialize(serializer),
            Field::Struct(node) => node.serialize(serializer),
            Field::Sequence(items) => serializer.collect_seq(items.iter()),
        }
    }
}
