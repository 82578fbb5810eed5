//! Field paths such as `server.listeners[0].port`.
//!
//! A path is a dot separated list of field names, each optionally followed by one or
//! more bracketed sequence indices. Numeric names (`listeners.0.port`) are kept as
//! names and only treated as indices when they are applied to a sequence, so a
//! mapping that really has a `"0"` key stays reachable.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl Segment {
    /// Index this segment selects in a sequence, if any.
    pub(crate) fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Field(name) => name.parse().ok(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Location of a field inside a [`DeepStruct`](crate::DeepStruct) tree.
///
/// Errors carry the path of the node they were raised at. The root renders as
/// `<root>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    /// Parse `a.b[0].c`. Empty paths, empty names and malformed brackets are rejected.
    pub fn parse(path: &str) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidPath {
            path: path.to_owned(),
            reason,
        };
        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        let mut segments = Vec::new();
        for (n, part) in path.split('.').enumerate() {
            let (name, mut rest) = match part.find('[') {
                Some(at) => part.split_at(at),
                None => (part, ""),
            };
            // only the very first part may start with an index
            if name.is_empty() && (n > 0 || rest.is_empty()) {
                return Err(invalid("empty field name"));
            }
            if name.contains(']') {
                return Err(invalid("unmatched `]`"));
            }
            if !name.is_empty() {
                segments.push(Segment::Field(name.to_owned()));
            }
            while !rest.is_empty() {
                let inner = rest
                    .strip_prefix('[')
                    .ok_or_else(|| invalid("unexpected text after `]`"))?;
                let close = inner.find(']').ok_or_else(|| invalid("unclosed `[`"))?;
                let index = inner[..close]
                    .parse::<usize>()
                    .map_err(|_| invalid("index must be a non-negative integer"))?;
                segments.push(Segment::Index(index));
                rest = &inner[close + 1..];
            }
        }
        Ok(Self { segments })
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, Segment::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
