//! Normalization of mapping keys into field names.

use crate::options::KeyPolicy;
use crate::value::Key;

/// Canonical field name for `key`, or `None` if the policy does not allow it.
///
/// Strings are used verbatim (including the empty string). Under
/// [`KeyPolicy::Stringify`] booleans and numbers are rendered the way they would be
/// written in a configuration file; null never converts.
pub(crate) fn canonical_key(key: &Key, policy: KeyPolicy) -> Option<String> {
    match (key, policy) {
        (Key::String(s), _) => Some(s.to_string()),
        (Key::Null, _) => None,
        (_, KeyPolicy::StringsOnly) => None,
        (Key::Bool(b), KeyPolicy::Stringify) => Some(b.to_string()),
        (Key::Int(i), KeyPolicy::Stringify) => Some(i.to_string()),
        (Key::UInt(u), KeyPolicy::Stringify) => Some(u.to_string()),
        (Key::Float(x), KeyPolicy::Stringify) => Some(format!("{x:?}")),
    }
}
