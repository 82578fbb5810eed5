use serde::{Deserialize, Serialize};

/// Which mapping keys may become field names.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPolicy {
    /// Only string keys are accepted; any other key is a
    /// [`Error::KeyConversion`](crate::Error::KeyConversion).
    #[default]
    StringsOnly,
    /// Boolean, integer and float keys are rendered to strings (`1` becomes `"1"`).
    /// Null keys are still rejected.
    Stringify,
}

/// What to do when two keys of one mapping normalize to the same field name.
///
/// With [`KeyPolicy::StringsOnly`] this cannot happen for well-formed input; it matters
/// once `Stringify` lets `1` and `"1"` meet.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateKeyPolicy {
    /// Error out on encountering a duplicate field.
    Error,
    /// First key wins: later duplicates are skipped.
    FirstWins,
    /// Last key wins: the later value replaces the earlier one, keeping the position
    /// of the first occurrence.
    #[default]
    LastWins,
}

/// Conversion options.
///
/// ```rust
/// use deep_struct::{DeepStruct, KeyPolicy, Mapping};
///
/// let input: Mapping = [(1, "one"), (2, "two")].into_iter().collect();
///
/// assert!(DeepStruct::from_mapping(&input).is_err());
///
/// let options = deep_struct::options! {
///     key_policy: KeyPolicy::Stringify,
/// };
/// let node = DeepStruct::from_mapping_with_options(&input, &options).unwrap();
/// assert_eq!(node.get("2").unwrap().as_str(), Some("two"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Which keys may become field names. Default: [`KeyPolicy::StringsOnly`].
    pub key_policy: KeyPolicy,
    /// Collisions after key normalization. Default: [`DuplicateKeyPolicy::LastWins`].
    pub duplicate_keys: DuplicateKeyPolicy,
}
