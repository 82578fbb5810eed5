//! Public macro for constructing [`crate::Options`] without struct literal syntax,
//! so new option fields can be added without breaking call sites.

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// use deep_struct::{DuplicateKeyPolicy, KeyPolicy};
///
/// let options = deep_struct::options! {
///     key_policy: KeyPolicy::Stringify,
///     duplicate_keys: DuplicateKeyPolicy::Error,
/// };
/// assert_eq!(options.duplicate_keys, DuplicateKeyPolicy::Error);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            opt.$field = $value;
        )*
        opt
    }};
}
