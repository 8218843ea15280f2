//! Tag dictionary errors

use thiserror::Error;

use crate::store::ItemKey;

/// Errors returned by [`TagDict`](crate::dict::TagDict) operations.
///
/// Every failing call leaves the dictionary exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagDictError {
    /// The handle does not resolve to an item in the dictionary.
    #[error("item is not in the tag dictionary")]
    UnknownItem,

    /// The same payload allocation has already been added (existing key).
    #[error("item is already in the tag dictionary as {0:?}")]
    DuplicateItem(ItemKey),

    /// A non-wildcard query named no tags.
    #[error("query must name at least one tag or be the wildcard `*`")]
    EmptyQuery,

    /// A match set that does not hold exactly one item was used as a single-item handle.
    #[error("handle matches {matches} items, expected exactly one")]
    AmbiguousHandle {
        /// Number of items the handle matched
        matches: usize,
    },

    /// The wildcard token was used as a stored tag.
    #[error("`{0}` is reserved for wildcard queries and cannot be used as a tag")]
    ReservedTag(String),
}
