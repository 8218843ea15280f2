//! Tag Queries
//!
//! Conjunction queries over the inverted index, plus the reserved wildcard.

use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::{index::InvertedIndex, store::ItemKey, tags::TagSet};

/// The reserved wildcard token. A query containing it matches every item.
pub const WILDCARD: &str = "*";

/// A tag query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagQuery {
    /// Every stored item, regardless of its tags.
    Wildcard,

    /// Items carrying all of these tags. An empty set is rejected at query time.
    All(TagSet),
}

impl TagQuery {
    /// Build a query from a list of tags.
    ///
    /// Any occurrence of [`WILDCARD`] turns the whole query into
    /// [`TagQuery::Wildcard`].
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = TagSet::empty();

        for tag in tags {
            let tag = tag.as_ref();

            if tag == WILDCARD {
                return Self::Wildcard;
            }

            set.insert(tag);
        }

        Self::All(set)
    }

    /// Is this the wildcard query?
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str(WILDCARD),
            Self::All(tags) => {
                let joined: SmallVec<[&str; 5]> = tags.iter().collect();
                f.write_str(&joined.join(" & "))
            }
        }
    }
}

impl From<&str> for TagQuery {
    fn from(tag: &str) -> Self {
        Self::from_tags([tag])
    }
}

impl From<&[&str]> for TagQuery {
    fn from(tags: &[&str]) -> Self {
        Self::from_tags(tags)
    }
}

impl<const N: usize> From<[&str; N]> for TagQuery {
    fn from(tags: [&str; N]) -> Self {
        Self::from_tags(tags)
    }
}

impl From<Vec<String>> for TagQuery {
    fn from(tags: Vec<String>) -> Self {
        Self::from_tags(tags)
    }
}

impl From<&TagSet> for TagQuery {
    fn from(tags: &TagSet) -> Self {
        Self::from_tags(tags)
    }
}

impl From<TagSet> for TagQuery {
    fn from(tags: TagSet) -> Self {
        if tags.contains(WILDCARD) {
            Self::Wildcard
        } else {
            Self::All(tags)
        }
    }
}

/// Keys carrying every tag in `tags`.
///
/// Buckets are intersected smallest first and the walk stops as soon as the
/// candidate set runs dry. An unknown tag yields an empty result.
pub(crate) fn intersect(index: &InvertedIndex, tags: &TagSet) -> FxHashSet<ItemKey> {
    let mut buckets: SmallVec<[&FxHashSet<ItemKey>; 5]> = SmallVec::with_capacity(tags.len());

    for tag in tags {
        let Some(bucket) = index.keys_for(tag) else {
            trace!(tag, "no items carry tag");
            return FxHashSet::default();
        };

        buckets.push(bucket);
    }

    buckets.sort_unstable_by_key(|bucket| bucket.len());

    let mut buckets = buckets.into_iter();

    let Some(smallest) = buckets.next() else {
        return FxHashSet::default();
    };

    let mut candidates = smallest.clone();

    for bucket in buckets {
        candidates.retain(|key| bucket.contains(key));

        if candidates.is_empty() {
            trace!("intersection emptied early");
            break;
        }
    }

    candidates
}
