//! Inverted Index
//!
//! Derived `tag -> keys` mapping. The entry tag sets in the identity store are
//! authoritative; every bucket here mirrors them and is never empty.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::store::ItemKey;

#[derive(Debug, Default)]
pub(crate) struct InvertedIndex {
    buckets: FxHashMap<String, FxHashSet<ItemKey>>,
}

impl InvertedIndex {
    /// Insert `key` into the bucket of each tag, creating buckets as needed.
    pub(crate) fn register<'a>(&mut self, key: ItemKey, tags: impl IntoIterator<Item = &'a str>) {
        for tag in tags {
            if let Some(bucket) = self.buckets.get_mut(tag) {
                bucket.insert(key);
            } else {
                let mut bucket = FxHashSet::default();
                bucket.insert(key);
                self.buckets.insert(tag.to_string(), bucket);
            }
        }
    }

    /// Remove `key` from the bucket of each tag, pruning emptied buckets.
    pub(crate) fn unregister<'a>(&mut self, key: ItemKey, tags: impl IntoIterator<Item = &'a str>) {
        for tag in tags {
            let Some(bucket) = self.buckets.get_mut(tag) else {
                continue;
            };

            bucket.remove(&key);

            if bucket.is_empty() {
                self.buckets.remove(tag);
                trace!(tag, "pruned empty tag bucket");
            }
        }
    }

    /// Keys carrying `tag`; `None` for a tag no item carries.
    pub(crate) fn keys_for(&self, tag: &str) -> Option<&FxHashSet<ItemKey>> {
        self.buckets.get(tag)
    }

    /// Number of keys carrying `tag`, zero for an unknown tag.
    pub(crate) fn bucket_len(&self, tag: &str) -> usize {
        self.buckets.get(tag).map_or(0, FxHashSet::len)
    }

    pub(crate) fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &FxHashSet<ItemKey>)> {
        self.buckets.iter().map(|(tag, bucket)| (tag.as_str(), bucket))
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }
}
