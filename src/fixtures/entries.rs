//! Entries Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::tags::TagSet;

/// Wrapper for entries in YAML
#[derive(Debug, Deserialize)]
pub struct EntriesFixture<T> {
    /// Map of entry label -> entry fixture
    pub entries: FxHashMap<String, EntryFixture<T>>,
}

/// Entry fixture from YAML
#[derive(Debug, Deserialize)]
pub struct EntryFixture<T> {
    /// The stored payload
    pub item: T,

    /// Tags attached to the payload
    #[serde(default)]
    pub tags: TagSet,
}
