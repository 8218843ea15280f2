//! Identity Store
//!
//! Owns every entry, keyed by a generational [`ItemKey`]. Payload identity is
//! the address of its `Rc` allocation, never its contents.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::{error::TagDictError, tags::TagSet};

new_key_type! {
    /// Item Key
    ///
    /// Stable identity token of one stored item. A removed key never resolves
    /// again: a reused slot carries a newer version.
    ///
    /// Keys are only meaningful for the dictionary that issued them. Use the
    /// payload `Rc` to name an item across dictionaries.
    pub struct ItemKey;
}

/// A stored item and its authoritative tag set.
#[derive(Debug)]
pub struct Entry<T> {
    payload: Rc<T>,
    tags: TagSet,
}

impl<T> Entry<T> {
    /// The shared payload.
    pub fn payload(&self) -> &Rc<T> {
        &self.payload
    }

    /// The current tags.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub(crate) fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    pub(crate) fn into_payload(self) -> Rc<T> {
        self.payload
    }
}

#[derive(Debug)]
pub(crate) struct IdentityStore<T> {
    entries: SlotMap<ItemKey, Entry<T>>,

    /// `Rc` allocation address -> key. Addresses stay unique while the entry
    /// holds its own `Rc` clone.
    addresses: FxHashMap<usize, ItemKey>,
}

impl<T> IdentityStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotMap::with_capacity_and_key(capacity),
            addresses: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Store a payload under a fresh key.
    ///
    /// Fails with `DuplicateItem` if the same allocation is already stored.
    pub(crate) fn insert(&mut self, payload: Rc<T>, tags: TagSet) -> Result<ItemKey, TagDictError> {
        if let Some(existing) = self.key_of(&payload) {
            return Err(TagDictError::DuplicateItem(existing));
        }

        Ok(self.insert_vacant(payload, tags))
    }

    /// Store a payload the caller has already checked is not stored.
    pub(crate) fn insert_vacant(&mut self, payload: Rc<T>, tags: TagSet) -> ItemKey {
        let address = address_of(&payload);
        let key = self.entries.insert(Entry { payload, tags });

        self.addresses.insert(address, key);

        key
    }

    pub(crate) fn remove(&mut self, key: ItemKey) -> Option<Entry<T>> {
        let entry = self.entries.remove(key)?;

        self.addresses.remove(&address_of(&entry.payload));

        Some(entry)
    }

    /// Resolve a payload to its key by allocation identity.
    pub(crate) fn key_of(&self, payload: &Rc<T>) -> Option<ItemKey> {
        let key = *self.addresses.get(&address_of(payload))?;

        self.entries
            .get(key)
            .filter(|entry| Rc::ptr_eq(&entry.payload, payload))
            .map(|_| key)
    }

    pub(crate) fn contains_key(&self, key: ItemKey) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn get(&self, key: ItemKey) -> Option<&Entry<T>> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: ItemKey) -> Option<&mut Entry<T>> {
        self.entries.get_mut(key)
    }

    pub(crate) fn payload(&self, key: ItemKey) -> Option<Rc<T>> {
        self.entries.get(key).map(|entry| Rc::clone(&entry.payload))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ItemKey, &Entry<T>)> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn address_of<T>(payload: &Rc<T>) -> usize {
    Rc::as_ptr(payload).addr()
}
