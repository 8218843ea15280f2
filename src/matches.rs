//! Query Matches

use std::rc::Rc;

use crate::{error::TagDictError, store::ItemKey};

/// Items returned by a query, in no particular order.
///
/// A match set holding exactly one item can be passed back to the dictionary
/// as a handle.
#[derive(Debug)]
pub struct Matches<T> {
    items: Vec<(ItemKey, Rc<T>)>,
}

impl<T> Matches<T> {
    pub(crate) fn new(items: Vec<(ItemKey, Rc<T>)>) -> Self {
        Self { items }
    }

    /// Number of matched items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the matched payloads.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<T>> {
        self.items.iter().map(|(_, payload)| payload)
    }

    /// Iterate over the keys of the matched items.
    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.items.iter().map(|(key, _)| *key)
    }

    /// Whether this exact payload allocation is among the matches.
    pub fn contains(&self, payload: &Rc<T>) -> bool {
        self.iter().any(|matched| Rc::ptr_eq(matched, payload))
    }

    /// Whether the item with this key is among the matches.
    pub fn contains_key(&self, key: ItemKey) -> bool {
        self.keys().any(|matched| matched == key)
    }

    /// The only match.
    ///
    /// # Errors
    ///
    /// Returns `TagDictError::AmbiguousHandle` unless exactly one item matched.
    pub fn single(&self) -> Result<(ItemKey, &Rc<T>), TagDictError> {
        match self.items.as_slice() {
            [(key, payload)] => Ok((*key, payload)),
            items => Err(TagDictError::AmbiguousHandle {
                matches: items.len(),
            }),
        }
    }

    /// Consume the matches, keeping only the payloads.
    pub fn into_payloads(self) -> Vec<Rc<T>> {
        self.items.into_iter().map(|(_, payload)| payload).collect()
    }
}

impl<T> Clone for Matches<T> {
    fn clone(&self) -> Self {
        Self {
            items: self
                .items
                .iter()
                .map(|(key, payload)| (*key, Rc::clone(payload)))
                .collect(),
        }
    }
}

impl<T> IntoIterator for Matches<T> {
    type Item = Rc<T>;
    type IntoIter = std::vec::IntoIter<Rc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_payloads().into_iter()
    }
}
