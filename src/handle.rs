//! Item Handles
//!
//! Anything that identifies one stored item: its key, its payload `Rc`, or a
//! single-item match set.

use std::rc::Rc;

use crate::{dict::TagDict, error::TagDictError, matches::Matches, store::ItemKey};

/// Resolves to the key of a live item in a [`TagDict`].
pub trait ItemHandle<T> {
    /// Resolve this handle against `dict`.
    ///
    /// # Errors
    ///
    /// Returns `TagDictError::UnknownItem` if no live item matches, or
    /// `TagDictError::AmbiguousHandle` if the handle names several items.
    fn resolve(&self, dict: &TagDict<T>) -> Result<ItemKey, TagDictError>;
}

/// Keys are only checked for liveness; a key issued by another dictionary may
/// name an unrelated item here.
impl<T> ItemHandle<T> for ItemKey {
    fn resolve(&self, dict: &TagDict<T>) -> Result<ItemKey, TagDictError> {
        if dict.contains_key(*self) {
            Ok(*self)
        } else {
            Err(TagDictError::UnknownItem)
        }
    }
}

impl<T> ItemHandle<T> for Rc<T> {
    fn resolve(&self, dict: &TagDict<T>) -> Result<ItemKey, TagDictError> {
        dict.key_of(self).ok_or(TagDictError::UnknownItem)
    }
}

/// Resolves through the matched payload, so a match set taken from another
/// dictionary finds the same item here, or nothing.
impl<T> ItemHandle<T> for Matches<T> {
    fn resolve(&self, dict: &TagDict<T>) -> Result<ItemKey, TagDictError> {
        let (_, payload) = self.single()?;

        payload.resolve(dict)
    }
}

impl<T, H: ItemHandle<T> + ?Sized> ItemHandle<T> for &H {
    fn resolve(&self, dict: &TagDict<T>) -> Result<ItemKey, TagDictError> {
        (**self).resolve(dict)
    }
}
