//! Tag Dictionary
//!
//! [`TagDict`] keeps the identity store and the inverted index in step: every
//! mutator validates first, then updates both structures in the same call.

use std::{fmt, rc::Rc};

use rustc_hash::FxHashMap;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::{Span, debug, field};

use crate::{
    error::TagDictError,
    handle::ItemHandle,
    index::InvertedIndex,
    matches::Matches,
    query::{TagQuery, WILDCARD, intersect},
    store::{Entry, IdentityStore, ItemKey},
    tags::TagSet,
};

/// Items keyed by identity, each carrying a mutable set of tags.
///
/// Payloads are shared as `Rc<T>`: keep a clone of the `Rc` you add and use
/// interior mutability (`RefCell`, `Cell`) to edit an item in place. Two
/// payloads with equal contents are still distinct items.
///
/// ```
/// use std::rc::Rc;
///
/// use tagdict::prelude::*;
///
/// let mut people = TagDict::new();
///
/// let tina = Rc::new("Tina");
/// people.add(Rc::clone(&tina), ["Female", "Teacher"])?;
/// people.add(Rc::new("Tom"), ["Male", "Teacher"])?;
///
/// let matches = people.query(["Teacher", "Female"])?;
/// assert!(matches.contains(&tina));
/// assert_eq!(people.query("*")?.len(), 2);
/// # Ok::<(), TagDictError>(())
/// ```
#[derive(Debug)]
pub struct TagDict<T> {
    store: IdentityStore<T>,
    index: InvertedIndex,
}

impl<T> Default for TagDict<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TagDict<T> {
    /// Create an empty tag dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty tag dictionary with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: IdentityStore::with_capacity(capacity),
            index: InvertedIndex::default(),
        }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when no items are stored.
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Whether `handle` resolves to a stored item.
    pub fn contains(&self, handle: impl ItemHandle<T>) -> bool {
        handle.resolve(self).is_ok()
    }

    /// Add a shared payload with the given tags.
    ///
    /// # Errors
    ///
    /// Returns `TagDictError::DuplicateItem` if this `Rc` allocation is already
    /// stored, or `TagDictError::ReservedTag` if a tag is the wildcard token.
    #[tracing::instrument(level = "debug", skip_all, fields(key = field::Empty, tags = field::Empty))]
    pub fn add(&mut self, payload: Rc<T>, tags: impl Into<TagSet>) -> Result<ItemKey, TagDictError> {
        let tags = tags.into();

        ensure_unreserved(&tags)?;

        let key = self.store.insert(payload, tags.clone())?;
        self.index.register(key, &tags);

        let span = Span::current();
        span.record("key", field::debug(key));
        span.record("tags", field::display(&tags));

        debug!("added item");

        Ok(key)
    }

    /// Wrap `value` in a fresh `Rc` and add it.
    ///
    /// Returns the new key and the shared payload.
    ///
    /// # Errors
    ///
    /// Returns `TagDictError::ReservedTag` if a tag is the wildcard token.
    pub fn insert(
        &mut self,
        value: T,
        tags: impl Into<TagSet>,
    ) -> Result<(ItemKey, Rc<T>), TagDictError> {
        let payload = Rc::new(value);
        let key = self.add(Rc::clone(&payload), tags)?;

        Ok((key, payload))
    }

    /// Get the payload of an item.
    ///
    /// # Errors
    ///
    /// Returns a `TagDictError` if the handle does not resolve to one stored item.
    pub fn get(&self, handle: impl ItemHandle<T>) -> Result<&Rc<T>, TagDictError> {
        self.entry(handle).map(Entry::payload)
    }

    /// Get the current tags of an item.
    ///
    /// # Errors
    ///
    /// Returns a `TagDictError` if the handle does not resolve to one stored item.
    pub fn tags_of(&self, handle: impl ItemHandle<T>) -> Result<&TagSet, TagDictError> {
        self.entry(handle).map(Entry::tags)
    }

    /// Remove an item, unregistering it from all its tags.
    ///
    /// Returns the payload that was stored.
    ///
    /// # Errors
    ///
    /// Returns a `TagDictError` if the handle does not resolve to one stored item.
    #[tracing::instrument(level = "debug", skip_all, fields(key = field::Empty))]
    pub fn remove(&mut self, handle: impl ItemHandle<T>) -> Result<Rc<T>, TagDictError> {
        let key = handle.resolve(self)?;
        Span::current().record("key", field::debug(key));

        let entry = self.store.remove(key).ok_or(TagDictError::UnknownItem)?;
        self.index.unregister(key, entry.tags());

        debug!(tags = %entry.tags(), "removed item");

        Ok(entry.into_payload())
    }

    /// Add one tag to an item. Adding a tag it already carries is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `TagDictError` if the handle does not resolve to one stored
    /// item, or if `tag` is the wildcard token.
    pub fn add_tag(&mut self, handle: impl ItemHandle<T>, tag: &str) -> Result<(), TagDictError> {
        let key = handle.resolve(self)?;

        if tag == WILDCARD {
            return Err(TagDictError::ReservedTag(tag.to_string()));
        }

        let entry = self.store.get_mut(key).ok_or(TagDictError::UnknownItem)?;

        if entry.tags_mut().insert(tag) {
            self.index.register(key, [tag]);
            debug!(?key, tag, "added tag");
        }

        Ok(())
    }

    /// Remove one tag from an item. Removing a tag it does not carry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a `TagDictError` if the handle does not resolve to one stored item.
    pub fn remove_tag(&mut self, handle: impl ItemHandle<T>, tag: &str) -> Result<(), TagDictError> {
        let key = handle.resolve(self)?;
        let entry = self.store.get_mut(key).ok_or(TagDictError::UnknownItem)?;

        if entry.tags_mut().remove(tag) {
            self.index.unregister(key, [tag]);
            debug!(?key, tag, "removed tag");
        }

        Ok(())
    }

    /// Replace all tags of an item in one step.
    ///
    /// Only the tags that actually change touch the index. An empty set leaves
    /// the item stored without tags; it stays reachable through the wildcard.
    ///
    /// # Errors
    ///
    /// Returns a `TagDictError` if the handle does not resolve to one stored
    /// item, or if a new tag is the wildcard token.
    #[tracing::instrument(level = "debug", skip_all, fields(key = field::Empty))]
    pub fn replace_tags(
        &mut self,
        handle: impl ItemHandle<T>,
        tags: impl Into<TagSet>,
    ) -> Result<(), TagDictError> {
        let key = handle.resolve(self)?;
        let tags = tags.into();

        ensure_unreserved(&tags)?;

        Span::current().record("key", field::debug(key));

        if self.retag(key, tags) {
            Ok(())
        } else {
            Err(TagDictError::UnknownItem)
        }
    }

    /// Items whose tags include every queried tag, or every item for the
    /// wildcard.
    ///
    /// Unknown tags match nothing. The result has no defined order.
    ///
    /// # Errors
    ///
    /// Returns `TagDictError::EmptyQuery` for a non-wildcard query with no tags.
    #[tracing::instrument(level = "debug", skip_all, fields(query = field::Empty, matches = field::Empty))]
    pub fn query(&self, query: impl Into<TagQuery>) -> Result<Matches<T>, TagDictError> {
        let query = query.into();
        let span = Span::current();

        span.record("query", field::display(&query));

        let items: Vec<(ItemKey, Rc<T>)> = match &query {
            TagQuery::Wildcard => self
                .store
                .iter()
                .map(|(key, entry)| (key, Rc::clone(entry.payload())))
                .collect(),
            TagQuery::All(tags) if tags.is_empty() => return Err(TagDictError::EmptyQuery),
            TagQuery::All(tags) => intersect(&self.index, tags)
                .into_iter()
                .filter_map(|key| self.store.payload(key).map(|payload| (key, payload)))
                .collect(),
        };

        span.record("matches", items.len());

        Ok(Matches::new(items))
    }

    /// Every item with a point-in-time copy of its tags.
    pub fn view_all(&self) -> Vec<(Rc<T>, TagSet)> {
        self.store
            .iter()
            .map(|(_, entry)| (Rc::clone(entry.payload()), entry.tags().clone()))
            .collect()
    }

    /// Items grouped by tag.
    ///
    /// With `None` every known tag is listed; otherwise only the selected tags,
    /// where a tag no item carries maps to an empty list.
    pub fn view_by_tags(&self, selection: Option<&TagSet>) -> FxHashMap<String, Vec<Rc<T>>> {
        match selection {
            None => self
                .index
                .iter()
                .map(|(tag, bucket)| {
                    let payloads = bucket.iter().filter_map(|key| self.store.payload(*key));

                    (tag.to_string(), payloads.collect())
                })
                .collect(),
            Some(selection) => selection
                .iter()
                .map(|tag| {
                    let payloads = self
                        .index
                        .keys_for(tag)
                        .into_iter()
                        .flatten()
                        .filter_map(|key| self.store.payload(*key));

                    (tag.to_string(), payloads.collect())
                })
                .collect(),
        }
    }

    /// Merge another dictionary into this one.
    ///
    /// Items already stored here (same `Rc` allocation) gain the union of both
    /// tag sets; the rest are added with their tags. `other` is left as is.
    ///
    /// Every incoming entry is checked before the first change, so a failed
    /// merge leaves this dictionary untouched.
    ///
    /// # Errors
    ///
    /// Returns `TagDictError::ReservedTag` if an incoming entry carries the
    /// wildcard token.
    #[tracing::instrument(level = "debug", skip_all, fields(incoming = other.len()))]
    pub fn merge(&mut self, other: &Self) -> Result<(), TagDictError> {
        let mut shared = Vec::new();
        let mut fresh = Vec::new();

        for (_, entry) in other.store.iter() {
            ensure_unreserved(entry.tags())?;

            match self.store.key_of(entry.payload()) {
                Some(key) => shared.push((key, entry.tags())),
                None => fresh.push(entry),
            }
        }

        let (updated, added) = (shared.len(), fresh.len());

        for (key, incoming) in shared {
            if let Some(merged) = self.store.get(key).map(|own| own.tags() | incoming) {
                self.retag(key, merged);
            }
        }

        // Payloads of `other` are distinct and none is stored here.
        for entry in fresh {
            let key = self
                .store
                .insert_vacant(Rc::clone(entry.payload()), entry.tags().clone());

            self.index.register(key, entry.tags());
        }

        debug!(updated, added, "merged dictionary");

        Ok(())
    }

    /// Known tags with the number of items carrying each, sorted by tag.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = self
            .index
            .iter()
            .map(|(tag, bucket)| (tag.to_string(), bucket.len()))
            .collect();

        counts.sort_unstable();

        counts
    }

    /// Number of items carrying `tag`.
    pub fn tag_len(&self, tag: &str) -> usize {
        self.index.bucket_len(tag)
    }

    /// Number of distinct tags in use.
    pub fn tag_count(&self) -> usize {
        self.index.len()
    }

    /// Iterate over every tag carried by at least one item, in no particular
    /// order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.index.tags()
    }

    /// Iterate over the keys of all stored items.
    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.store.iter().map(|(key, _)| key)
    }

    /// Iterate over all stored entries.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, &Entry<T>)> {
        self.store.iter()
    }

    pub(crate) fn contains_key(&self, key: ItemKey) -> bool {
        self.store.contains_key(key)
    }

    pub(crate) fn key_of(&self, payload: &Rc<T>) -> Option<ItemKey> {
        self.store.key_of(payload)
    }

    /// Swap the tags of a live item, touching only the index buckets that
    /// change. Returns false if `key` is not stored.
    fn retag(&mut self, key: ItemKey, tags: TagSet) -> bool {
        let Some(entry) = self.store.get_mut(key) else {
            return false;
        };

        let stale = entry.tags() - &tags;
        let fresh = &tags - entry.tags();

        self.index.unregister(key, &stale);
        self.index.register(key, &fresh);
        *entry.tags_mut() = tags;

        debug!(?key, removed = %stale, added = %fresh, "replaced tags");

        true
    }

    fn entry(&self, handle: impl ItemHandle<T>) -> Result<&Entry<T>, TagDictError> {
        let key = handle.resolve(self)?;

        self.store.get(key).ok_or(TagDictError::UnknownItem)
    }
}

impl<T> fmt::Display for TagDict<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();

        builder.push_record(["Tag".to_string(), "Items".to_string()]);

        for (tag, count) in self.tag_counts() {
            builder.push_record([tag, count.to_string()]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        write!(f, "{table}")
    }
}

fn ensure_unreserved(tags: &TagSet) -> Result<(), TagDictError> {
    if tags.contains(WILDCARD) {
        Err(TagDictError::ReservedTag(WILDCARD.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use testresult::TestResult;

    use super::*;

    #[derive(Debug)]
    struct Person {
        name: &'static str,
    }

    fn person(name: &'static str) -> Rc<RefCell<Person>> {
        Rc::new(RefCell::new(Person { name }))
    }

    fn names(matches: &Matches<RefCell<Person>>) -> Vec<&'static str> {
        let mut names: Vec<_> = matches.iter().map(|person| person.borrow().name).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn add_registers_every_tag() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");

        let key = dict.add(Rc::clone(&ben), ["Male", "Student"])?;

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.tag_len("Male"), 1);
        assert_eq!(dict.tag_len("Student"), 1);
        assert_eq!(dict.tags_of(key)?, &TagSet::from_strs(&["Male", "Student"]));
        assert!(Rc::ptr_eq(dict.get(&ben)?, &ben));

        Ok(())
    }

    #[test]
    fn add_rejects_same_payload_twice() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");

        let key = dict.add(Rc::clone(&ben), ["Male"])?;
        let err = dict.add(Rc::clone(&ben), ["Student"]).err();

        assert_eq!(err, Some(TagDictError::DuplicateItem(key)));
        assert_eq!(dict.tag_len("Student"), 0);
        assert_eq!(dict.len(), 1);

        Ok(())
    }

    #[test]
    fn equal_contents_are_distinct_items() -> TestResult {
        let mut dict = TagDict::new();

        dict.add(person("Ben"), ["Male"])?;
        dict.add(person("Ben"), ["Male"])?;

        assert_eq!(dict.query("Male")?.len(), 2);

        Ok(())
    }

    #[test]
    fn wildcard_tag_is_reserved() -> TestResult {
        let mut dict = TagDict::new();

        let err = dict.add(person("Ben"), ["Male", "*"]).err();
        assert_eq!(err, Some(TagDictError::ReservedTag("*".to_string())));
        assert!(dict.is_empty());
        assert_eq!(dict.tag_count(), 0);

        let (key, _) = dict.insert(RefCell::new(Person { name: "Tom" }), ["Male"])?;

        assert!(dict.add_tag(key, "*").is_err());
        assert!(dict.replace_tags(key, ["*"]).is_err());
        assert_eq!(dict.tags_of(key)?, &TagSet::from("Male"));

        Ok(())
    }

    #[test]
    fn empty_query_is_an_error() -> TestResult {
        let mut dict = TagDict::new();
        dict.add(person("Ben"), ["Male"])?;

        assert_eq!(
            dict.query(TagQuery::All(TagSet::empty())).err(),
            Some(TagDictError::EmptyQuery)
        );
        assert_eq!(
            dict.query(Vec::<String>::new()).err(),
            Some(TagDictError::EmptyQuery)
        );

        Ok(())
    }

    #[test]
    fn wildcard_includes_untagged_items() -> TestResult {
        let mut dict = TagDict::new();

        dict.add(person("Ben"), ["Male"])?;
        dict.add(person("Nobody"), TagSet::empty())?;

        assert_eq!(names(&dict.query("*")?), ["Ben", "Nobody"]);
        assert_eq!(names(&dict.query(TagQuery::Wildcard)?), ["Ben", "Nobody"]);

        Ok(())
    }

    #[test]
    fn unknown_tag_matches_nothing() -> TestResult {
        let mut dict = TagDict::new();
        dict.add(person("Ben"), ["Male"])?;

        assert!(dict.query("Ghost")?.is_empty());
        assert!(dict.query(["Male", "Ghost"])?.is_empty());

        Ok(())
    }

    #[test]
    fn add_tag_and_remove_tag_are_idempotent() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");
        dict.add(Rc::clone(&ben), ["Male"])?;

        dict.add_tag(&ben, "Student")?;
        dict.add_tag(&ben, "Student")?;
        assert_eq!(dict.tag_len("Student"), 1);
        assert_eq!(dict.tags_of(&ben)?.len(), 2);

        dict.remove_tag(&ben, "Student")?;
        dict.remove_tag(&ben, "Student")?;
        assert_eq!(dict.tag_len("Student"), 0);
        assert_eq!(dict.tag_count(), 1);
        assert_eq!(dict.tags_of(&ben)?, &TagSet::from("Male"));

        Ok(())
    }

    #[test]
    fn replace_tags_touches_only_the_difference() -> TestResult {
        let mut dict = TagDict::new();
        let tina = person("Tina");
        let ann = person("Ann");

        dict.add(Rc::clone(&tina), ["Female", "Teacher", "Mother"])?;
        dict.add(Rc::clone(&ann), ["Female"])?;

        dict.replace_tags(&tina, ["Female", "Human"])?;

        assert_eq!(dict.tags_of(&tina)?, &TagSet::from_strs(&["Female", "Human"]));
        assert_eq!(dict.tag_len("Female"), 2);
        assert_eq!(dict.tag_len("Teacher"), 0);
        assert_eq!(dict.tag_len("Mother"), 0);
        assert_eq!(names(&dict.query("Human")?), ["Tina"]);

        Ok(())
    }

    #[test]
    fn replace_with_nothing_keeps_the_item() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");
        dict.add(Rc::clone(&ben), ["Male"])?;

        dict.replace_tags(&ben, TagSet::empty())?;

        assert!(dict.contains(&ben));
        assert_eq!(dict.tag_count(), 0);
        assert_eq!(dict.query("*")?.len(), 1);

        Ok(())
    }

    #[test]
    fn remove_unregisters_and_invalidates_handles() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");
        let key = dict.add(Rc::clone(&ben), ["Male", "Student"])?;

        let removed = dict.remove(&ben)?;

        assert!(Rc::ptr_eq(&removed, &ben));
        assert!(dict.is_empty());
        assert_eq!(dict.tag_count(), 0);
        assert_eq!(dict.remove(key).err(), Some(TagDictError::UnknownItem));
        assert_eq!(dict.get(&ben).err(), Some(TagDictError::UnknownItem));
        assert_eq!(
            dict.add_tag(&ben, "Student").err(),
            Some(TagDictError::UnknownItem)
        );

        Ok(())
    }

    #[test]
    fn single_match_works_as_a_handle() -> TestResult {
        let mut dict = TagDict::new();
        dict.add(person("Tina"), ["Female", "Teacher"])?;
        dict.add(person("Ann"), ["Female", "Student"])?;

        let tina = dict.query(["Female", "Teacher"])?;
        dict.add_tag(&tina, "Mother")?;
        assert_eq!(names(&dict.query("Mother")?), ["Tina"]);

        let women = dict.query("Female")?;
        assert_eq!(
            dict.remove(&women).err(),
            Some(TagDictError::AmbiguousHandle { matches: 2 })
        );
        assert_eq!(dict.len(), 2);

        Ok(())
    }

    #[test]
    fn payload_edits_are_visible_through_the_dict() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");
        dict.add(Rc::clone(&ben), ["Male"])?;

        ben.borrow_mut().name = "Benjamin";

        assert_eq!(names(&dict.query("Male")?), ["Benjamin"]);

        Ok(())
    }

    #[test]
    fn view_all_is_a_snapshot() -> TestResult {
        let mut dict = TagDict::new();
        let ben = person("Ben");
        dict.add(Rc::clone(&ben), ["Male"])?;

        let snapshot = dict.view_all();
        dict.add_tag(&ben, "Student")?;

        let [(payload, tags)] = snapshot.as_slice() else {
            return Err("expected one entry".into());
        };

        assert!(Rc::ptr_eq(payload, &ben));
        assert_eq!(tags, &TagSet::from("Male"));

        Ok(())
    }

    #[test]
    fn view_by_tags_lists_all_or_selected_tags() -> TestResult {
        let mut dict = TagDict::new();
        dict.add(person("Ben"), ["Male", "Student"])?;
        dict.add(person("Tom"), ["Male", "Teacher"])?;

        let all = dict.view_by_tags(None);
        assert_eq!(all.len(), 3);
        assert_eq!(all.get("Male").map(Vec::len), Some(2));

        let selected = dict.view_by_tags(Some(&TagSet::from_strs(&["Teacher", "Ghost"])));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.get("Teacher").map(Vec::len), Some(1));
        assert_eq!(selected.get("Ghost").map(Vec::len), Some(0));

        Ok(())
    }

    #[test]
    fn merge_unions_shared_items_and_adds_the_rest() -> TestResult {
        let ben = person("Ben");
        let tom = person("Tom");

        let mut left = TagDict::new();
        left.add(Rc::clone(&ben), ["Male"])?;

        let mut right = TagDict::new();
        right.add(Rc::clone(&ben), ["Student"])?;
        right.add(Rc::clone(&tom), ["Teacher"])?;

        left.merge(&right)?;

        assert_eq!(left.len(), 2);
        assert_eq!(left.tags_of(&ben)?, &TagSet::from_strs(&["Male", "Student"]));
        assert_eq!(left.tags_of(&tom)?, &TagSet::from("Teacher"));
        assert_eq!(right.tags_of(&ben)?, &TagSet::from("Student"));

        Ok(())
    }

    #[test]
    fn merge_keeps_the_index_in_step() -> TestResult {
        let ben = person("Ben");
        let tina = person("Tina");

        let mut left = TagDict::new();
        left.add(Rc::clone(&ben), ["Male", "Student"])?;
        left.add(Rc::clone(&tina), ["Female"])?;

        let mut right = TagDict::new();
        right.add(Rc::clone(&tina), ["Female", "Teacher"])?;
        right.add(person("Ann"), ["Female", "Student"])?;
        right.add(person("Nobody"), TagSet::empty())?;

        left.merge(&right)?;

        assert_eq!(left.len(), 4);
        assert_eq!(names(&left.query("Female")?), ["Ann", "Tina"]);
        assert_eq!(names(&left.query("Student")?), ["Ann", "Ben"]);
        assert_eq!(names(&left.query("Teacher")?), ["Tina"]);
        assert_eq!(left.query("*")?.len(), 4);

        // Merging the same dictionary again changes nothing.
        let before = left.tag_counts();
        left.merge(&right)?;

        assert_eq!(left.len(), 4);
        assert_eq!(left.tag_counts(), before);
        assert_eq!(right.len(), 3);

        Ok(())
    }

    #[test]
    fn match_from_another_dict_resolves_by_payload() -> TestResult {
        let tom = person("Tom");
        let ben = person("Ben");

        let mut left = TagDict::new();
        left.add(Rc::clone(&tom), ["Male"])?;
        left.add(Rc::clone(&ben), ["Male"])?;

        let mut right = TagDict::new();
        right.add(Rc::clone(&ben), ["Student"])?;

        left.add_tag(&right.query("Student")?, "Martian")?;

        assert_eq!(names(&left.query("Martian")?), ["Ben"]);
        assert!(!left.tags_of(&tom)?.contains("Martian"));

        let mut stranger = TagDict::new();
        stranger.add(person("Ann"), ["Female"])?;

        assert_eq!(
            left.add_tag(&stranger.query("Female")?, "Martian").err(),
            Some(TagDictError::UnknownItem)
        );
        assert_eq!(left.tag_len("Martian"), 1);

        Ok(())
    }

    #[test]
    fn tag_counts_and_display() -> TestResult {
        let mut dict = TagDict::new();
        dict.add(person("Ben"), ["Male", "Student"])?;
        dict.add(person("Tom"), ["Male", "Teacher"])?;

        assert_eq!(
            dict.tag_counts(),
            [
                ("Male".to_string(), 2),
                ("Student".to_string(), 1),
                ("Teacher".to_string(), 1),
            ]
        );

        let rendered = dict.to_string();
        assert!(rendered.contains("Tag"));
        assert!(rendered.contains("Student"));

        Ok(())
    }
}
