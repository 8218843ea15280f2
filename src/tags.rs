//! Tag Sets
//!
//! A sorted, de-duplicated set of case-sensitive string tags.

use std::{
    cmp::Ordering,
    fmt,
    ops::{BitAnd, BitOr, Sub},
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A set of tags backed by a sorted `SmallVec<[String; 5]>`.
///
/// Tags are opaque atoms: no trimming, case folding or hierarchy is applied.
/// Duplicates collapse and insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet {
    tags: SmallVec<[String; 5]>,
}

impl TagSet {
    /// Create a new tag set from a vector of strings.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut set = Self { tags };

        set.tags.sort();
        set.tags.dedup();

        set
    }

    /// Create an empty tag set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: SmallVec::new(),
        }
    }

    /// Create a new tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        tags.iter().copied().collect()
    }

    /// Check if this set contains a specific tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_ok()
    }

    /// Check if this set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Get the number of tags in this set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Add a tag, returning `true` if it was not already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Ok(_) => false,
            Err(pos) => {
                self.tags.insert(pos, tag.to_string());
                true
            }
        }
    }

    /// Remove a tag, returning `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Ok(pos) => {
                self.tags.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Check if this set shares at least one tag with another.
    pub fn intersects(&self, other: &Self) -> bool {
        // Two pointers over sorted vectors for O(n + m).
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_tag_ref), Some(right_tag_ref)) = (left_tag, right_tag) {
            match left_tag_ref.cmp(right_tag_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    /// Check if every tag in `other` is also in this set.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.iter().all(|tag| self.contains(tag))
    }

    /// Tags present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.merge_with(other, |in_left, in_right| in_left && in_right)
    }

    /// Tags present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.merge_with(other, |in_left, in_right| in_left || in_right)
    }

    /// Tags present in this set but not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.merge_with(other, |in_left, in_right| in_left && !in_right)
    }

    fn position(&self, tag: &str) -> Result<usize, usize> {
        self.tags.binary_search_by(|held| held.as_str().cmp(tag))
    }

    /// Walk both sorted vectors once, keeping tags for which `keep` holds.
    fn merge_with(&self, other: &Self, keep: impl Fn(bool, bool) -> bool) -> Self {
        let capacity = self.tags.len().saturating_add(other.tags.len());
        let mut result = SmallVec::with_capacity(capacity);
        let mut left = self.tags.iter().peekable();
        let mut right = other.tags.iter().peekable();

        loop {
            let (tag, in_left, in_right) = match (left.peek(), right.peek()) {
                (Some(left_tag), Some(right_tag)) => match left_tag.cmp(right_tag) {
                    Ordering::Less => (left.next(), true, false),
                    Ordering::Greater => (right.next(), false, true),
                    Ordering::Equal => {
                        right.next();
                        (left.next(), true, true)
                    }
                },
                (Some(_), None) => (left.next(), true, false),
                (None, Some(_)) => (right.next(), false, true),
                (None, None) => break,
            };

            if let Some(tag) = tag
                && keep(in_left, in_right)
            {
                result.push(tag.clone());
            }
        }

        Self { tags: result }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(", "))
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter().map(String::as_str as fn(&String) -> &str)
    }
}

impl From<&str> for TagSet {
    fn from(tag: &str) -> Self {
        std::iter::once(tag).collect()
    }
}

impl From<&[&str]> for TagSet {
    fn from(tags: &[&str]) -> Self {
        Self::from_strs(tags)
    }
}

impl<const N: usize> From<[&str; N]> for TagSet {
    fn from(tags: [&str; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        Self::new(SmallVec::from_vec(tags))
    }
}

impl From<&TagSet> for TagSet {
    fn from(tags: &TagSet) -> Self {
        tags.clone()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.tags.into_vec()
    }
}

impl BitAnd for &TagSet {
    type Output = TagSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitOr for &TagSet {
    type Output = TagSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl Sub for &TagSet {
    type Output = TagSet;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}
