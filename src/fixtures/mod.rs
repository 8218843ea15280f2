//! Fixtures
//!
//! Seed data for tests and demos, read from `fixtures/entries/<set>.yml`:
//!
//! ```yaml
//! entries:
//!   ben:
//!     item: { name: Ben }
//!     tags: [Male, Student]
//! ```

use std::{fs, path::PathBuf, rc::Rc};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    dict::TagDict, error::TagDictError, fixtures::entries::EntriesFixture, query::WILDCARD,
    store::ItemKey,
};

pub mod entries;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Entry label not found
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Entry label defined by more than one loaded file
    #[error("Duplicate entry label: {0}")]
    DuplicateLabel(String),

    /// The tag dictionary rejected an entry
    #[error("Invalid entry {label}: {source}")]
    InvalidEntry {
        /// Label of the rejected entry
        label: String,

        /// The underlying tag dictionary error
        source: TagDictError,
    },
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<T> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded entries
    dict: TagDict<T>,

    /// Entry label -> item key
    keys: FxHashMap<String, ItemKey>,
}

impl<T: DeserializeOwned> Fixture<T> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            dict: TagDict::new(),
            keys: FxHashMap::default(),
        }
    }

    /// Load entries from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a label was
    /// already loaded, or if an entry uses a reserved tag. Nothing from the
    /// file is loaded when it fails.
    pub fn load_entries(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("entries").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: EntriesFixture<T> = serde_norway::from_str(&contents)?;

        if let Some(label) = fixture
            .entries
            .keys()
            .find(|label| self.keys.contains_key(*label))
        {
            return Err(FixtureError::DuplicateLabel(label.clone()));
        }

        // Reject the whole file before the first entry is added.
        if let Some(label) = fixture
            .entries
            .iter()
            .find_map(|(label, entry)| entry.tags.contains(WILDCARD).then_some(label))
        {
            return Err(FixtureError::InvalidEntry {
                label: label.clone(),
                source: TagDictError::ReservedTag(WILDCARD.to_string()),
            });
        }

        for (label, entry) in fixture.entries {
            let key = self
                .dict
                .add(Rc::new(entry.item), entry.tags)
                .map_err(|source| FixtureError::InvalidEntry {
                    label: label.clone(),
                    source,
                })?;

            self.keys.insert(label, key);
        }

        debug!(set = name, entries = self.keys.len(), "loaded entries fixture");

        Ok(self)
    }

    /// Load a fixture set by name from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_entries(name)?;

        Ok(fixture)
    }
}

impl<T> Fixture<T> {
    /// Get an item key by its entry label
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not found.
    pub fn key(&self, label: &str) -> Result<ItemKey, FixtureError> {
        self.keys
            .get(label)
            .copied()
            .ok_or_else(|| FixtureError::EntryNotFound(label.to_string()))
    }

    /// Get an item's payload by its entry label
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not found or the item has been removed.
    pub fn item(&self, label: &str) -> Result<&Rc<T>, FixtureError> {
        let key = self.key(label)?;

        self.dict
            .get(key)
            .map_err(|_removed| FixtureError::EntryNotFound(label.to_string()))
    }

    /// Get the loaded tag dictionary
    pub fn dict(&self) -> &TagDict<T> {
        &self.dict
    }

    /// Get the loaded tag dictionary, mutably
    pub fn dict_mut(&mut self) -> &mut TagDict<T> {
        &mut self.dict
    }

    /// Consume the fixture, keeping only the tag dictionary
    pub fn into_dict(self) -> TagDict<T> {
        self.dict
    }
}

impl<T: DeserializeOwned> Default for Fixture<T> {
    fn default() -> Self {
        Self::new()
    }
}
