//! Tagdict
//!
//! An in-memory container that associates items with mutable sets of string
//! tags and answers conjunction queries ("every item tagged `Female` AND
//! `Teacher`") through an inverted index.
//!
//! Items are keyed by identity, not by contents: each stored `Rc` allocation
//! is its own entry, even if another entry compares equal.

pub mod dict;
pub mod error;
pub mod fixtures;
pub mod handle;
mod index;
pub mod matches;
pub mod prelude;
pub mod query;
pub mod store;
pub mod tags;
pub mod utils;
