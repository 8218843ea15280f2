//! Tagdict prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    dict::TagDict,
    error::TagDictError,
    fixtures::{Fixture, FixtureError},
    handle::ItemHandle,
    matches::Matches,
    query::{TagQuery, WILDCARD},
    store::{Entry, ItemKey},
    tags::TagSet,
};
