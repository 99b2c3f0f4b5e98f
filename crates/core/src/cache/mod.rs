//! File-backed cache for suggestion lists.
//!
//! This module provides a persistent, content-addressed cache keyed by
//! (source uid, SHA-256 of the query). It supports:
//!
//! - Load-or-fetch with a wall-clock freshness window
//! - Two-level directory sharding by digest prefix
//! - Atomic replacement of entries (write to a temp file, then rename)
//! - Stale-entry and full purges

pub mod hash;
pub mod purge;
pub mod store;

pub use hash::{CacheKey, digest};
pub use store::{CacheEntry, SuggestionCache};
