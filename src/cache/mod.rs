//! Local product cache used as a fallback when the endpoint is unreachable.
//!
//! This module provides:
//! - A string key/value store abstraction with SQLite and no-op backends
//! - A product cache that stores one product list plus its fetch time
//! - A freshness rule: entries older than the max age are treated as missing

mod layer;
mod storage;
mod traits;

pub use layer::ProductCache;
pub use storage::{NoopStorage, SqliteStorage};
#[cfg(test)]
pub use storage::FailingStorage;
