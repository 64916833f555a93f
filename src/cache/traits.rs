//! Storage abstraction for the cache.

use color_eyre::Result;

/// A persistent string key/value store.
///
/// Errors are reported to the caller, but the product cache treats every
/// store failure as best-effort: a failed write is logged, a failed read
/// is a cache miss.
pub trait KeyValueStore: Send + Sync {
  /// Read the value stored under `key`, if any.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<()>;
}
