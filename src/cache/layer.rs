//! Product cache: one product list plus the time it was fetched.

use chrono::{DateTime, Duration, Utc};
use color_eyre::{eyre::eyre, Result};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

use super::traits::KeyValueStore;
use crate::catalog::Product;
use crate::error::CacheMiss;

const PRODUCTS_KEY: &str = "products_cache";
const FETCHED_AT_KEY: &str = "products_cache_time";

/// A snapshot of the product collection and when it was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
  pub products: Vec<Product>,
  pub fetched_at: DateTime<Utc>,
}

/// Cache for the last successfully fetched product list.
///
/// Stores two values in the underlying key/value store: the serialized
/// product array and the fetch time as epoch milliseconds. Both keys are
/// namespaced by the endpoint so switching endpoints never serves another
/// endpoint's products.
#[derive(Clone)]
pub struct ProductCache {
  storage: Arc<dyn KeyValueStore>,
  products_key: String,
  fetched_at_key: String,
  /// Entries at least this old are not served
  max_age: Duration,
}

impl ProductCache {
  /// Create a cache for `endpoint` on top of the given store.
  pub fn new(storage: impl KeyValueStore + 'static, endpoint: &str) -> Self {
    let namespace = endpoint_namespace(endpoint);
    Self {
      storage: Arc::new(storage),
      products_key: format!("{}:{}", PRODUCTS_KEY, namespace),
      fetched_at_key: format!("{}:{}", FETCHED_AT_KEY, namespace),
      max_age: Duration::minutes(5),
    }
  }

  /// Set the max age for cached data.
  pub fn with_max_age(mut self, max_age: Duration) -> Self {
    self.max_age = max_age;
    self
  }

  /// Store a product list and its fetch time, replacing the previous entry.
  pub fn save(&self, products: &[Product], fetched_at: DateTime<Utc>) -> Result<()> {
    let data =
      serde_json::to_string(products).map_err(|e| eyre!("Failed to serialize products: {}", e))?;

    self.storage.set(&self.products_key, &data)?;
    self
      .storage
      .set(&self.fetched_at_key, &fetched_at.timestamp_millis().to_string())?;

    debug!(count = products.len(), "saved products to cache");
    Ok(())
  }

  /// Load the last saved entry regardless of age.
  ///
  /// Returns `None` if nothing was saved, the store cannot be read, or
  /// either value fails to parse.
  pub fn load(&self) -> Option<CacheEntry> {
    let (data, millis) = match (
      self.storage.get(&self.products_key),
      self.storage.get(&self.fetched_at_key),
    ) {
      (Ok(Some(data)), Ok(Some(millis))) => (data, millis),
      (Err(e), _) | (_, Err(e)) => {
        warn!("Cache read failed: {}", e);
        return None;
      }
      _ => return None,
    };

    let Some(fetched_at) = millis
      .trim()
      .parse::<i64>()
      .ok()
      .and_then(DateTime::<Utc>::from_timestamp_millis)
    else {
      debug!(value = %millis, "ignoring malformed cache timestamp");
      return None;
    };

    match serde_json::from_str::<Vec<Product>>(&data) {
      Ok(products) => Some(CacheEntry {
        products,
        fetched_at,
      }),
      Err(e) => {
        debug!("ignoring malformed cached products: {}", e);
        None
      }
    }
  }

  /// Load the saved entry only if it is younger than the max age at `now`.
  pub fn load_fresh(&self, now: DateTime<Utc>) -> Result<CacheEntry, CacheMiss> {
    let entry = self.load().ok_or(CacheMiss::Absent)?;
    let age = now - entry.fetched_at;

    if age < self.max_age {
      Ok(entry)
    } else {
      Err(CacheMiss::Expired {
        age_secs: age.num_seconds(),
      })
    }
  }
}

/// Short stable digest of the endpoint, used to namespace cache keys.
fn endpoint_namespace(endpoint: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(endpoint.trim().as_bytes());
  hex::encode(hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{FailingStorage, NoopStorage, SqliteStorage};

  const ENDPOINT: &str = "https://api.example.com/products";

  fn sample() -> Vec<Product> {
    vec![Product::new(1, "Apple", 10.0), Product::new(2, "Banana", 5.0)]
  }

  fn cache() -> ProductCache {
    ProductCache::new(SqliteStorage::in_memory().unwrap(), ENDPOINT)
  }

  #[test]
  fn test_round_trip_within_max_age() {
    let cache = cache();
    let saved_at = Utc::now();
    cache.save(&sample(), saved_at).unwrap();

    let entry = cache.load_fresh(saved_at + Duration::minutes(2)).unwrap();

    assert_eq!(entry.products, sample());
    assert_eq!(entry.fetched_at.timestamp_millis(), saved_at.timestamp_millis());
  }

  #[test]
  fn test_entry_at_max_age_is_expired() {
    let cache = cache();
    let saved_at = Utc::now();
    cache.save(&sample(), saved_at).unwrap();

    assert!(matches!(
      cache.load_fresh(saved_at + Duration::minutes(5)),
      Err(CacheMiss::Expired { age_secs: 300 })
    ));
    assert!(matches!(
      cache.load_fresh(saved_at + Duration::minutes(10)),
      Err(CacheMiss::Expired { .. })
    ));
    // Stale entries are still readable without the age rule
    assert!(cache.load().is_some());
  }

  #[test]
  fn test_never_saved_is_absent() {
    assert_eq!(cache().load_fresh(Utc::now()), Err(CacheMiss::Absent));
  }

  #[test]
  fn test_custom_max_age() {
    let cache = cache().with_max_age(Duration::seconds(30));
    let saved_at = Utc::now();
    cache.save(&sample(), saved_at).unwrap();

    assert!(cache.load_fresh(saved_at + Duration::seconds(29)).is_ok());
    assert!(cache.load_fresh(saved_at + Duration::seconds(31)).is_err());
  }

  #[test]
  fn test_save_overwrites_previous_entry() {
    let cache = cache();
    let now = Utc::now();
    cache.save(&sample(), now).unwrap();
    cache.save(&[Product::new(3, "Cherry", 1.0)], now).unwrap();

    let entry = cache.load().unwrap();
    assert_eq!(entry.products, vec![Product::new(3, "Cherry", 1.0)]);
  }

  #[test]
  fn test_malformed_products_are_absent() {
    let storage = SqliteStorage::in_memory().unwrap();
    let cache = ProductCache::new(storage, ENDPOINT);
    cache.save(&sample(), Utc::now()).unwrap();
    cache.storage.set(&cache.products_key, "{not json").unwrap();

    assert_eq!(cache.load(), None);
    assert_eq!(cache.load_fresh(Utc::now()), Err(CacheMiss::Absent));
  }

  #[test]
  fn test_malformed_timestamp_is_absent() {
    let cache = cache();
    cache.save(&sample(), Utc::now()).unwrap();
    cache.storage.set(&cache.fetched_at_key, "yesterday").unwrap();

    assert_eq!(cache.load(), None);
  }

  #[test]
  fn test_endpoints_do_not_share_entries() {
    let storage = Arc::new(SqliteStorage::in_memory().unwrap());
    let first = ProductCache {
      storage: storage.clone(),
      ..ProductCache::new(NoopStorage, ENDPOINT)
    };
    let second = ProductCache {
      storage,
      ..ProductCache::new(NoopStorage, "https://other.example.com/products")
    };

    first.save(&sample(), Utc::now()).unwrap();

    assert!(first.load().is_some());
    assert!(second.load().is_none());
  }

  #[test]
  fn test_broken_store_fails_save_and_misses_load() {
    let cache = ProductCache::new(FailingStorage, ENDPOINT);

    assert!(cache.save(&sample(), Utc::now()).is_err());
    assert_eq!(cache.load_fresh(Utc::now()), Err(CacheMiss::Absent));
  }

  #[test]
  fn test_noop_store_always_misses() {
    let cache = ProductCache::new(NoopStorage, ENDPOINT);
    cache.save(&sample(), Utc::now()).unwrap();
    assert_eq!(cache.load(), None);
  }
}
