use thiserror::Error;

/// Failure to obtain the product list from the remote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  /// The endpoint answered with a non-2xx status
  #[error("HTTP error: {0}")]
  Status(u16),
  /// Connection, TLS or body transfer failed
  #[error("request failed: {0}")]
  Transport(String),
  /// The body was not a JSON product array
  #[error("malformed response: {0}")]
  Decode(String),
}

/// No usable cache entry exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheMiss {
  /// Never saved, unreadable, or malformed
  #[error("no cached products")]
  Absent,
  /// Saved too long ago to be trusted
  #[error("cached products are {age_secs}s old")]
  Expired { age_secs: i64 },
}
