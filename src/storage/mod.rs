//! Local storage for fetched catalogs
//!
//! A [`CatalogCache`] is a small key/value store of JSON documents, each
//! stamped with the time it was written. Freshness is decided by the caller
//! through a [`TtlPolicy`], so the stores themselves never look at a clock.

pub mod file;
pub mod in_memory;

pub use file::FileCache;
pub use in_memory::InMemoryCache;

use crate::core::error::CacheError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A stored value together with its write time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: serde_json::Value,
    pub stored_at: DateTime<Utc>,
}

/// Key/value store for cached catalog documents
///
/// Implementations must be safe to share between threads.
pub trait CatalogCache: Send + Sync {
    /// Get the entry stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;

    /// Store `value` under `key`, replacing any previous entry
    fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        stored_at: DateTime<Utc>,
    ) -> Result<(), CacheError>;

    /// Remove the entry under `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// Fixed-duration freshness rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub ttl: Duration,
}

impl TtlPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// An entry is fresh while less than `ttl` has passed since it was stored
    ///
    /// Entries stamped in the future (clock skew) count as fresh.
    pub fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        match (now - entry.stored_at).to_std() {
            Ok(age) => age < self.ttl,
            Err(_) => true,
        }
    }
}

/// Source of the current time for TTL decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry_at(stored_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry {
            value: json!([]),
            stored_at,
        }
    }

    #[test]
    fn test_ttl_boundaries() {
        let policy = TtlPolicy::new(Duration::from_secs(60));
        let stored = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = entry_at(stored);

        assert!(policy.is_fresh(&entry, stored));
        assert!(policy.is_fresh(&entry, stored + chrono::Duration::seconds(59)));
        assert!(!policy.is_fresh(&entry, stored + chrono::Duration::seconds(60)));
        assert!(!policy.is_fresh(&entry, stored + chrono::Duration::hours(2)));
    }

    #[test]
    fn test_future_entry_is_fresh() {
        let policy = TtlPolicy::new(Duration::from_secs(60));
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = entry_at(now + chrono::Duration::minutes(5));
        assert!(policy.is_fresh(&entry, now));
    }
}
