//! Time-boxed cache fronting all external provider calls.
//!
//! One instance is constructed at startup and handed to the provider layer —
//! never a global. Values are JSON so a single cache serves every provider's
//! payload shape. Expired entries are purged lazily on read; nothing sweeps
//! the map proactively. Failures are never cached: callers only `put` after
//! a successful fetch, so the next request retries the provider.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

/// Process-wide fetch cache keyed by `provider:normalized-query:params`.
///
/// The lock guards a map probe only and is never held across an await, so
/// concurrent identical requests may both miss and both call the provider.
/// That wastes a call but stays correct: every cached value is an idempotent
/// read result.
pub struct FetchCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl FetchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Cache key for a provider call: provider tag, lowercased query, and
    /// whatever parameters distinguish the call.
    pub fn key(provider: &str, query: &str, params: &str) -> String {
        format!("{provider}:{}:{params}", query.to_lowercase())
    }

    /// Look up a cached value. Returns None on miss, expiry, or if the
    /// stored JSON no longer matches the requested type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("fetch cache poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                serde_json::from_value(entry.value.clone()).ok()
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a successful fetch result under the configured TTL.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        self.put_with_ttl(key, value, self.ttl);
    }

    pub fn put_with_ttl<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        let mut entries = self.entries.lock().expect("fetch cache poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop every entry. Used by tests to force provider re-fetches.
    pub fn clear(&self) {
        self.entries.lock().expect("fetch cache poisoned").clear();
    }
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_stored_value_before_expiry() {
        let cache = FetchCache::new(Duration::from_secs(60));
        cache.put("gdelt:acme:25", &vec!["a".to_string(), "b".to_string()]);

        let hit: Option<Vec<String>> = cache.get("gdelt:acme:25");
        assert_eq!(hit, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn expired_entry_is_purged_on_read() {
        let cache = FetchCache::new(Duration::from_secs(60));
        cache.put_with_ttl("k", &1u32, Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));

        let miss: Option<u32> = cache.get("k");
        assert_eq!(miss, None);
        // Second read still misses; the entry is gone, not just skipped.
        let miss: Option<u32> = cache.get("k");
        assert_eq!(miss, None);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = FetchCache::default();
        cache.put("k", &true);
        cache.clear();
        let miss: Option<bool> = cache.get("k");
        assert_eq!(miss, None);
    }

    #[test]
    fn key_lowercases_the_query() {
        assert_eq!(FetchCache::key("gdelt", "Acme Corp", "25"), "gdelt:acme corp:25");
    }
}
