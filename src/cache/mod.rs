mod structs;

pub use structs::CacheEntry;

use dashmap::DashMap;
use log::{debug, info};
use serde_json::Value;
use std::time::Duration;

/// In-memory TTL cache for catalog responses, keyed by resource key.
///
/// Expired entries are dropped lazily on read. Once the entry count passes the
/// high-water mark, every write also sweeps out whatever has expired.
pub struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    high_water: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, high_water: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            high_water,
        }
    }

    /// Load a fresh payload, evicting the entry if it has expired
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            None => return None,
            Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.payload.clone()),
            Some(_) => {}
        }

        // Shard guard is released above; a concurrent re-set keeps its entry.
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(self.ttl))
            .is_some()
        {
            debug!("Evicted expired cache entry: {}", key);
        }
        None
    }

    /// Save a payload, superseding any previous entry for the key
    pub fn set(&self, key: &str, payload: Value) {
        self.entries.insert(key.to_string(), CacheEntry::new(payload));

        if self.entries.len() > self.high_water {
            self.sweep();
        }
    }

    /// Check if a fresh entry exists
    pub fn exists(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(self.ttl))
    }

    /// Clear all cached data
    pub fn clear(&self) {
        self.entries.clear();
        info!("Cleared response cache");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // --- Helper Methods ---

    fn sweep(&self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(self.ttl));
        debug!(
            "Swept response cache: {} -> {} entries",
            before,
            self.entries.len()
        );
    }
}
