//! Bounded LRU cache of document preview references
//!
//! Maps document ids to display references. Every entry owns the raw
//! reference it was created from; the raw reference is revoked exactly once,
//! when the entry is evicted, overwritten, removed, cleared or dropped.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::{debug, trace};

use crate::registry::{RawReference, RegistryError, ResourceRegistry};
use crate::trust::{DisplayReference, TrustPolicy};

/// One cached preview
struct CacheEntry {
    display: DisplayReference,
    raw: RawReference,
    /// Byte length of the content behind `raw`
    size: usize,
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    /// Bytes of document content held by live entries
    pub bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// LRU cache mapping document ids to revocable preview references.
///
/// Single-threaded: all mutation goes through `get`, `put`, `remove` and
/// `clear` on the owning thread.
pub struct DocumentPreviewCache<R: ResourceRegistry, T: TrustPolicy> {
    /// Cached entries (document id -> entry)
    entries: HashMap<String, CacheEntry>,
    /// LRU order (front = oldest, back = newest)
    lru_order: VecDeque<String>,
    /// Maximum cache size
    max_size: usize,
    registry: R,
    trust: T,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<R: ResourceRegistry, T: TrustPolicy> DocumentPreviewCache<R, T> {
    /// Create a cache holding at most `max_size` previews.
    ///
    /// A `max_size` of zero is treated as one, so a freshly stored preview is
    /// never evicted by the same `put`.
    pub fn new(max_size: usize, registry: R, trust: T) -> Self {
        Self {
            entries: HashMap::new(),
            lru_order: VecDeque::new(),
            max_size: max_size.max(1),
            registry,
            trust,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Get the preview for `key`, marking it most recently used.
    ///
    /// Returns `None` on a miss; nothing is created.
    pub fn get(&mut self, key: &str) -> Option<DisplayReference> {
        match self.entries.get(key) {
            Some(entry) => {
                let display = entry.display.clone();
                self.touch(key);
                self.hits += 1;
                trace!(key, "preview cache hit");
                Some(display)
            }
            None => {
                self.misses += 1;
                trace!(key, "preview cache miss");
                None
            }
        }
    }

    /// Like `get`, but not counted as a hit or miss.
    pub fn view(&mut self, key: &str) -> Option<DisplayReference> {
        let display = self.entries.get(key)?.display.clone();
        self.touch(key);
        Some(display)
    }

    /// Store `content` as the preview for `key` and return its display reference.
    ///
    /// An existing entry for `key` is revoked before the new reference is
    /// created. If the cache then exceeds its capacity, the least recently
    /// used entry is revoked and dropped. Registry failures propagate
    /// unchanged; in that case no entry for `key` remains.
    ///
    /// The registry is asked for the new reference before anything is
    /// evicted, so a quota-limited registry must have room for `content`
    /// while the cache is still full.
    pub fn put(&mut self, key: &str, content: &[u8]) -> Result<DisplayReference, RegistryError> {
        if self.remove_entry(key) {
            debug!(key, "replacing cached preview");
        }

        let raw = self.registry.create(content)?;
        let display = self.trust.trust(&raw);

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                display: display.clone(),
                raw,
                size: content.len(),
            },
        );
        self.lru_order.push_back(key.to_string());
        debug!(key, bytes = content.len(), "cached preview");

        while self.entries.len() > self.max_size {
            let Some(oldest) = self.lru_order.pop_front() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                self.registry.revoke(entry.raw);
                self.evictions += 1;
                debug!(key = %oldest, "evicted least recently used preview");
            }
        }

        Ok(display)
    }

    /// Revoke and drop the preview for `key`. Returns whether one existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    /// Revoke every cached preview.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.lru_order.clear();
        for (_, entry) in self.entries.drain() {
            self.registry.revoke(entry.raw);
        }
        if count > 0 {
            debug!(count, "cleared preview cache");
        }
    }

    /// Check for a cached preview without affecting recency
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Cached keys, least recently used first
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.lru_order.iter().map(String::as_str)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            capacity: self.max_size,
            bytes: self.entries.values().map(|e| e.size).sum(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }

    /// The registry backing this cache (for inspection).
    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.lru_order.retain(|k| k != key);
                self.registry.revoke(entry.raw);
                true
            }
            None => false,
        }
    }

    /// Move a key to the back of the LRU queue (most recently used)
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.lru_order.iter().position(|k| k == key) {
            if let Some(k) = self.lru_order.remove(pos) {
                self.lru_order.push_back(k);
            }
        }
    }
}

impl<R: ResourceRegistry, T: TrustPolicy> Drop for DocumentPreviewCache<R, T> {
    fn drop(&mut self) {
        self.clear();
    }
}
