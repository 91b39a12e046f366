use alloc::collections::VecDeque;
use core::fmt;

use crate::CacheError;
use crate::key::{KeyMap, MapKey};

/// Sizing and expiry for a [`TtlCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Maximum live entries. Inserting past it evicts the oldest-inserted entry.
    pub capacity: usize,
    /// Entries older than this are treated as absent.
    pub ttl_ms: u64,
}

impl CacheConfig {
    pub fn new(capacity: usize, ttl_ms: u64) -> Self {
        Self { capacity, ttl_ms }
    }

    pub fn validate(&self) -> Result<(), CacheError> {
        if self.capacity == 0 {
            return Err(CacheError::ZeroCapacity);
        }
        if self.ttl_ms == 0 {
            return Err(CacheError::ZeroTtl);
        }
        Ok(())
    }
}

struct Entry<V> {
    value: V,
    inserted_ms: u64,
    seq: u64,
}

/// A bounded time-to-live cache for deduplicating fetches.
///
/// The cache never reads a clock: every call takes `now_ms` from the adapter, like the
/// scrolling debouncer in `virtual-list`. Expired entries are dropped lazily on lookup or in
/// bulk by [`TtlCache::purge_expired`].
///
/// Eviction is by insertion order. Re-inserting a key replaces the value and makes it the
/// newest entry; lookups do not affect order.
pub struct TtlCache<K, V> {
    config: CacheConfig,
    entries: KeyMap<K, Entry<V>>,
    // Insertion order. May hold stale `(key, seq)` pairs for re-inserted or removed keys; they
    // are skipped on eviction and compacted once the queue grows past twice the capacity.
    order: VecDeque<(K, u64)>,
    next_seq: u64,
}

impl<K: MapKey + Clone, V> TtlCache<K, V> {
    pub fn new(config: CacheConfig) -> Result<Self, CacheError> {
        config.validate()?;
        adebug!(
            capacity = config.capacity,
            ttl_ms = config.ttl_ms,
            "TtlCache::new"
        );
        Ok(Self {
            config,
            entries: KeyMap::new(),
            order: VecDeque::new(),
            next_seq: 0,
        })
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, inserted_ms: u64, now_ms: u64) -> bool {
        now_ms.saturating_sub(inserted_ms) >= self.config.ttl_ms
    }

    /// Inserts `value`, returning the previous live value for `key`.
    pub fn insert(&mut self, key: K, value: V, now_ms: u64) -> Option<V> {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);

        let prev = self.entries.insert(
            key.clone(),
            Entry {
                value,
                inserted_ms: now_ms,
                seq,
            },
        );
        self.order.push_back((key, seq));
        self.evict_overflow();
        self.compact_order();

        prev.filter(|e| !self.is_expired(e.inserted_ms, now_ms))
            .map(|e| e.value)
    }

    /// Looks up a live entry, dropping it if it has expired.
    pub fn get(&mut self, key: &K, now_ms: u64) -> Option<&V> {
        let inserted_ms = self.entries.get(key)?.inserted_ms;
        if self.is_expired(inserted_ms, now_ms) {
            atrace!("TtlCache: expired on lookup");
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Looks up a live entry without removing expired ones.
    pub fn peek(&self, key: &K, now_ms: u64) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|e| !self.is_expired(e.inserted_ms, now_ms))
            .map(|e| &e.value)
    }

    pub fn contains(&self, key: &K, now_ms: u64) -> bool {
        self.peek(key, now_ms).is_some()
    }

    /// Returns the cached value or computes, stores and returns a fresh one.
    pub fn get_or_insert_with(&mut self, key: K, now_ms: u64, f: impl FnOnce() -> V) -> V
    where
        V: Clone,
    {
        if let Some(v) = self.get(&key, now_ms) {
            return v.clone();
        }
        let value = f();
        self.insert(key, value.clone(), now_ms);
        value
    }

    /// Like [`Self::get_or_insert_with`] for fallible fetches. Errors are returned and not
    /// cached.
    pub fn try_get_or_insert_with<E>(
        &mut self,
        key: K,
        now_ms: u64,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E>
    where
        V: Clone,
    {
        if let Some(v) = self.get(&key, now_ms) {
            return Ok(v.clone());
        }
        let value = f()?;
        self.insert(key, value.clone(), now_ms);
        Ok(value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        let ttl_ms = self.config.ttl_ms;
        self.entries
            .retain(|_, e| now_ms.saturating_sub(e.inserted_ms) < ttl_ms);
        let purged = before - self.entries.len();
        if purged > 0 {
            adebug!(purged, "TtlCache::purge_expired");
            self.compact_order();
        }
        purged
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn is_current(&self, key: &K, seq: u64) -> bool {
        self.entries.get(key).is_some_and(|e| e.seq == seq)
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.config.capacity {
            let Some((key, seq)) = self.order.pop_front() else {
                break;
            };
            if self.is_current(&key, seq) {
                atrace!("TtlCache: evicted oldest entry");
                self.entries.remove(&key);
            }
        }
    }

    fn compact_order(&mut self) {
        if self.order.len() <= self.config.capacity.saturating_mul(2) {
            return;
        }
        let mut order = core::mem::take(&mut self.order);
        order.retain(|(key, seq)| self.is_current(key, *seq));
        self.order = order;
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("config", &self.config)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
