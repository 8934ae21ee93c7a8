//! Bounded FIFO cache of parsed variant sets.
//!
//! Entries are evicted strictly in insertion order; lookups never promote an
//! entry. The whole read-check-insert sequence runs under one lock so the
//! capacity bound holds when the cache is shared between threads.
//!
//! ```text
//!   order: [k1, k2, k3]   (front = oldest)
//!   map:   {k1 -> set1, k2 -> set2, k3 -> set3}
//!
//!   put(k4) with capacity 3:
//!     pop k1 from the front, remove it from the map, push k4 at the back
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::types::{TemplateKey, VariantSet};

/// Item limit of a [`VariantCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLimit {
    /// Hold at most this many entries. `Items(0)` disables caching.
    Items(usize),
    /// Never evict.
    Unbounded,
}

impl CacheLimit {
    /// A limit that caches nothing.
    pub const DISABLED: CacheLimit = CacheLimit::Items(0);
}

impl Default for CacheLimit {
    fn default() -> Self {
        CacheLimit::Items(1024)
    }
}

impl From<Option<usize>> for CacheLimit {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(CacheLimit::Unbounded, CacheLimit::Items)
    }
}

/// Hit, miss and eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// A FIFO cache from template digest to parsed variants.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use varia::{CacheLimit, TemplateKey, VariantCache, VariantSet};
///
/// let cache = VariantCache::new(CacheLimit::Items(2));
/// for template in ["a", "b", "c"] {
///     cache.put(TemplateKey::from_template(template), Arc::new(VariantSet::default()));
/// }
///
/// assert_eq!(cache.len(), 2);
/// assert!(cache.get(&TemplateKey::from_template("a")).is_none());
/// assert!(cache.get(&TemplateKey::from_template("c")).is_some());
/// ```
#[derive(Debug)]
pub struct VariantCache {
    limit: CacheLimit,
    state: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    /// Maps key to parsed variants
    map: HashMap<TemplateKey, Arc<VariantSet>>,
    /// Keys in insertion order (front = oldest)
    order: VecDeque<TemplateKey>,
    stats: CacheStats,
}

impl VariantCache {
    pub fn new(limit: CacheLimit) -> Self {
        Self {
            limit,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The configured item limit.
    pub fn limit(&self) -> CacheLimit {
        self.limit
    }

    /// Retrieves an entry without affecting eviction order.
    pub fn get(&self, key: &TemplateKey) -> Option<Arc<VariantSet>> {
        let mut state = self.state.lock();
        let found = state.map.get(key).cloned();
        if found.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        found
    }

    /// Inserts an entry, evicting the oldest entries if the cache is full.
    ///
    /// Re-inserting an existing key replaces its value in place.
    pub fn put(&self, key: TemplateKey, value: Arc<VariantSet>) {
        let mut state = self.state.lock();
        state.insert(key, value, self.limit);
    }

    /// Returns the cached entry for `key`, or builds, caches and returns it.
    ///
    /// `build` runs without the lock held. If another thread inserted the same
    /// key in the meantime, its entry wins.
    pub fn get_or_insert_with(
        &self,
        key: TemplateKey,
        build: impl FnOnce() -> VariantSet,
    ) -> Arc<VariantSet> {
        if let Some(found) = self.get(&key) {
            return found;
        }
        let built = Arc::new(build());
        let mut state = self.state.lock();
        if let Some(existing) = state.map.get(&key) {
            return Arc::clone(existing);
        }
        state.insert(key, Arc::clone(&built), self.limit);
        built
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.state.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.map.clear();
        state.order.clear();
    }

    /// A snapshot of the hit, miss and eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }
}

impl Default for VariantCache {
    fn default() -> Self {
        Self::new(CacheLimit::default())
    }
}

impl CacheState {
    fn insert(&mut self, key: TemplateKey, value: Arc<VariantSet>, limit: CacheLimit) {
        let capacity = match limit {
            CacheLimit::Items(0) => return,
            CacheLimit::Items(n) => Some(n),
            CacheLimit::Unbounded => None,
        };

        if let Some(existing) = self.map.get_mut(&key) {
            *existing = value;
            return;
        }

        if let Some(capacity) = capacity {
            self.evict_until_below(capacity);
        }
        self.order.push_back(key);
        self.map.insert(key, value);

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Evicts from the front of the queue until there is room for one entry.
    fn evict_until_below(&mut self, capacity: usize) {
        while self.map.len() >= capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.map.remove(&oldest);
            self.stats.evictions += 1;
            debug!(key = %oldest, "evicted variant set");
        }
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        debug_assert_eq!(self.map.len(), self.order.len());
        debug_assert!(self.order.iter().all(|key| self.map.contains_key(key)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: usize) -> TemplateKey {
        TemplateKey::from_template(&format!("template {n}"))
    }

    fn entry(default: &str) -> Arc<VariantSet> {
        Arc::new(crate::parser::parse_variants(default, "|"))
    }

    #[test]
    fn evicts_oldest_first() {
        let cache = VariantCache::new(CacheLimit::Items(3));
        for n in 0..4 {
            cache.put(key(n), entry("x"));
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get(&key(0)).is_none());
        for n in 1..4 {
            assert!(cache.get(&key(n)).is_some(), "key {n} should be cached");
        }
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn reads_do_not_promote() {
        let cache = VariantCache::new(CacheLimit::Items(2));
        cache.put(key(0), entry("a"));
        cache.put(key(1), entry("b"));
        assert!(cache.get(&key(0)).is_some());
        cache.put(key(2), entry("c"));
        assert!(cache.get(&key(0)).is_none());
        assert!(cache.get(&key(1)).is_some());
    }

    #[test]
    fn reinsert_replaces_without_reordering() {
        let cache = VariantCache::new(CacheLimit::Items(2));
        cache.put(key(0), entry("a"));
        cache.put(key(1), entry("b"));
        cache.put(key(0), entry("a2"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&key(0)).unwrap().default_variant(), "a2");

        cache.put(key(2), entry("c"));
        assert!(cache.get(&key(0)).is_none());
    }

    #[test]
    fn disabled_cache_stores_nothing() {
        let cache = VariantCache::new(CacheLimit::DISABLED);
        cache.put(key(0), entry("a"));
        assert!(cache.is_empty());
        assert!(cache.get(&key(0)).is_none());
    }

    #[test]
    fn unbounded_cache_never_evicts() {
        let cache = VariantCache::new(CacheLimit::Unbounded);
        for n in 0..5000 {
            cache.put(key(n), entry("x"));
        }
        assert_eq!(cache.len(), 5000);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn get_or_insert_with_builds_once() {
        let cache = VariantCache::new(CacheLimit::default());
        let mut builds = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(key(0), || {
                builds += 1;
                VariantSet::default()
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 2,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[test]
    fn option_limit_conversion() {
        assert_eq!(CacheLimit::from(None), CacheLimit::Unbounded);
        assert_eq!(CacheLimit::from(Some(0)), CacheLimit::DISABLED);
        assert_eq!(CacheLimit::default(), CacheLimit::Items(1024));
    }
}
