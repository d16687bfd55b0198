use crate::index::RecencyIndex;
use crate::storage::{Slots, Storage};
use crate::Cache;
use std::num::NonZeroUsize;
use tracing::debug;

/// A cache that evicts the least recently used entry when it is full.
///
/// Every hit and every update of an existing key moves that key to the head of the
/// recency order. When a new key arrives at capacity, the tail of the order (the entry
/// untouched for the longest time) is evicted first.
///
/// # Thread Safety
///
/// Recency order and entries share one lock. `get` mutates the order, so both `get` and
/// `set` take the write lock for their whole read-modify-write sequence.
///
/// # Performance
///
/// - **Get**: O(n) for the reorder on a hit, O(1) on a miss
/// - **Set**: O(n) for the reorder on update, O(1) eviction
///
/// # Examples
///
/// ```
/// use polycache_core::{Cache, LruCache};
/// use std::num::NonZeroUsize;
///
/// let cache = LruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.set("a", 1);
/// cache.set("b", 2);
///
/// // Touch "a" so "b" becomes the least recently used entry
/// assert_eq!(cache.get("a"), Some(1));
///
/// cache.set("c", 3);
/// assert_eq!(cache.get("b"), None);
/// assert_eq!(cache.get("a"), Some(1));
/// assert_eq!(cache.get("c"), Some(3));
/// ```
#[derive(Debug)]
pub struct LruCache<V> {
    storage: Storage<V, RecencyIndex>,
}

impl<V> LruCache<V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            storage: Storage::new(capacity),
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.storage
            .read()
            .index
            .iter()
            .map(str::to_string)
            .collect()
    }

    fn evict(slots: &mut Slots<V, RecencyIndex>) {
        if let Some(evicted) = slots.index.pop_back() {
            slots.map.remove(&evicted);
            debug!(key = %evicted, "evicted least recently used entry");
        }
    }
}

impl<V: Clone + Send + Sync> Cache<V> for LruCache<V> {
    fn set(&self, key: &str, value: V) {
        let mut guard = self.storage.write();
        let slots = &mut *guard;

        if let Some(slot) = slots.map.get_mut(key) {
            // Updating never grows the set, so capacity is not re-checked
            *slot = value;
            slots.index.touch(key);
            return;
        }

        if slots.len() >= self.storage.capacity() {
            Self::evict(slots);
        }
        slots.map.insert(key.to_string(), value);
        slots.index.push_front(key.to_string());
    }

    fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.storage.write();
        let slots = &mut *guard;

        let value = slots.map.get(key)?.clone();
        slots.index.touch(key);
        Some(value)
    }

    fn delete(&self, key: &str) {
        self.storage.delete(key);
    }

    fn clear(&self) {
        self.storage.clear();
    }

    fn len(&self) -> usize {
        self.storage.len()
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }
}
