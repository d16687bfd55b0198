use crate::index::FrequencyIndex;
use crate::storage::{Slots, Storage};
use crate::Cache;
use std::num::NonZeroUsize;
use tracing::debug;

/// A cache that evicts the least frequently used entry when it is full.
///
/// Each key carries an access counter that starts at 1 on insertion and grows by one
/// on every update through `set` and every hit through `get`. When a new key arrives
/// at capacity, the key with the smallest counter is evicted; among equal counters the
/// oldest insertion goes first.
///
/// # Performance
///
/// - **Get**: O(1)
/// - **Set**: O(1) on update, O(n) on eviction (linear scan for the minimum)
///
/// # Examples
///
/// ```
/// use polycache_core::{Cache, LfuCache};
/// use std::num::NonZeroUsize;
///
/// let cache = LfuCache::new(NonZeroUsize::new(2).unwrap());
/// cache.set("a", "alpha");
/// cache.set("b", "beta");
///
/// // "a" is read once more than "b"
/// cache.get("a");
///
/// cache.set("c", "gamma");
/// assert_eq!(cache.get("b"), None);
/// assert_eq!(cache.frequency("a"), Some(2));
/// ```
#[derive(Debug)]
pub struct LfuCache<V> {
    storage: Storage<V, FrequencyIndex>,
}

impl<V> LfuCache<V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            storage: Storage::new(capacity),
        }
    }

    /// Current access counter of `key`, or `None` if the key is not cached.
    ///
    /// Reading the counter does not count as an access.
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.storage.read().index.count(key)
    }

    fn evict(slots: &mut Slots<V, FrequencyIndex>) {
        if let Some(evicted) = slots.index.eviction_candidate() {
            slots.remove(&evicted);
            debug!(key = %evicted, "evicted least frequently used entry");
        }
    }
}

impl<V: Clone + Send + Sync> Cache<V> for LfuCache<V> {
    fn set(&self, key: &str, value: V) {
        let mut guard = self.storage.write();
        let slots = &mut *guard;

        if let Some(slot) = slots.map.get_mut(key) {
            *slot = value;
            slots.index.increment(key);
            return;
        }

        if slots.len() >= self.storage.capacity() {
            Self::evict(slots);
        }
        slots.map.insert(key.to_string(), value);
        slots.index.insert(key.to_string());
    }

    fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.storage.write();
        let slots = &mut *guard;

        let value = slots.map.get(key)?.clone();
        slots.index.increment(key);
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
