use crate::index::PolicyIndex;
use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// The entry map together with the policy index that describes it.
///
/// Both live behind the same lock in [`Storage`], so a policy holding a write guard can
/// update them as one unit.
#[derive(Debug)]
pub struct Slots<V, I> {
    pub(crate) map: HashMap<String, V>,
    pub(crate) index: I,
}

impl<V, I: PolicyIndex> Slots<V, I> {
    /// Removes `key` from the map and the index.
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        self.index.remove(key);
        self.map.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.index.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

/// Thread-safe key/value storage shared by every eviction policy.
///
/// `Storage` holds the entries and an auxiliary [`PolicyIndex`] behind a single
/// `parking_lot::RwLock`. It knows nothing about eviction: the policies built on top of
/// it decide *when* to insert or remove, this type only guarantees that the map and the
/// index change together.
///
/// # Type Parameters
///
/// * `V` - The stored value type. Lookups return clones.
/// * `I` - The policy index (`()` for a plain store).
///
/// # Thread Safety
///
/// - Lookups (`get`, `len`, `contains_key`) take the shared read lock and run
///   concurrently with each other
/// - `delete` and `clear` take the exclusive write lock
/// - `parking_lot` locks do not poison, so no operation returns a lock error
///
/// The lock itself is never handed out. Policies reach the slots through crate-private
/// guard accessors, which keeps index/map divergence impossible from the outside.
///
/// # Capacity
///
/// The capacity is fixed at construction. `Storage` reports it but does not enforce it;
/// enforcing it is the eviction policy's job.
///
/// # Examples
///
/// ```
/// use polycache_core::Storage;
/// use std::num::NonZeroUsize;
///
/// let store: Storage<i32> = Storage::new(NonZeroUsize::new(16).unwrap());
/// store.set("answer", 42);
///
/// assert_eq!(store.get("answer"), Some(42));
/// assert_eq!(store.len(), 1);
///
/// assert!(store.delete("answer"));
/// assert_eq!(store.get("answer"), None);
/// ```
#[derive(Debug)]
pub struct Storage<V, I = ()> {
    slots: RwLock<Slots<V, I>>,
    capacity: NonZeroUsize,
}

impl<V, I: PolicyIndex> Storage<V, I> {
    /// Creates an empty store with the given capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            slots: RwLock::new(Slots {
                map: HashMap::with_capacity(capacity.get().min(1024)),
                index: I::default(),
            }),
            capacity,
        }
    }

    /// The capacity this store was created with.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns a clone of the value stored under `key`.
    ///
    /// This is a raw lookup: it never touches the policy index.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.slots.read().map.get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.read().map.contains_key(key)
    }

    /// Removes `key` from the map and from the index.
    ///
    /// Returns `true` if an entry was removed, `false` if the key was absent.
    pub fn delete(&self, key: &str) -> bool {
        self.slots.write().remove(key).is_some()
    }

    /// Removes every entry and resets the index in one write-lock acquisition.
    pub fn clear(&self) {
        self.slots.write().clear();
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Slots<V, I>> {
        self.slots.read()
    }

    pub(crate) fn upgradable_read(&self) -> RwLockUpgradableReadGuard<'_, Slots<V, I>> {
        self.slots.upgradable_read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Slots<V, I>> {
        self.slots.write()
    }
}

impl<V> Storage<V, ()> {
    /// Inserts or overwrites `key` unconditionally.
    ///
    /// Only available on an index-less store: with a policy index, inserting without
    /// the policy would leave a key the index does not know about.
    pub fn set(&self, key: &str, value: V) {
        self.slots.write().map.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RecencyIndex;
    use std::sync::Arc;
    use std::thread;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_set_overwrites() {
        let store: Storage<&str> = Storage::new(capacity(4));
        store.set("k", "first");
        store.set("k", "second");
        assert_eq!(store.get("k"), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_raw_set_does_not_enforce_capacity() {
        let store: Storage<u8> = Storage::new(capacity(1));
        store.set("a", 1);
        store.set("b", 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let store: Storage<u8> = Storage::new(capacity(2));
        store.set("a", 1);
        assert!(!store.delete("missing"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties_store() {
        let store: Storage<u8> = Storage::new(capacity(8));
        for (i, key) in ["a", "b", "c"].iter().enumerate() {
            store.set(key, i as u8);
        }
        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains_key("a"));
    }

    #[test]
    fn test_delete_removes_index_record() {
        let store: Storage<u8, RecencyIndex> = Storage::new(capacity(4));
        {
            let mut slots = store.write();
            slots.map.insert("a".to_string(), 1);
            slots.index.push_front("a".to_string());
        }
        assert!(store.delete("a"));
        assert!(store.read().index.is_empty());
    }

    #[test]
    fn test_concurrent_raw_writes() {
        let store: Arc<Storage<usize>> = Arc::new(Storage::new(capacity(1000)));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..100 {
                        store.set(&format!("{}-{}", t, i), i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 400);
    }
}
