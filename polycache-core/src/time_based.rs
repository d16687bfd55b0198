use crate::error::{CacheError, Result};
use crate::index::{is_expired, ExpiryIndex};
use crate::storage::{Slots, Storage};
use crate::sweeper::Sweeper;
use crate::Cache;
use parking_lot::RwLockUpgradableReadGuard;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Shortest interval the background sweeper will wake on.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Longest expiration a cache will honour. Longer durations are clamped so that
/// `Instant::now() + expiration` can never overflow.
pub const MAX_EXPIRATION: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

const SWEEPER_THREAD_NAME: &str = "polycache-sweeper";

/// A cache whose entries expire a fixed duration after they were last written.
///
/// Every `set` stamps the entry with `now + expiration`. An entry leaves the cache
/// through whichever happens first:
///
/// - an explicit `delete` or `clear`
/// - capacity eviction, which removes the entry with the **nearest** expiration
/// - lazy expiry, when a `get` finds the entry past its deadline
/// - the background sweep, which wakes every `expiration / 2` and purges every expired
///   entry
///
/// Reads never extend an entry's lifetime; only `set` does.
///
/// # Background Sweeper
///
/// Construction spawns one sweeper thread per cache. It runs until
/// [`stop_cleanup`](TimeBasedCache::stop_cleanup) is called or the cache is dropped,
/// whichever comes first. After it stops, lazy expiry and capacity eviction keep
/// working.
///
/// # Examples
///
/// ```
/// use polycache_core::{Cache, TimeBasedCache};
/// use std::num::NonZeroUsize;
/// use std::thread;
/// use std::time::Duration;
///
/// let cache = TimeBasedCache::new(NonZeroUsize::new(8).unwrap(), Duration::from_millis(50))?;
/// cache.set("session", "token");
/// assert_eq!(cache.get("session"), Some("token"));
///
/// thread::sleep(Duration::from_millis(80));
/// assert_eq!(cache.get("session"), None);
///
/// cache.stop_cleanup();
/// # Ok::<(), polycache_core::CacheError>(())
/// ```
#[derive(Debug)]
pub struct TimeBasedCache<V> {
    storage: Arc<Storage<V, ExpiryIndex>>,
    expiration: Duration,
    sweeper: Sweeper,
}

impl<V: Send + Sync + 'static> TimeBasedCache<V> {
    /// Creates a cache and starts its background sweeper.
    ///
    /// # Errors
    ///
    /// * [`CacheError::InvalidExpiration`] - `expiration` is zero
    /// * [`CacheError::SweeperSpawn`] - the sweeper thread could not be started
    pub fn new(capacity: NonZeroUsize, expiration: Duration) -> Result<Self> {
        if expiration.is_zero() {
            return Err(CacheError::InvalidExpiration);
        }
        let expiration = expiration.min(MAX_EXPIRATION);

        let storage = Arc::new(Storage::new(capacity));
        let swept = Arc::clone(&storage);
        let sweeper = Sweeper::spawn(SWEEPER_THREAD_NAME, sweep_interval(expiration), move || {
            let purged = purge(&swept, Instant::now());
            trace!(purged, "expiry sweep finished");
        })?;

        Ok(Self {
            storage,
            expiration,
            sweeper,
        })
    }
}

impl<V> TimeBasedCache<V> {
    /// Stops the background sweeper and waits for it to exit.
    ///
    /// Calling this more than once is harmless. Dropping the cache calls it too.
    pub fn stop_cleanup(&self) {
        self.sweeper.stop();
    }

    pub fn is_cleanup_running(&self) -> bool {
        self.sweeper.is_running()
    }

    /// The lifetime given to every entry on `set`.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Runs one expiry sweep on the calling thread and returns how many entries it
    /// removed.
    pub fn purge_expired(&self) -> usize {
        purge(&self.storage, Instant::now())
    }

    /// Instant at which `key` expires, if it is cached.
    pub fn expires_at(&self, key: &str) -> Option<Instant> {
        self.storage.read().index.expires_at(key)
    }

    fn evict(slots: &mut Slots<V, ExpiryIndex>) {
        if let Some(evicted) = slots.index.eviction_candidate() {
            slots.remove(&evicted);
            debug!(key = %evicted, "evicted entry with nearest expiration");
        }
    }
}

impl<V: Clone + Send + Sync> Cache<V> for TimeBasedCache<V> {
    fn set(&self, key: &str, value: V) {
        let mut guard = self.storage.write();
        let slots = &mut *guard;

        // Evicts even when `key` is already present; the freshly stamped entry
        // replaces whatever was removed.
        if slots.len() >= self.storage.capacity() {
            Self::evict(slots);
        }

        let expires_at = Instant::now() + self.expiration;
        slots.map.insert(key.to_string(), value);
        slots.index.insert(key.to_string(), expires_at);
    }

    fn get(&self, key: &str) -> Option<V> {
        let guard = self.storage.upgradable_read();
        let expires_at = guard.index.expires_at(key)?;

        if !is_expired(expires_at, Instant::now()) {
            return guard.map.get(key).cloned();
        }

        let mut slots = RwLockUpgradableReadGuard::upgrade(guard);
        slots.remove(key);
        debug!(key, "lazily expired entry on read");
        None
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

impl<V> Drop for TimeBasedCache<V> {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}

/// Half the expiration, but never shorter than [`MIN_SWEEP_INTERVAL`].
fn sweep_interval(expiration: Duration) -> Duration {
    (expiration / 2).max(MIN_SWEEP_INTERVAL)
}

/// Removes every entry that has expired as of `now`.
fn purge<V>(storage: &Storage<V, ExpiryIndex>, now: Instant) -> usize {
    let mut slots = storage.write();
    let expired = slots.index.expired_keys(now);
    for key in &expired {
        slots.remove(key);
    }
    expired.len()
}
