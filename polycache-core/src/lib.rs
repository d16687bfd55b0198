//! # Polycache Core
//!
//! The cache engine behind `polycache`: one guarded storage type and three eviction
//! policies built on it.
//!
//! ## Features
//!
//! - **Shared storage**: a generic map + policy index behind a single `parking_lot::RwLock`
//! - **LRU**: evicts the least recently used entry
//! - **LFU**: evicts the least frequently used entry, oldest first on ties
//! - **Time-based**: fixed per-cache expiration, lazy expiry on read, and a background
//!   sweeper thread that is stopped explicitly or on drop
//! - **Factory**: pick a strategy at runtime with [`new`] or [`CacheConfig`]
//!
//! ## Module Organization
//!
//! - [`storage`] - the guarded map shared by every policy
//! - [`index`] - the per-policy auxiliary indexes
//! - [`utils`] - eviction-candidate scans used by the indexes
//! - `lru`, `lfu`, `time_based` - the policies
//! - `strategy`, `config` - strategy selection and the factory
//!
//! ## Logging
//!
//! Evictions, lazy expiry and sweeper lifecycle events are emitted through `tracing`
//! at `debug`/`trace` level. No subscriber is installed here.
mod config;
mod error;
mod lfu;
mod lru;
mod strategy;
mod sweeper;
mod time_based;

pub mod index;
pub mod storage;
pub mod utils;

pub use config::{new, CacheConfig, DEFAULT_CAPACITY};
pub use error::{CacheError, Result};
pub use index::{ExpiryIndex, Frequency, FrequencyIndex, PolicyIndex, RecencyIndex};
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use storage::Storage;
pub use strategy::Strategy;
pub use time_based::{TimeBasedCache, MAX_EXPIRATION, MIN_SWEEP_INTERVAL};

/// The operations every eviction policy exposes.
///
/// Implementations are thread-safe: all methods take `&self` and a cache can be shared
/// between threads behind an `Arc`.
///
/// # Semantics
///
/// * `set` - Inserts or overwrites. Never fails; overflow is handled by eviction.
/// * `get` - Returns a clone of the value, or `None` on a miss. A miss is not an error.
/// * `delete` - Removes the key if present; otherwise does nothing.
/// * `clear` - Removes every entry.
/// * `len` - Number of entries currently stored.
///
/// # Examples
///
/// ```
/// use polycache_core::{new, Cache, Strategy};
/// use std::time::Duration;
///
/// fn warm(cache: &dyn Cache<String>) {
///     cache.set("greeting", "hello".to_string());
/// }
///
/// let cache = new::<String>(Strategy::Lru, 10, Duration::ZERO).unwrap();
/// warm(cache.as_ref());
/// assert_eq!(cache.get("greeting").as_deref(), Some("hello"));
///
/// cache.clear();
/// assert!(cache.is_empty());
/// ```
pub trait Cache<V>: Send + Sync {
    fn set(&self, key: &str, value: V);

    fn get(&self, key: &str) -> Option<V>;

    fn delete(&self, key: &str);

    fn clear(&self);

    fn len(&self) -> usize;

    /// The maximum number of entries this cache holds.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
