//! # Polycache
//!
//! An in-process, thread-safe key/value cache with interchangeable eviction strategies.
//!
//! ## Features
//!
//! - **One interface**: every strategy implements [`Cache`] (`set`/`get`/`delete`/`clear`/`len`)
//! - **LRU**: evicts the entry untouched for the longest time
//! - **LFU**: evicts the entry read or written the fewest times
//! - **Time-based**: entries expire a fixed duration after their last `set`; a background
//!   sweeper purges them even if nobody reads them
//! - **Thread-safe**: one `parking_lot::RwLock` per cache covers entries and policy state
//!
//! ## Quick Start
//!
//! ```rust
//! use polycache::{new, Cache, Strategy};
//! use std::time::Duration;
//!
//! let cache = new::<i32>(Strategy::Lru, 2, Duration::ZERO)?;
//! cache.set("a", 1);
//! cache.set("b", 2);
//!
//! // "a" becomes the most recently used entry
//! assert_eq!(cache.get("a"), Some(1));
//!
//! // Inserting a third key evicts "b"
//! cache.set("c", 3);
//! assert_eq!(cache.get("b"), None);
//! assert_eq!(cache.len(), 2);
//! # Ok::<(), polycache::CacheError>(())
//! ```
//!
//! ## Time-Based Expiry
//!
//! A time-based cache owns a sweeper thread. Stop it with
//! [`TimeBasedCache::stop_cleanup`] when the cache is no longer needed; dropping the
//! cache stops it as well.
//!
//! ```rust
//! use polycache::{Cache, TimeBasedCache};
//! use std::num::NonZeroUsize;
//! use std::time::Duration;
//!
//! let cache = TimeBasedCache::new(NonZeroUsize::new(100).unwrap(), Duration::from_secs(30))?;
//! cache.set("token", "abc123".to_string());
//! assert_eq!(cache.get("token").as_deref(), Some("abc123"));
//!
//! cache.stop_cleanup();
//! cache.stop_cleanup(); // no-op
//! # Ok::<(), polycache::CacheError>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use polycache::{CacheConfig, CacheError};
//! use std::time::Duration;
//!
//! let strategy = "ttl".parse()?;
//! let cache = CacheConfig::new(strategy)
//!     .capacity(1_000)
//!     .expiration(Duration::from_secs(60))
//!     .build::<Vec<u8>>()?;
//! assert_eq!(cache.capacity(), 1_000);
//!
//! // Unknown strategy names and zero capacities are rejected up front
//! assert!(matches!("mru".parse::<polycache::Strategy>(), Err(CacheError::UnknownStrategy(_))));
//! assert!(matches!(
//!     CacheConfig::default().capacity(0).build::<u8>(),
//!     Err(CacheError::InvalidCapacity)
//! ));
//! # Ok::<(), CacheError>(())
//! ```

pub use polycache_core::*;
