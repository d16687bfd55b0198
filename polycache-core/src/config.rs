use crate::error::{CacheError, Result};
use crate::{Cache, LfuCache, LruCache, Strategy, TimeBasedCache};
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;

/// Capacity used by [`CacheConfig::default`].
pub const DEFAULT_CAPACITY: usize = 128;

/// Builds a cache for the given strategy.
///
/// # Parameters
///
/// * `strategy` - Which eviction policy to use
/// * `capacity` - Maximum number of distinct keys; must be at least 1
/// * `expiration` - Entry lifetime for [`Strategy::TimeBased`]; ignored by the other
///   strategies
///
/// # Errors
///
/// * [`CacheError::InvalidCapacity`] - `capacity` is 0
/// * [`CacheError::InvalidExpiration`] - `strategy` is `TimeBased` and `expiration` is
///   zero
/// * [`CacheError::SweeperSpawn`] - the time-based sweeper thread could not start
///
/// Nothing is constructed when an error is returned.
///
/// # Examples
///
/// ```
/// use polycache_core::{new, Cache, CacheError, Strategy};
/// use std::time::Duration;
///
/// let cache = new::<u64>(Strategy::Lfu, 100, Duration::ZERO)?;
/// cache.set("hits", 1);
/// assert_eq!(cache.get("hits"), Some(1));
///
/// let rejected = new::<u64>(Strategy::TimeBased, 100, Duration::ZERO);
/// assert!(matches!(rejected, Err(CacheError::InvalidExpiration)));
/// # Ok::<(), CacheError>(())
/// ```
pub fn new<V>(
    strategy: Strategy,
    capacity: usize,
    expiration: Duration,
) -> Result<Box<dyn Cache<V>>>
where
    V: Clone + Send + Sync + 'static,
{
    if strategy.requires_expiration() && expiration.is_zero() {
        return Err(CacheError::InvalidExpiration);
    }
    let capacity = NonZeroUsize::new(capacity).ok_or(CacheError::InvalidCapacity)?;

    debug!(%strategy, capacity = capacity.get(), ?expiration, "building cache");
    let cache: Box<dyn Cache<V>> = match strategy {
        Strategy::Lru => Box::new(LruCache::new(capacity)),
        Strategy::Lfu => Box::new(LfuCache::new(capacity)),
        Strategy::TimeBased => Box::new(TimeBasedCache::new(capacity, expiration)?),
    };
    Ok(cache)
}

/// Declarative cache configuration.
///
/// A `CacheConfig` collects the construction parameters, validates them, and hands them
/// to [`new`]. It is the form to use when the strategy comes from text (a config file or
/// an environment variable).
///
/// # Examples
///
/// ```
/// use polycache_core::{Cache, CacheConfig, Strategy};
/// use std::time::Duration;
///
/// let config = CacheConfig::new(Strategy::TimeBased)
///     .capacity(500)
///     .expiration(Duration::from_secs(30));
/// config.validate()?;
///
/// let cache = config.build::<String>()?;
/// cache.set("greeting", "hello".to_string());
/// assert_eq!(cache.len(), 1);
///
/// // Strategies can be parsed from their names
/// let from_text = CacheConfig::new("lfu".parse()?).capacity(10);
/// assert_eq!(from_text.strategy, Strategy::Lfu);
/// # Ok::<(), polycache_core::CacheError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub strategy: Strategy,
    pub capacity: usize,
    pub expiration: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            capacity: DEFAULT_CAPACITY,
            expiration: None,
        }
    }
}

impl CacheConfig {
    /// A configuration for `strategy` with the default capacity and no expiration.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn expiration(mut self, expiration: Duration) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Checks the configuration without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        if self.strategy.requires_expiration() && self.expiration.map_or(true, |d| d.is_zero()) {
            return Err(CacheError::InvalidExpiration);
        }
        Ok(())
    }

    /// Builds the configured cache.
    pub fn build<V>(&self) -> Result<Box<dyn Cache<V>>>
    where
        V: Clone + Send + Sync + 'static,
    {
        self.validate()?;
        new(
            self.strategy,
            self.capacity,
            self.expiration.unwrap_or(Duration::ZERO),
        )
    }
}
