use crate::error::CacheError;
use std::fmt;
use std::str::FromStr;

/// The eviction strategy a cache is built with.
///
/// # Variants
///
/// * `Lru` - **Least Recently Used** (default)
///   - Evicts the entry untouched for the longest time
///   - Hits and updates move the key to the head of the recency order
///   - O(n) reorder on a hit
///
/// * `Lfu` - **Least Frequently Used**
///   - Evicts the entry with the smallest access counter
///   - Ties go to the oldest insertion
///   - O(n) scan on eviction
///
/// * `TimeBased` - **Fixed expiration**
///   - Every entry lives for the cache's expiration duration after its last `set`
///   - Capacity eviction removes the entry that would expire soonest
///   - A background thread sweeps expired entries every `expiration / 2`
///
/// # Examples
///
/// ```
/// use polycache_core::Strategy;
///
/// assert_eq!(Strategy::default(), Strategy::Lru);
///
/// let parsed: Strategy = "LFU".parse().unwrap();
/// assert_eq!(parsed, Strategy::Lfu);
///
/// assert!("mru".parse::<Strategy>().is_err());
/// ```
///
/// # Performance Characteristics
///
/// | Strategy  | Eviction | Cache Hit | Cache Miss |
/// |-----------|----------|-----------|------------|
/// | Lru       | O(1)     | O(n)      | O(1)       |
/// | Lfu       | O(n)     | O(1)      | O(1)       |
/// | TimeBased | O(n)     | O(1)      | O(1)       |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    #[default]
    Lru,
    Lfu,
    TimeBased,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Lru, Strategy::Lfu, Strategy::TimeBased];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Lru => "lru",
            Strategy::Lfu => "lfu",
            Strategy::TimeBased => "time_based",
        }
    }

    /// Whether this strategy needs a positive expiration duration.
    pub fn requires_expiration(&self) -> bool {
        matches!(self, Strategy::TimeBased)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a strategy name.
///
/// The conversion is case-insensitive and ignores surrounding whitespace.
///
/// # Supported Values
///
/// - `"lru"` → `Strategy::Lru`
/// - `"lfu"` → `Strategy::Lfu`
/// - `"time_based"`, `"time-based"`, `"timebased"` or `"ttl"` → `Strategy::TimeBased`
/// - Anything else → `CacheError::UnknownStrategy`
impl FromStr for Strategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lru" => Ok(Strategy::Lru),
            "lfu" => Ok(Strategy::Lfu),
            "time_based" | "time-based" | "timebased" | "ttl" => Ok(Strategy::TimeBased),
            _ => Err(CacheError::UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(" TTL ".parse::<Strategy>().unwrap(), Strategy::TimeBased);
        assert_eq!("Time-Based".parse::<Strategy>().unwrap(), Strategy::TimeBased);
        assert_eq!("timebased".parse::<Strategy>().unwrap(), Strategy::TimeBased);
    }

    #[test]
    fn test_parse_unknown_keeps_input() {
        match "fifo".parse::<Strategy>() {
            Err(CacheError::UnknownStrategy(name)) => assert_eq!(name, "fifo"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_only_time_based_requires_expiration() {
        assert!(!Strategy::Lru.requires_expiration());
        assert!(!Strategy::Lfu.requires_expiration());
        assert!(Strategy::TimeBased.requires_expiration());
    }
}
