use crate::index::{is_expired, Frequency};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Moves a key to the front of the recency queue (marks it as most recently used).
///
/// Used by the LRU policy on every hit and on every update of an existing key.
///
/// # Arguments
///
/// * `order` - The recency queue, most recently used key first
/// * `key` - The key to move
///
/// # Returns
///
/// * `true` - The key was found and is now at the front
/// * `false` - The key is not in the queue; the queue is unchanged
///
/// # Performance
///
/// O(n) in the number of queued keys: a linear search followed by a removal.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use polycache_core::utils::move_key_to_front;
///
/// let mut order = VecDeque::from(vec!["key1".to_string(), "key2".to_string(), "key3".to_string()]);
///
/// // Access key3, marking it as most recently used
/// assert!(move_key_to_front(&mut order, "key3"));
/// assert_eq!(order.front().unwrap(), "key3");
///
/// // Unknown keys leave the queue untouched
/// assert!(!move_key_to_front(&mut order, "key9"));
/// assert_eq!(order.len(), 3);
/// ```
pub fn move_key_to_front(order: &mut VecDeque<String>, key: &str) -> bool {
    match order.iter().position(|k| k == key) {
        Some(0) => true,
        Some(pos) => {
            if let Some(k) = order.remove(pos) {
                order.push_front(k);
            }
            true
        }
        None => false,
    }
}

/// Removes a key from the recency queue.
///
/// Returns `true` if the key was present.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use polycache_core::utils::remove_key_from_order;
///
/// let mut order = VecDeque::from(vec!["key1".to_string(), "key2".to_string()]);
/// assert!(remove_key_from_order(&mut order, "key1"));
/// assert!(!remove_key_from_order(&mut order, "key1"));
/// assert_eq!(order.len(), 1);
/// ```
pub fn remove_key_from_order(order: &mut VecDeque<String>, key: &str) -> bool {
    match order.iter().position(|k| k == key) {
        Some(pos) => order.remove(pos).is_some(),
        None => false,
    }
}

/// Finds the key with the minimum access frequency.
///
/// Used by the LFU policy to pick its eviction victim.
///
/// # Behavior
///
/// - Scans every record once
/// - The strictly smallest `count` wins
/// - Among equal counts, the smallest `seq` (the oldest insertion) wins, so the result
///   does not depend on the map's iteration order
///
/// # Performance
///
/// O(n) in the number of live keys. No bucket or heap structure is kept.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use polycache_core::{Frequency, utils::find_min_frequency_key};
///
/// let mut records = HashMap::new();
/// records.insert("key1".to_string(), Frequency { count: 5, seq: 0 });
/// records.insert("key2".to_string(), Frequency { count: 2, seq: 1 });
/// records.insert("key3".to_string(), Frequency { count: 2, seq: 2 });
///
/// // key2 and key3 tie on count, key2 was inserted first
/// assert_eq!(find_min_frequency_key(&records), Some("key2".to_string()));
///
/// let empty: HashMap<String, Frequency> = HashMap::new();
/// assert_eq!(find_min_frequency_key(&empty), None);
/// ```
pub fn find_min_frequency_key(records: &HashMap<String, Frequency>) -> Option<String> {
    records
        .iter()
        .min_by_key(|(_, record)| (record.count, record.seq))
        .map(|(key, _)| key.clone())
}

/// Finds the key whose expiration instant is the earliest.
///
/// Used by the time-based policy when it has to make room for a new entry. The victim
/// is the entry that would expire soonest, regardless of how often or how recently it
/// was read.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use std::time::{Duration, Instant};
/// use polycache_core::utils::find_earliest_expiry_key;
///
/// let now = Instant::now();
/// let mut expiries = HashMap::new();
/// expiries.insert("later".to_string(), now + Duration::from_secs(60));
/// expiries.insert("sooner".to_string(), now + Duration::from_secs(5));
///
/// assert_eq!(find_earliest_expiry_key(&expiries), Some("sooner".to_string()));
/// ```
pub fn find_earliest_expiry_key(expiries: &HashMap<String, Instant>) -> Option<String> {
    expiries
        .iter()
        .min_by_key(|(_, expires_at)| **expires_at)
        .map(|(key, _)| key.clone())
}

/// Collects every key that has expired as of `now`.
///
/// The keys are returned rather than removed so the caller can drop them from both the
/// entry map and the index while holding one write guard.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use std::time::{Duration, Instant};
/// use polycache_core::utils::collect_expired_keys;
///
/// let now = Instant::now();
/// let mut expiries = HashMap::new();
/// expiries.insert("stale".to_string(), now);
/// expiries.insert("fresh".to_string(), now + Duration::from_secs(60));
///
/// assert_eq!(collect_expired_keys(&expiries, now), vec!["stale".to_string()]);
/// ```
pub fn collect_expired_keys(expiries: &HashMap<String, Instant>, now: Instant) -> Vec<String> {
    expiries
        .iter()
        .filter(|(_, expires_at)| is_expired(**expires_at, now))
        .map(|(key, _)| key.clone())
        .collect()
}
