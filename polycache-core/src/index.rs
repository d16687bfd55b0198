use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use crate::utils::{
    collect_expired_keys, find_earliest_expiry_key, find_min_frequency_key, move_key_to_front,
    remove_key_from_order,
};

/// Auxiliary bookkeeping a policy keeps next to the entry map.
///
/// An index lives inside the same lock as the map it describes (see
/// [`Storage`](crate::Storage)), so the two can never be observed out of step.
/// The storage calls [`remove`](PolicyIndex::remove) and [`clear`](PolicyIndex::clear)
/// whenever an entry leaves the map; insertion is policy-specific and therefore done by
/// the policy itself.
///
/// `()` is the empty index used by a raw [`Storage`](crate::Storage) without eviction.
pub trait PolicyIndex: Default {
    /// Forgets the record for `key`. Must be a no-op when there is none.
    fn remove(&mut self, key: &str);

    /// Forgets every record.
    fn clear(&mut self);
}

impl PolicyIndex for () {
    fn remove(&mut self, _key: &str) {}

    fn clear(&mut self) {}
}

/// Recency order for the LRU policy.
///
/// The most recently touched key sits at the front, the least recently touched at the
/// back. Touching is O(n) in the number of live keys.
#[derive(Debug, Default)]
pub struct RecencyIndex {
    order: VecDeque<String>,
}

impl RecencyIndex {
    /// Records a new key as the most recently used one.
    pub fn push_front(&mut self, key: String) {
        self.order.push_front(key);
    }

    /// Moves an existing key to the front. Returns `false` if the key is unknown.
    pub fn touch(&mut self, key: &str) -> bool {
        move_key_to_front(&mut self.order, key)
    }

    /// Removes and returns the least recently used key.
    pub fn pop_back(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    /// Keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl PolicyIndex for RecencyIndex {
    fn remove(&mut self, key: &str) {
        remove_key_from_order(&mut self.order, key);
    }

    fn clear(&mut self) {
        self.order.clear();
    }
}

/// Per-key access counter used by the LFU policy.
///
/// `seq` is the insertion sequence number of the key. It only matters when several
/// keys share the minimum count: the smallest `seq` (oldest insertion) is evicted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frequency {
    pub count: u64,
    pub seq: u64,
}

impl Frequency {
    /// Increments the counter, saturating at `u64::MAX`.
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

/// Access counters for the LFU policy.
#[derive(Debug, Default)]
pub struct FrequencyIndex {
    records: HashMap<String, Frequency>,
    next_seq: u64,
}

impl FrequencyIndex {
    /// Starts tracking `key` with a count of 1.
    pub fn insert(&mut self, key: String) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.records.insert(key, Frequency { count: 1, seq });
    }

    /// Bumps the counter of `key`. Returns `false` if the key is unknown.
    pub fn increment(&mut self, key: &str) -> bool {
        match self.records.get_mut(key) {
            Some(record) => {
                record.increment();
                true
            }
            None => false,
        }
    }

    pub fn count(&self, key: &str) -> Option<u64> {
        self.records.get(key).map(|record| record.count)
    }

    /// The key that should be evicted next, if any.
    pub fn eviction_candidate(&self) -> Option<String> {
        find_min_frequency_key(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PolicyIndex for FrequencyIndex {
    fn remove(&mut self, key: &str) {
        self.records.remove(key);
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}

/// Absolute expiration instants for the time-based policy.
#[derive(Debug, Default)]
pub struct ExpiryIndex {
    expiries: HashMap<String, Instant>,
}

impl ExpiryIndex {
    /// Sets (or resets) the expiration instant of `key`.
    pub fn insert(&mut self, key: String, expires_at: Instant) {
        self.expiries.insert(key, expires_at);
    }

    pub fn expires_at(&self, key: &str) -> Option<Instant> {
        self.expiries.get(key).copied()
    }

    /// The key whose expiration is nearest, if any.
    pub fn eviction_candidate(&self) -> Option<String> {
        find_earliest_expiry_key(&self.expiries)
    }

    /// Every key whose expiration instant is at or before `now`.
    pub fn expired_keys(&self, now: Instant) -> Vec<String> {
        collect_expired_keys(&self.expiries, now)
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}

impl PolicyIndex for ExpiryIndex {
    fn remove(&mut self, key: &str) {
        self.expiries.remove(key);
    }

    fn clear(&mut self) {
        self.expiries.clear();
    }
}

/// Returns true once `now` has reached `expires_at`.
///
/// Shared by lazy expiry on lookup and by the background sweep so both agree on
/// whether an entry is still alive.
#[inline]
pub fn is_expired(expires_at: Instant, now: Instant) -> bool {
    expires_at <= now
}
