//! Store Module
//!
//! The key-value map, its reader/writer lock, and the lazy TTL expiration rules.
//!
//! Read-only operations take the lock in shared mode and never mutate the map;
//! an expired entry stays in place until it is overwritten, unset, purged, or
//! removed by an explicit [`Store::cleanup`] sweep. Bulk operations take the
//! lock once for the whole batch.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cache::{Entry, EntryMeta, Stamp, StoreStats, NO_EXPIRATION};
use crate::error::{CacheError, Result};

// == Store ==
/// Thread-safe in-memory key-value store with optional per-entry TTL.
///
/// Values are cloned out on every read; callers never hold a reference into
/// the map. Share the store between threads with `Arc<Store<K, V>>`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use gotcha::cache::Store;
///
/// let store = Store::new();
/// store.set_ttl("a", 1, Duration::from_millis(10));
/// store.set("b", 2);
/// std::thread::sleep(Duration::from_millis(15));
/// store.cleanup();
/// assert!(!store.exists("a"));
/// assert_eq!(store.get("b"), Some(2));
/// ```
#[derive(Debug)]
pub struct Store<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> Default for Store<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section leaves the map consistent, so a guard poisoned by a
    // panicking caller is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Returns a copy of the value if the key is present and not expired.
    ///
    /// A stored `None`/null payload comes back as `Some(..)`, so absence is
    /// never confused with a stored empty value.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    // == Must Get ==
    /// Returns a copy of the value if the key is present, ignoring expiration.
    pub fn must_get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores a value that never expires.
    pub fn set(&self, key: K, value: V) {
        self.set_ttl(key, value, NO_EXPIRATION);
    }

    // == Set TTL ==
    /// Stores a value with the given TTL, replacing any previous entry.
    ///
    /// The timestamp is reset to now regardless of the previous entry's
    /// expiration state. A zero TTL never expires.
    pub fn set_ttl(&self, key: K, value: V, ttl: Duration) {
        let mut entries = self.write();
        entries.insert(key, Entry::new(value, ttl, Stamp::now()));
    }

    // == Unset ==
    /// Removes the entry for `key`. Returns whether an entry was removed.
    pub fn unset<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.write().remove(key).is_some()
    }

    // == Get Multi ==
    /// Looks up every key under a single read lock.
    ///
    /// The result is position-aligned with `keys`; each slot follows the
    /// [`Store::get`] rules.
    pub fn get_multi<'a, Q, I>(&self, keys: I) -> Vec<Option<V>>
    where
        I: IntoIterator<Item = &'a Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        let entries = self.read();
        let now = Instant::now();
        keys.into_iter()
            .map(|key| {
                entries
                    .get(key)
                    .filter(|entry| !entry.is_expired_at(now))
                    .map(|entry| entry.value.clone())
            })
            .collect()
    }

    // == Set Multi ==
    /// Stores every pair without expiration. See [`Store::set_multi_ttl`].
    pub fn set_multi(&self, keys: Vec<K>, values: Vec<V>) -> Result<()> {
        self.set_multi_ttl(keys, values, NO_EXPIRATION)
    }

    // == Set Multi TTL ==
    /// Stores every `(key, value)` pair with one shared timestamp and TTL.
    ///
    /// Fails with [`CacheError::BatchLengthMismatch`] before touching the map
    /// when the lists differ in length. When a key repeats, the last pair wins.
    pub fn set_multi_ttl(&self, keys: Vec<K>, values: Vec<V>, ttl: Duration) -> Result<()> {
        if keys.len() != values.len() {
            warn!(
                keys = keys.len(),
                values = values.len(),
                "Rejected bulk write with mismatched lengths"
            );
            return Err(CacheError::BatchLengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut entries = self.write();
        let stamp = Stamp::now();
        entries.reserve(keys.len());
        for (key, value) in keys.into_iter().zip(values) {
            entries.insert(key, Entry::new(value, ttl, stamp));
        }
        Ok(())
    }

    // == Exists ==
    /// Returns true if the key has an entry, expired or not.
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains_key(key)
    }

    // == Expired ==
    /// Returns true only if the key has an entry and that entry is expired.
    ///
    /// Absent keys report `false`; combine with [`Store::exists`] to tell the
    /// two apart.
    pub fn expired<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().get(key).is_some_and(Entry::is_expired)
    }

    // == Extend ==
    /// Resets the timestamp and sets a new TTL on a live entry.
    ///
    /// Does nothing when the key is absent or already expired, so stale data
    /// cannot be revived this way. Returns whether the TTL was applied.
    pub fn extend<Q>(&self, key: &Q, ttl: Duration) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.write();
        let stamp = Stamp::now();
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(stamp.instant) => {
                entry.refresh(ttl, stamp);
                true
            }
            _ => false,
        }
    }

    // == Must Extend ==
    /// Resets the timestamp and sets a new TTL, even on an expired entry.
    ///
    /// Does nothing when the key is absent. Returns whether the TTL was applied.
    pub fn must_extend<Q>(&self, key: &Q, ttl: Duration) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut entries = self.write();
        let stamp = Stamp::now();
        match entries.get_mut(key) {
            Some(entry) => {
                entry.refresh(ttl, stamp);
                true
            }
            None => false,
        }
    }

    // == Cleanup ==
    /// Removes all expired entries under a single write lock.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - entries.len();
        debug!(removed, remaining = entries.len(), "Cleanup sweep finished");
        removed
    }

    // == Timestamp ==
    /// Returns the last write or extension time of a present key.
    ///
    /// Expiration is ignored.
    pub fn timestamp<Q>(&self, key: &Q) -> Option<DateTime<Utc>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().get(key).map(|entry| entry.timestamp)
    }

    // == Inspect ==
    /// Returns the value, expiration state, timestamp and remaining TTL of a
    /// present key, all read under one lock.
    ///
    /// Expired entries are reported with `expired: true`; `None` means the key
    /// has no entry.
    pub fn inspect<Q>(&self, key: &Q) -> Option<EntryMeta<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.read();
        let now = Instant::now();
        entries.get(key).map(|entry| EntryMeta::capture(entry, now))
    }

    // == TTL Remaining ==
    /// Returns the time left before a present key expires.
    ///
    /// `None` when the key is absent; `Some(None)` when it never expires.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Option<Duration>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().get(key).map(Entry::ttl_remaining)
    }

    // == Purge ==
    /// Discards every entry.
    pub fn purge(&self) {
        let mut entries = self.write();
        let dropped = entries.len();
        *entries = HashMap::new();
        debug!(dropped, "Store purged");
    }

    // == Stats ==
    /// Returns entry counts taken under one read lock.
    pub fn stats(&self) -> StoreStats {
        let entries = self.read();
        let now = Instant::now();
        StoreStats {
            total_entries: entries.len(),
            expired_entries: entries
                .values()
                .filter(|entry| entry.is_expired_at(now))
                .count(),
        }
    }

    // == Length ==
    /// Returns the number of entries, including expired ones.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
