//! Store Entry Module
//!
//! Defines the record kept for every key: the value plus its write time and TTL.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

// == Stamp ==
/// A single "now", captured once per write operation.
///
/// Bulk writes take one stamp and apply it to every pair so the whole batch
/// shares the same timestamp.
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    /// Monotonic instant used for expiration math
    pub instant: Instant,
    /// Wall-clock time reported to callers
    pub wall: DateTime<Utc>,
}

impl Stamp {
    /// Captures the current time.
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
            wall: Utc::now(),
        }
    }
}

// == Entry ==
/// Represents a single stored value with its TTL metadata.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Time of the last write or extension
    pub timestamp: DateTime<Utc>,
    /// Monotonic counterpart of `timestamp`
    touched: Instant,
    /// Time to live; `Duration::ZERO` never expires
    pub ttl: Duration,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry written at `stamp`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time to live, zero for no expiration
    /// * `stamp` - The write time
    pub fn new(value: V, ttl: Duration, stamp: Stamp) -> Self {
        Self {
            value,
            timestamp: stamp.wall,
            touched: stamp.instant,
            ttl,
        }
    }

    // == Refresh ==
    /// Resets the write time and TTL, keeping the value.
    pub fn refresh(&mut self, ttl: Duration, stamp: Stamp) {
        self.timestamp = stamp.wall;
        self.touched = stamp.instant;
        self.ttl = ttl;
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry with a zero TTL never expires. Otherwise it is expired once the
    /// current time is greater than or equal to `timestamp + ttl`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`Entry::is_expired`], measured against a given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        if self.ttl.is_zero() {
            return false;
        }
        now.saturating_duration_since(self.touched) >= self.ttl
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has a TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        if self.ttl.is_zero() {
            return None;
        }
        Some(self.ttl.saturating_sub(self.touched.elapsed()))
    }
}

// == Entry Meta ==
/// Snapshot of one entry, read under a single lock acquisition.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMeta<V> {
    /// The stored value, expired or not
    pub value: V,
    pub expired: bool,
    pub timestamp: DateTime<Utc>,
    /// `None` when the entry never expires
    pub ttl_remaining: Option<Duration>,
}

impl<V: Clone> EntryMeta<V> {
    /// Captures `entry` as seen at `now`.
    pub fn capture(entry: &Entry<V>, now: Instant) -> Self {
        let ttl_remaining = if entry.ttl.is_zero() {
            None
        } else {
            Some(
                entry
                    .ttl
                    .saturating_sub(now.saturating_duration_since(entry.touched)),
            )
        };
        Self {
            value: entry.value.clone(),
            expired: entry.is_expired_at(now),
            timestamp: entry.timestamp,
            ttl_remaining,
        }
    }
}
