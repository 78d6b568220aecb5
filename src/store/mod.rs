//! # Store Module
//!
//! The round-robin store and the timebox math behind it.
//!
//! ## Plain English Explanation
//!
//! Imagine a wall calendar with exactly 1440 squares, one per minute.
//! Every reading you take goes into the square for the minute it happened,
//! blended with whatever is already written there. When the calendar is
//! full, the oldest square is erased and reused. The calendar never grows.
//!
//! [`RingStore`] is that calendar. [`SharedRingStore`] puts a lock on it so
//! several threads can use the same calendar safely.

mod ring_store;
mod timebox;

pub(crate) use ring_store::Cursor;
pub use ring_store::RingStore;
pub use timebox::Timebox;

use chrono::{DateTime, TimeZone};
use parking_lot::RwLock;

use crate::error::TimeringResult;
use crate::snapshot;

// ============================================
// SHARED RING STORE
// Thread-safe wrapper for the ring store
// ============================================

/// A thread-safe ring store that can be shared across threads
///
/// ## Plain English Explanation
///
/// The store itself does no locking. When several parts of an app need it:
/// - A sampler thread WRITES new readings
/// - A checkpoint task READS it to take snapshots
/// - A UI might READ to draw a graph
///
/// this wrapper lets only one writer in at a time, while readers share.
pub struct SharedRingStore {
    /// The actual store, protected by a read-write lock
    inner: RwLock<RingStore>,

    /// Fixed at creation, so readable without taking the lock
    capacity: usize,
    resolution: u32,
}

impl SharedRingStore {
    /// Creates a new shared store
    ///
    /// ## Example Calculation
    /// ```text
    /// 60 second buckets × 1440 buckets = 24 hours retained
    /// ```
    pub fn new(resolution: u32, capacity: usize) -> TimeringResult<Self> {
        let store = RingStore::new(resolution, capacity)?;

        log::info!(
            "Creating ring store: {}s buckets x {} = {}s retained",
            resolution,
            capacity,
            store.retention().num_seconds()
        );

        Ok(Self::from_store(store))
    }

    /// Wraps an existing store (for example one loaded from a snapshot)
    pub fn from_store(store: RingStore) -> Self {
        Self {
            capacity: store.capacity(),
            resolution: store.resolution(),
            inner: RwLock::new(store),
        }
    }

    /// Adds a reading at the current time
    pub fn insert(&self, value: f64) -> TimeringResult<()> {
        self.inner.write().insert(value)
    }

    /// Adds a reading at a specific time
    pub fn insert_at<Tz: TimeZone>(&self, value: f64, at: DateTime<Tz>) -> TimeringResult<()> {
        self.inner.write().insert_at(value, at)
    }

    /// Returns the `index`-th oldest bucket value
    pub fn get(&self, index: usize) -> TimeringResult<f64> {
        self.inner.read().get(index)
    }

    /// Copies all bucket values out, oldest first
    ///
    /// The store is NOT modified - recording continues!
    pub fn values(&self) -> Vec<f64> {
        self.inner.read().to_vec()
    }

    /// Returns the number of buckets currently holding data
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns how full the ring is (0.0 = empty, 1.0 = full)
    pub fn fill_ratio(&self) -> f32 {
        self.len() as f32 / self.capacity as f32
    }

    /// Returns the maximum number of buckets
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the seconds per bucket
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Runs `f` against the store under a read lock
    pub fn read<R>(&self, f: impl FnOnce(&RingStore) -> R) -> R {
        f(&self.inner.read())
    }

    /// Encodes the current state as snapshot bytes
    pub fn snapshot(&self) -> TimeringResult<Vec<u8>> {
        snapshot::encode(&self.inner.read())
    }

    /// Replaces the current state with a decoded snapshot
    ///
    /// The bytes are fully decoded before the lock is taken; if decoding
    /// fails, or the snapshot has different dimensions, the current state
    /// is left untouched.
    pub fn restore(&self, bytes: &[u8]) -> TimeringResult<()> {
        let store = snapshot::decode(bytes)?;
        store.ensure_dimensions(self.resolution, self.capacity)?;
        *self.inner.write() = store;
        Ok(())
    }
}

// ============================================
// TESTS
// ============================================
