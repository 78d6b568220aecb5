//! # Snapshot Codec
//!
//! Converts a [`RingStore`] to and from a versioned byte sequence.
//!
//! ## Binary Format
//!
//! ```text
//! [version: u8][resolution][samples: len + f64 × len][head][tail]
//! [current_start][current_stop][last_entry]
//! ```
//!
//! Everything after the version byte is a postcard-encoded [`SnapshotV1`]:
//! integers are varints, `head`/`tail` are `-1` for an empty store, and each
//! timestamp is `(epoch seconds, nanoseconds)`. The version byte lets the
//! layout change later without misreading old files.
//!
//! Decoding checks the ring invariants before handing back a store, so a
//! corrupted or hand-edited snapshot fails here instead of misbehaving on
//! the next read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SnapshotErrorKind, TimeringResult};
use crate::store::{Cursor, RingStore, Timebox};

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u8 = 1;

const EMPTY_INDEX: i64 = -1;

// ============================================
// WIRE TYPES
// ============================================

/// Field-for-field copy of a store's state, used only on the wire.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotV1 {
    resolution: u32,
    samples: Vec<f64>,
    head: i64,
    tail: i64,
    current_start: WireTime,
    current_stop: WireTime,
    last_entry: WireTime,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct WireTime {
    secs: i64,
    nanos: u32,
}

impl From<DateTime<Utc>> for WireTime {
    fn from(t: DateTime<Utc>) -> Self {
        Self {
            secs: t.timestamp(),
            nanos: t.timestamp_subsec_nanos(),
        }
    }
}

impl WireTime {
    fn to_datetime(self, field: &str) -> Result<DateTime<Utc>, SnapshotErrorKind> {
        DateTime::from_timestamp(self.secs, self.nanos).ok_or_else(|| {
            SnapshotErrorKind::InconsistentState(format!("{} is not a valid timestamp", field))
        })
    }
}

// ============================================
// ENCODE / DECODE
// ============================================

/// Encodes the complete state of `store`.
pub fn encode(store: &RingStore) -> TimeringResult<Vec<u8>> {
    let snapshot = match store.cursor() {
        Some(c) => SnapshotV1 {
            resolution: store.resolution(),
            samples: store.raw_samples().to_vec(),
            head: c.head as i64,
            tail: c.tail as i64,
            current_start: c.window.start.into(),
            current_stop: c.window.stop.into(),
            last_entry: c.last_entry.into(),
        },
        None => SnapshotV1 {
            resolution: store.resolution(),
            samples: store.raw_samples().to_vec(),
            head: EMPTY_INDEX,
            tail: EMPTY_INDEX,
            current_start: WireTime::default(),
            current_stop: WireTime::default(),
            last_entry: WireTime::default(),
        },
    };

    let mut bytes = vec![SNAPSHOT_VERSION];
    bytes.extend(postcard::to_allocvec(&snapshot)?);
    Ok(bytes)
}

/// Decodes a snapshot produced by [`encode`].
///
/// Nothing is built unless the bytes are complete, carry a known version,
/// and describe a consistent ring.
pub fn decode(bytes: &[u8]) -> TimeringResult<RingStore> {
    let (&version, payload) = bytes.split_first().ok_or(SnapshotErrorKind::EmptyInput)?;
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotErrorKind::UnknownVersion(version).into());
    }

    let (snapshot, rest): (SnapshotV1, _) = postcard::take_from_bytes(payload)?;
    if !rest.is_empty() {
        return Err(SnapshotErrorKind::Malformed(format!("{} trailing bytes", rest.len())).into());
    }

    Ok(snapshot.into_store()?)
}

impl SnapshotV1 {
    fn into_store(self) -> Result<RingStore, SnapshotErrorKind> {
        if self.resolution == 0 {
            return Err(inconsistent("resolution is zero"));
        }
        if self.samples.is_empty() {
            return Err(inconsistent("sample array is empty"));
        }

        let cursor = match (self.head, self.tail) {
            (EMPTY_INDEX, EMPTY_INDEX) => None,
            (head, tail) => Some(self.cursor(head, tail)?),
        };

        Ok(RingStore::from_parts(self.resolution, self.samples, cursor))
    }

    fn cursor(&self, head: i64, tail: i64) -> Result<Cursor, SnapshotErrorKind> {
        let capacity = self.samples.len();
        let head = slot_index(head, capacity, "head")?;
        let tail = slot_index(tail, capacity, "tail")?;

        let start = self.current_start.to_datetime("current_start")?;
        let stop = self.current_stop.to_datetime("current_stop")?;
        let last_entry = self.last_entry.to_datetime("last_entry")?;

        let window = Timebox::containing(start, self.resolution);
        if window.start != start || window.stop != stop {
            return Err(inconsistent(
                "current window is not an aligned timebox of the resolution",
            ));
        }
        if !window.contains(last_entry) {
            return Err(inconsistent("last_entry lies outside the current window"));
        }

        Ok(Cursor {
            head,
            tail,
            window,
            last_entry,
        })
    }
}

fn slot_index(raw: i64, capacity: usize, field: &str) -> Result<usize, SnapshotErrorKind> {
    usize::try_from(raw)
        .ok()
        .filter(|&i| i < capacity)
        .ok_or_else(|| {
            SnapshotErrorKind::InconsistentState(format!(
                "{} {} is outside 0..{}",
                field, raw, capacity
            ))
        })
}

fn inconsistent(reason: &str) -> SnapshotErrorKind {
    SnapshotErrorKind::InconsistentState(reason.to_string())
}

// ============================================
// CONVENIENCE METHODS
// ============================================

impl RingStore {
    /// Shorthand for [`encode`].
    pub fn to_snapshot_bytes(&self) -> TimeringResult<Vec<u8>> {
        encode(self)
    }

    /// Shorthand for [`decode`].
    pub fn from_snapshot_bytes(bytes: &[u8]) -> TimeringResult<Self> {
        decode(bytes)
    }
}

// ============================================
// TESTS
// ============================================
