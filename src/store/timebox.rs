//! # Timebox Alignment
//!
//! Maps any instant onto the fixed-width bucket it belongs to.
//!
//! ## Plain English
//!
//! Slice all of time into equal pieces of `resolution` seconds, starting at
//! the Unix epoch. A timebox is the one piece a given instant falls into.
//! With 30-second pieces, 10:04:10 lives in `[10:04:00, 10:04:30)` and
//! 10:04:30 (exactly on the line) lives in the next one.

use chrono::{DateTime, TimeDelta, Utc};

/// A half-open `[start, stop)` interval of `resolution` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebox {
    /// First instant inside the box
    pub start: DateTime<Utc>,
    /// First instant after the box
    pub stop: DateTime<Utc>,
}

impl Timebox {
    /// Returns the timebox of width `resolution` seconds that contains `t`.
    ///
    /// `start` is the greatest multiple of `resolution` epoch seconds that is
    /// `<= t`. Both ends are computed from epoch seconds so re-deriving a box
    /// many times never drifts. Boxes that would leave chrono's range are
    /// clamped to `MIN_UTC` / `MAX_UTC`.
    ///
    /// `resolution` must be at least 1; a zero resolution is treated as 1.
    pub fn containing(t: DateTime<Utc>, resolution: u32) -> Self {
        let res = i64::from(resolution.max(1));
        let secs = t.timestamp();
        let start = secs - secs.rem_euclid(res);

        Self {
            start: from_epoch_secs(start),
            stop: from_epoch_secs(start.saturating_add(res)),
        }
    }

    /// Like [`containing`](Self::containing), but `None` when either end of
    /// the box falls outside chrono's range instead of clamping.
    pub fn try_containing(t: DateTime<Utc>, resolution: u32) -> Option<Self> {
        let res = i64::from(resolution.max(1));
        let secs = t.timestamp();
        let start = secs - secs.rem_euclid(res);

        Some(Self {
            start: DateTime::from_timestamp(start, 0)?,
            stop: DateTime::from_timestamp(start.checked_add(res)?, 0)?,
        })
    }

    /// Returns true if `t` falls inside `[start, stop)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.stop
    }

    /// Width of the box.
    pub fn duration(&self) -> TimeDelta {
        self.stop - self.start
    }
}

fn from_epoch_secs(secs: i64) -> DateTime<Utc> {
    match DateTime::from_timestamp(secs, 0) {
        Some(t) => t,
        None if secs < 0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}

// ============================================
// TESTS
// ============================================
