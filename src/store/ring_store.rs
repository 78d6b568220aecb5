//! # Ring Store
//!
//! A fixed-capacity circular array of timeboxed samples.
//!
//! ## Plain English
//!
//! Picture a circular track with numbered parking spots, one per time bucket.
//! The newest bucket sits at `tail`, the oldest at `head`. Samples arriving
//! inside the current bucket are blended into it, weighted by how long each
//! value was in effect. When time moves past the bucket, the car moves to the
//! next spot; when every spot is taken, the oldest car is towed away.
//!
//! Nothing here is synchronized. Wrap the store in
//! [`SharedRingStore`](super::SharedRingStore) if more than one thread needs it.

use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use log::{debug, warn};

use super::timebox::Timebox;
use crate::config::ConfigError;
use crate::error::{StoreErrorKind, TimeringResult};

// ============================================
// RING CURSOR
// ============================================

/// Position and timing of a non-empty ring.
///
/// An empty store has no cursor at all, so an "empty" index can never be
/// used to address a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cursor {
    /// Slot of the oldest logical bucket
    pub(crate) head: usize,
    /// Slot of the newest (current) bucket
    pub(crate) tail: usize,
    /// Interval the bucket at `tail` represents
    pub(crate) window: Timebox,
    /// Time of the most recently accepted sample
    pub(crate) last_entry: DateTime<Utc>,
}

impl Cursor {
    /// Moves `tail` one slot forward, evicting `head` if the ring was full.
    /// The current window's stop is the next window's aligned start.
    fn advance(&mut self, capacity: usize, resolution: u32) {
        self.tail = (self.tail + 1) % capacity;
        if self.tail == self.head {
            self.head = (self.head + 1) % capacity;
        }

        self.window = Timebox::containing(self.window.stop, resolution);
    }
}

// ============================================
// RING STORE
// ============================================

/// A round-robin store for a single numeric metric.
#[derive(Debug, Clone, PartialEq)]
pub struct RingStore {
    /// Seconds per bucket
    resolution: u32,

    /// Bucket values; length is the capacity. Slots outside the logical
    /// range hold stale data.
    samples: Vec<f64>,

    /// `None` while nothing has been inserted
    cursor: Option<Cursor>,
}

impl RingStore {
    /// Creates an empty store.
    ///
    /// ## Parameters
    /// - `resolution`: seconds per bucket, at least 1
    /// - `capacity`: number of buckets, at least 1
    pub fn new(resolution: u32, capacity: usize) -> TimeringResult<Self> {
        if resolution == 0 {
            return Err(ConfigError::ZeroResolution.into());
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity.into());
        }

        Ok(Self {
            resolution,
            samples: vec![0.0; capacity],
            cursor: None,
        })
    }

    /// Reassembles a store from already-validated parts.
    pub(crate) fn from_parts(resolution: u32, samples: Vec<f64>, cursor: Option<Cursor>) -> Self {
        Self {
            resolution,
            samples,
            cursor,
        }
    }

    /// Fails with [`ConfigError::SnapshotMismatch`] unless the store has the
    /// given dimensions.
    pub(crate) fn ensure_dimensions(&self, resolution: u32, capacity: usize) -> TimeringResult<()> {
        if self.resolution == resolution && self.capacity() == capacity {
            return Ok(());
        }
        Err(ConfigError::SnapshotMismatch {
            expected_resolution: resolution,
            expected_capacity: capacity,
            found_resolution: self.resolution,
            found_capacity: self.capacity(),
        }
        .into())
    }

    pub(crate) fn raw_samples(&self) -> &[f64] {
        &self.samples
    }

    pub(crate) fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    // ----------------------------------------
    // WRITES
    // ----------------------------------------

    /// Adds `value` at the current wall-clock time.
    pub fn insert(&mut self, value: f64) -> TimeringResult<()> {
        self.insert_at(value, Utc::now())
    }

    /// Adds `value` at time `at`, consolidating it into the right bucket.
    ///
    /// ## What Happens (Plain English)
    ///
    /// 1. Empty store: the sample becomes the first bucket.
    /// 2. Older than the last sample: refused, nothing changes.
    /// 3. Same bucket: blended in as a time-weighted mean.
    /// 4. Next bucket: the old bucket is closed out as if `value` held
    ///    until its end, then a new bucket starts with `value`.
    /// 5. Further ahead: every skipped bucket is filled with `0.0`, then a
    ///    new bucket starts with `value`. There is no "missing" marker.
    ///
    /// `at` may be in any time zone; it is stored as UTC. Instants whose
    /// bucket would end past chrono's range are refused.
    pub fn insert_at<Tz: TimeZone>(&mut self, value: f64, at: DateTime<Tz>) -> TimeringResult<()> {
        let t = at.with_timezone(&Utc);
        let Some(target) = Timebox::try_containing(t, self.resolution) else {
            warn!("Rejected sample at {}: bucket is out of range", t);
            return Err(StoreErrorKind::TimestampOutOfRange { attempted: t }.into());
        };

        let Some(mut cursor) = self.cursor else {
            self.samples[0] = value;
            self.cursor = Some(Cursor {
                head: 0,
                tail: 0,
                window: target,
                last_entry: t,
            });
            return Ok(());
        };

        if t < cursor.last_entry {
            warn!(
                "Rejected sample at {}: last entry was {}",
                t, cursor.last_entry
            );
            return Err(StoreErrorKind::NonMonotonicWrite {
                attempted: t,
                last_entry: cursor.last_entry,
            }
            .into());
        }

        let prior = seconds_between(cursor.window.start, cursor.last_entry);

        if t < cursor.window.stop {
            let current = seconds_between(cursor.last_entry, t);
            let slot = &mut self.samples[cursor.tail];
            *slot = weighted_mean(*slot, prior, value, current);
        } else if t < self.next_window_stop(&cursor.window) {
            let current = seconds_between(cursor.last_entry, cursor.window.stop);
            let slot = &mut self.samples[cursor.tail];
            *slot = weighted_mean(*slot, prior, value, current);

            cursor.advance(self.samples.len(), self.resolution);
            self.samples[cursor.tail] = value;
        } else {
            self.catch_up(&mut cursor, target);
            self.samples[cursor.tail] = value;
        }

        cursor.last_entry = t;
        self.cursor = Some(cursor);
        Ok(())
    }

    /// End of the bucket after `window`; saturates at the top of chrono's range.
    fn next_window_stop(&self, window: &Timebox) -> DateTime<Utc> {
        window
            .stop
            .checked_add_signed(self.resolution_delta())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Advances over a gap of two or more buckets, zero-filling as it goes,
    /// until the window is `target`.
    ///
    /// At most `capacity` slots are written. Past that every slot already
    /// holds `0.0`, so the remaining advances only rotate the cursor.
    fn catch_up(&mut self, cursor: &mut Cursor, target: Timebox) {
        let capacity = self.samples.len();
        let steps = ((target.start.timestamp() - cursor.window.start.timestamp())
            / i64::from(self.resolution))
        .max(1) as u64;

        let filled = steps.min(capacity as u64);
        for _ in 0..filled {
            cursor.advance(capacity, self.resolution);
            self.samples[cursor.tail] = 0.0;
        }

        let rotated = steps - filled;
        if rotated > 0 {
            cursor.tail = ((cursor.tail as u64 + rotated % capacity as u64) % capacity as u64) as usize;
            cursor.head = (cursor.tail + 1) % capacity;
        }
        cursor.window = target;

        debug!(
            "Skipped {} empty bucket(s) up to {}",
            steps.saturating_sub(1),
            target.start
        );
    }

    // ----------------------------------------
    // READS
    // ----------------------------------------

    /// Number of logically valid buckets, never more than the capacity.
    pub fn len(&self) -> usize {
        match self.cursor {
            None => 0,
            Some(c) if c.tail >= c.head => c.tail - c.head + 1,
            Some(c) => self.samples.len() - c.head + c.tail + 1,
        }
    }

    /// Returns true if nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.cursor.is_none()
    }

    /// Returns true once the oldest bucket is being overwritten.
    pub fn is_full(&self) -> bool {
        self.len() == self.samples.len()
    }

    /// Returns the `index`-th oldest bucket value.
    pub fn get(&self, index: usize) -> TimeringResult<f64> {
        let len = self.len();
        match self.cursor {
            Some(c) if index < len => Ok(self.samples[(c.head + index) % self.samples.len()]),
            _ => Err(StoreErrorKind::IndexOutOfRange { index, len }.into()),
        }
    }

    /// Value of the current (newest) bucket.
    pub fn latest(&self) -> Option<f64> {
        self.cursor.map(|c| self.samples[c.tail])
    }

    /// Iterates bucket values, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let head = self.cursor.map_or(0, |c| c.head);
        let capacity = self.samples.len();
        (0..self.len()).map(move |i| self.samples[(head + i) % capacity])
    }

    /// Copies bucket values out, oldest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Interval covered by the `index`-th oldest bucket.
    pub fn timebox_at(&self, index: usize) -> TimeringResult<Timebox> {
        let len = self.len();
        let cursor = match self.cursor {
            Some(c) if index < len => c,
            _ => return Err(StoreErrorKind::IndexOutOfRange { index, len }.into()),
        };

        let back = ((len - 1 - index) as i64).saturating_mul(i64::from(self.resolution));
        let start = TimeDelta::try_seconds(back)
            .and_then(|d| cursor.window.start.checked_sub_signed(d))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Ok(Timebox::containing(start, self.resolution))
    }

    /// Interval of the current bucket.
    pub fn current_timebox(&self) -> Option<Timebox> {
        self.cursor.map(|c| c.window)
    }

    /// Time of the most recently accepted sample.
    pub fn last_entry(&self) -> Option<DateTime<Utc>> {
        self.cursor.map(|c| c.last_entry)
    }

    /// Seconds per bucket.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    fn resolution_delta(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.resolution))
    }

    /// Number of buckets the ring holds.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Span of time the store covers once full.
    pub fn retention(&self) -> TimeDelta {
        TimeDelta::try_seconds((self.capacity() as i64).saturating_mul(i64::from(self.resolution)))
            .unwrap_or(TimeDelta::MAX)
    }
}

impl fmt::Display for RingStore {
    /// Debug dump of the complete internal state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---- Ring Dump ----")?;
        match self.cursor {
            Some(c) => {
                writeln!(
                    f,
                    "res: {}s, head: {}, tail: {}, cap: {}, len: {}",
                    self.resolution,
                    c.head,
                    c.tail,
                    self.capacity(),
                    self.len()
                )?;
                writeln!(f, "window: [{}, {})", c.window.start, c.window.stop)?;
                writeln!(f, "last: {}", c.last_entry)?;
            }
            None => {
                writeln!(
                    f,
                    "res: {}s, head: -, tail: -, cap: {}, len: 0",
                    self.resolution,
                    self.capacity()
                )?;
            }
        }
        write!(f, "data: {:?}", self.samples)
    }
}

// ============================================
// CONSOLIDATION HELPERS
// ============================================

/// Mean of `old` held for `prior` seconds and `value` held for `current`
/// seconds. With no elapsed time at all, `value` wins.
fn weighted_mean(old: f64, prior: f64, value: f64, current: f64) -> f64 {
    let total = prior + current;
    if total <= 0.0 {
        return value;
    }
    (old * prior + value * current) / total
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeringError;
    use chrono::FixedOffset;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "got {}, expected {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_creation() {
        let store = RingStore::new(5, 27).unwrap();
        assert_eq!(store.resolution(), 5);
        assert_eq!(store.capacity(), 27);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.latest().is_none());
        assert!(store.current_timebox().is_none());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            RingStore::new(0, 10),
            Err(TimeringError::Config(ConfigError::ZeroResolution))
        ));
        assert!(matches!(
            RingStore::new(10, 0),
            Err(TimeringError::Config(ConfigError::ZeroCapacity))
        ));
    }

    #[test]
    fn test_simple_population() {
        let mut store = RingStore::new(5, 10).unwrap();
        store.insert(0.0).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap(), 0.0);
    }

    #[test]
    fn test_first_insert_sets_window() {
        let mut store = RingStore::new(30, 4).unwrap();
        store.insert_at(3.5, at("2013-01-02T10:04:10Z")).unwrap();

        let window = store.current_timebox().unwrap();
        assert_eq!(window.start, at("2013-01-02T10:04:00Z"));
        assert_eq!(window.stop, at("2013-01-02T10:04:30Z"));
        assert_eq!(store.last_entry(), Some(at("2013-01-02T10:04:10Z")));
        assert_eq!(store.latest(), Some(3.5));
    }

    #[test]
    fn test_constant_value_across_boundary() {
        let mut store = RingStore::new(30, 10).unwrap();
        store.insert_at(5.0, at("2013-01-01T08:10:01Z")).unwrap();
        store.insert_at(5.0, at("2013-01-01T08:10:30Z")).unwrap();
        store.insert_at(5.0, at("2013-01-01T08:10:45Z")).unwrap();

        assert_eq!(store.len(), 2);
        assert_close(store.get(0).unwrap(), 5.0);
        assert_close(store.get(1).unwrap(), 5.0);
    }

    #[test]
    fn test_weighted_consolidation() {
        let mut store = RingStore::new(30, 10).unwrap();
        store.insert_at(4.0, at("2013-01-01T08:10:01Z")).unwrap();
        store.insert_at(10.0, at("2013-01-01T08:10:11Z")).unwrap();

        // 4 held for 1s, 10 held for 10s
        assert_close(store.get(0).unwrap(), 104.0 / 11.0);

        store.insert_at(7.0, at("2013-01-01T08:10:40Z")).unwrap();

        // Closing out: previous mean over 11s, 7 over the remaining 19s
        assert_eq!(store.len(), 2);
        assert_close(store.get(0).unwrap(), 237.0 / 30.0);
        assert_close(store.get(1).unwrap(), 7.0);
    }

    #[test]
    fn test_complex_population() {
        let data = [
            ("2013-01-01T08:10:01Z", 5.0),
            ("2013-01-01T08:10:30Z", 5.0),
            ("2013-01-01T08:10:45Z", 5.0),
            ("2013-01-01T08:11:00Z", 5.0),
            ("2013-01-01T08:11:15Z", 10.0),
            ("2013-01-01T08:11:35Z", 15.0),
            ("2013-01-01T08:11:40Z", 8.0),
            ("2013-01-01T08:11:42Z", 305.0),
            ("2013-01-01T08:12:04Z", 10.0),
            ("2013-01-01T08:13:34Z", 20.0),
            ("2013-01-01T08:14:05Z", 30.0),
            ("2013-01-01T08:14:35Z", 30.0),
            ("2013-01-01T08:15:20Z", 20.0),
        ];
        let expected = [
            5.0,
            12.5,
            30.166_666_667,
            10.0,
            0.0,
            0.0,
            28.666_666_667,
            30.0,
            21.666_666_667,
            20.0,
        ];

        let mut store = RingStore::new(30, 10).unwrap();
        for (t, v) in data {
            store.insert_at(v, at(t)).unwrap();
        }

        assert_eq!(store.len(), 10);
        assert!(store.is_full());
        for (i, v) in expected.iter().enumerate() {
            assert_close(store.get(i).unwrap(), *v);
        }
        assert_eq!(store.timebox_at(0).unwrap().start, at("2013-01-01T08:10:30Z"));
        assert_eq!(store.timebox_at(9).unwrap().start, at("2013-01-01T08:15:00Z"));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut store = RingStore::new(30, 4).unwrap();
        store.insert_at(1.0, at("2013-01-01T08:10:10Z")).unwrap();
        store.insert_at(2.0, at("2013-01-01T08:10:20Z")).unwrap();
        let before = store.clone();

        let err = store.insert_at(9.0, at("2013-01-01T08:10:15Z")).unwrap_err();
        assert!(matches!(
            err,
            TimeringError::Store(StoreErrorKind::NonMonotonicWrite { .. })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_equal_timestamp_accepted() {
        let mut store = RingStore::new(30, 4).unwrap();
        store.insert_at(6.0, at("2013-01-01T08:10:10Z")).unwrap();
        store.insert_at(100.0, at("2013-01-01T08:10:10Z")).unwrap();

        // Zero seconds in effect: no weight
        assert_close(store.get(0).unwrap(), 6.0);
    }

    #[test]
    fn test_zero_total_weight_takes_new_value() {
        let mut store = RingStore::new(30, 4).unwrap();
        store.insert_at(6.0, at("2013-01-01T08:10:00Z")).unwrap();
        store.insert_at(8.0, at("2013-01-01T08:10:00Z")).unwrap();

        assert_eq!(store.get(0).unwrap(), 8.0);
    }

    #[test]
    fn test_multi_bucket_gap_fills_zeros() {
        let mut store = RingStore::new(30, 10).unwrap();
        store.insert_at(4.0, at("2013-01-01T08:10:05Z")).unwrap();
        store.insert_at(9.0, at("2013-01-01T08:12:10Z")).unwrap();

        // 08:10:00 (kept as-is), 08:10:30, 08:11:00, 08:11:30 zero, 08:12:00 new
        assert_eq!(store.to_vec(), vec![4.0, 0.0, 0.0, 0.0, 9.0]);
        assert_eq!(store.current_timebox().unwrap().start, at("2013-01-01T08:12:00Z"));
    }

    #[test]
    fn test_gap_landing_on_boundary() {
        let mut store = RingStore::new(30, 10).unwrap();
        store.insert_at(4.0, at("2013-01-01T08:10:10Z")).unwrap();
        store.insert_at(9.0, at("2013-01-01T08:11:00Z")).unwrap();

        assert_eq!(store.to_vec(), vec![4.0, 0.0, 9.0]);
        let window = store.current_timebox().unwrap();
        assert_eq!(window.start, at("2013-01-01T08:11:00Z"));
        assert!(window.contains(store.last_entry().unwrap()));
    }

    #[test]
    fn test_ring_eviction() {
        let mut store = RingStore::new(60, 3).unwrap();
        let base = at("2013-01-01T00:00:00Z");
        for i in 0..5 {
            store
                .insert_at(i as f64, base + TimeDelta::minutes(i))
                .unwrap();
            assert_eq!(store.len(), (i as usize + 1).min(3));
        }

        // Each sample sits on its bucket start, so closing a bucket out
        // hands it the next sample's value.
        assert_eq!(store.to_vec(), vec![3.0, 4.0, 4.0]);
        assert!(store.get(3).is_err());

        let next_oldest = store.get(1).unwrap();
        store.insert_at(9.0, base + TimeDelta::minutes(5)).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap(), next_oldest);
    }

    #[test]
    fn test_gap_longer_than_capacity() {
        let mut store = RingStore::new(60, 4).unwrap();
        let base = at("2013-01-01T00:00:00Z");
        store.insert_at(1.0, base).unwrap();
        store.insert_at(2.0, base + TimeDelta::minutes(10)).unwrap();

        assert_eq!(store.to_vec(), vec![0.0, 0.0, 0.0, 2.0]);

        // Same cursor as ten single advances from slot 0
        let cursor = store.cursor().unwrap();
        assert_eq!(cursor.tail, 2);
        assert_eq!(cursor.head, 3);
        assert_eq!(cursor.window.start, base + TimeDelta::minutes(10));
    }

    #[test]
    fn test_capacity_one() {
        let mut store = RingStore::new(10, 1).unwrap();
        let base = at("2013-01-01T00:00:00Z");
        store.insert_at(1.0, base).unwrap();
        store.insert_at(2.0, base + TimeDelta::seconds(15)).unwrap();
        store.insert_at(3.0, base + TimeDelta::seconds(55)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap(), 3.0);
    }

    #[test]
    fn test_get_out_of_range() {
        let store = RingStore::new(10, 3).unwrap();
        assert!(matches!(
            store.get(0),
            Err(TimeringError::Store(StoreErrorKind::IndexOutOfRange { index: 0, len: 0 }))
        ));
        assert!(store.timebox_at(0).is_err());
    }

    #[test]
    fn test_one_second_resolution() {
        let mut store = RingStore::new(1, 5).unwrap();
        store.insert_at(2.0, at("2013-01-01T00:00:00.5Z")).unwrap();
        store.insert_at(4.0, at("2013-01-01T00:00:01.25Z")).unwrap();

        let window = store.current_timebox().unwrap();
        assert_eq!(window.start, at("2013-01-01T00:00:01Z"));
        assert!(window.contains(store.last_entry().unwrap()));

        // 4.0 for 0.25s, then 8.0 for 0.5s
        store.insert_at(8.0, at("2013-01-01T00:00:01.75Z")).unwrap();
        assert_close(store.get(0).unwrap(), 3.0);
        assert_close(store.get(1).unwrap(), 5.0 / 0.75);
    }

    #[test]
    fn test_window_invariant_holds_across_resolutions() {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (seed >> 33) % bound
        };

        for resolution in [1u32, 2, 7, 30, 60] {
            let mut store = RingStore::new(resolution, 5).unwrap();
            let mut t = at("2013-01-01T08:10:00Z");

            for step in 0..300 {
                let jump_ms = next(u64::from(resolution) * 3000) as i64;
                t += TimeDelta::milliseconds(jump_ms);
                store.insert_at(next(100) as f64, t).unwrap();

                let window = store.current_timebox().unwrap();
                assert!(
                    window.contains(store.last_entry().unwrap()),
                    "res {} step {}: {}",
                    resolution,
                    step,
                    store
                );
                assert_eq!(window.duration(), TimeDelta::seconds(i64::from(resolution)));
                assert_eq!(window.start.timestamp() % i64::from(resolution), 0);

                let bytes = crate::snapshot::encode(&store).unwrap();
                assert_eq!(crate::snapshot::decode(&bytes).unwrap(), store);
            }
        }
    }

    #[test]
    fn test_unrepresentable_bucket_rejected() {
        let mut store = RingStore::new(60, 4).unwrap();
        store.insert_at(1.0, at("2013-01-01T00:00:00Z")).unwrap();
        let before = store.clone();

        assert!(matches!(
            store.insert_at(2.0, DateTime::<Utc>::MAX_UTC),
            Err(TimeringError::Store(StoreErrorKind::TimestampOutOfRange { .. }))
        ));
        assert_eq!(store, before);

        let mut empty = RingStore::new(1, 4).unwrap();
        assert!(empty.insert_at(2.0, DateTime::<Utc>::MAX_UTC).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_timezone_normalized() {
        let mut store = RingStore::new(3600, 4).unwrap();
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2013, 1, 1, 15, 20, 0).unwrap();
        store.insert_at(1.0, local).unwrap();

        assert_eq!(store.last_entry(), Some(at("2013-01-01T10:20:00Z")));
        assert_eq!(store.current_timebox().unwrap().start, at("2013-01-01T10:00:00Z"));
    }

    #[test]
    fn test_retention_and_display() {
        let mut store = RingStore::new(60, 3).unwrap();
        assert_eq!(store.retention(), TimeDelta::minutes(3));
        assert!(store.to_string().contains("head: -"));

        store.insert_at(1.5, at("2013-01-01T00:00:10Z")).unwrap();
        let dump = store.to_string();
        assert!(dump.contains("head: 0, tail: 0"));
        assert!(dump.contains("len: 1"));
    }
}
