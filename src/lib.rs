//! # Timering
//!
//! A fixed-capacity, round-robin time-series store. One numeric metric is
//! sampled at arbitrary times and consolidated into fixed-width time buckets.
//! Once the ring is full the oldest bucket is overwritten, so memory and disk
//! use stay constant no matter how long the process runs.
//!
//! ## Architecture Overview
//!
//! The crate is structured into independent modules:
//!
//! - `store`: Timebox alignment, the ring store, and a locked shared handle
//! - `snapshot`: Versioned binary encoding of a store's full state
//! - `storage`: Snapshot files on disk
//! - `config`: Store configuration
//! - `error`: Error types

// ============================================
// MODULE DECLARATIONS
// ============================================

pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod store;

// ============================================
// RE-EXPORTS
// ============================================

pub use config::{Config, ConfigError};
pub use error::{SnapshotErrorKind, StoreErrorKind, TimeringError, TimeringResult};
pub use snapshot::SNAPSHOT_VERSION;
pub use storage::SnapshotFile;
pub use store::{RingStore, SharedRingStore, Timebox};

// ============================================
// IMPORTS
// ============================================

use chrono::{DateTime, TimeZone};
use log::{info, warn};
use parking_lot::Mutex;

// ============================================
// RECORDER
// ============================================

/// Records one metric into a shared ring store, with optional checkpoints.
///
/// ## Plain English
///
/// This is the "control center" that ties the pieces together:
/// - Checks the configuration
/// - Restores the last snapshot, if there is one
/// - Accepts readings and keeps count of what was accepted or refused
/// - Writes snapshots when asked
pub struct Recorder {
    /// The ring holding the metric
    store: SharedRingStore,

    /// Where checkpoints go, if configured
    snapshot_file: Option<SnapshotFile>,

    /// Configuration used to build this recorder
    config: Config,

    /// Statistics about operation
    stats: Mutex<RecorderStats>,
}

/// Runtime statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecorderStats {
    /// Readings consolidated into the store
    pub samples_accepted: u64,
    /// Readings refused for arriving out of order
    pub samples_rejected: u64,
    /// Snapshots written to disk
    pub checkpoints_written: u64,
}

impl Recorder {
    /// Creates a recorder with the default configuration.
    pub fn new() -> TimeringResult<Self> {
        Self::with_config(Config::default())
    }

    /// Creates a recorder with a custom configuration.
    ///
    /// ## Returns
    /// The first validation problem, if any. When a snapshot path is set and
    /// a snapshot exists there, the store is restored from it.
    pub fn with_config(config: Config) -> TimeringResult<Self> {
        if let Some(err) = config.validate().into_iter().next() {
            return Err(err.into());
        }

        info!(
            "Initializing recorder: {}s buckets x {}",
            config.resolution_secs, config.capacity
        );

        let snapshot_file = config.snapshot_path.as_ref().map(SnapshotFile::new);
        let store = match &snapshot_file {
            Some(file) => SharedRingStore::from_store(
                file.load_or_new(config.resolution_secs, config.capacity)?,
            ),
            None => SharedRingStore::new(config.resolution_secs, config.capacity)?,
        };

        Ok(Self {
            store,
            snapshot_file,
            config,
            stats: Mutex::new(RecorderStats::default()),
        })
    }

    /// Records a reading at the current time.
    pub fn record(&self, value: f64) -> TimeringResult<()> {
        let result = self.store.insert(value);
        self.count(&result);
        result
    }

    /// Records a reading at a specific time.
    ///
    /// Out-of-order readings are counted as rejected and the error is
    /// returned; the store is unchanged.
    pub fn record_at<Tz: TimeZone>(&self, value: f64, at: DateTime<Tz>) -> TimeringResult<()> {
        let result = self.store.insert_at(value, at);
        self.count(&result);
        result
    }

    fn count(&self, result: &TimeringResult<()>) {
        let mut stats = self.stats.lock();
        match result {
            Ok(()) => stats.samples_accepted += 1,
            Err(_) => stats.samples_rejected += 1,
        }
    }

    /// Writes a snapshot to the configured file.
    ///
    /// Returns `Ok(false)` when no snapshot path is configured.
    pub fn checkpoint(&self) -> TimeringResult<bool> {
        let Some(file) = &self.snapshot_file else {
            return Ok(false);
        };

        // Encode under the read lock, write to disk after releasing it
        let written = self
            .store
            .snapshot()
            .and_then(|bytes| file.save_bytes(&bytes));
        if let Err(e) = written {
            warn!("Checkpoint to {:?} failed: {}", file.path(), e);
            return Err(e);
        }

        self.stats.lock().checkpoints_written += 1;
        Ok(true)
    }

    /// Returns the shared store for reads.
    pub fn store(&self) -> &SharedRingStore {
        &self.store
    }

    /// Returns a copy of the current statistics.
    pub fn stats(&self) -> RecorderStats {
        self.stats.lock().clone()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// ============================================
// LOGGING
// ============================================

/// Initialize logging for the platform.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

// ============================================
// TESTS
// ============================================
