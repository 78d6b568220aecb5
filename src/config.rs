//! # Configuration Module
//!
//! This module handles the configurable settings for a Timering store.
//!
//! ## Plain English Explanation
//!
//! A round-robin store only needs to know two things up front: how wide each
//! time bucket is, and how many buckets to keep. Multiply them and you get
//! how far back in time the store remembers. Optionally, it can also know
//! where on disk to checkpoint itself.
//!
//! Settings include:
//! - Seconds per bucket (resolution)
//! - Number of buckets (capacity)
//! - Where to save snapshots

use std::mem;
use std::path::PathBuf;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest retention we accept before assuming a typo (ten years)
pub const MAX_RETENTION_SECS: u64 = 10 * 365 * 86_400;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// All configuration options for a Timering store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ----------------------------------------
    // RING SETTINGS
    // "How much to remember"
    // ----------------------------------------

    /// Seconds covered by each bucket
    ///
    /// ## Plain English
    /// With 60, every sample that lands in the same minute is averaged
    /// into one value.
    pub resolution_secs: u32,

    /// Number of buckets kept before the oldest is overwritten
    pub capacity: usize,

    // ----------------------------------------
    // PERSISTENCE SETTINGS
    // ----------------------------------------

    /// File to checkpoint the store into, if any
    ///
    /// ## Default
    /// `None` - the store lives in memory only
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Config {
    /// One day of per-minute buckets, memory only
    fn default() -> Self {
        Self {
            resolution_secs: 60,
            capacity: 1440,
            snapshot_path: None,
        }
    }
}

impl Config {
    /// One hour of per-second buckets
    ///
    /// ## When to Use
    /// Short, high-detail views such as a live dashboard sparkline.
    pub fn per_second_hour() -> Self {
        Self {
            resolution_secs: 1,
            capacity: 3600,
            ..Self::default()
        }
    }

    /// Thirty days of hourly buckets
    pub fn hourly_month() -> Self {
        Self {
            resolution_secs: 3600,
            capacity: 24 * 30,
            ..Self::default()
        }
    }

    /// Sets the snapshot file location
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Validates the configuration and returns errors if invalid
    ///
    /// ## Plain English
    /// Makes sure all settings are within reasonable bounds.
    /// Returns a list of problems, or empty if all is well.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.resolution_secs == 0 {
            errors.push(ConfigError::ZeroResolution);
        }
        if self.capacity == 0 {
            errors.push(ConfigError::ZeroCapacity);
        }

        let retention = self.retention_secs();
        if retention > MAX_RETENTION_SECS {
            errors.push(ConfigError::RetentionTooLong(retention));
        }

        errors
    }

    fn retention_secs(&self) -> u64 {
        (self.resolution_secs as u64).saturating_mul(self.capacity as u64)
    }

    /// How far back the store remembers once full
    pub fn retention(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.retention_secs().min(i64::MAX as u64) as i64)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Calculates the memory used by the sample array
    ///
    /// ## Returns
    /// Bytes held by the bucket values (bookkeeping fields excluded)
    pub fn estimated_memory_bytes(&self) -> usize {
        self.capacity.saturating_mul(mem::size_of::<f64>())
    }
}

// ============================================
// CONFIGURATION ERRORS
// ============================================

/// Errors that can occur with configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Buckets must cover at least one second
    #[error("resolution must be at least 1 second")]
    ZeroResolution,

    /// A ring needs at least one slot
    #[error("capacity must be at least 1 bucket")]
    ZeroCapacity,

    /// Retention is implausibly long
    #[error("retention of {0} seconds exceeds the ten year maximum")]
    RetentionTooLong(u64),

    /// A snapshot on disk was written with different ring dimensions
    #[error(
        "snapshot has resolution {found_resolution}s x {found_capacity}, \
         expected {expected_resolution}s x {expected_capacity}"
    )]
    SnapshotMismatch {
        expected_resolution: u32,
        expected_capacity: usize,
        found_resolution: u32,
        found_capacity: usize,
    },
}

// ============================================
// TESTS
// ============================================
