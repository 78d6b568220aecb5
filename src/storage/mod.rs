//! # Storage Module
//!
//! Saves store snapshots to disk and loads them back.
//!
//! ## Plain English
//!
//! A round-robin store is only useful across restarts if it can be written
//! down. This module:
//! 1. Creates the snapshot folder
//! 2. Writes the snapshot to a temporary file, then swaps it into place
//! 3. Reads it back, checking it still matches the configured ring
//!
//! The temporary file is synced to disk before the swap, so a crash or power
//! loss mid-write leaves the previous snapshot intact.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{TimeringError, TimeringResult};
use crate::snapshot;
use crate::store::RingStore;

// ============================================
// SNAPSHOT FILE
// ============================================

/// A snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    /// Final location of the snapshot
    path: PathBuf,
}

impl SnapshotFile {
    /// Points at a snapshot location. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes `store` to disk, replacing any previous snapshot.
    pub fn save(&self, store: &RingStore) -> TimeringResult<()> {
        self.save_bytes(&snapshot::encode(store)?)
    }

    /// Writes already-encoded snapshot bytes, replacing any previous snapshot.
    ///
    /// The temporary file is synced before it is renamed into place.
    pub fn save_bytes(&self, bytes: &[u8]) -> TimeringResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_directory(parent)?;
        }

        let temp = self.temp_path();
        let mut file = File::create(&temp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp, &self.path)?;

        log::debug!("Saved {} byte snapshot to {:?}", bytes.len(), self.path);
        Ok(())
    }

    /// Reads the snapshot back into a store.
    pub fn load(&self) -> TimeringResult<RingStore> {
        let bytes = fs::read(&self.path)?;
        let store = snapshot::decode(&bytes)?;

        log::info!(
            "Loaded snapshot from {:?}: {} of {} buckets",
            self.path,
            store.len(),
            store.capacity()
        );
        Ok(store)
    }

    /// Loads the snapshot, or starts an empty store if none exists yet.
    ///
    /// ## Returns
    /// `ConfigError::SnapshotMismatch` if the file was written for a ring of
    /// a different resolution or capacity. The file is left alone.
    pub fn load_or_new(&self, resolution: u32, capacity: usize) -> TimeringResult<RingStore> {
        let store = match self.load() {
            Ok(store) => store,
            Err(TimeringError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                log::info!("No snapshot at {:?}, starting empty", self.path);
                return RingStore::new(resolution, capacity);
            }
            Err(e) => return Err(e),
        };

        store.ensure_dimensions(resolution, capacity)?;
        Ok(store)
    }

    /// Returns true if a snapshot has been written.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Returns the snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("snapshot"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

// ============================================
// UTILITY FUNCTIONS
// ============================================

/// Ensures a directory exists.
pub fn ensure_directory(path: &Path) -> TimeringResult<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        log::info!("Creating snapshot directory: {:?}", path);
        fs::create_dir_all(path)?;
    }
    Ok(())
}

// ============================================
// TESTS
// ============================================
