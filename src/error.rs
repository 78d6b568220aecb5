//! # Error Types Module
//!
//! This module defines all the error types used throughout Timering.
//!
//! ## Plain English Explanation
//!
//! When things go wrong, we need a way to describe WHAT went wrong.
//! These error types are labels on problem reports:
//!
//! - "StoreError: that sample is older than the last one"
//! - "SnapshotError: these bytes aren't a snapshot we understand"
//! - "ConfigError: a zero-second resolution makes no sense"
//!
//! None of these are fatal to the store itself. A rejected write or a bad
//! index leaves the store exactly as it was.

use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::ConfigError;

// ============================================
// MAIN ERROR
// ============================================

/// The main error type for Timering
///
/// ## Plain English
///
/// This is the "parent" error that can contain any type of error
/// from any part of the crate. It's a filing cabinet with a folder
/// for each area's problems.
#[derive(Debug, Error)]
pub enum TimeringError {
    /// A write or read against the ring store was refused
    #[error("Store error: {0}")]
    Store(#[from] StoreErrorKind),

    /// Snapshot bytes could not be turned back into a store
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotErrorKind),

    /// Something went wrong with configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic I/O error (snapshot files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// ============================================
// STORE ERRORS
// ============================================

/// Errors raised by ring store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreErrorKind {
    /// Tried to insert a sample older than the last accepted one
    ///
    /// ## What This Means
    /// History can't be rewritten. The sample was dropped and the store
    /// is unchanged.
    #[error("sample at {attempted} is older than last entry at {last_entry}")]
    NonMonotonicWrite {
        attempted: DateTime<Utc>,
        last_entry: DateTime<Utc>,
    },

    /// The sample's bucket would end past the last representable instant
    #[error("no representable bucket contains {attempted}")]
    TimestampOutOfRange { attempted: DateTime<Utc> },

    /// Asked for a bucket past the end of the logical range
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

// ============================================
// SNAPSHOT ERRORS
// ============================================

/// Errors raised while decoding a snapshot
#[derive(Debug, Error)]
pub enum SnapshotErrorKind {
    /// Zero bytes were handed to the decoder
    #[error("no data")]
    EmptyInput,

    /// The leading version byte isn't one we know how to read
    #[error("unknown version {0}")]
    UnknownVersion(u8),

    /// The payload didn't decode, or had bytes left over
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The payload decoded but describes an impossible ring
    #[error("inconsistent ring state: {0}")]
    InconsistentState(String),
}

impl From<postcard::Error> for SnapshotErrorKind {
    fn from(err: postcard::Error) -> Self {
        SnapshotErrorKind::Malformed(err.to_string())
    }
}

impl From<postcard::Error> for TimeringError {
    fn from(err: postcard::Error) -> Self {
        TimeringError::Snapshot(err.into())
    }
}

// ============================================
// RESULT TYPE ALIAS
// ============================================

/// A Result type that uses TimeringError
pub type TimeringResult<T> = Result<T, TimeringError>;

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TimeringError::Store(StoreErrorKind::IndexOutOfRange { index: 4, len: 2 });
        let message = format!("{}", err);
        assert!(message.contains("Store"));
        assert!(message.contains("index 4"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TimeringError = io_err.into();

        match err {
            TimeringError::Io(_) => {} // Expected
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_snapshot_kind_conversion() {
        let err: TimeringError = SnapshotErrorKind::UnknownVersion(9).into();
        assert!(matches!(
            err,
            TimeringError::Snapshot(SnapshotErrorKind::UnknownVersion(9))
        ));
        assert!(err.to_string().contains("unknown version 9"));
    }
}
