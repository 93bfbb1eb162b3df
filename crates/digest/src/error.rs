//! Digest Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;

/// A digest error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Where in the lifecycle of a byte stream the failure happened.
///
/// End-of-stream is never an error and never appears here.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The file could not be opened (missing, a directory, or unreadable).
    /// Nothing was digested.
    #[display("cannot open file: {_0}")]
    Open(IoError),
    /// The stream failed part-way through. Any partially accumulated digest
    /// state has been discarded.
    #[display("read failed: {_0}")]
    Read(IoError),
}

impl ErrorKind {
    /// The underlying I/O error kind, for callers that want to distinguish
    /// "not found" from "permission denied" without parsing messages.
    pub fn io_kind(&self) -> std::io::ErrorKind {
        match self {
            Self::Open(e) | Self::Read(e) => e.kind(),
        }
    }
}
