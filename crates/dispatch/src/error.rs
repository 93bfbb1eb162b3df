//! Dispatch Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Per-file errors keep the digest
//! crate's frame as a child; the run-level [`ErrorKind::Aggregate`] keeps the
//! first per-file error as its child.

use citt_digest::error::{Error as DigestError, ErrorKind as DigestErrorKind};
use derive_more::{Display, Error};
use std::path::{Path, PathBuf};

/// A dispatch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong, and for which file.
///
/// ### Per-file Errors
/// - [`ErrorKind::Open`]
/// - [`ErrorKind::Read`]
/// - [`ErrorKind::Panicked`]
///
/// ### Run-level Errors
/// - [`ErrorKind::Aggregate`]
/// - [`ErrorKind::UnknownPolicy`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The file could not be opened; nothing was digested.
    #[display("{}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },
    /// The file failed part-way through being read.
    #[display("{}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },
    /// The task digesting this file panicked or was torn down.
    #[display("{}: digest task did not complete", _0.display())]
    Panicked(#[error(not(source))] PathBuf),
    /// At least one file failed. Wraps the first failure observed.
    #[display("{failed} of {total} files failed; first error: {first}")]
    Aggregate { failed: usize, total: usize, first: String },
    /// The requested reporting policy is not recognised.
    #[display("unknown policy: {_0}")]
    UnknownPolicy(#[error(not(source))] String),
}

impl ErrorKind {
    /// Attach `path` to a digest error, preserving the digest crate's `Exn`
    /// frame as a child in this crate's error tree.
    #[track_caller]
    pub fn digest(path: &Path, err: DigestError) -> Error {
        let reason = (*err).to_string();
        let path = path.to_path_buf();
        let kind = match &*err {
            DigestErrorKind::Open(_) => Self::Open { path, reason },
            DigestErrorKind::Read(_) => Self::Read { path, reason },
        };
        err.raise(kind)
    }
}
