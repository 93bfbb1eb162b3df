//! Where file bytes come from.
//!
//! The dispatcher never touches the filesystem directly; it asks a
//! [`FileSource`] to open each path. [`LocalSource`] is the real thing,
//! `MockSource` (tests only) serves in-memory files and keeps count of how
//! many handles are open at once.

mod local;
#[cfg(test)]
mod mock;

pub use self::local::LocalSource;
#[cfg(test)]
pub use self::mock::MockSource;
use async_trait::async_trait;
use citt_digest::error::Result as DigestResult;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncRead;

/// An open, readable file. Dropping it closes the handle.
pub type BoxAsyncRead = Box<dyn AsyncRead + Send + Unpin>;

/// Opens paths for digesting.
///
/// Failures must be reported as [`Open`](citt_digest::error::ErrorKind::Open)
/// so they stay distinct from failures part-way through a read.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    async fn open(&self, path: &Path) -> DigestResult<BoxAsyncRead>;
}

pub type SourceHandle = Arc<dyn FileSource>;
