//! Local filesystem file source, via `tokio::fs`.

use crate::source::{BoxAsyncRead, FileSource};
use async_trait::async_trait;
use citt_digest::error::{ErrorKind, Result};
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::Path;
use tokio::fs::File;

/// Opens paths on the local filesystem.
///
/// Directories are rejected at open time rather than failing on first read.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSource;

#[async_trait]
impl FileSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn open(&self, path: &Path) -> Result<BoxAsyncRead> {
        let file = File::open(path).await.map_err(ErrorKind::Open)?;
        let metadata = file.metadata().await.map_err(ErrorKind::Open)?;
        if metadata.is_dir() {
            exn::bail!(ErrorKind::Open(IoError::from(IoErrorKind::IsADirectory)));
        }
        Ok(Box::new(file))
    }
}
