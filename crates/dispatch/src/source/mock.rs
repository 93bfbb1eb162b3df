//! In-memory file source for testing.

use crate::source::{BoxAsyncRead, FileSource};
use async_trait::async_trait;
use citt_digest::error::{ErrorKind, Result};
use std::collections::HashMap;
use std::io::{Cursor, Error as IoError, ErrorKind as IoErrorKind, Result as IoResult};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, ReadBuf};

#[derive(Clone)]
enum MockFile {
    Data(Vec<u8>),
    /// Yields the bytes, then fails instead of reporting end-of-stream.
    FailsAfter(Vec<u8>),
    Panics,
}

#[derive(Default)]
struct Counters {
    open: AtomicUsize,
    peak: AtomicUsize,
}

/// Counts itself as an open handle for as long as it lives.
struct OpenHandle {
    counters: Arc<Counters>,
}
impl OpenHandle {
    fn new(counters: &Arc<Counters>) -> Self {
        let now = counters.open.fetch_add(1, Ordering::SeqCst) + 1;
        counters.peak.fetch_max(now, Ordering::SeqCst);
        Self { counters: Arc::clone(counters) }
    }
}
impl Drop for OpenHandle {
    fn drop(&mut self) {
        self.counters.open.fetch_sub(1, Ordering::SeqCst);
    }
}

struct MockReader {
    data: Cursor<Vec<u8>>,
    fail_at_end: bool,
    _handle: OpenHandle,
}

impl AsyncRead for MockReader {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<IoResult<()>> {
        let exhausted = self.data.position() >= self.data.get_ref().len() as u64;
        if exhausted && self.fail_at_end {
            return Poll::Ready(Err(IoError::other("simulated read failure")));
        }
        Pin::new(&mut self.data).poll_read(cx, buf)
    }
}

/// In-memory file source for testing.
///
/// Tracks how many handles are open at once (a handle is open from the moment
/// `open` starts handing it out until the reader is dropped), the highest
/// that number ever got, and how many times each path was opened.
pub struct MockSource {
    files: HashMap<PathBuf, MockFile>,
    latency: Duration,
    counters: Arc<Counters>,
    opens: Mutex<HashMap<PathBuf, usize>>,
}

impl MockSource {
    /// Create a mock source pre-populated with files.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let files = files.into_iter().map(|(path, data)| (path.into(), MockFile::Data(data.into()))).collect();
        Self {
            files,
            latency: Duration::ZERO,
            counters: Arc::default(),
            opens: Mutex::default(),
        }
    }

    /// Keep each handle open for at least `latency` before any byte is read,
    /// so that concurrent tasks overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Add a file whose read fails after `data` has been returned.
    pub fn with_failing_file(mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), MockFile::FailsAfter(data.into()));
        self
    }

    /// Add a file whose `open` panics.
    pub fn with_panicking_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), MockFile::Panics);
        self
    }

    /// Handles currently open.
    pub fn currently_open(&self) -> usize {
        self.counters.open.load(Ordering::SeqCst)
    }

    /// The most handles that were ever open at the same time.
    pub fn peak_open(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    /// How many times `open` was called for `path`, successful or not.
    pub fn opens_of(&self, path: impl AsRef<Path>) -> usize {
        self.opens.lock().map(|opens| opens.get(path.as_ref()).copied().unwrap_or(0)).unwrap_or(0)
    }

    /// How many times `open` was called in total.
    pub fn total_opens(&self) -> usize {
        self.opens.lock().map(|opens| opens.values().sum()).unwrap_or(0)
    }

    fn record_open(&self, path: &Path) {
        if let Ok(mut opens) = self.opens.lock() {
            *opens.entry(path.to_path_buf()).or_default() += 1;
        }
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::with_files(Vec::<(PathBuf, Vec<u8>)>::new())
    }
}

#[async_trait]
impl FileSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn open(&self, path: &Path) -> Result<BoxAsyncRead> {
        self.record_open(path);
        let (data, fail_at_end) = match self.files.get(path) {
            Some(MockFile::Data(data)) => (data.clone(), false),
            Some(MockFile::FailsAfter(data)) => (data.clone(), true),
            // Simulates a task that dies without producing an outcome.
            Some(MockFile::Panics) => panic!("MockSource: simulated panic opening {}", path.display()),
            None => exn::bail!(ErrorKind::Open(IoError::from(IoErrorKind::NotFound))),
        };
        let handle = OpenHandle::new(&self.counters);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(Box::new(MockReader {
            data: Cursor::new(data),
            fail_at_end,
            _handle: handle,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_tracks_open_handles() {
        let source = MockSource::with_files([("a", b"aaa".to_vec()), ("b", b"bbb".to_vec())]);
        let first = source.open(Path::new("a")).await.unwrap();
        let second = source.open(Path::new("b")).await.unwrap();
        assert_eq!(source.currently_open(), 2);
        drop(first);
        assert_eq!(source.currently_open(), 1);
        drop(second);
        assert_eq!(source.currently_open(), 0);
        assert_eq!(source.peak_open(), 2);
    }

    #[tokio::test]
    async fn test_missing_is_open_error() {
        let source = MockSource::default();
        let err = source.open(Path::new("nope")).await.err().unwrap();
        assert!(matches!(*err, ErrorKind::Open(_)));
        assert_eq!(source.opens_of("nope"), 1);
        assert_eq!(source.peak_open(), 0);
    }

    #[tokio::test]
    async fn test_failing_file() {
        let source = MockSource::default().with_failing_file("bad", b"abc".to_vec());
        let mut reader = source.open(Path::new("bad")).await.unwrap();
        let mut buf = [0_u8; 8];
        assert_eq!(reader.read(&mut buf).await.unwrap(), 3);
        assert!(reader.read(&mut buf).await.is_err());
    }

    #[tokio::test]
    async fn test_counts_opens() {
        let source = MockSource::with_files([("a", b"a".to_vec())]);
        let _ = source.open(Path::new("a")).await.unwrap();
        let _ = source.open(Path::new("a")).await.unwrap();
        let _ = source.open(Path::new("z")).await;
        assert_eq!(source.opens_of("a"), 2);
        assert_eq!(source.opens_of("z"), 1);
        assert_eq!(source.total_opens(), 3);
    }
}
