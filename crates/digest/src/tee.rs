//! Read-through hashing.
//!
//! A [`TeeReader`] sits between a byte source and its consumer, mirroring
//! every byte handed to the consumer into a hasher. The source is read once,
//! front to back, and nothing is buffered beyond the caller's own buffer.

use md5::digest::Update;
use std::io::{Read, Result as IoResult};

/// A [`Read`] decorator that feeds everything it returns into `H`.
///
/// Bytes are observed only after the inner reader has produced them, so a
/// failed read contributes nothing to the hasher.
pub struct TeeReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R: Read, H: Update> TeeReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self { reader, hasher }
    }

    /// Split back into the (partially consumed) reader and the hasher.
    pub fn into_parts(self) -> (R, H) {
        (self.reader, self.hasher)
    }
}

impl<R: Read, H: Update> Read for TeeReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let read = self.reader.read(buf)?;
        self.hasher.update(&buf[..read]);
        Ok(read)
    }
}
