use crate::crc::Crc16;
use crate::error::{ErrorKind, Result};
use crate::tee::TeeReader;
use crate::{BUFFER_SIZE, DualDigest};
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read};
use std::path::Path;
use tracing::instrument;

/// Digest everything `reader` yields until end-of-stream.
///
/// The reader is consumed exactly once. MD5 observes the bytes through a
/// [`TeeReader`] while the CRC folds the same buffer the tee hands back, so
/// both accumulators always agree on the byte sequence.
///
/// Interrupted reads are retried; any other I/O failure aborts with
/// [`ErrorKind::Read`] and the partial state is dropped.
pub fn compute<R: Read>(reader: R) -> Result<DualDigest> {
    let mut tee = TeeReader::new(reader, Md5::new());
    let mut crc = Crc16::new();
    let mut buffer = vec![0_u8; BUFFER_SIZE];
    loop {
        let read = match tee.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => exn::bail!(ErrorKind::Read(e)),
        };
        crc.update(&buffer[..read]);
    }
    let (_, hasher) = tee.into_parts();
    Ok(DualDigest {
        crc: crc.value(),
        md5: hasher.finalize().into(),
    })
}

/// Open `path` and [`compute`] its digests.
///
/// Failures to open, including `path` being a directory, are reported as
/// [`ErrorKind::Open`] before a single byte is read.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn digest_file(path: impl AsRef<Path>) -> Result<DualDigest> {
    let path = path.as_ref();
    let file = File::open(path).map_err(ErrorKind::Open)?;
    let metadata = file.metadata().map_err(ErrorKind::Open)?;
    if metadata.is_dir() {
        exn::bail!(ErrorKind::Open(IoError::from(IoErrorKind::IsADirectory)));
    }
    compute(file)
}
