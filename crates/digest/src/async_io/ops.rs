use crate::async_io::tee::AsyncTeeReader;
use crate::crc::Crc16;
use crate::error::{ErrorKind, Result};
use crate::{BUFFER_SIZE, DualDigest};
use md5::{Digest, Md5};
use std::io::ErrorKind as IoErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Async equivalent of [`compute`](crate::compute).
pub async fn compute_async<R: AsyncRead + Unpin>(reader: R) -> Result<DualDigest> {
    let mut tee = AsyncTeeReader::new(reader, Md5::new());
    let mut crc = Crc16::new();
    // Heap buffer: keeps the future small when it gets spawned.
    let mut buffer = vec![0_u8; BUFFER_SIZE];
    loop {
        let read = match tee.read(&mut buffer).await {
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
