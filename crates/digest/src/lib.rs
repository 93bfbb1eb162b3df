//! Single-pass dual digests.
//!
//! Computes a CRC-16/CCITT checksum and an MD5 content hash over a byte
//! stream while reading it exactly once:
//!
//! - **Blocking** via [`compute`] over any [`Read`](std::io::Read), or
//!   [`digest_file`] for a path on disk
//! - **Async** via `compute_async` over any Tokio `AsyncRead` (requires the
//!   `async` feature)
//!
//! MD5 sees the bytes through a tee reader ([`TeeReader`]) that mirrors each
//! read into the hasher, while the CRC consumes the same buffer on the other
//! side. Nothing larger than a single read buffer is ever held in memory.

#[cfg(feature = "async")]
mod async_io;
mod crc;
pub mod error;
mod ops;
mod tee;

#[cfg(feature = "async")]
pub use crate::async_io::ops::compute_async;
#[cfg(feature = "async")]
pub use crate::async_io::tee::AsyncTeeReader;
pub use crate::crc::{CRC16_INITIAL, Crc16, crc16};
pub use crate::ops::{compute, digest_file};
pub use crate::tee::TeeReader;
use std::fmt::{Display, Formatter, Result as FmtResult, Write};

/// Size of the read buffer shared by the CRC and MD5 consumers.
pub const BUFFER_SIZE: usize = 64 * 1024;

/// The final snapshot of both accumulators once a stream is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DualDigest {
    /// CRC-16/CCITT over every byte.
    pub crc: u16,
    /// MD5 over every byte.
    pub md5: [u8; 16],
}

impl DualDigest {
    /// MD5 as 32 lowercase hex characters.
    #[must_use]
    pub fn md5_hex(&self) -> String {
        self.md5.iter().fold(String::with_capacity(32), |mut hex, byte| {
            // Writing to a String cannot fail.
            let _ = write!(hex, "{byte:02x}");
            hex
        })
    }
}

/// `crc: 0x<hex> (<decimal>) - md5: <hex>`
impl Display for DualDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "crc: {:#x} ({}) - md5: {}", self.crc, self.crc, self.md5_hex())
    }
}
