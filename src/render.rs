//! Text output.
//!
//! One line per file: results on stdout, failures on stderr.

use citt_dispatch::FileOutcome;
use citt_dispatch::error::Error;
use std::io::{Result as IoResult, Write};

/// `<path>: crc: 0x<hex> (<decimal>) - md5: <hex>` on success, or the
/// error (which names the path) on failure.
pub fn outcome(stdout: &mut impl Write, stderr: &mut impl Write, outcome: &FileOutcome) -> IoResult<()> {
    match &outcome.result {
        Ok(digest) => writeln!(stdout, "{}: {digest}", outcome.path.display()),
        Err(e) => writeln!(stderr, "citt: {}", **e),
    }
}

/// The run-level failure.
pub fn failure(stderr: &mut impl Write, err: &Error) -> IoResult<()> {
    writeln!(stderr, "citt: {}", **err)
}
