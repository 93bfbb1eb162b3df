//! Bounded-concurrency file digesting.
//!
//! Fans a list of paths out to one Tokio task per file, digests each with
//! [`citt_digest`], and fans the results back in:
//!
//! - At most [`Parallelism`] files are open at any instant. A counting
//!   [`Semaphore`](tokio::sync::Semaphore) hands out slots, and each slot is
//!   owned by the task using it so it comes back on every exit path.
//! - Exactly one [`FileOutcome`] is produced per input path, in completion
//!   order, via [`Dispatcher::stream`] or collected into a [`Report`] by
//!   [`Dispatcher::run`].
//! - Failures stay local to their file. Nothing is cancelled or retried; a
//!   [`Policy`] decides which outcomes are shown as they happen, and
//!   [`Report::into_result`] escalates the first failure for the whole run.
//!
//! Files are opened through a [`FileSource`](source::FileSource), normally
//! [`LocalSource`](source::LocalSource).

mod dispatcher;
pub mod error;
mod outcome;
mod policy;
pub mod source;

pub use crate::dispatcher::Dispatcher;
pub use crate::outcome::{FileOutcome, Report};
pub use crate::policy::Policy;
use std::num::NonZeroUsize;
use tokio::sync::Semaphore;

/// Default number of files processed at once.
pub const DEFAULT_PARALLELISM: usize = 10;

/// How many files may be open and digesting at the same time. Always ≥ 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Parallelism(NonZeroUsize);

impl Parallelism {
    /// Turn any requested bound into a usable one: zero and negative values
    /// mean "one at a time", and huge values are capped at what the slot pool
    /// can represent.
    #[must_use]
    pub fn coerce(requested: i64) -> Self {
        let bounded = usize::try_from(requested).unwrap_or(if requested < 0 { 0 } else { usize::MAX });
        Self::new(bounded)
    }

    #[must_use]
    pub fn new(requested: usize) -> Self {
        let bounded = requested.clamp(1, Semaphore::MAX_PERMITS);
        Self(NonZeroUsize::new(bounded).unwrap_or(NonZeroUsize::MIN))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLELISM)
    }
}
