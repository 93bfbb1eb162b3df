use crate::error::ErrorKind;
use crate::source::{FileSource, LocalSource, SourceHandle};
use crate::{FileOutcome, Parallelism, Policy, Report};
use async_stream::stream;
use citt_digest::error::Result as DigestResult;
use citt_digest::{DualDigest, compute_async};
use futures::{Stream, StreamExt};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{Id as TaskId, JoinError, JoinSet};
use tracing::instrument;

enum Step {
    Acquired(OwnedSemaphorePermit),
    Finished(Result<(TaskId, FileOutcome), JoinError>),
}

/// Digests many files concurrently, never holding more than
/// [`Parallelism`] of them open at once.
///
/// # Examples
///
/// ```no_run
/// use citt_dispatch::{Dispatcher, Parallelism, Policy};
/// use std::path::PathBuf;
///
/// # async fn example() {
/// let dispatcher = Dispatcher::local()
///     .with_parallelism(Parallelism::coerce(4))
///     .with_policy(Policy::CollectAll);
/// let report = dispatcher
///     .run(vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")], |outcome| {
///         println!("{}", outcome.path.display());
///     })
///     .await;
/// assert_eq!(report.total(), 2);
/// # }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    source: SourceHandle,
    parallelism: Parallelism,
    policy: Policy,
}

impl Dispatcher {
    pub fn new(source: SourceHandle) -> Self {
        Self {
            source,
            parallelism: Parallelism::default(),
            policy: Policy::default(),
        }
    }

    /// A dispatcher reading from the local filesystem.
    pub fn local() -> Self {
        Self::new(Arc::new(LocalSource))
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Stream one [`FileOutcome`] per path, in completion order.
    ///
    /// Each path waits for a free slot before its task is spawned, and the
    /// slot travels with the task so it is released however the task ends.
    /// Finished tasks are yielded before new slots are handed out, so results
    /// reach the caller while later paths are still waiting. A failure never
    /// cancels sibling tasks.
    ///
    /// The reporting [`Policy`] is not applied here; every outcome is yielded.
    pub fn stream(&self, paths: Vec<PathBuf>) -> impl Stream<Item = FileOutcome> + Send + use<> {
        let source = Arc::clone(&self.source);
        let slots = Arc::new(Semaphore::new(self.parallelism.get()));
        let mut pending = VecDeque::from(paths);
        // `rustfmt` does not format macros that use braces. Wrap in parentheses!
        stream!({
            tracing::debug!(total = pending.len(), slots = slots.available_permits(), source = source.name(), "Dispatching files");
            let mut tasks = JoinSet::new();
            let mut in_flight: HashMap<TaskId, PathBuf> = HashMap::new();
            loop {
                let step = tokio::select! {
                    biased;
                    Some(joined) = tasks.join_next_with_id() => Step::Finished(joined),
                    // unwrap is safe: the pool is owned by this stream and never closed
                    permit = Arc::clone(&slots).acquire_owned(), if !pending.is_empty() => Step::Acquired(permit.unwrap()),
                    else => break,
                };
                match step {
                    Step::Acquired(permit) => {
                        let Some(path) = pending.pop_front() else {
                            continue;
                        };
                        let handle = tasks.spawn(digest_one(Arc::clone(&source), path.clone(), permit));
                        in_flight.insert(handle.id(), path);
                    },
                    Step::Finished(Ok((id, outcome))) => {
                        in_flight.remove(&id);
                        yield outcome;
                    },
                    Step::Finished(Err(e)) => {
                        let path = in_flight.remove(&e.id()).unwrap_or_default();
                        tracing::error!(path = %path.display(), error = %e, "Digest task did not complete");
                        let result = Err(ErrorKind::Panicked(path.clone()).into());
                        yield FileOutcome { path, result };
                    },
                }
            }
            tracing::debug!("All dispatched files finished");
        })
    }

    /// Process every path and collect the outcomes into a [`Report`].
    ///
    /// `emit` is called for each outcome the [`Policy`] says should be shown
    /// immediately, as soon as that outcome is known. Call
    /// [`Report::into_result`] to escalate failures to a single error.
    pub async fn run(&self, paths: Vec<PathBuf>, mut emit: impl FnMut(&FileOutcome)) -> Report {
        let mut outcomes = Vec::with_capacity(paths.len());
        let mut stream = pin!(self.stream(paths));
        while let Some(outcome) = stream.next().await {
            if self.policy.emits(&outcome) {
                emit(&outcome);
            }
            outcomes.push(outcome);
        }
        let report = Report::new(outcomes);
        tracing::info!(
            total = report.total(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            policy = %self.policy,
            "Dispatch complete"
        );
        report
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
async fn digest_one(source: SourceHandle, path: PathBuf, permit: OwnedSemaphorePermit) -> FileOutcome {
    let result = digest_path(source.as_ref(), &path).await;
    drop(permit);
    let result = match result {
        Ok(digest) => {
            tracing::debug!(crc = digest.crc, md5 = %digest.md5_hex(), "Digested");
            Ok(digest)
        },
        Err(e) => {
            let e = ErrorKind::digest(&path, e);
            tracing::debug!(error = ?e, "Digest failed");
            Err(e)
        },
    };
    FileOutcome { path, result }
}

async fn digest_path(source: &dyn FileSource, path: &Path) -> DigestResult<DualDigest> {
    let reader = source.open(path).await?;
    compute_async(reader).await
}
