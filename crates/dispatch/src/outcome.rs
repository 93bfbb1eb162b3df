use crate::error::{ErrorKind, Result};
use citt_digest::DualDigest;
use std::path::PathBuf;

/// The terminal result of processing one input path.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<DualDigest>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.result.is_err()
    }

    pub fn digest(&self) -> Option<&DualDigest> {
        self.result.as_ref().ok()
    }
}

/// Every outcome of a run, in the order the files finished.
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<FileOutcome>,
}

impl Report {
    pub fn new(outcomes: Vec<FileOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<FileOutcome> {
        self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_ok)
    }

    /// Escalate the run to a single error if any file failed.
    ///
    /// The first failure observed (in completion order) becomes the child of
    /// an [`ErrorKind::Aggregate`]; the remaining outcomes are dropped.
    pub fn into_result(self) -> Result<Self> {
        let Some(index) = self.outcomes.iter().position(FileOutcome::is_err) else {
            return Ok(self);
        };
        let failed = self.failed();
        let total = self.total();
        let mut outcomes = self.outcomes;
        let Err(first) = outcomes.swap_remove(index).result else {
            unreachable!("position() matched a failed outcome");
        };
        let kind = ErrorKind::Aggregate {
            failed,
            total,
            first: (*first).to_string(),
        };
        Err(first.raise(kind))
    }
}
