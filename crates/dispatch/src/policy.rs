use crate::FileOutcome;
use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How per-file outcomes are surfaced while a run is in progress.
///
/// Neither policy cancels in-flight work or stops dispatching: every path is
/// always processed, and the run as a whole fails if any path failed.
/// Deserializes through [`FromStr`], so every spelling the command line
/// accepts is accepted from configuration too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Policy {
    /// Emit every outcome, success or failure, as soon as it is known.
    #[default]
    CollectAll,
    /// Emit successes as soon as they are known; hold failures back so the
    /// first one can be reported as the run's terminal error.
    FailFast,
}

impl Policy {
    /// Whether `outcome` should be handed to the caller the moment it arrives.
    #[must_use]
    pub fn emits(&self, outcome: &FileOutcome) -> bool {
        match self {
            Self::CollectAll => true,
            Self::FailFast => outcome.is_ok(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CollectAll => "collect-all",
            Self::FailFast => "fail-fast",
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Policy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "collect-all" | "collect" | "all" => Ok(Self::CollectAll),
            "fail-fast" | "fast" => Ok(Self::FailFast),
            _ => exn::bail!(ErrorKind::UnknownPolicy(s.to_string())),
        }
    }
}

impl TryFrom<String> for Policy {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|e: Error| (*e).to_string())
    }
}
