//! Run configuration.
//!
//! Values are layered, later sources winning:
//!
//! 1. Built-in defaults (`parallel = 10`, `policy = collect-all`)
//! 2. `CITT_PARALLEL` / `CITT_POLICY` environment variables
//! 3. Explicit [`Overrides`], normally from the command line
//!
//! There is deliberately no configuration file.

pub mod error;

use crate::error::{ErrorKind, Result};
use citt_dispatch::{DEFAULT_PARALLELISM, Parallelism, Policy};
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

/// Prefix for environment variables read into [`Config`].
pub const ENV_PREFIX: &str = "CITT_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Requested number of files processed at once. Kept signed so that zero
    /// and negative requests survive parsing and get coerced to 1 later.
    pub parallel: i64,
    pub policy: Policy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel: i64::try_from(DEFAULT_PARALLELISM).unwrap_or(i64::MAX),
            policy: Policy::default(),
        }
    }
}

/// Values that take precedence over everything else. `None` leaves the
/// lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
}

impl Config {
    /// The layered sources, before extraction.
    pub fn figment(overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).only(&["parallel", "policy"]))
            .merge(Serialized::defaults(overrides))
    }

    pub fn load(overrides: &Overrides) -> Result<Self> {
        let config: Self = Self::figment(overrides).extract().map_err(|e| ErrorKind::Invalid(e.to_string()))?;
        tracing::debug!(parallel = config.parallel, policy = %config.policy, "Configuration loaded");
        Ok(config)
    }

    /// The usable concurrency bound; never less than 1.
    pub fn parallelism(&self) -> Parallelism {
        Parallelism::coerce(self.parallel)
    }
}
