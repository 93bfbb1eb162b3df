//! Command-line interface.

use citt_config::Overrides;
use citt_dispatch::Policy;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Compute the CRC-16/CCITT and MD5 of each FILE in a single read.
#[derive(Debug, Parser)]
#[command(name = "citt", version, about)]
pub struct Cli {
    /// Files to digest.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Maximum number of files processed at once; values below 1 mean 1
    /// [env: CITT_PARALLEL] [default: 10]
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub parallel: Option<i64>,

    /// How failures are reported: `collect-all` prints every error as it
    /// happens, `fail-fast` reports only the first one at the end
    /// [env: CITT_POLICY] [default: collect-all]
    #[arg(long, value_name = "POLICY", value_parser = parse_policy)]
    pub policy: Option<Policy>,

    /// More log output on stderr (repeatable). Ignored when CITT_LOG is set.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            parallel: self.parallel,
            policy: self.policy,
        }
    }
}

fn parse_policy(value: &str) -> Result<Policy, String> {
    value.parse::<Policy>().map_err(|e| (*e).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["citt"]).is_err());
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let cli = Cli::try_parse_from(["citt", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        let overrides = cli.overrides();
        assert_eq!(overrides.parallel, None);
        assert_eq!(overrides.policy, None);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[rstest]
    #[case(&["citt", "-p", "4", "f"], 4)]
    #[case(&["citt", "--parallel", "0", "f"], 0)]
    #[case(&["citt", "--parallel", "-3", "f"], -3)]
    #[case(&["citt", "--parallel=-3", "f"], -3)]
    fn test_parallel(#[case] args: &[&str], #[case] expected: i64) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.overrides().parallel, Some(expected));
    }

    #[rstest]
    #[case("collect-all", Policy::CollectAll)]
    #[case("fail-fast", Policy::FailFast)]
    fn test_policy(#[case] value: &str, #[case] expected: Policy) {
        let cli = Cli::try_parse_from(["citt", "--policy", value, "f"]).unwrap();
        assert_eq!(cli.overrides().policy, Some(expected));
    }

    #[test]
    fn test_policy_invalid() {
        assert!(Cli::try_parse_from(["citt", "--policy", "sometimes", "f"]).is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert_eq!(Cli::try_parse_from(["citt", "-vv", "f"]).unwrap().verbose, 2);
        assert!(Cli::try_parse_from(["citt", "-v", "-q", "f"]).is_err());
    }
}
