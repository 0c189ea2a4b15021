//! Benchmark run reports: verdicts, statistics, and metadata.

use serde::{Deserialize, Serialize};

use crate::config::BenchConfig;
use crate::oracle::Verification;
use crate::statistics::RoundStats;

/// Combined correctness/guard outcome of a run.
///
/// Correctness and guard integrity are independent observations; all four
/// combinations are distinct, valid, reportable outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Output matched the oracle and the guard is intact.
    Success,
    /// Output diverged from the oracle; guard intact.
    Mismatch,
    /// Output matched but the kernel wrote past its bounds.
    Overrun,
    /// Both wrong output and an out-of-bounds write.
    MismatchAndOverrun,
}

impl Verdict {
    /// Combine the two independent checks.
    pub fn from_checks(matched: bool, guard_intact: bool) -> Self {
        match (matched, guard_intact) {
            (true, true) => Verdict::Success,
            (false, true) => Verdict::Mismatch,
            (true, false) => Verdict::Overrun,
            (false, false) => Verdict::MismatchAndOverrun,
        }
    }

    /// True only for [`Verdict::Success`].
    pub fn passed(self) -> bool {
        matches!(self, Verdict::Success)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Verdict::Success => "Success",
            Verdict::Mismatch => "Fail (mismatch)",
            Verdict::Overrun => "Fail (overrun)",
            Verdict::MismatchAndOverrun => "Fail (mismatch+overrun)",
        };
        f.write_str(text)
    }
}

/// Complete result of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Name of the kernel under test.
    pub kernel: String,

    /// Snapshot of the configuration the run used.
    pub config: BenchConfig,

    /// Raw ordered per-run durations in nanoseconds (length == run count).
    pub samples: Vec<u64>,

    /// Per-round sigma-clipping statistics, in round order.
    pub rounds: Vec<RoundStats>,

    /// Mean duration over the terminal round's included samples.
    pub final_mean_ns: u64,

    /// Element-by-element comparison against the oracle.
    pub verification: Verification,

    /// True iff the output buffer's sentinel region survived untouched.
    pub guard_intact: bool,

    /// Combined outcome.
    pub verdict: Verdict,

    /// Run metadata for debugging.
    pub metadata: Metadata,
}

/// Metadata recorded alongside the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Wall-clock duration of the whole run in seconds.
    pub runtime_secs: f64,
    /// Samples still included at statistics convergence.
    pub included_samples: usize,
    /// Samples excluded across all rounds.
    pub excluded_samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_covers_all_combinations() {
        assert_eq!(Verdict::from_checks(true, true), Verdict::Success);
        assert_eq!(Verdict::from_checks(false, true), Verdict::Mismatch);
        assert_eq!(Verdict::from_checks(true, false), Verdict::Overrun);
        assert_eq!(
            Verdict::from_checks(false, false),
            Verdict::MismatchAndOverrun
        );
    }

    #[test]
    fn test_only_success_passes() {
        assert!(Verdict::Success.passed());
        assert!(!Verdict::Mismatch.passed());
        assert!(!Verdict::Overrun.passed());
        assert!(!Verdict::MismatchAndOverrun.passed());
    }

    #[test]
    fn test_verdict_display_strings() {
        assert_eq!(Verdict::Success.to_string(), "Success");
        assert_eq!(
            Verdict::MismatchAndOverrun.to_string(),
            "Fail (mismatch+overrun)"
        );
    }
}
