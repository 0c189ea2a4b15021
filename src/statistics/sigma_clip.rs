//! Iterative sigma clipping over a fixed sample set.

use serde::{Deserialize, Serialize};

/// A fixed-length sequence of per-run durations with an inclusion mask.
///
/// The mask starts all-true and only ever loses members: once a sample is
/// excluded it is never reconsidered, so the included population is
/// monotonically non-increasing across rounds. Length is locked at
/// creation.
#[derive(Debug, Clone)]
pub struct SampleSet {
    samples: Vec<u64>,
    mask: Vec<bool>,
}

impl SampleSet {
    /// Wrap collected durations with an all-included mask.
    pub fn new(samples: Vec<u64>) -> Self {
        let mask = vec![true; samples.len()];
        Self { samples, mask }
    }

    /// Number of samples (fixed for the set's lifetime).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True iff the set holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The raw ordered durations in nanoseconds.
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// The inclusion mask, parallel to [`samples`].
    ///
    /// [`samples`]: SampleSet::samples
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Number of currently included samples.
    pub fn included_count(&self) -> usize {
        self.mask.iter().filter(|&&included| included).count()
    }
}

/// Statistics recorded for one clipping round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    /// 1-based round index.
    pub round: usize,
    /// Minimum included duration this round.
    pub min_ns: u64,
    /// Maximum included duration this round.
    pub max_ns: u64,
    /// Mean of included durations (integer nanoseconds).
    pub mean_ns: u64,
    /// Population standard deviation about that mean.
    pub stdev_ns: f64,
    /// Samples newly excluded by this round.
    pub excluded: usize,
}

/// Result of running the clipping procedure to convergence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSummary {
    /// Ordered per-round statistics; the last round excluded zero samples.
    pub rounds: Vec<RoundStats>,
    /// Mean of the terminal round's included set, the reported metric.
    pub final_mean_ns: u64,
    /// Samples still included at convergence.
    pub included: usize,
}

/// Statistics-engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// A round found (or would leave) zero included samples.
    ///
    /// Guarded explicitly so a division by zero can never produce NaN
    /// output; reaching this is a configuration error, not a data property.
    Degenerate {
        /// Round at which the population collapsed.
        round: usize,
    },
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::Degenerate { round } => {
                write!(f, "sigma clipping left zero samples at round {}", round)
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Clip outliers until a round excludes zero new samples.
///
/// Each round, over the currently included samples:
///
/// 1. compute min, max, sum, count; mean = sum / count
/// 2. compute the population standard deviation about that mean
/// 3. exclude every included sample with `|sample − mean| > threshold × stdev`
/// 4. record the round
///
/// Termination is guaranteed: the included count is non-increasing and
/// bounded below. The mask in `set` reflects the terminal state on success.
pub fn sigma_clip(set: &mut SampleSet, threshold: u32) -> Result<ClipSummary, StatsError> {
    let mut rounds = Vec::new();
    let mut round = 0;

    loop {
        round += 1;

        let mut min_ns = u64::MAX;
        let mut max_ns = 0u64;
        let mut sum = 0u64;
        let mut count = 0u64;
        for (&t, &included) in set.samples.iter().zip(set.mask.iter()) {
            if included {
                min_ns = min_ns.min(t);
                max_ns = max_ns.max(t);
                sum += t;
                count += 1;
            }
        }
        if count == 0 {
            return Err(StatsError::Degenerate { round });
        }

        let mean_ns = sum / count;
        let mean = mean_ns as f64;

        let mut var = 0.0;
        for (&t, &included) in set.samples.iter().zip(set.mask.iter()) {
            if included {
                let d = t as f64 - mean;
                var += d * d;
            }
        }
        let stdev_ns = (var / count as f64).sqrt();

        let cutoff = threshold as f64 * stdev_ns;
        let over_cutoff = |t: u64| (t as f64 - mean).abs() > cutoff;

        let excluded = set
            .samples
            .iter()
            .zip(set.mask.iter())
            .filter(|&(&t, &included)| included && over_cutoff(t))
            .count();
        if excluded as u64 == count {
            return Err(StatsError::Degenerate { round });
        }

        for (&t, included) in set.samples.iter().zip(set.mask.iter_mut()) {
            if *included && over_cutoff(t) {
                *included = false;
            }
        }

        rounds.push(RoundStats {
            round,
            min_ns,
            max_ns,
            mean_ns,
            stdev_ns,
            excluded,
        });

        if excluded == 0 {
            return Ok(ClipSummary {
                final_mean_ns: mean_ns,
                included: count as usize,
                rounds,
            });
        }
    }
}
