//! Benchmark run configuration and validation.

use serde::{Deserialize, Serialize};

use crate::matrix::Dims;
use crate::oracle::DEFAULT_TOLERANCE;

/// Configuration for a benchmark run.
///
/// Immutable once a run starts; the runner snapshots it into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Problem dimensions (default: 16 × 12 × 8).
    pub dims: Dims,

    /// Tile edge for blocked kernels (default: 16). Advisory.
    pub block_size: usize,

    /// Thread-count hint for parallel kernels (default: 1). Advisory;
    /// 0 lets the kernel pick its own degree of parallelism.
    pub threads: usize,

    /// CPU id hint passed through to kernels (default: 0). Advisory only;
    /// the harness does not set affinity itself.
    pub cpu: usize,

    /// Number of timed kernel invocations (default: 10,000).
    pub runs: usize,

    /// Sigma-clipping threshold in standard deviations (default: 3).
    pub stdev_threshold: u32,

    /// Absolute per-element tolerance for correctness verification
    /// (default: 1e-6).
    pub tolerance: f32,

    /// Seed for the input-matrix filler (default: `0xDEAD_BEEF`).
    ///
    /// Input generation is deterministic so repeated runs of the same
    /// configuration multiply identical matrices.
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            dims: Dims::new(16, 12, 8),
            block_size: 16,
            threads: 1,
            cpu: 0,
            runs: 10_000,
            stdev_threshold: 3,
            tolerance: DEFAULT_TOLERANCE,
            seed: 0xDEAD_BEEF,
        }
    }
}

impl BenchConfig {
    /// Validate the configuration.
    ///
    /// All configuration errors are fatal and detected here, before any
    /// buffer is allocated or any timed run is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dims.m == 0 {
            return Err(ConfigError::ZeroDimension { which: "M" });
        }
        if self.dims.n == 0 {
            return Err(ConfigError::ZeroDimension { which: "N" });
        }
        if self.dims.p == 0 {
            return Err(ConfigError::ZeroDimension { which: "P" });
        }
        if self.runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if self.stdev_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(ConfigError::NonPositiveTolerance);
        }
        Ok(())
    }
}

/// Rejected configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Kernel name not in the selection set.
    UnknownKernel(String),
    /// One of M, N, P is zero.
    ZeroDimension {
        /// Which dimension was zero.
        which: &'static str,
    },
    /// Run count is zero.
    ZeroRuns,
    /// Sigma-clipping threshold is zero.
    ZeroThreshold,
    /// Block size is zero.
    ZeroBlockSize,
    /// Verification tolerance is zero, negative, or NaN.
    NonPositiveTolerance,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownKernel(name) => write!(f, "unknown kernel \"{}\"", name),
            ConfigError::ZeroDimension { which } => {
                write!(f, "dimension {} must be positive", which)
            }
            ConfigError::ZeroRuns => write!(f, "run count must be positive"),
            ConfigError::ZeroThreshold => write!(f, "stdev threshold must be positive"),
            ConfigError::ZeroBlockSize => write!(f, "block size must be positive"),
            ConfigError::NonPositiveTolerance => write!(f, "tolerance must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
