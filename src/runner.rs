//! Run orchestration: configuration through reporting.
//!
//! A run moves through a strictly sequential lifecycle with no re-entry:
//! validate configuration, allocate guarded buffers, populate inputs,
//! compute the oracle once, execute the timed loop, verify correctness and
//! guard integrity, clip outliers, assemble the report. Configuration
//! errors abort before anything is allocated; mismatches and overruns are
//! observations, not errors, and never stop a run.

use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::buffer::GuardedBuffer;
use crate::config::{BenchConfig, ConfigError};
use crate::data::{self, DataError};
use crate::kernel::{Kernel, KernelId, Tuning};
use crate::matrix::Matrix;
use crate::measurement::collect_samples;
use crate::oracle::{reference_matmul, verify};
use crate::report::{Metadata, RunReport, Verdict};
use crate::statistics::{sigma_clip, SampleSet, StatsError};

/// Where input matrices come from.
#[derive(Debug, Clone)]
enum InputSource {
    /// Fill from the configured seed.
    Generated,
    /// Load raw f32 files of exactly the expected byte size.
    Loaded { a: PathBuf, b: PathBuf },
}

/// Errors that abort a run.
#[derive(Debug)]
pub enum HarnessError {
    /// The configuration was rejected before any allocation.
    Config(ConfigError),
    /// Input data could not be obtained.
    Data(DataError),
    /// The statistics engine hit a degenerate sample population.
    Stats(StatsError),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Config(err) => write!(f, "configuration error: {}", err),
            HarnessError::Data(err) => write!(f, "input data error: {}", err),
            HarnessError::Stats(err) => write!(f, "statistics error: {}", err),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Config(err) => Some(err),
            HarnessError::Data(err) => Some(err),
            HarnessError::Stats(err) => Some(err),
        }
    }
}

impl From<ConfigError> for HarnessError {
    fn from(err: ConfigError) -> Self {
        HarnessError::Config(err)
    }
}

impl From<DataError> for HarnessError {
    fn from(err: DataError) -> Self {
        HarnessError::Data(err)
    }
}

impl From<StatsError> for HarnessError {
    fn from(err: StatsError) -> Self {
        HarnessError::Stats(err)
    }
}

/// Builder and executor for benchmark runs.
///
/// # Example
///
/// ```ignore
/// use matbench::Harness;
///
/// let report = Harness::new()
///     .dims(550, 620, 480)
///     .block_size(32)
///     .runs(1_000)
///     .run_named("blocked")?;
///
/// println!("final runtime: {} ns ({})", report.final_mean_ns, report.verdict);
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    config: BenchConfig,
    input: InputSource,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Create a harness with default configuration.
    pub fn new() -> Self {
        Self {
            config: BenchConfig::default(),
            input: InputSource::Generated,
        }
    }

    /// Create a harness from an existing configuration.
    pub fn with_config(config: BenchConfig) -> Self {
        Self {
            config,
            input: InputSource::Generated,
        }
    }

    /// Set problem dimensions M, N, P.
    pub fn dims(mut self, m: usize, n: usize, p: usize) -> Self {
        self.config.dims = crate::matrix::Dims::new(m, n, p);
        self
    }

    /// Set the advisory block size.
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.config.block_size = block_size;
        self
    }

    /// Set the advisory thread-count hint.
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set the advisory CPU id hint.
    pub fn cpu(mut self, cpu: usize) -> Self {
        self.config.cpu = cpu;
        self
    }

    /// Set the number of timed kernel invocations.
    pub fn runs(mut self, runs: usize) -> Self {
        self.config.runs = runs;
        self
    }

    /// Set the sigma-clipping threshold in standard deviations.
    pub fn stdev_threshold(mut self, threshold: u32) -> Self {
        self.config.stdev_threshold = threshold;
        self
    }

    /// Set the absolute verification tolerance.
    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the input-filler seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Load A and B from raw f32 files instead of generating them.
    ///
    /// Each file must hold exactly the byte size its dimensions require.
    pub fn load_inputs(mut self, a: impl Into<PathBuf>, b: impl Into<PathBuf>) -> Self {
        self.input = InputSource::Loaded {
            a: a.into(),
            b: b.into(),
        };
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Resolve a kernel by name and run it.
    pub fn run_named(self, name: &str) -> Result<RunReport, HarnessError> {
        let kernel = KernelId::parse(name)?.instantiate();
        self.run(kernel.as_ref())
    }

    /// Execute the full run lifecycle against `kernel`.
    pub fn run(self, kernel: &dyn Kernel) -> Result<RunReport, HarnessError> {
        let start_time = Instant::now();
        self.config.validate()?;

        let dims = self.config.dims;
        let (a, b) = self.inputs()?;

        let mut reference = GuardedBuffer::allocate(dims.r_len());
        let mut observed = GuardedBuffer::allocate(dims.r_len());
        reference.write_guard();
        observed.write_guard();

        // The oracle is computed exactly once, into its own buffer, and
        // never touched again by the kernel under test.
        reference_matmul(a.as_slice(), b.as_slice(), reference.payload_mut(), dims);

        let tuning = Tuning {
            block_size: self.config.block_size,
            threads: self.config.threads,
            cpu: self.config.cpu,
        };
        let samples = collect_samples(
            kernel,
            a.as_slice(),
            b.as_slice(),
            &mut observed,
            dims,
            &tuning,
            self.config.runs,
        );

        let verification = verify(
            reference.payload(),
            observed.payload(),
            dims.p,
            self.config.tolerance,
        );
        let guard_intact = observed.check_guard();
        let verdict = Verdict::from_checks(verification.matched, guard_intact);

        let mut set = SampleSet::new(samples);
        let clip = sigma_clip(&mut set, self.config.stdev_threshold)?;

        let included = clip.included;
        Ok(RunReport {
            kernel: kernel.name().to_string(),
            samples: set.samples().to_vec(),
            rounds: clip.rounds,
            final_mean_ns: clip.final_mean_ns,
            verification,
            guard_intact,
            verdict,
            metadata: Metadata {
                runtime_secs: start_time.elapsed().as_secs_f64(),
                included_samples: included,
                excluded_samples: self.config.runs - included,
            },
            config: self.config,
        })
    }

    fn inputs(&self) -> Result<(Matrix, Matrix), HarnessError> {
        let dims = self.config.dims;
        match &self.input {
            InputSource::Generated => {
                let mut rng = StdRng::seed_from_u64(self.config.seed);
                let a = Matrix::random(dims.m, dims.n, &mut rng);
                let b = Matrix::random(dims.n, dims.p, &mut rng);
                Ok((a, b))
            }
            InputSource::Loaded { a, b } => {
                let a = data::load_matrix(a, dims.m, dims.n)?;
                let b = data::load_matrix(b, dims.n, dims.p)?;
                Ok((a, b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kernel_aborts_before_running() {
        let err = Harness::new().runs(5).run_named("warp").unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Config(ConfigError::UnknownKernel(_))
        ));
    }

    #[test]
    fn test_invalid_dims_abort_before_running() {
        let err = Harness::new()
            .dims(0, 4, 4)
            .runs(5)
            .run_named("naive")
            .unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_generated_inputs_deterministic_per_seed() {
        let harness = Harness::new().dims(3, 3, 3).seed(99);
        let (a1, b1) = harness.inputs().unwrap();
        let (a2, b2) = harness.inputs().unwrap();
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }
}
