//! # matbench
//!
//! Measure and validate interchangeable matrix-multiply kernels against a
//! trusted reference implementation.
//!
//! Each run allocates guarded output buffers (for out-of-bounds detection),
//! computes a reference oracle once, times repeated invocations of the
//! kernel under test, verifies the final output against the oracle, and
//! distills the raw timings into a stable mean through iterative sigma
//! clipping. The result is a [`RunReport`] carrying the final metric,
//! per-round statistics, the raw samples, and independent correctness and
//! guard verdicts.
//!
//! ## Quick Start
//!
//! ```ignore
//! use matbench::Harness;
//!
//! let report = Harness::new()
//!     .dims(121, 180, 115)
//!     .runs(1_000)
//!     .run_named("blocked")?;
//!
//! assert!(report.verdict.passed());
//! println!("{} ns", report.final_mean_ns);
//! ```
//!
//! ## Trust model
//!
//! Kernels are opaque: the harness observes only the call boundary. A wrong
//! kernel is caught by the element-wise verifier; a kernel that writes past
//! its declared output bounds is caught by the sentinel region stamped
//! after the payload. The two checks are independent and all four
//! combinations of their outcomes are reportable.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod buffer;
mod config;
mod matrix;
mod oracle;
mod report;
mod runner;

// Functional modules
pub mod data;
pub mod kernel;
pub mod measurement;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use buffer::{GuardedBuffer, GUARD_BYTES};
pub use config::{BenchConfig, ConfigError};
pub use kernel::{Kernel, KernelId, Tuning};
pub use matrix::{Dims, Matrix};
pub use oracle::{
    reference_matmul, verify, Mismatch, ReferenceKernel, Verification, DEFAULT_TOLERANCE,
};
pub use report::{Metadata, RunReport, Verdict};
pub use runner::{Harness, HarnessError};
pub use statistics::{sigma_clip, ClipSummary, RoundStats, SampleSet, StatsError};

/// Run a named kernel under the default configuration.
///
/// Convenience wrapper over [`Harness`]; use the builder for anything
/// beyond defaults.
pub fn run(kernel_name: &str) -> Result<RunReport, HarnessError> {
    Harness::new().run_named(kernel_name)
}
