//! The kernel contract and the set of interchangeable implementations.
//!
//! Every kernel computes `R = A × B` through the same capability,
//! [`Kernel::invoke`], and is selected by symbolic name through
//! [`KernelId`]. The harness treats kernels as opaque: it observes only the
//! call boundary, never a kernel's internal concurrency.

mod blocked;
mod naive;
mod parallel;
mod vectorized;

pub use blocked::BlockedKernel;
pub use naive::NaiveKernel;
pub use parallel::ParallelKernel;
pub use vectorized::VectorizedKernel;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::matrix::Dims;
use crate::oracle::ReferenceKernel;

/// Advisory tuning parameters passed through to kernels.
///
/// A kernel that ignores any of these is still conformant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    /// Tile edge for blocked kernels.
    pub block_size: usize,
    /// Thread-count hint; 0 means "kernel's choice".
    pub threads: usize,
    /// CPU id hint. Not enforced by the harness.
    pub cpu: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_size: 16,
            threads: 1,
            cpu: 0,
        }
    }
}

/// One interchangeable implementation of the multiply under test.
///
/// # Contract
///
/// Given immutable row-major `a` (M×N) and `b` (N×P) and a caller-allocated
/// output `r` sized for M×P elements plus a guard region:
///
/// - fully overwrite every payload element of `r`, including
///   zero-initialization; never accumulate into prior content
/// - never write the guard region or read `r`'s prior content
/// - never mutate `a` or `b` (enforced by the shared borrows)
/// - be deterministic: identical inputs and tuning yield bit-identical output
///
/// Failure is not signaled through this interface; an incorrect kernel is
/// detected by the verifier and the guard check.
pub trait Kernel: Send + Sync {
    /// Symbolic name for reports.
    fn name(&self) -> &'static str;

    /// Compute `R = A × B`.
    fn invoke(&self, a: &[f32], b: &[f32], r: &mut [f32], dims: Dims, tuning: &Tuning);
}

/// The fixed selection set of kernel names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelId {
    /// Scalar i-j-k triple loop.
    Naive,
    /// Cache-blocked b×b×b tiling.
    Blocked,
    /// SIMD i-k-j with 8-lane f32 vectors.
    Vectorized,
    /// Row-parallel across a thread pool.
    Parallel,
    /// The oracle algorithm itself.
    Reference,
}

impl KernelId {
    /// Every selectable kernel.
    pub const ALL: [KernelId; 5] = [
        KernelId::Naive,
        KernelId::Blocked,
        KernelId::Vectorized,
        KernelId::Parallel,
        KernelId::Reference,
    ];

    /// Resolve a symbolic name.
    ///
    /// Unrecognized names are configuration errors. Short aliases (`opt`,
    /// `vec`, `para`, `ref`) are accepted alongside the full names.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "naive" => Ok(KernelId::Naive),
            "blocked" | "opt" => Ok(KernelId::Blocked),
            "vectorized" | "vec" => Ok(KernelId::Vectorized),
            "parallel" | "para" => Ok(KernelId::Parallel),
            "reference" | "ref" => Ok(KernelId::Reference),
            other => Err(ConfigError::UnknownKernel(other.to_string())),
        }
    }

    /// Canonical name of this kernel.
    pub fn name(self) -> &'static str {
        match self {
            KernelId::Naive => "naive",
            KernelId::Blocked => "blocked",
            KernelId::Vectorized => "vectorized",
            KernelId::Parallel => "parallel",
            KernelId::Reference => "reference",
        }
    }

    /// Instantiate the implementation bound to this name.
    pub fn instantiate(self) -> Box<dyn Kernel> {
        match self {
            KernelId::Naive => Box::new(NaiveKernel),
            KernelId::Blocked => Box::new(BlockedKernel),
            KernelId::Vectorized => Box::new(VectorizedKernel),
            KernelId::Parallel => Box::new(ParallelKernel::new()),
            KernelId::Reference => Box::new(ReferenceKernel),
        }
    }
}

impl std::fmt::Display for KernelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
