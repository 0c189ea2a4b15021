//! Row-parallel kernel.

use std::sync::OnceLock;

use rayon::prelude::*;

use crate::kernel::{Kernel, Tuning};
use crate::matrix::Dims;

/// Multiply with rows of R partitioned across a rayon pool.
///
/// Each output row is computed independently by one worker with the same
/// scalar accumulation order as [`NaiveKernel`], so the result is
/// bit-identical to the sequential kernels and deterministic regardless of
/// scheduling.
///
/// The pool is built lazily on first invocation, sized by the thread-count
/// hint (0 lets rayon pick). The CPU id hint is accepted but not acted on;
/// pinning is the caller's concern.
///
/// [`NaiveKernel`]: crate::kernel::NaiveKernel
#[derive(Debug, Default)]
pub struct ParallelKernel {
    pool: OnceLock<rayon::ThreadPool>,
}

impl ParallelKernel {
    /// Create a kernel with no pool yet; it is built on first invocation.
    pub fn new() -> Self {
        Self {
            pool: OnceLock::new(),
        }
    }

    fn pool(&self, threads: usize) -> &rayon::ThreadPool {
        self.pool.get_or_init(|| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .expect("failed to build kernel thread pool")
        })
    }
}

impl Kernel for ParallelKernel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn invoke(&self, a: &[f32], b: &[f32], r: &mut [f32], dims: Dims, tuning: &Tuning) {
        let Dims { m, n, p } = dims;
        let payload = &mut r[..m * p];

        self.pool(tuning.threads).install(|| {
            payload.par_chunks_mut(p).enumerate().for_each(|(i, row)| {
                for (j, slot) in row.iter_mut().enumerate() {
                    let mut sum = 0.0;
                    for k in 0..n {
                        sum += a[i * n + k] * b[k * p + j];
                    }
                    *slot = sum;
                }
            });
        });
    }
}
