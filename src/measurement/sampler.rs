//! The timing loop: repeated kernel invocation over a reused output buffer.
//!
//! One sample is one call: monotonic start timestamp, invoke, monotonic end
//! timestamp, elapsed nanoseconds stored at that iteration's index. The
//! output buffer is never reallocated between iterations: the kernel
//! contract's full-overwrite guarantee makes reuse safe, and it keeps the
//! allocator out of the measured region. Whatever the final iteration left
//! in the buffer is what correctness and guard verification inspect.

use std::hint::black_box;
use std::time::Instant;

use crate::buffer::GuardedBuffer;
use crate::kernel::{Kernel, Tuning};
use crate::matrix::Dims;

/// Invoke `kernel` `runs` times, returning one elapsed-ns sample per call.
///
/// The harness blocks on each call; a kernel's internal concurrency is
/// opaque here and only the call boundary is timed. `black_box` prevents
/// the compiler from hoisting or eliding the measured call.
pub fn collect_samples(
    kernel: &dyn Kernel,
    a: &[f32],
    b: &[f32],
    out: &mut GuardedBuffer,
    dims: Dims,
    tuning: &Tuning,
    runs: usize,
) -> Vec<u64> {
    let r = out.as_full_slice_mut();
    let mut samples = Vec::with_capacity(runs);

    for _ in 0..runs {
        let start = Instant::now();
        kernel.invoke(black_box(a), black_box(b), r, dims, tuning);
        let elapsed = start.elapsed();
        black_box(&*r);
        samples.push(elapsed.as_nanos() as u64);
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::NaiveKernel;

    #[test]
    fn test_sample_count_matches_runs() {
        let dims = Dims::new(4, 4, 4);
        let a = vec![1.0; dims.a_len()];
        let b = vec![1.0; dims.b_len()];
        let mut out = GuardedBuffer::allocate(dims.r_len());
        out.write_guard();

        let samples = collect_samples(
            &NaiveKernel,
            &a,
            &b,
            &mut out,
            dims,
            &Tuning::default(),
            25,
        );
        assert_eq!(samples.len(), 25);
    }

    #[test]
    fn test_final_buffer_state_is_last_invocation() {
        let dims = Dims::new(2, 2, 2);
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut out = GuardedBuffer::allocate(dims.r_len());
        out.write_guard();

        collect_samples(&NaiveKernel, &a, &b, &mut out, dims, &Tuning::default(), 3);
        assert_eq!(out.payload(), [19.0, 22.0, 43.0, 50.0]);
        assert!(out.check_guard());
    }
}
