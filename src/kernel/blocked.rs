//! Cache-blocked kernel.

use crate::kernel::{Kernel, Tuning};
use crate::matrix::Dims;

/// Tiled multiply over b×b×b blocks.
///
/// Zero-initializes the output in a first pass, then accumulates one block
/// of partial products at a time. Block boundaries are clamped to the
/// matrix edges, so any positive `block_size` is legal regardless of
/// whether it divides the dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockedKernel;

impl Kernel for BlockedKernel {
    fn name(&self) -> &'static str {
        "blocked"
    }

    fn invoke(&self, a: &[f32], b: &[f32], r: &mut [f32], dims: Dims, tuning: &Tuning) {
        let Dims { m, n, p } = dims;
        let bs = tuning.block_size.max(1);

        r[..m * p].fill(0.0);

        for ii in (0..m).step_by(bs) {
            let i_max = (ii + bs).min(m);
            for jj in (0..p).step_by(bs) {
                let j_max = (jj + bs).min(p);
                for kk in (0..n).step_by(bs) {
                    let k_max = (kk + bs).min(n);
                    for i in ii..i_max {
                        for j in jj..j_max {
                            let mut sum = r[i * p + j];
                            for k in kk..k_max {
                                sum += a[i * n + k] * b[k * p + j];
                            }
                            r[i * p + j] = sum;
                        }
                    }
                }
            }
        }
    }
}
