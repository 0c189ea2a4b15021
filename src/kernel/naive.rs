//! Scalar i-j-k kernel.

use crate::kernel::{Kernel, Tuning};
use crate::matrix::Dims;

/// Straightforward triple-loop multiply in i-j-k order.
///
/// Identical algorithm to the oracle; the point of benchmarking it is to
/// establish the unoptimized baseline the other variants are measured
/// against. Ignores all tuning parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveKernel;

impl Kernel for NaiveKernel {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn invoke(&self, a: &[f32], b: &[f32], r: &mut [f32], dims: Dims, _tuning: &Tuning) {
        let Dims { m, n, p } = dims;
        for i in 0..m {
            for j in 0..p {
                r[i * p + j] = 0.0;
                for k in 0..n {
                    r[i * p + j] += a[i * n + k] * b[k * p + j];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_known_product() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut r = [0.0f32; 4];
        NaiveKernel.invoke(&a, &b, &mut r, Dims::new(2, 2, 2), &Tuning::default());
        assert_eq!(r, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_naive_overwrites_prior_content() {
        let a = [2.0; 6];
        let b = [3.0; 6];
        let mut r = [99.0f32; 4];
        NaiveKernel.invoke(&a, &b, &mut r, Dims::new(2, 3, 2), &Tuning::default());
        assert_eq!(r, [18.0, 18.0, 18.0, 18.0]);
    }
}
