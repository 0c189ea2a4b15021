//! Trusted reference computation and result verification.
//!
//! The oracle computes `R = A × B` with a fixed unoptimized triple loop,
//! once per run, into its own buffer. Every kernel under test is compared
//! element-by-element against that buffer within an absolute tolerance.

use serde::{Deserialize, Serialize};

use crate::kernel::{Kernel, Tuning};
use crate::matrix::Dims;

/// Default absolute per-element tolerance for verification.
pub const DEFAULT_TOLERANCE: f32 = 1e-6;

/// Compute `R = A × B` with the reference triple loop.
///
/// Fully overwrites every payload element of `r`, including
/// zero-initialization. Deliberately naive: this is the trust anchor, not a
/// performance baseline.
pub fn reference_matmul(a: &[f32], b: &[f32], r: &mut [f32], dims: Dims) {
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

/// The oracle algorithm exposed as a conformant kernel.
///
/// Lets the harness be pointed at its own reference implementation, which
/// must always verify clean.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceKernel;

impl Kernel for ReferenceKernel {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn invoke(&self, a: &[f32], b: &[f32], r: &mut [f32], dims: Dims, _tuning: &Tuning) {
        reference_matmul(a, b, r, dims);
    }
}

/// Location and values of the first element pair exceeding tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Flat index of the differing element.
    pub index: usize,
    /// Row derived from the flat index.
    pub row: usize,
    /// Column derived from the flat index.
    pub col: usize,
    /// Reference (oracle) value.
    pub expected: f32,
    /// Observed (kernel) value.
    pub actual: f32,
}

/// Outcome of comparing a kernel's output against the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// True iff every element pair differs by at most the tolerance.
    pub matched: bool,
    /// First violation in flat-index order, if any.
    pub first_mismatch: Option<Mismatch>,
}

/// Compare `observed` against `reference` element-by-element.
///
/// Scans in flat-index order; `matched` is true iff every pair differs by
/// at most `tolerance` in absolute value. The first violation is recorded
/// with its location (flat index plus row/column under `cols` columns) and
/// both values for diagnostics.
pub fn verify(reference: &[f32], observed: &[f32], cols: usize, tolerance: f32) -> Verification {
    debug_assert_eq!(reference.len(), observed.len());

    for (index, (&expected, &actual)) in reference.iter().zip(observed.iter()).enumerate() {
        if (expected - actual).abs() > tolerance {
            return Verification {
                matched: false,
                first_mismatch: Some(Mismatch {
                    index,
                    row: index / cols,
                    col: index % cols,
                    expected,
                    actual,
                }),
            };
        }
    }

    Verification {
        matched: true,
        first_mismatch: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A=[[1,2],[3,4]], B=[[5,6],[7,8]] => R=[[19,22],[43,50]], integral values.
    #[test]
    fn test_reference_known_product() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut r = [0.0f32; 4];
        reference_matmul(&a, &b, &mut r, Dims::new(2, 2, 2));
        assert_eq!(r, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_reference_overwrites_prior_content() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut r = [f32::MAX; 4];
        reference_matmul(&a, &b, &mut r, Dims::new(2, 2, 2));
        assert_eq!(r, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_verify_matched() {
        let reference = [1.0, 2.0, 3.0];
        let observed = [1.0, 2.0 + 5e-7, 3.0];
        let result = verify(&reference, &observed, 3, DEFAULT_TOLERANCE);
        assert!(result.matched);
        assert!(result.first_mismatch.is_none());
    }

    #[test]
    fn test_verify_reports_first_mismatch_location() {
        let reference = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut observed = reference;
        observed[4] += 1e-3;
        let result = verify(&reference, &observed, 3, DEFAULT_TOLERANCE);
        assert!(!result.matched);
        let mismatch = result.first_mismatch.unwrap();
        assert_eq!(mismatch.index, 4);
        assert_eq!(mismatch.row, 1);
        assert_eq!(mismatch.col, 1);
        assert_eq!(mismatch.expected, 5.0);
    }

    #[test]
    fn test_verify_reports_earliest_of_several() {
        let reference = [0.0; 8];
        let mut observed = reference;
        observed[2] = 1.0;
        observed[6] = 1.0;
        let result = verify(&reference, &observed, 4, DEFAULT_TOLERANCE);
        assert_eq!(result.first_mismatch.unwrap().index, 2);
    }
}
