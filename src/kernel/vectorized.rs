//! SIMD kernel using 8-lane f32 vectors.

use wide::f32x8;

use crate::kernel::{Kernel, Tuning};
use crate::matrix::Dims;

/// Vectorized multiply in i-k-j order.
///
/// The loop order makes the innermost traversal contiguous in both B and R,
/// so each `a[i][k]` is broadcast across an [`f32x8`] and fused into eight
/// output columns at a time. Columns past the last full vector are handled
/// by a scalar tail. Ignores all tuning parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedKernel;

impl Kernel for VectorizedKernel {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn invoke(&self, a: &[f32], b: &[f32], r: &mut [f32], dims: Dims, _tuning: &Tuning) {
        let Dims { m, n, p } = dims;
        const LANES: usize = 8;

        for i in 0..m {
            let r_row = &mut r[i * p..(i + 1) * p];
            r_row.fill(0.0);

            for k in 0..n {
                let a_ik = a[i * n + k];
                let va = f32x8::splat(a_ik);
                let b_row = &b[k * p..(k + 1) * p];

                let mut r_chunks = r_row.chunks_exact_mut(LANES);
                let mut b_chunks = b_row.chunks_exact(LANES);
                for (rc, bc) in r_chunks.by_ref().zip(b_chunks.by_ref()) {
                    let vb = f32x8::from(<[f32; LANES]>::try_from(bc).unwrap());
                    let vr = f32x8::from(<[f32; LANES]>::try_from(&*rc).unwrap());
                    rc.copy_from_slice(va.mul_add(vb, vr).as_array_ref());
                }
                for (rs, &bs) in r_chunks
                    .into_remainder()
                    .iter_mut()
                    .zip(b_chunks.remainder())
                {
                    *rs += a_ik * bs;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::reference_matmul;

    #[test]
    fn test_vectorized_known_product() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut r = [0.0f32; 4];
        VectorizedKernel.invoke(&a, &b, &mut r, Dims::new(2, 2, 2), &Tuning::default());
        assert_eq!(r, [19.0, 22.0, 43.0, 50.0]);
    }

    // P values straddling the vector width: pure tail, exact multiple, mixed.
    #[test]
    fn test_vectorized_matches_reference_across_widths() {
        for p in [1, 5, 8, 11, 16, 19] {
            let dims = Dims::new(6, 7, p);
            let a: Vec<f32> = (0..dims.a_len()).map(|v| (v as f32).sin()).collect();
            let b: Vec<f32> = (0..dims.b_len()).map(|v| (v as f32).cos()).collect();

            let mut expected = vec![0.0f32; dims.r_len()];
            reference_matmul(&a, &b, &mut expected, dims);

            let mut r = vec![0.0f32; dims.r_len()];
            VectorizedKernel.invoke(&a, &b, &mut r, dims, &Tuning::default());
            for (i, (&e, &o)) in expected.iter().zip(r.iter()).enumerate() {
                assert!(
                    (e - o).abs() <= 1e-5,
                    "p={} flat={} expected={} observed={}",
                    p,
                    i,
                    e,
                    o
                );
            }
        }
    }

    #[test]
    fn test_vectorized_overwrites_prior_content() {
        let dims = Dims::new(3, 4, 10);
        let a = vec![1.0; dims.a_len()];
        let b = vec![1.0; dims.b_len()];
        let mut r = vec![f32::NAN; dims.r_len()];
        VectorizedKernel.invoke(&a, &b, &mut r, dims, &Tuning::default());
        assert!(r.iter().all(|&v| v == 4.0));
    }
}
