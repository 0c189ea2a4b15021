//! Kernel conformance against the oracle.

use rand::rngs::StdRng;
use rand::SeedableRng;

use matbench::{reference_matmul, Dims, KernelId, Matrix, Tuning};

/// Every kernel must reproduce the 2×2 product with exact integral values.
#[test]
fn known_product_exact_for_every_kernel() {
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    let dims = Dims::new(2, 2, 2);

    for id in KernelId::ALL {
        let kernel = id.instantiate();
        let mut r = [0.0f32; 4];
        kernel.invoke(&a, &b, &mut r, dims, &Tuning::default());
        assert_eq!(r, [19.0, 22.0, 43.0, 50.0], "kernel {}", id);
    }
}

/// All kernels agree with the oracle within tolerance on awkward shapes.
#[test]
fn kernels_match_oracle_on_ragged_dimensions() {
    let mut rng = StdRng::seed_from_u64(0xDEAD_BEEF);

    for (m, n, p) in [(1, 1, 1), (3, 17, 5), (16, 12, 8), (13, 7, 23)] {
        let dims = Dims::new(m, n, p);
        let a = Matrix::random(m, n, &mut rng);
        let b = Matrix::random(n, p, &mut rng);

        let mut expected = vec![0.0f32; dims.r_len()];
        reference_matmul(a.as_slice(), b.as_slice(), &mut expected, dims);

        for id in KernelId::ALL {
            let kernel = id.instantiate();
            let tuning = Tuning {
                block_size: 4,
                threads: 2,
                cpu: 0,
            };
            let mut r = vec![0.0f32; dims.r_len()];
            kernel.invoke(a.as_slice(), b.as_slice(), &mut r, dims, &tuning);

            for (i, (&e, &o)) in expected.iter().zip(r.iter()).enumerate() {
                assert!(
                    (e - o).abs() <= 1e-4,
                    "kernel {} dims {}x{}x{} flat {}: expected {} got {}",
                    id,
                    m,
                    n,
                    p,
                    i,
                    e,
                    o
                );
            }
        }
    }
}

/// Identical inputs and tuning must yield bit-identical output.
#[test]
fn kernels_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let dims = Dims::new(9, 11, 6);
    let a = Matrix::random(dims.m, dims.n, &mut rng);
    let b = Matrix::random(dims.n, dims.p, &mut rng);

    for id in KernelId::ALL {
        let kernel = id.instantiate();
        let tuning = Tuning {
            block_size: 3,
            threads: 3,
            cpu: 0,
        };

        let mut first = vec![0.0f32; dims.r_len()];
        kernel.invoke(a.as_slice(), b.as_slice(), &mut first, dims, &tuning);

        let mut second = vec![f32::MAX; dims.r_len()];
        kernel.invoke(a.as_slice(), b.as_slice(), &mut second, dims, &tuning);

        let first_bits: Vec<u32> = first.iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u32> = second.iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits, "kernel {}", id);
    }
}

/// Prior output content must not leak into the result (full overwrite).
#[test]
fn kernels_overwrite_stale_output() {
    let dims = Dims::new(4, 3, 10);
    let a = vec![0.5; dims.a_len()];
    let b = vec![2.0; dims.b_len()];

    for id in KernelId::ALL {
        let kernel = id.instantiate();
        let mut r = vec![1234.5f32; dims.r_len()];
        kernel.invoke(&a, &b, &mut r, dims, &Tuning::default());
        // 0.5 * 2.0 summed over n=3 is exactly 3.0 in f32.
        assert!(
            r.iter().all(|&v| v == 3.0),
            "kernel {} left stale content",
            id
        );
    }
}
