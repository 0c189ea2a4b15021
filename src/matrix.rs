//! Row-major matrix storage and the flat indexing convention.
//!
//! Every matrix in the crate is a flat `Vec<f32>` indexed as
//! `row * column_count + column`. Dimensions are fixed at allocation and
//! bounds are established there rather than re-checked at each access site.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Problem dimensions for `R = A × B`.
///
/// `A` is `m × n`, `B` is `n × p`, `R` is `m × p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    /// Rows of A and R.
    pub m: usize,
    /// Columns of A, rows of B.
    pub n: usize,
    /// Columns of B and R.
    pub p: usize,
}

impl Dims {
    /// Create dimensions for an `m × n` by `n × p` multiply.
    pub fn new(m: usize, n: usize, p: usize) -> Self {
        Self { m, n, p }
    }

    /// Element count of A.
    pub fn a_len(&self) -> usize {
        self.m * self.n
    }

    /// Element count of B.
    pub fn b_len(&self) -> usize {
        self.n * self.p
    }

    /// Element count of R.
    pub fn r_len(&self) -> usize {
        self.m * self.p
    }
}

/// A row-major matrix buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Allocate a zero-filled `rows × cols` matrix.
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Wrap an existing element vector.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`. Length is validated once here
    /// so access sites can index without further checks.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "matrix data length must equal rows * cols"
        );
        Self { data, rows, cols }
    }

    /// Allocate a `rows × cols` matrix filled with uniform values in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..rows * cols).map(|_| rng.random::<f32>()).collect();
        Self { data, rows, cols }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat index of `(row, col)` under the row-major convention.
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Element at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[self.index_of(row, col)]
    }

    /// The flat element slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The flat element slice, mutable.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
