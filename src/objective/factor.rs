use std::ops::Index;

use crate::objective::DIAGONAL_FLOOR;

// ======================================================================
// CholeskyFactor - CRATE

// Lower-triangular Cholesky factor stored as a flat row-major square of
// `dim * dim` entries, of which only the top-left `live × live` block is
// meaningful. The invariant maintained by the owning objective is
// `L·Lᵀ = I + σ⁻²·G` over the live block.
#[derive(Clone, Debug)]
pub(crate) struct CholeskyFactor {
    dim: usize,
    live: usize,

    // Flat array of `dim * dim` entries; row `i` starts at `i * dim`.
    data: Vec<f64>,
}

impl CholeskyFactor {
    pub(crate) fn new(dim: usize) -> Self {
        assert!(dim > 0);

        Self {
            dim,
            live: 0,
            data: vec![0.0; dim * dim],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    // Solves `L[..live][..live] · out = rhs` by forward substitution.
    //
    // Live diagonal entries are positive by construction (refactor and
    // append_row floor them), so the divisions are safe.
    pub(crate) fn forward_solve(&self, rhs: &[f64], out: &mut [f64]) {
        debug_assert_eq!(rhs.len(), self.live);
        debug_assert_eq!(out.len(), self.live);

        for i in 0..self.live {
            let row = &self.data[i * self.dim..i * self.dim + i];
            let mut sum = rhs[i];
            for (j, entry) in row.iter().enumerate() {
                sum -= entry * out[j];
            }
            out[i] = sum / self.data[i * self.dim + i];
        }
    }

    // Appends `(ell, diagonal)` as the next live row. `diagonal` must be
    // positive.
    pub(crate) fn append_row(&mut self, ell: &[f64], diagonal: f64) {
        debug_assert_eq!(ell.len(), self.live);
        debug_assert!(diagonal > 0.0);
        assert!(self.live < self.dim);

        let start = self.live * self.dim;
        self.data[start..start + self.live].copy_from_slice(ell);
        self.data[start + self.live] = diagonal;
        self.live += 1;
    }

    // Factorizes the flat row-major `n × n` matrix into the first `n`
    // rows, overwriting whatever was live before. Non-positive pivots are
    // floored at [`DIAGONAL_FLOOR`]; returns how many were.
    pub(crate) fn refactor(&mut self, matrix: &[f64], n: usize) -> u64 {
        assert!(n <= self.dim);
        debug_assert_eq!(matrix.len(), n * n);

        let mut clamped = 0;
        for i in 0..n {
            for j in 0..=i {
                let mut sum = matrix[i * n + j];
                for t in 0..j {
                    sum -= self.data[i * self.dim + t] * self.data[j * self.dim + t];
                }
                if i == j {
                    if sum <= 0.0 {
                        sum = DIAGONAL_FLOOR;
                        clamped += 1;
                    }
                    self.data[i * self.dim + i] = sum.sqrt();
                } else {
                    self.data[i * self.dim + j] = sum / self.data[j * self.dim + j];
                }
            }
        }
        self.live = n;
        clamped
    }

    // `Σᵢ ln L[i][i]` over the live block, which equals the cached
    // objective value of the owning IVM.
    pub(crate) fn log_diag_sum(&self) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.live {
            sum += self.data[i * self.dim + i].ln();
        }
        sum
    }
}

// ======================================================================
// CholeskyFactor - IMPL Index

impl Index<usize> for CholeskyFactor {
    type Output = [f64];
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index * self.dim..(index + 1) * self.dim]
    }
}

// ======================================================================
// TESTS
