//! Shared helpers for the integration test suite.
//!
//! Deterministic random system generators, a dense reference solver, and
//! float comparison utilities.

use sparsolve::types::CsrMatrix;

/// Minimal linear congruential generator for reproducible test data.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    pub fn next_f64_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Random strictly diagonally dominant CSR matrix of dimension `n`.
///
/// Each row gets roughly `density * n` off-diagonal entries; the diagonal is
/// set to `1 + sum(|off-diagonal|) + noise`, guaranteeing Jacobi converges.
pub fn random_diag_dominant_csr(n: usize, density: f64, seed: u64) -> CsrMatrix {
    let mut rng = Lcg::new(seed);
    let mut entries: Vec<(usize, usize, f64)> = Vec::new();

    for i in 0..n {
        let mut off_diag_sum = 0.0;
        for j in 0..n {
            if i == j {
                continue;
            }
            if rng.next_f64() < density {
                let val = rng.next_f64_range(-1.0, 1.0);
                entries.push((i, j, val));
                off_diag_sum += val.abs();
            }
        }
        // Keep at least one off-diagonal entry so the remainder is non-trivial.
        if off_diag_sum == 0.0 && n > 1 {
            let j = (i + 1) % n;
            let val = rng.next_f64_range(0.1, 0.5);
            entries.push((i, j, val));
            off_diag_sum = val;
        }
        entries.push((i, i, off_diag_sum + 1.0 + rng.next_f64()));
    }

    CsrMatrix::from_coo(n, n, entries)
}

/// Deterministic random vector of length `n` with entries in [-1, 1).
pub fn random_vector(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next_f64_range(-1.0, 1.0)).collect()
}

/// Dense Gaussian elimination with partial pivoting, as an O(n^3) reference
/// for small systems.
///
/// # Panics
///
/// Panics on singular matrices or inconsistent dimensions.
pub fn dense_solve(matrix: &CsrMatrix, rhs: &[f64]) -> Vec<f64> {
    let n = matrix.rows;
    assert_eq!(n, matrix.cols, "dense_solve requires a square matrix");
    assert_eq!(rhs.len(), n, "rhs length must match matrix dimension");

    let mut aug = vec![vec![0.0f64; n + 1]; n];
    for i in 0..n {
        aug[i][n] = rhs[i];
        for (j, v) in matrix.row_entries(i) {
            aug[i][j] = v;
        }
    }

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = aug[col][col].abs();
        for row in (col + 1)..n {
            if aug[row][col].abs() > max_val {
                max_val = aug[row][col].abs();
                max_row = row;
            }
        }
        assert!(max_val > 1e-15, "matrix is singular or near-singular");
        aug.swap(col, max_row);

        let pivot = aug[col][col];
        for row in (col + 1)..n {
            let factor = aug[row][col] / pivot;
            for j in col..=n {
                aug[row][j] -= factor * aug[col][j];
            }
        }
    }

    let mut x = vec![0.0f64; n];
    for i in (0..n).rev() {
        let mut sum = aug[i][n];
        for j in (i + 1)..n {
            sum -= aug[i][j] * x[j];
        }
        x[i] = sum / aug[i][i];
    }
    x
}

/// L2 norm of a vector.
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// Relative error `||approx - exact|| / ||exact||` (absolute if `exact` is
/// the zero vector).
pub fn relative_error(approx: &[f64], exact: &[f64]) -> f64 {
    assert_eq!(approx.len(), exact.len());
    let err = approx
        .iter()
        .zip(exact.iter())
        .map(|(&a, &e)| (a - e) * (a - e))
        .sum::<f64>()
        .sqrt();
    let exact_norm = l2_norm(exact);
    if exact_norm > 1e-15 {
        err / exact_norm
    } else {
        err
    }
}
