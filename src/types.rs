//! Core types: the CSR matrix container and solver result types.
//!
//! [`CsrMatrix`] stores only non-zero entries, giving O(nnz) matrix-vector
//! products with good cache locality. [`SolverResult`] and friends carry the
//! outcome of a solve, including the per-iteration convergence history.

use std::time::Duration;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// CsrMatrix
// ---------------------------------------------------------------------------

/// Compressed Sparse Row (CSR) matrix over `f64`.
///
/// # Layout
///
/// For a matrix with `rows` rows and `nnz` non-zeros:
/// - `row_ptr` has length `rows + 1`, with `row_ptr[0] == 0` and
///   `row_ptr[rows] == nnz`;
/// - `col_indices` and `values` each have length `nnz`;
/// - row `i` spans indices `row_ptr[i]..row_ptr[i+1]`.
///
/// Column indices within a row need not be sorted, but must be unique:
/// duplicate `(row, col)` positions are **not** merged by any constructor
/// and the behavior of the solver kernels on such input is undefined.
///
/// The container is built once and never mutated by the solver; derived
/// matrices (such as the off-diagonal remainder of a Jacobi split) are
/// fresh allocations.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    /// Row offsets: `row_ptr[i]` is the start index in `col_indices`/`values`
    /// for row `i`.
    pub row_ptr: Vec<usize>,
    /// Column index (0-based) of each non-zero entry.
    pub col_indices: Vec<usize>,
    /// Value of each non-zero entry.
    pub values: Vec<f64>,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl CsrMatrix {
    /// Number of non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterate over `(col_index, value)` pairs of the given row.
    #[inline]
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.row_ptr[row];
        let end = self.row_ptr[row + 1];
        self.col_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Sparse matrix-vector multiply into a caller-provided buffer: `y = A * x`.
    ///
    /// This is the unchecked hot-path kernel; use [`mat_vec`](Self::mat_vec)
    /// for the checked, allocating variant.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `x.len() >= self.cols` and `y.len() >= self.rows`.
    #[inline]
    pub fn spmv(&self, x: &[f64], y: &mut [f64]) {
        debug_assert!(x.len() >= self.cols, "spmv: x.len()={} < cols={}", x.len(), self.cols);
        debug_assert!(y.len() >= self.rows, "spmv: y.len()={} < rows={}", y.len(), self.rows);

        for i in 0..self.rows {
            let mut sum = 0.0;
            for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                sum += self.values[idx] * x[self.col_indices[idx]];
            }
            y[i] = sum;
        }
    }

    /// Parallel sparse matrix-vector multiply: `y = A * x`.
    ///
    /// Rows are independent, so the product is computed fork-join across
    /// rows. Results are identical to [`spmv`](Self::spmv).
    #[cfg(feature = "parallel")]
    pub fn par_spmv(&self, x: &[f64], y: &mut [f64]) {
        use rayon::prelude::*;

        debug_assert!(x.len() >= self.cols);
        debug_assert!(y.len() >= self.rows);

        y[..self.rows]
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, out)| {
                let mut sum = 0.0;
                for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                    sum += self.values[idx] * x[self.col_indices[idx]];
                }
                *out = sum;
            });
    }

    /// Checked matrix-vector product: returns `A * x` as a fresh vector.
    ///
    /// Pure: neither `self` nor `x` is modified.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DimensionMismatch`] if `x.len() != cols`.
    pub fn mat_vec(&self, x: &[f64]) -> Result<Vec<f64>, ValidationError> {
        if x.len() != self.cols {
            return Err(ValidationError::DimensionMismatch(format!(
                "mat_vec: vector length {} does not match column count {}",
                x.len(),
                self.cols,
            )));
        }
        let mut y = vec![0.0; self.rows];
        self.spmv(x, &mut y);
        Ok(y)
    }

    /// Fused residual norm: computes `||b - A*x||_2` in a single pass over
    /// the matrix, without materialising `A*x`.
    ///
    /// Used by the solver loop where it replaces a separate product,
    /// subtraction and norm (three memory traversals with one).
    #[inline]
    pub(crate) fn residual_norm(&self, x: &[f64], b: &[f64]) -> f64 {
        debug_assert!(x.len() >= self.cols);
        debug_assert!(b.len() >= self.rows);

        let mut norm_sq = 0.0;
        for i in 0..self.rows {
            let mut ax_i = 0.0;
            for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                ax_i += self.values[idx] * x[self.col_indices[idx]];
            }
            let r_i = b[i] - ax_i;
            norm_sq += r_i * r_i;
        }
        norm_sq.sqrt()
    }

    /// Build a CSR matrix from COO (coordinate) triplets.
    ///
    /// Entries are sorted by `(row, col)` internally. Duplicate positions are
    /// kept as separate entries; see the type-level note on duplicates.
    ///
    /// # Panics
    ///
    /// Panics if any row or column index is out of bounds. Intended for
    /// programmatic construction where indices are known-good; use
    /// [`from_one_based`](Self::from_one_based) for externally sourced data.
    pub fn from_coo(
        rows: usize,
        cols: usize,
        entries: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Self {
        let mut sorted: Vec<_> = entries.into_iter().collect();
        sorted.sort_unstable_by_key(|&(r, c, _)| (r, c));

        let nnz = sorted.len();
        let mut row_ptr = vec![0usize; rows + 1];
        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for &(r, _, _) in &sorted {
            assert!(r < rows, "row index {} out of bounds (rows={})", r, rows);
            row_ptr[r + 1] += 1;
        }
        for i in 1..=rows {
            row_ptr[i] += row_ptr[i - 1];
        }
        for (_, c, v) in sorted {
            assert!(c < cols, "col index {} out of bounds (cols={})", c, cols);
            col_indices.push(c);
            values.push(v);
        }

        Self {
            row_ptr,
            col_indices,
            values,
            rows,
            cols,
        }
    }

    /// Build a square CSR matrix from 1-based triplet arrays, as commonly
    /// emitted by mathematical-software CSV exports.
    ///
    /// `row_offsets` holds `n + 1` 1-based offsets (first entry `1`, last
    /// entry `nnz + 1`); `col_indices` holds 1-based column indices aligned
    /// with `values`. All indices are converted to 0-based. No sorting or
    /// deduplication is performed.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::DimensionMismatch`] if the offset array is empty,
    ///   `col_indices` and `values` lengths differ, the first offset is not
    ///   `1`, or the last offset does not equal `values.len() + 1`;
    /// - [`ValidationError::NonMonotonicRowOffsets`] if the offsets decrease;
    /// - [`ValidationError::IndexOutOfBounds`] if any column index falls
    ///   outside `[1, n]` before conversion.
    pub fn from_one_based(
        values: Vec<f64>,
        col_indices: Vec<usize>,
        row_offsets: &[usize],
    ) -> Result<Self, ValidationError> {
        if row_offsets.is_empty() {
            return Err(ValidationError::DimensionMismatch(
                "row offset array is empty".to_string(),
            ));
        }
        let n = row_offsets.len() - 1;

        if col_indices.len() != values.len() {
            return Err(ValidationError::DimensionMismatch(format!(
                "column index count {} does not match value count {}",
                col_indices.len(),
                values.len(),
            )));
        }
        if row_offsets[0] != 1 {
            return Err(ValidationError::DimensionMismatch(format!(
                "first row offset is {} (expected 1 for 1-based input)",
                row_offsets[0],
            )));
        }
        for i in 1..row_offsets.len() {
            if row_offsets[i] < row_offsets[i - 1] {
                return Err(ValidationError::NonMonotonicRowOffsets { position: i });
            }
        }
        if row_offsets[n] != values.len() + 1 {
            return Err(ValidationError::DimensionMismatch(format!(
                "last row offset {} does not match value count {} + 1",
                row_offsets[n],
                values.len(),
            )));
        }

        // Locate the row of an offending column index only if one exists.
        for (k, &c) in col_indices.iter().enumerate() {
            if c < 1 || c > n {
                let row = row_offsets
                    .iter()
                    .position(|&off| off > k + 1)
                    .map(|p| p - 1)
                    .unwrap_or(n - 1);
                return Err(ValidationError::IndexOutOfBounds {
                    index: c,
                    row,
                    cols: n,
                });
            }
        }

        Ok(Self {
            row_ptr: row_offsets.iter().map(|&off| off - 1).collect(),
            col_indices: col_indices.into_iter().map(|c| c - 1).collect(),
            values,
            rows: n,
            cols: n,
        })
    }

    /// Build a square identity matrix of dimension `n`.
    pub fn identity(n: usize) -> Self {
        Self {
            row_ptr: (0..=n).collect(),
            col_indices: (0..n).collect(),
            values: vec![1.0; n],
            rows: n,
            cols: n,
        }
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// Resource limits for a single solve.
#[derive(Debug, Clone)]
pub struct ComputeBudget {
    /// Maximum wall-clock time allowed.
    pub max_time: Duration,
    /// Maximum number of sweeps; exceeding it surfaces
    /// [`SolverError::NonConvergence`](crate::error::SolverError::NonConvergence).
    pub max_iterations: usize,
}

impl ComputeBudget {
    /// A budget with no practical limits.
    ///
    /// Reproduces the behavior of the loop the crate was modelled on, which
    /// ran with no iteration safeguard at all. Prefer a finite budget unless
    /// compatibility is required.
    pub fn unlimited() -> Self {
        Self {
            max_time: Duration::MAX,
            max_iterations: usize::MAX,
        }
    }
}

impl Default for ComputeBudget {
    fn default() -> Self {
        Self {
            max_time: Duration::from_secs(30),
            max_iterations: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Solver result types
// ---------------------------------------------------------------------------

/// Per-iteration convergence snapshot.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConvergenceInfo {
    /// Iteration index (0-based).
    pub iteration: usize,
    /// Residual L2 norm `||b - A*x||` at this iteration.
    pub residual_norm: f64,
    /// Residual norm divided by `||b||` (equal to `residual_norm` when
    /// `||b|| == 0`).
    pub relative_residual: f64,
}

/// Result returned by a successful solver invocation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SolverResult {
    /// Solution vector `x`.
    pub solution: Vec<f64>,
    /// Number of sweeps performed.
    pub iterations: usize,
    /// Final residual L2 norm.
    pub residual_norm: f64,
    /// Final residual norm relative to `||b||`.
    pub relative_residual: f64,
    /// Wall-clock time taken.
    pub wall_time: Duration,
    /// Per-iteration convergence history.
    pub convergence_history: Vec<ConvergenceInfo>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
