//! Diagonal / off-diagonal decomposition for the Jacobi method.
//!
//! A Jacobi iteration needs the matrix split as `A = D + R` where `D` holds
//! the diagonal entries and `R` ("L+U") holds everything else. The split is
//! computed once per matrix and reused across solves with different
//! right-hand sides.

use tracing::warn;

use crate::error::ValidationError;
use crate::types::CsrMatrix;

/// The matrix split `A = D + R` in the form the Jacobi sweep consumes.
///
/// `diag[i]` is the diagonal entry of row `i` (`0.0` if the source matrix
/// carries no explicit diagonal entry there) and `remainder` is a CSR matrix
/// with exactly the off-diagonal non-zeros of the source, rows and columns
/// unchanged.
#[derive(Debug, Clone)]
pub struct JacobiSplit {
    /// Dense diagonal of the source matrix.
    pub diag: Vec<f64>,
    /// Off-diagonal remainder in CSR form.
    pub remainder: CsrMatrix,
    /// Rows whose diagonal entry is exactly zero, ascending.
    zero_rows: Vec<usize>,
}

impl JacobiSplit {
    /// Split a square matrix into its diagonal and off-diagonal parts.
    ///
    /// Single pass over the non-zeros, O(nnz). The source matrix is read
    /// only, never mutated. Rows without an explicit diagonal entry leave
    /// `0.0` in `diag` and are reported by
    /// [`zero_pivot_rows`](Self::zero_pivot_rows); whether that is fatal is
    /// decided by the solver, not here.
    ///
    /// If a row carries duplicate diagonal entries the last one read wins,
    /// consistent with the crate-wide stance that duplicate positions are
    /// undefined input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DimensionMismatch`] if the matrix is not
    /// square.
    pub fn decompose(a: &CsrMatrix) -> Result<Self, ValidationError> {
        if a.rows != a.cols {
            return Err(ValidationError::DimensionMismatch(format!(
                "jacobi split requires a square matrix but got {}x{}",
                a.rows, a.cols,
            )));
        }
        let n = a.rows;

        let mut diag = vec![0.0; n];
        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_indices = Vec::with_capacity(a.nnz());
        let mut values = Vec::with_capacity(a.nnz());

        row_ptr.push(0);
        for i in 0..n {
            for (col, value) in a.row_entries(i) {
                if col == i {
                    diag[i] = value;
                } else {
                    col_indices.push(col);
                    values.push(value);
                }
            }
            row_ptr.push(values.len());
        }

        let zero_rows: Vec<usize> = (0..n).filter(|&i| diag[i] == 0.0).collect();
        if !zero_rows.is_empty() {
            warn!(
                count = zero_rows.len(),
                first = zero_rows[0],
                "matrix has zero diagonal entries; Jacobi update is undefined for those rows",
            );
        }

        col_indices.shrink_to_fit();
        values.shrink_to_fit();

        Ok(Self {
            diag,
            remainder: CsrMatrix {
                row_ptr,
                col_indices,
                values,
                rows: n,
                cols: n,
            },
            zero_rows,
        })
    }

    /// Matrix rank (dimension of the square source matrix).
    #[inline]
    pub fn rank(&self) -> usize {
        self.diag.len()
    }

    /// Rows whose diagonal entry is exactly zero, in ascending order.
    ///
    /// Empty for any matrix with a full explicit diagonal.
    #[inline]
    pub fn zero_pivot_rows(&self) -> &[usize] {
        &self.zero_rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
