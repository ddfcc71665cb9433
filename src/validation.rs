//! Eager input validation for solver operations.
//!
//! All checks run before any computation begins, so callers get a clear
//! diagnostic instead of a mysterious numerical failure. Every function
//! returns [`ValidationError`] on failure, which converts into
//! [`SolverError::InvalidInput`](crate::error::SolverError::InvalidInput)
//! via `From`.

use crate::error::ValidationError;
use crate::types::CsrMatrix;

/// Maximum matrix dimension, to keep dense scratch vectors allocatable.
pub const MAX_RANK: usize = 10_000_000;

/// Maximum number of non-zero entries.
pub const MAX_NNZ: usize = 100_000_000;

/// Validate the structural integrity of a CSR matrix.
///
/// Checks, in order:
///
/// 1. `rows` and `cols` within [`MAX_RANK`], `nnz` within [`MAX_NNZ`];
/// 2. `row_ptr` has length `rows + 1`, starts at `0`, ends at `nnz`, and is
///    monotonically non-decreasing;
/// 3. `col_indices` and `values` lengths agree;
/// 4. every column index is in range and every value is finite;
/// 5. column indices are sorted within each row (emits a [`tracing::warn`]
///    if not, but does not error).
///
/// Duplicate `(row, col)` positions are *not* detected; they are documented
/// as undefined input.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_csr_matrix(matrix: &CsrMatrix) -> Result<(), ValidationError> {
    if matrix.rows > MAX_RANK || matrix.cols > MAX_RANK {
        return Err(ValidationError::MatrixTooLarge {
            rows: matrix.rows,
            cols: matrix.cols,
            max_dim: MAX_RANK,
        });
    }

    let nnz = matrix.values.len();
    if nnz > MAX_NNZ {
        return Err(ValidationError::DimensionMismatch(format!(
            "nnz {} exceeds maximum allowed {}",
            nnz, MAX_NNZ,
        )));
    }

    if matrix.row_ptr.len() != matrix.rows + 1 {
        return Err(ValidationError::DimensionMismatch(format!(
            "row_ptr length {} does not equal rows + 1 = {}",
            matrix.row_ptr.len(),
            matrix.rows + 1,
        )));
    }
    for i in 1..matrix.row_ptr.len() {
        if matrix.row_ptr[i] < matrix.row_ptr[i - 1] {
            return Err(ValidationError::NonMonotonicRowOffsets { position: i });
        }
    }
    if matrix.row_ptr[0] != 0 {
        return Err(ValidationError::DimensionMismatch(format!(
            "row_ptr[0] = {} (expected 0)",
            matrix.row_ptr[0],
        )));
    }
    if matrix.row_ptr[matrix.rows] != nnz {
        return Err(ValidationError::DimensionMismatch(format!(
            "row_ptr[rows] = {} does not match values length {}",
            matrix.row_ptr[matrix.rows],
            nnz,
        )));
    }

    if matrix.col_indices.len() != nnz {
        return Err(ValidationError::DimensionMismatch(format!(
            "col_indices length {} does not match values length {}",
            matrix.col_indices.len(),
            nnz,
        )));
    }

    for row in 0..matrix.rows {
        let mut prev_col: Option<usize> = None;
        for idx in matrix.row_ptr[row]..matrix.row_ptr[row + 1] {
            let col = matrix.col_indices[idx];
            if col >= matrix.cols {
                return Err(ValidationError::IndexOutOfBounds {
                    index: col,
                    row,
                    cols: matrix.cols,
                });
            }
            let val = matrix.values[idx];
            if !val.is_finite() {
                return Err(ValidationError::NonFiniteValue(format!(
                    "matrix[{}, {}] = {}",
                    row, col, val,
                )));
            }
            // Sorted order within a row is a performance expectation, not a
            // structural requirement.
            if let Some(pc) = prev_col {
                if col < pc {
                    tracing::warn!(
                        row,
                        "column indices not sorted within row (col {} follows {}); \
                         performance may be degraded",
                        col,
                        pc,
                    );
                }
            }
            prev_col = Some(col);
        }
    }

    Ok(())
}

/// Validate a right-hand-side vector against the matrix rank.
///
/// Emits a [`tracing::warn`] for an all-zero RHS (valid, but the solution is
/// trivially zero and usually indicates a caller bug).
///
/// # Errors
///
/// Returns [`ValidationError`] on dimension mismatch or non-finite entries.
pub fn validate_rhs(rhs: &[f64], expected_len: usize) -> Result<(), ValidationError> {
    if rhs.len() != expected_len {
        return Err(ValidationError::DimensionMismatch(format!(
            "rhs length {} does not match matrix rank {}",
            rhs.len(),
            expected_len,
        )));
    }

    let mut all_zero = true;
    for (i, &v) in rhs.iter().enumerate() {
        if !v.is_finite() {
            return Err(ValidationError::NonFiniteValue(format!("rhs[{}] = {}", i, v)));
        }
        if v != 0.0 {
            all_zero = false;
        }
    }
    if all_zero && !rhs.is_empty() {
        tracing::warn!("rhs vector is all zeros; solution will be trivially zero");
    }

    Ok(())
}

/// Validate the complete solver input (matrix + rhs).
///
/// Runs [`validate_csr_matrix`] and [`validate_rhs`], and additionally
/// requires the matrix to be square.
///
/// # Errors
///
/// Returns [`ValidationError`] on the first failing check.
pub fn validate_solver_input(matrix: &CsrMatrix, rhs: &[f64]) -> Result<(), ValidationError> {
    validate_csr_matrix(matrix)?;
    if matrix.rows != matrix.cols {
        return Err(ValidationError::DimensionMismatch(format!(
            "solver requires a square matrix but got {}x{}",
            matrix.rows, matrix.cols,
        )));
    }
    validate_rhs(rhs, matrix.rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
