//! Error types for the solver crate.
//!
//! [`ValidationError`] covers malformed input detected before any computation
//! begins; [`SolverError`] covers everything that can go wrong during a solve.
//! All errors implement `std::error::Error` via `thiserror`, and validation
//! errors convert into [`SolverError::InvalidInput`] through `From`.

use std::time::Duration;

/// Primary error type for solver operations.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A diagonal entry required as a divisor in the Jacobi update is zero.
    ///
    /// Raised before the first sweep: rows without a usable pivot are
    /// detected when the matrix is split into diagonal and off-diagonal
    /// parts, rather than dividing through and propagating `inf`/`NaN`.
    #[error("singular pivot: diagonal entry at row {row} is zero")]
    SingularPivot {
        /// First row with a zero diagonal entry.
        row: usize,
    },

    /// The iteration cap was reached before the convergence criterion held.
    #[error(
        "no convergence after {iterations} iterations (residual={residual:.3e})"
    )]
    NonConvergence {
        /// Number of completed sweeps.
        iterations: usize,
        /// Residual L2 norm at termination.
        residual: f64,
    },

    /// The residual became NaN or infinite during iteration.
    ///
    /// The solution buffer is left in a partially updated state; no attempt
    /// is made to roll it back.
    #[error("numerical instability at iteration {iteration}: {detail}")]
    NumericalInstability {
        /// Iteration at which the instability was detected.
        iteration: usize,
        /// Human-readable explanation.
        detail: String,
    },

    /// The wall-clock budget was exhausted mid-solve.
    #[error("compute budget exhausted: {reason}")]
    BudgetExhausted {
        /// Which limit was hit.
        reason: String,
        /// Time elapsed when the limit was hit.
        elapsed: Duration,
    },

    /// The caller supplied invalid input (structure, dimensions, parameters).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

/// Validation errors for solver inputs.
///
/// Raised eagerly, before any arithmetic, so callers get a clear diagnostic
/// instead of a mysterious numerical failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Vector or matrix dimensions disagree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A value is NaN or infinite where a finite number is required.
    #[error("non-finite value: {0}")]
    NonFiniteValue(String),

    /// A column index is out of bounds for the declared number of columns.
    #[error("column index {index} out of bounds for {cols} columns (row {row})")]
    IndexOutOfBounds {
        /// Offending column index (as supplied, before any base conversion).
        index: usize,
        /// Row containing the offending entry.
        row: usize,
        /// Declared column count.
        cols: usize,
    },

    /// The row-offset array is not monotonically non-decreasing.
    #[error("row offsets decrease at position {position}")]
    NonMonotonicRowOffsets {
        /// Position in the offset array where the violation was detected.
        position: usize,
    },

    /// A parameter is outside its valid range.
    #[error("parameter out of range: {name} = {value} (expected {expected})")]
    ParameterOutOfRange {
        /// Name of the parameter.
        name: String,
        /// The invalid value, formatted.
        value: String,
        /// Description of the valid range.
        expected: String,
    },

    /// Matrix size exceeds the implementation limit.
    #[error("matrix size {rows}x{cols} exceeds maximum dimension {max_dim}")]
    MatrixTooLarge {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
        /// Maximum supported dimension.
        max_dim: usize,
    },
}
