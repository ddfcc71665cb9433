//! Solver trait.
//!
//! [`SolverEngine`] is the seam between orchestration code and a concrete
//! solver implementation: callers hand over a matrix, a right-hand side and
//! a budget, and get back either a [`SolverResult`] or a structured
//! [`SolverError`].

use crate::error::SolverError;
use crate::types::{ComputeBudget, CsrMatrix, SolverResult};

/// Core trait implemented by every solver in this crate.
pub trait SolverEngine: Send + Sync {
    /// Solve the linear system `A x = b` subject to the given compute budget.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] on invalid input, a singular pivot,
    /// non-convergence under a finite budget, numerical instability, or
    /// budget exhaustion.
    fn solve(
        &self,
        matrix: &CsrMatrix,
        rhs: &[f64],
        budget: &ComputeBudget,
    ) -> Result<SolverResult, SolverError>;

    /// Short human-readable name of the method.
    fn name(&self) -> &'static str;
}
