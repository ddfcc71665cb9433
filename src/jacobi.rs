//! Jacobi iterative solver.
//!
//! Solves `Ax = b` by splitting `A = D + R` (diagonal plus off-diagonal
//! remainder) and iterating
//!
//! ```text
//! x_{k+1} = D^{-1} (b - R x_k)
//! ```
//!
//! The update is strictly Jacobi: each sweep reads the previous iterate from
//! one buffer and writes the new iterate into another, so the result never
//! depends on row traversal order. (Overwriting `x` in place while reading
//! it would silently turn the method into a Gauss-Seidel hybrid.)
//!
//! # Convergence loop
//!
//! `||b||` is computed once as the reference norm. Each sweep is followed by
//! a residual computation `||b - A x||`, recorded in the convergence history
//! as both an absolute and a relative value. The stopping rule is a
//! pluggable [`ConvergenceCriterion`]; the default compares successive
//! residual norms with `eps = 1e-10`, matching the loop this crate was
//! modelled on. A [`ComputeBudget`] caps sweeps and wall time;
//! [`ComputeBudget::unlimited`] restores the original unbounded behavior.

use tracing::{debug, info};

use crate::budget::{BudgetEnforcer, BudgetViolation};
use crate::convergence::ConvergenceCriterion;
use crate::error::{SolverError, ValidationError};
use crate::norm::l2_norm;
use crate::split::JacobiSplit;
use crate::traits::SolverEngine;
use crate::types::{ComputeBudget, ConvergenceInfo, CsrMatrix, SolverResult};
use crate::validation::validate_solver_input;

/// Jacobi solver with a configurable stopping rule.
///
/// # Example
///
/// ```rust
/// use sparsolve::jacobi::JacobiSolver;
/// use sparsolve::convergence::ConvergenceCriterion;
/// use sparsolve::types::{ComputeBudget, CsrMatrix};
///
/// // Diagonally dominant 2x2: A = [[2, -0.5], [-0.5, 2]]
/// let a = CsrMatrix::from_coo(2, 2, vec![
///     (0, 0, 2.0), (0, 1, -0.5),
///     (1, 0, -0.5), (1, 1, 2.0),
/// ]);
/// let b = vec![1.0, 1.0];
///
/// let solver = JacobiSolver::new(ConvergenceCriterion::RelativeResidual { tol: 1e-8 });
/// let result = solver.solve(&a, &b, &ComputeBudget::default()).unwrap();
/// assert!(result.relative_residual < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct JacobiSolver {
    /// Stopping rule evaluated after every sweep.
    pub criterion: ConvergenceCriterion,
}

impl JacobiSolver {
    /// Create a solver with the given stopping rule.
    pub fn new(criterion: ConvergenceCriterion) -> Self {
        Self { criterion }
    }

    /// Solver with the inherited successive-difference test (`eps = 1e-10`).
    pub fn reference() -> Self {
        Self::new(ConvergenceCriterion::reference())
    }

    /// Solve `A x = b` starting from the diagonally preconditioned guess
    /// `x0[i] = b[i] / d[i]`.
    ///
    /// The matrix is split internally; use
    /// [`solve_prepared`](Self::solve_prepared) to reuse one split across
    /// several right-hand sides.
    ///
    /// # Errors
    ///
    /// See [`solve_prepared`](Self::solve_prepared).
    pub fn solve(
        &self,
        matrix: &CsrMatrix,
        rhs: &[f64],
        budget: &ComputeBudget,
    ) -> Result<SolverResult, SolverError> {
        validate_solver_input(matrix, rhs)?;
        let split = JacobiSplit::decompose(matrix)?;
        require_pivots(&split)?;

        let x0 = rhs
            .iter()
            .zip(split.diag.iter())
            .map(|(&b_i, &d_i)| b_i / d_i)
            .collect();
        self.solve_prepared(matrix, &split, rhs, x0, budget)
    }

    /// Solve `A x = b` from a caller-supplied initial guess.
    ///
    /// # Errors
    ///
    /// See [`solve_prepared`](Self::solve_prepared).
    pub fn solve_from(
        &self,
        matrix: &CsrMatrix,
        rhs: &[f64],
        x0: Vec<f64>,
        budget: &ComputeBudget,
    ) -> Result<SolverResult, SolverError> {
        validate_solver_input(matrix, rhs)?;
        let split = JacobiSplit::decompose(matrix)?;
        self.solve_prepared(matrix, &split, rhs, x0, budget)
    }

    /// Solve `A x = b` using a precomputed [`JacobiSplit`] of `matrix`.
    ///
    /// The split is computed once per matrix and is reusable across
    /// right-hand sides; `matrix` itself is still needed for the residual
    /// computation and is never mutated.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidInput`] on dimension disagreements or an
    ///   invalid criterion threshold;
    /// - [`SolverError::SingularPivot`] if any diagonal entry is zero;
    /// - [`SolverError::NumericalInstability`] if the residual becomes
    ///   NaN or infinite;
    /// - [`SolverError::NonConvergence`] when the iteration cap is reached;
    /// - [`SolverError::BudgetExhausted`] when the wall-clock limit is hit.
    pub fn solve_prepared(
        &self,
        matrix: &CsrMatrix,
        split: &JacobiSplit,
        rhs: &[f64],
        x0: Vec<f64>,
        budget: &ComputeBudget,
    ) -> Result<SolverResult, SolverError> {
        self.criterion.validate()?;

        let n = split.rank();
        if matrix.rows != n || matrix.cols != n {
            return Err(ValidationError::DimensionMismatch(format!(
                "split rank {} does not match matrix dimensions {}x{}",
                n, matrix.rows, matrix.cols,
            ))
            .into());
        }
        if rhs.len() != n {
            return Err(ValidationError::DimensionMismatch(format!(
                "rhs length {} does not match matrix rank {}",
                rhs.len(),
                n,
            ))
            .into());
        }
        if x0.len() != n {
            return Err(ValidationError::DimensionMismatch(format!(
                "initial guess length {} does not match matrix rank {}",
                x0.len(),
                n,
            ))
            .into());
        }
        require_pivots(split)?;

        let mut enforcer = BudgetEnforcer::new(budget.clone());

        if n == 0 {
            return Ok(SolverResult {
                solution: Vec::new(),
                iterations: 0,
                residual_norm: 0.0,
                relative_residual: 0.0,
                wall_time: enforcer.elapsed(),
                convergence_history: Vec::new(),
            });
        }

        let reference_norm = l2_norm(rhs);

        let mut x_prev = x0;
        let mut x_next = vec![0.0; n];
        let mut prev_residual_norm = f64::INFINITY;
        let mut residual_norm = 0.0;
        let mut history = Vec::new();

        loop {
            match enforcer.check_iteration() {
                Ok(()) => {}
                Err(BudgetViolation::Iterations) => {
                    return Err(SolverError::NonConvergence {
                        iterations: enforcer.iterations_used(),
                        residual: residual_norm,
                    });
                }
                Err(BudgetViolation::WallClock) => {
                    return Err(SolverError::BudgetExhausted {
                        reason: format!(
                            "wall-clock limit {:?} exceeded after {} sweeps",
                            budget.max_time,
                            enforcer.iterations_used(),
                        ),
                        elapsed: enforcer.elapsed(),
                    });
                }
            }
            let k = enforcer.iterations_used() - 1;

            sweep(split, rhs, &x_prev, &mut x_next);
            std::mem::swap(&mut x_prev, &mut x_next);

            residual_norm = matrix.residual_norm(&x_prev, rhs);
            if !residual_norm.is_finite() {
                return Err(SolverError::NumericalInstability {
                    iteration: k,
                    detail: format!("residual norm became {residual_norm}"),
                });
            }

            let relative_residual = if reference_norm > 0.0 {
                residual_norm / reference_norm
            } else {
                residual_norm
            };
            history.push(ConvergenceInfo {
                iteration: k,
                residual_norm,
                relative_residual,
            });
            debug!(iteration = k, residual_norm, relative_residual, "jacobi sweep");

            if self.criterion.is_met(residual_norm, prev_residual_norm, reference_norm) {
                info!(
                    iterations = k + 1,
                    residual_norm,
                    relative_residual,
                    "jacobi converged",
                );
                return Ok(SolverResult {
                    solution: x_prev,
                    iterations: k + 1,
                    residual_norm,
                    relative_residual,
                    wall_time: enforcer.elapsed(),
                    convergence_history: history,
                });
            }
            prev_residual_norm = residual_norm;
        }
    }
}

impl Default for JacobiSolver {
    fn default() -> Self {
        Self::reference()
    }
}

impl SolverEngine for JacobiSolver {
    fn solve(
        &self,
        matrix: &CsrMatrix,
        rhs: &[f64],
        budget: &ComputeBudget,
    ) -> Result<SolverResult, SolverError> {
        JacobiSolver::solve(self, matrix, rhs, budget)
    }

    fn name(&self) -> &'static str {
        "jacobi"
    }
}

/// Perform one Jacobi update of `x` in place: `x <- D^{-1} (b - R x)`.
///
/// The new iterate is computed entirely from the previous one; internally the
/// update goes through a scratch buffer allocated per call, so `x` is never
/// read after being partially written. On error `x` is left unchanged. The
/// solver loop keeps two long-lived buffers and swaps them instead; this
/// entry point trades that for a signature usable on any mutable slice.
///
/// # Errors
///
/// - [`SolverError::SingularPivot`] if the split has any zero diagonal entry;
/// - [`SolverError::InvalidInput`] if `x` or `b` length differs from the
///   split rank.
pub fn jacobi_step(
    x: &mut [f64],
    split: &JacobiSplit,
    b: &[f64],
) -> Result<(), SolverError> {
    let n = split.rank();
    if x.len() != n || b.len() != n {
        return Err(ValidationError::DimensionMismatch(format!(
            "jacobi_step: x length {} / b length {} do not match rank {}",
            x.len(),
            b.len(),
            n,
        ))
        .into());
    }
    require_pivots(split)?;

    let mut next = vec![0.0; n];
    sweep(split, b, x, &mut next);
    x.copy_from_slice(&next);
    Ok(())
}

/// One full Jacobi sweep: `x_next[i] = (b[i] - sum_j R[i][j] * x_prev[j]) / d[i]`.
///
/// Rows are independent; with the `parallel` feature the sweep runs
/// fork-join across rows, with an implicit barrier before the caller swaps
/// buffers for the next sweep.
fn sweep(split: &JacobiSplit, b: &[f64], x_prev: &[f64], x_next: &mut [f64]) {
    let r = &split.remainder;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        x_next
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, out)| {
                let mut s = 0.0;
                for idx in r.row_ptr[i]..r.row_ptr[i + 1] {
                    s += r.values[idx] * x_prev[r.col_indices[idx]];
                }
                *out = (b[i] - s) / split.diag[i];
            });
    }

    #[cfg(not(feature = "parallel"))]
    for i in 0..r.rows {
        let mut s = 0.0;
        for idx in r.row_ptr[i]..r.row_ptr[i + 1] {
            s += r.values[idx] * x_prev[r.col_indices[idx]];
        }
        x_next[i] = (b[i] - s) / split.diag[i];
    }
}

/// Fail with [`SolverError::SingularPivot`] if the split has a zero pivot.
///
/// Zero diagonals are detected when the split is built; refusing to iterate
/// is this crate's replacement for silently dividing by zero and returning
/// `inf`/`NaN`.
fn require_pivots(split: &JacobiSplit) -> Result<(), SolverError> {
    match split.zero_pivot_rows().first() {
        Some(&row) => Err(SolverError::SingularPivot { row }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
