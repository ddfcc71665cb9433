//! Jacobi iterative solver for sparse linear systems in CSR form.
//!
//! This crate solves `Ax = b` for square sparse matrices stored in
//! compressed sparse row layout, using the stationary Jacobi method: the
//! matrix is split once into its diagonal `D` and off-diagonal remainder
//! `R`, and the iteration `x <- D^{-1} (b - R x)` runs until a configurable
//! stopping rule holds.
//!
//! # Layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`types`] | [`CsrMatrix`](types::CsrMatrix), budgets, result types |
//! | [`split`] | diagonal / off-diagonal decomposition |
//! | [`jacobi`] | the sweep and the solver loop |
//! | [`norm`] | L2 norm evaluation |
//! | [`convergence`] | pluggable stopping rules |
//! | [`validation`] | eager structural input checks |
//! | [`budget`] | iteration / wall-clock enforcement |
//! | [`error`] | `thiserror` error types |
//! | [`traits`] | the [`SolverEngine`](traits::SolverEngine) seam |
//!
//! # Example
//!
//! ```rust
//! use sparsolve::convergence::ConvergenceCriterion;
//! use sparsolve::jacobi::JacobiSolver;
//! use sparsolve::types::{ComputeBudget, CsrMatrix};
//!
//! // Diagonally dominant 3x3 tridiagonal system.
//! let a = CsrMatrix::from_coo(3, 3, vec![
//!     (0, 0, 2.0), (0, 1, -0.5),
//!     (1, 0, -0.5), (1, 1, 2.0), (1, 2, -0.5),
//!     (2, 1, -0.5), (2, 2, 2.0),
//! ]);
//! let b = vec![1.0, 0.0, 1.0];
//!
//! let solver = JacobiSolver::new(ConvergenceCriterion::RelativeResidual { tol: 1e-8 });
//! let result = solver.solve(&a, &b, &ComputeBudget::default()).unwrap();
//! assert!(result.relative_residual < 1e-8);
//! ```
//!
//! With the `parallel` feature the per-row work inside a single sweep runs
//! fork-join on rayon; iterations themselves are always sequential, since
//! each depends on the full previous iterate.

pub mod budget;
pub mod convergence;
pub mod error;
pub mod jacobi;
pub mod norm;
pub mod split;
pub mod traits;
pub mod types;
pub mod validation;

pub use convergence::ConvergenceCriterion;
pub use error::{SolverError, ValidationError};
pub use jacobi::{jacobi_step, JacobiSolver};
pub use split::JacobiSplit;
pub use traits::SolverEngine;
pub use types::{ComputeBudget, ConvergenceInfo, CsrMatrix, SolverResult};
