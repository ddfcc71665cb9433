//! End-to-end tests for the Jacobi solver.

mod helpers;

use std::time::Duration;

use approx::assert_abs_diff_eq;
use helpers::{dense_solve, l2_norm, random_diag_dominant_csr, random_vector, relative_error};
use sparsolve::{
    jacobi_step, ComputeBudget, ConvergenceCriterion, CsrMatrix, JacobiSolver, JacobiSplit,
    SolverEngine, SolverError,
};

#[test]
fn five_by_five_diagonal_end_to_end() {
    // Diagonal [2,2,2,2,2], b = e_0: exact solution [0.5, 0, 0, 0, 0]
    // with a zero residual from the first sweep.
    let a = CsrMatrix::from_coo(5, 5, (0..5).map(|i| (i, i, 2.0)).collect::<Vec<_>>());
    let b = vec![1.0, 0.0, 0.0, 0.0, 0.0];

    let result = JacobiSolver::reference()
        .solve(&a, &b, &ComputeBudget::default())
        .unwrap();
    assert_eq!(result.solution, vec![0.5, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(result.convergence_history[0].residual_norm, 0.0);
}

#[test]
fn agrees_with_dense_reference_solver() {
    for seed in [5u64, 17, 91] {
        let n = 40;
        let a = random_diag_dominant_csr(n, 0.2, seed);
        let b = random_vector(n, seed + 1);

        let solver = JacobiSolver::new(ConvergenceCriterion::RelativeResidual { tol: 1e-12 });
        let result = solver.solve(&a, &b, &ComputeBudget::default()).unwrap();
        let exact = dense_solve(&a, &b);

        assert!(
            relative_error(&result.solution, &exact) < 1e-8,
            "seed {seed}: relative error {}",
            relative_error(&result.solution, &exact),
        );
        for (&xi, &ei) in result.solution.iter().zip(exact.iter()) {
            assert_abs_diff_eq!(xi, ei, epsilon = 1e-8);
        }
    }
}

#[test]
fn relative_residual_drops_below_threshold() {
    // Diagonally dominant systems drive the relative residual below 1e-6
    // within a bounded number of sweeps from the preconditioned start.
    let n = 100;
    let a = random_diag_dominant_csr(n, 0.1, 77);
    let b = random_vector(n, 78);

    let solver = JacobiSolver::new(ConvergenceCriterion::RelativeResidual { tol: 1e-6 });
    let budget = ComputeBudget {
        max_iterations: 500,
        ..ComputeBudget::default()
    };
    let result = solver.solve(&a, &b, &budget).unwrap();
    assert!(result.relative_residual < 1e-6);
    assert!(result.iterations <= 500);
}

#[test]
fn successive_difference_matches_residual_criterion_here() {
    // On a well-conditioned system the inherited test and a residual test
    // land on essentially the same answer.
    let n = 50;
    let a = random_diag_dominant_csr(n, 0.15, 13);
    let b = random_vector(n, 14);
    let budget = ComputeBudget::default();

    let inherited = JacobiSolver::reference().solve(&a, &b, &budget).unwrap();
    let strict = JacobiSolver::new(ConvergenceCriterion::RelativeResidual { tol: 1e-10 })
        .solve(&a, &b, &budget)
        .unwrap();

    assert!(relative_error(&inherited.solution, &strict.solution) < 1e-6);
}

#[test]
fn singular_pivot_detected_before_iterating() {
    // Zero diagonal at row 2, nonzero demand there: an error, not NaN.
    let a = CsrMatrix::from_coo(
        3,
        3,
        vec![(0, 0, 2.0), (1, 1, 2.0), (2, 0, 1.0)],
    );
    let b = vec![0.0, 0.0, 1.0];
    let err = JacobiSolver::reference()
        .solve(&a, &b, &ComputeBudget::default())
        .unwrap_err();
    assert!(matches!(err, SolverError::SingularPivot { row: 2 }));
}

#[test]
fn jacobi_step_refuses_zero_pivot() {
    let a = CsrMatrix::from_coo(2, 2, vec![(0, 0, 1.0), (1, 0, 1.0)]);
    let split = JacobiSplit::decompose(&a).unwrap();
    let mut x = vec![0.0, 0.0];
    let err = jacobi_step(&mut x, &split, &[1.0, 1.0]).unwrap_err();
    assert!(matches!(err, SolverError::SingularPivot { row: 1 }));
}

#[test]
fn three_right_hand_sides_over_one_split() {
    // The split is computed once and reused: unit vector RHS, a different
    // unit vector, then all ones.
    let n = 30;
    let a = random_diag_dominant_csr(n, 0.2, 55);
    let split = JacobiSplit::decompose(&a).unwrap();
    let solver = JacobiSolver::reference();
    let budget = ComputeBudget::default();

    let mut rhs_cases: Vec<Vec<f64>> = vec![vec![0.0; n], vec![0.0; n], vec![1.0; n]];
    rhs_cases[0][0] = 1.0;
    rhs_cases[1][n - 1] = 1.0;

    for b in &rhs_cases {
        let x0 = b
            .iter()
            .zip(split.diag.iter())
            .map(|(&bi, &di)| bi / di)
            .collect();
        let result = solver.solve_prepared(&a, &split, b, x0, &budget).unwrap();

        // Residual check against the full matrix.
        let ax = a.mat_vec(&result.solution).unwrap();
        let mut r = 0.0;
        for i in 0..n {
            r += (b[i] - ax[i]) * (b[i] - ax[i]);
        }
        let norm_b = l2_norm(b);
        assert!(r.sqrt() / norm_b < 1e-6, "relative residual {}", r.sqrt() / norm_b);
    }
}

#[test]
fn iteration_cap_raises_non_convergence() {
    let a = random_diag_dominant_csr(20, 0.2, 31);
    let b = random_vector(20, 32);
    let solver = JacobiSolver::new(ConvergenceCriterion::AbsoluteResidual { tol: 1e-300 });
    let budget = ComputeBudget {
        max_iterations: 5,
        max_time: Duration::from_secs(30),
    };
    let err = solver.solve(&a, &b, &budget).unwrap_err();
    assert!(matches!(err, SolverError::NonConvergence { iterations: 5, .. }));
}

#[test]
fn unlimited_budget_preserves_reference_semantics() {
    // With the cap disabled the loop runs until the inherited test fires,
    // exactly like the loop it was modelled on.
    let a = random_diag_dominant_csr(15, 0.3, 2);
    let b = random_vector(15, 3);
    let result = JacobiSolver::reference()
        .solve(&a, &b, &ComputeBudget::unlimited())
        .unwrap();
    assert!(result.residual_norm.is_finite());
    assert!(!result.convergence_history.is_empty());
}

#[test]
fn solve_from_accepts_warm_start() {
    let n = 25;
    let a = random_diag_dominant_csr(n, 0.2, 61);
    let b = random_vector(n, 62);
    let budget = ComputeBudget::default();
    let solver = JacobiSolver::new(ConvergenceCriterion::RelativeResidual { tol: 1e-10 });

    let cold = solver.solve(&a, &b, &budget).unwrap();
    // Warm-starting from the converged solution needs at most a sweep or two.
    let warm = solver
        .solve_from(&a, &b, cold.solution.clone(), &budget)
        .unwrap();
    assert!(warm.iterations <= 2, "warm start took {} sweeps", warm.iterations);
    assert!(relative_error(&warm.solution, &cold.solution) < 1e-8);
}

#[test]
fn history_iterations_are_sequential() {
    let a = random_diag_dominant_csr(10, 0.3, 8);
    let b = random_vector(10, 9);
    let result = JacobiSolver::reference()
        .solve(&a, &b, &ComputeBudget::default())
        .unwrap();
    for (k, info) in result.convergence_history.iter().enumerate() {
        assert_eq!(info.iteration, k);
    }
    assert_eq!(result.iterations, result.convergence_history.len());
}

#[test]
fn trait_object_usage() {
    let engines: Vec<Box<dyn SolverEngine>> = vec![
        Box::new(JacobiSolver::reference()),
        Box::new(JacobiSolver::new(ConvergenceCriterion::AbsoluteResidual { tol: 1e-9 })),
    ];
    let a = random_diag_dominant_csr(12, 0.25, 19);
    let b = random_vector(12, 20);
    for engine in &engines {
        let result = engine.solve(&a, &b, &ComputeBudget::default()).unwrap();
        assert_eq!(engine.name(), "jacobi");
        assert!(result.residual_norm.is_finite());
    }
}
