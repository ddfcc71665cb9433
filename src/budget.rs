//! Budget enforcement for the solver loop.
//!
//! [`BudgetEnforcer`] tracks wall-clock time and sweep count against a
//! [`ComputeBudget`]. The solver calls
//! [`check_iteration`](BudgetEnforcer::check_iteration) at the top of each
//! sweep; a violation reports *which* limit was hit so the solver can map
//! it to the right error (iteration cap to non-convergence, wall clock to
//! budget exhaustion).

use std::time::{Duration, Instant};

use crate::types::ComputeBudget;

/// Which budget limit a solve ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetViolation {
    /// The sweep count reached `max_iterations`.
    Iterations,
    /// Wall-clock time exceeded `max_time`.
    WallClock,
}

/// Enforces wall-time and iteration limits during a solve.
///
/// Create one at the start of a solve; the clock starts immediately.
/// Intentionally non-`Clone` so each solve owns exactly one.
pub struct BudgetEnforcer {
    start: Instant,
    budget: ComputeBudget,
    iterations_used: usize,
}

impl BudgetEnforcer {
    /// Create a new enforcer and start the clock.
    pub fn new(budget: ComputeBudget) -> Self {
        Self {
            start: Instant::now(),
            budget,
            iterations_used: 0,
        }
    }

    /// Account for one sweep and check both limits.
    ///
    /// Must be called once per sweep, at the top of the loop body.
    ///
    /// # Errors
    ///
    /// Returns the [`BudgetViolation`] describing the limit that was hit.
    pub fn check_iteration(&mut self) -> Result<(), BudgetViolation> {
        if self.iterations_used >= self.budget.max_iterations {
            return Err(BudgetViolation::Iterations);
        }
        self.iterations_used += 1;

        if self.start.elapsed() > self.budget.max_time {
            return Err(BudgetViolation::WallClock);
        }
        Ok(())
    }

    /// Wall-clock time since the enforcer was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Number of sweeps accounted for so far.
    #[inline]
    pub fn iterations_used(&self) -> usize {
        self.iterations_used
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
