//! Factory for creating SAT solver instances based on configuration

use super::clause::ClauseSet;
use super::solver::{CadicalSolver, DpllSolver, SatBackend, SolveOutcome, SolverError};
use crate::config::SolverBackend;

/// Unified SAT solver interface that can use different backends
pub enum UnifiedSatSolver {
    Cadical(CadicalSolver),
    Dpll(DpllSolver),
}

impl UnifiedSatSolver {
    /// Create a new solver instance based on the specified backend
    pub fn new(backend: SolverBackend) -> Self {
        match backend {
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalSolver::new()),
            SolverBackend::Dpll => UnifiedSatSolver::Dpll(DpllSolver::new()),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
            UnifiedSatSolver::Dpll(_) => SolverBackend::Dpll,
        }
    }
}

impl SatBackend for UnifiedSatSolver {
    fn name(&self) -> &'static str {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.name(),
            UnifiedSatSolver::Dpll(solver) => solver.name(),
        }
    }

    fn solve(&mut self, clauses: &ClauseSet) -> Result<SolveOutcome, SolverError> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.solve(clauses),
            UnifiedSatSolver::Dpll(solver) => solver.solve(clauses),
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::Cadical(CadicalSolver::new())
    }
}
