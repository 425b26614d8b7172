//! SAT encoder for trap/gem puzzles

use super::builder::{ClauseSetBuilder, Encoding, EncodingStatistics};
use super::cardinality::encoder_for;
use super::solver::{SatBackend, SolveOutcome};
use super::solver_factory::UnifiedSatSolver;
use crate::config::Settings;
use crate::puzzle::Grid;
use crate::resolve::projector::project;
use anyhow::{Context, Result};
use log::info;
use std::time::{Duration, Instant};

/// Outcome of one encode / solve / project pass
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The resolved grid, or `None` when the clauses have no model
    pub resolved: Option<Grid>,
    pub statistics: EncodingStatistics,
    pub solve_time: Duration,
}

/// Main SAT encoder for trap/gem puzzles
pub struct PuzzleEncoder {
    builder: ClauseSetBuilder,
    solver: UnifiedSatSolver,
}

impl PuzzleEncoder {
    /// Create a new SAT encoder with the given settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            builder: ClauseSetBuilder::new(encoder_for(settings.encoding.cardinality)),
            solver: UnifiedSatSolver::new(settings.solver.backend),
        }
    }

    /// Use an explicit builder and solver
    pub fn with_parts(builder: ClauseSetBuilder, solver: UnifiedSatSolver) -> Self {
        Self { builder, solver }
    }

    /// Build the CNF instance for a grid without solving it
    pub fn encode(&self, grid: &Grid) -> Encoding {
        self.builder.build(grid)
    }

    /// Encode, solve once and project the model back onto the grid
    pub fn solve(&mut self, grid: &Grid) -> Result<SolveReport> {
        let start_time = Instant::now();

        let Encoding { clauses, variables, statistics } = self.encode(grid);
        info!(
            "Generated {} clauses with {} variables ({} encoding)",
            clauses.len(),
            variables.variable_count(),
            statistics.strategy
        );

        let outcome = self
            .solver
            .solve(&clauses)
            .with_context(|| format!("SAT solving failed ({})", self.solver.name()))?;

        let resolved = match outcome {
            SolveOutcome::Satisfiable(model) => Some(project(grid, &variables, &model.true_variables())),
            SolveOutcome::Unsatisfiable => None,
        };

        let solve_time = start_time.elapsed();
        info!(
            "{} in {:.3}s",
            if resolved.is_some() { "Found a model" } else { "No model exists" },
            solve_time.as_secs_f64()
        );

        Ok(SolveReport { resolved, statistics, solve_time })
    }

    /// Check if the problem is likely to be cheap (heuristic check)
    pub fn estimate_complexity(&self, grid: &Grid) -> ComplexityEstimate {
        let unknown_cells = grid.unknown_count();
        let estimate = self.encode(grid).statistics;

        let complexity_level = if unknown_cells < 64 {
            ComplexityLevel::Low
        } else if unknown_cells < 1024 {
            ComplexityLevel::Medium
        } else if unknown_cells < 16384 {
            ComplexityLevel::High
        } else {
            ComplexityLevel::VeryHigh
        };

        ComplexityEstimate {
            complexity_level,
            unknown_cells,
            variables: estimate.cell_variables + estimate.auxiliary_variables,
            clauses: estimate.total_clauses,
            clue_density: estimate.clue_cells as f64 / (grid.rows * grid.cols) as f64,
            impossible_clues: estimate.impossible_clues,
        }
    }
}

/// Complexity estimate for the problem
#[derive(Debug, Clone)]
pub struct ComplexityEstimate {
    pub complexity_level: ComplexityLevel,
    pub unknown_cells: usize,
    pub variables: usize,
    pub clauses: usize,
    pub clue_density: f64,
    pub impossible_clues: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for ComplexityEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem Complexity Estimate:")?;
        writeln!(f, "  Complexity level: {:?}", self.complexity_level)?;
        writeln!(f, "  Unknown cells: {}", self.unknown_cells)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Clauses: {}", self.clauses)?;
        writeln!(f, "  Clue density: {:.2}%", self.clue_density * 100.0)?;

        let recommendation = if self.impossible_clues > 0 {
            "Unsolvable: some clues exceed their neighbourhood"
        } else {
            match self.complexity_level {
                ComplexityLevel::Low => "Should solve quickly",
                ComplexityLevel::Medium => "May take some time to solve",
                ComplexityLevel::High => "Consider the sequential_counter encoding",
                ComplexityLevel::VeryHigh => "Very large; use the sequential_counter encoding with cadical",
            }
        };
        writeln!(f, "  Recommendation: {}", recommendation)?;

        Ok(())
    }
}
