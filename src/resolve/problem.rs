//! Trap/gem puzzle problem definition

use super::solution::{Resolution, SolvedPuzzle};
use super::validator::ResolutionValidator;
use crate::config::Settings;
use crate::puzzle::{load_grid_from_file, Grid};
use crate::sat::encoder::{ComplexityEstimate, PuzzleEncoder};
use crate::sat::EncodingStatistics;
use anyhow::{Context, Result};
use log::{info, warn};

/// A puzzle loaded from configuration, ready to be solved once
pub struct PuzzleProblem {
    settings: Settings,
    grid: Grid,
    encoder: PuzzleEncoder,
    validator: ResolutionValidator,
}

impl PuzzleProblem {
    /// Create a new problem, loading the grid named in the settings
    pub fn new(settings: Settings) -> Result<Self> {
        let grid = load_grid_from_file(&settings.input.puzzle_file)
            .context("Failed to load puzzle file")?;

        Self::with_grid(settings, grid)
    }

    /// Create a problem with an explicit grid.
    ///
    /// The grid is checked structurally first; a `GridError` is returned
    /// for malformed grids instead of encoding them.
    pub fn with_grid(settings: Settings, grid: Grid) -> Result<Self> {
        grid.validate()?;
        let encoder = PuzzleEncoder::new(&settings);

        Ok(Self {
            settings,
            grid,
            encoder,
            validator: ResolutionValidator::new(),
        })
    }

    /// Solve the puzzle. `NoSolution` is a normal outcome, not an error.
    pub fn solve(&mut self) -> Result<Resolution> {
        info!(
            "Solving {}x{} puzzle with {} unknown cells and {} clues",
            self.grid.rows,
            self.grid.cols,
            self.grid.unknown_count(),
            self.grid.clue_count()
        );

        let report = self.encoder.solve(&self.grid)?;

        let Some(resolved) = report.resolved else {
            warn!("No solution exists for this puzzle");
            return Ok(Resolution::NoSolution(report.statistics));
        };

        if self.settings.encoding.validate_resolution {
            let validation = self.validator.validate(&self.grid, &resolved);
            if !validation.is_valid {
                anyhow::bail!("Solver model does not satisfy the puzzle:\n{}", validation);
            }
        }

        Ok(Resolution::Solved(SolvedPuzzle::new(
            self.grid.clone(),
            resolved,
            report.statistics,
            report.solve_time,
        )))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get encoding statistics without solving
    pub fn encoding_statistics(&self) -> EncodingStatistics {
        self.encoder.encode(&self.grid).statistics
    }

    pub fn estimate_complexity(&self) -> ComplexityEstimate {
        self.encoder.estimate_complexity(&self.grid)
    }
}
