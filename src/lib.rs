//! Trap/Gem Grid SAT Solver
//!
//! This library resolves Minesweeper-style trap/gem grids by encoding the
//! numeric clues as exactly-k cardinality constraints and solving the
//! resulting CNF instance.

pub mod config;
pub mod puzzle;
pub mod sat;
pub mod resolve;
pub mod utils;

pub use config::Settings;
pub use puzzle::{Cell, Grid};
pub use resolve::{PuzzleProblem, Resolution};

use anyhow::Result;

/// Main entry point for solving a puzzle described by settings
pub fn solve_puzzle(settings: Settings) -> Result<Resolution> {
    let mut problem = PuzzleProblem::new(settings)?;
    problem.solve()
}

/// Solve an in-memory grid with the given settings.
///
/// Fails with a `GridError` if the grid is structurally malformed.
pub fn solve_grid(settings: Settings, grid: Grid) -> Result<Resolution> {
    PuzzleProblem::with_grid(settings, grid)?.solve()
}
