//! Validation of resolved grids against their clues

use crate::puzzle::{Cell, Coord, Grid};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

/// Checks that a resolved grid is a legal answer to a puzzle
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolutionValidator;

/// Result of resolution validation
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<Violation>,
    pub metrics: ValidationMetrics,
}

/// A single reason a resolution is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    /// A clue, known cell or opaque symbol was altered
    ChangedCell { coord: Coord, expected: Cell, actual: Cell },
    Unresolved { coord: Coord },
    /// A clue does not see the number of traps it announces
    ClueMismatch { coord: Coord, expected: u8, actual: usize },
}

/// Performance metrics for validation
#[derive(Debug, Clone, Default)]
pub struct ValidationMetrics {
    pub validation_time_ms: u64,
    pub clues_checked: usize,
    pub cells_checked: usize,
}

impl ResolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `resolved` as an answer to `original`
    pub fn validate(&self, original: &Grid, resolved: &Grid) -> ValidationReport {
        let start_time = Instant::now();

        if (original.rows, original.cols) != (resolved.rows, resolved.cols) {
            return ValidationReport::from_violations(
                vec![Violation::ShapeMismatch {
                    expected: (original.rows, original.cols),
                    actual: (resolved.rows, resolved.cols),
                }],
                ValidationMetrics::default(),
            );
        }

        let mut violations: Vec<Violation> = original
            .iter()
            .zip(resolved.cells.iter())
            .filter_map(|((coord, before), after)| match before {
                Cell::Unknown if !matches!(after, Cell::Trap | Cell::Gem) => {
                    Some(Violation::Unresolved { coord })
                }
                Cell::Unknown => None,
                _ if before != after => Some(Violation::ChangedCell {
                    coord,
                    expected: before.clone(),
                    actual: after.clone(),
                }),
                _ => None,
            })
            .collect();

        let (clue_violations, clues_checked) = Self::clue_violations(resolved);
        violations.extend(clue_violations);

        let metrics = ValidationMetrics {
            validation_time_ms: start_time.elapsed().as_millis() as u64,
            clues_checked,
            cells_checked: resolved.cells.len(),
        };

        ValidationReport::from_violations(violations, metrics)
    }

    /// Check only the clue counts of a grid, without an original to compare to
    pub fn check_clues(&self, grid: &Grid) -> ValidationReport {
        let start_time = Instant::now();

        let mut violations: Vec<Violation> = grid
            .iter()
            .filter(|(_, cell)| **cell == Cell::Unknown)
            .map(|(coord, _)| Violation::Unresolved { coord })
            .collect();

        let (clue_violations, clues_checked) = Self::clue_violations(grid);
        violations.extend(clue_violations);

        let metrics = ValidationMetrics {
            validation_time_ms: start_time.elapsed().as_millis() as u64,
            clues_checked,
            cells_checked: grid.cells.len(),
        };

        ValidationReport::from_violations(violations, metrics)
    }

    /// Every clue must see exactly `k` traps
    fn clue_violations(grid: &Grid) -> (Vec<Violation>, usize) {
        let clues: Vec<(Coord, u8)> = grid
            .iter()
            .filter_map(|(coord, cell)| cell.clue().map(|k| (coord, k)))
            .collect();

        let violations = clues
            .par_iter()
            .filter_map(|&((row, col), k)| {
                let traps = grid.count_neighbors(row, col, |cell| *cell == Cell::Trap);
                (traps != usize::from(k)).then_some(Violation::ClueMismatch {
                    coord: (row, col),
                    expected: k,
                    actual: traps,
                })
            })
            .collect();

        (violations, clues.len())
    }
}

impl ValidationReport {
    fn from_violations(violations: Vec<Violation>, metrics: ValidationMetrics) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
            metrics,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::ShapeMismatch { expected, actual } => write!(
                f,
                "grid is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Violation::ChangedCell { coord, expected, actual } => {
                write!(f, "cell ({}, {}) changed from {} to {}", coord.0, coord.1, expected, actual)
            }
            Violation::Unresolved { coord } => write!(f, "cell ({}, {}) is still unknown", coord.0, coord.1),
            Violation::ClueMismatch { coord, expected, actual } => write!(
                f,
                "clue at ({}, {}) expects {} traps, found {}",
                coord.0, coord.1, expected, actual
            ),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Clues checked: {}", self.metrics.clues_checked)?;
        writeln!(f, "  Cells checked: {}", self.metrics.cells_checked)?;
        writeln!(f, "  Validation time: {}ms", self.metrics.validation_time_ms)?;

        if !self.violations.is_empty() {
            writeln!(f, "  Violations:")?;
            for violation in self.violations.iter().take(10) {
                writeln!(f, "    {}", violation)?;
            }
            if self.violations.len() > 10 {
                writeln!(f, "    ... and {} more", self.violations.len() - 10)?;
            }
        }

        Ok(())
    }
}
