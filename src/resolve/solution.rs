//! Resolution records for solved puzzles

use crate::puzzle::{Cell, Grid};
use crate::sat::EncodingStatistics;
use serde::Serialize;
use std::time::Duration;

/// A puzzle together with the grid the solver produced for it
#[derive(Debug, Clone, Serialize)]
pub struct SolvedPuzzle {
    pub original: Grid,
    pub resolved: Grid,
    pub statistics: EncodingStatistics,
    /// Time taken to encode, solve and project
    #[serde(skip)]
    pub solve_time: Duration,
    pub summary: ResolutionSummary,
}

/// Counts over the resolved cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    pub traps_found: usize,
    pub gems_found: usize,
    pub total_traps: usize,
    pub total_gems: usize,
    pub solve_time_ms: u64,
}

/// Final outcome of solving a puzzle
#[derive(Debug, Clone)]
pub enum Resolution {
    Solved(SolvedPuzzle),
    /// The clues admit no assignment
    NoSolution(EncodingStatistics),
}

impl SolvedPuzzle {
    pub fn new(original: Grid, resolved: Grid, statistics: EncodingStatistics, solve_time: Duration) -> Self {
        let summary = ResolutionSummary::analyze(&original, &resolved, solve_time);
        Self {
            original,
            resolved,
            statistics,
            solve_time,
            summary,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file as JSON
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl ResolutionSummary {
    fn analyze(original: &Grid, resolved: &Grid, solve_time: Duration) -> Self {
        let newly = |target: &Cell| {
            original
                .cells
                .iter()
                .zip(&resolved.cells)
                .filter(|(before, after)| **before == Cell::Unknown && *after == target)
                .count()
        };

        Self {
            traps_found: newly(&Cell::Trap),
            gems_found: newly(&Cell::Gem),
            total_traps: resolved.count(&Cell::Trap),
            total_gems: resolved.count(&Cell::Gem),
            solve_time_ms: solve_time.as_millis() as u64,
        }
    }
}

impl Resolution {
    pub fn is_solved(&self) -> bool {
        matches!(self, Resolution::Solved(_))
    }

    pub fn solved(&self) -> Option<&SolvedPuzzle> {
        match self {
            Resolution::Solved(solved) => Some(solved),
            Resolution::NoSolution(_) => None,
        }
    }

    pub fn statistics(&self) -> &EncodingStatistics {
        match self {
            Resolution::Solved(solved) => &solved.statistics,
            Resolution::NoSolution(statistics) => statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_grid;
    use crate::sat::ClauseSetBuilder;

    fn solved() -> SolvedPuzzle {
        let original = parse_grid("1, _, T\n_, G, _").unwrap();
        let resolved = parse_grid("1, G, T\nG, G, T").unwrap();
        let statistics = ClauseSetBuilder::default().build(&original).statistics;
        SolvedPuzzle::new(original, resolved, statistics, Duration::from_millis(12))
    }

    #[test]
    fn test_summary() {
        let summary = solved().summary;
        assert_eq!(summary.traps_found, 1);
        assert_eq!(summary.gems_found, 2);
        assert_eq!(summary.total_traps, 2);
        assert_eq!(summary.total_gems, 3);
        assert_eq!(summary.solve_time_ms, 12);
    }

    #[test]
    fn test_json_output() {
        let json = solved().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["resolved"]["rows"], 2);
        assert_eq!(value["resolved"]["cells"][2], "trap");
        assert_eq!(value["original"]["cells"][0]["clue"], 1);
        assert_eq!(value["statistics"]["strategy"], "naive");
        assert_eq!(value["summary"]["traps_found"], 1);
        assert!(value.get("solve_time").is_none());
    }

    #[test]
    fn test_resolution_accessors() {
        let solved = solved();
        let statistics = solved.statistics.clone();

        let resolution = Resolution::Solved(solved);
        assert!(resolution.is_solved());
        assert!(resolution.solved().is_some());

        let none = Resolution::NoSolution(statistics.clone());
        assert!(!none.is_solved());
        assert_eq!(none.statistics(), &statistics);
    }
}
