//! Clause generation for trap/gem grids

use super::cardinality::{CardinalityEncoder, NaiveEncoder};
use super::clause::{Clause, ClauseSet};
use super::variables::{VarId, VariableAllocator};
use crate::puzzle::{Cell, Grid};
use log::{debug, warn};

/// Output of one encode pass. Owns the variables and clauses it produced.
#[derive(Debug)]
pub struct Encoding {
    pub clauses: ClauseSet,
    pub variables: VariableAllocator,
    pub statistics: EncodingStatistics,
}

/// Builds the CNF instance for a grid
pub struct ClauseSetBuilder {
    encoder: Box<dyn CardinalityEncoder>,
}

impl Default for ClauseSetBuilder {
    fn default() -> Self {
        Self::new(Box::new(NaiveEncoder))
    }
}

impl ClauseSetBuilder {
    pub fn new(encoder: Box<dyn CardinalityEncoder>) -> Self {
        Self { encoder }
    }

    /// Name of the cardinality encoding in use
    pub fn strategy(&self) -> &'static str {
        self.encoder.name()
    }

    /// Encode a whole grid.
    ///
    /// Inconsistent clues are not detected here; they make the clause set
    /// unsatisfiable instead.
    pub fn build(&self, grid: &Grid) -> Encoding {
        let mut variables = VariableAllocator::new();
        let mut clauses = ClauseSet::new();
        let mut impossible_clues = 0;

        // Pass 1: one variable per unknown or pre-resolved cell
        for (coord, cell) in grid.iter() {
            match cell {
                Cell::Unknown => {
                    variables.id_for(coord);
                }
                Cell::Trap => {
                    let var = variables.id_for(coord);
                    clauses.insert(Clause::unit(var));
                }
                Cell::Gem => {
                    let var = variables.id_for(coord);
                    clauses.insert(Clause::unit(-var));
                }
                Cell::Clue(_) | Cell::Opaque(_) => {}
            }
        }

        // Pass 2: exactly-k over the neighbours of every clue
        for ((row, col), cell) in grid.iter() {
            let Some(k) = cell.clue() else { continue };

            let neighbor_vars: Vec<VarId> = grid
                .neighbors(row, col)
                .into_iter()
                .filter_map(|coord| variables.get(coord))
                .collect();

            let k = usize::from(k);
            if k > neighbor_vars.len() {
                warn!(
                    "clue {} at ({}, {}) has only {} candidate neighbours; puzzle cannot be satisfied",
                    k,
                    row,
                    col,
                    neighbor_vars.len()
                );
                impossible_clues += 1;
            }

            let added = clauses.extend(self.encoder.exactly_k(&neighbor_vars, k, &mut variables));
            debug!("clue {} at ({}, {}) over {} vars added {} clauses", k, row, col, neighbor_vars.len(), added);
        }

        let variable_stats = variables.statistics();
        let statistics = EncodingStatistics {
            rows: grid.rows,
            cols: grid.cols,
            strategy: self.encoder.name(),
            clue_cells: grid.clue_count(),
            unknown_cells: grid.unknown_count(),
            cell_variables: variable_stats.cell_variables,
            auxiliary_variables: variable_stats.auxiliary_variables,
            total_clauses: clauses.len(),
            duplicates_suppressed: clauses.duplicates_suppressed(),
            impossible_clues,
        };

        debug!(
            "encoded {}x{} grid: {} variables, {} clauses",
            grid.rows,
            grid.cols,
            variable_stats.total_variables,
            clauses.len()
        );

        Encoding { clauses, variables, statistics }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EncodingStatistics {
    pub rows: usize,
    pub cols: usize,
    pub strategy: &'static str,
    pub clue_cells: usize,
    pub unknown_cells: usize,
    pub cell_variables: usize,
    pub auxiliary_variables: usize,
    pub total_clauses: usize,
    pub duplicates_suppressed: usize,
    /// Clues demanding more traps than they have candidate neighbours
    pub impossible_clues: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.rows, self.cols)?;
        writeln!(f, "  Cardinality encoding: {}", self.strategy)?;
        writeln!(f, "  Clue cells: {}", self.clue_cells)?;
        writeln!(f, "  Unknown cells: {}", self.unknown_cells)?;
        writeln!(f, "  Cell variables: {}", self.cell_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        writeln!(f, "  Duplicates suppressed: {}", self.duplicates_suppressed)?;
        if self.impossible_clues > 0 {
            writeln!(f, "  Impossible clues: {}", self.impossible_clues)?;
        }
        Ok(())
    }
}
