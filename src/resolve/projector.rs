//! Maps a SAT model back onto the puzzle grid

use crate::puzzle::{Cell, Grid};
use crate::sat::{VarId, VariableAllocator};
use std::collections::HashSet;

/// Resolve every `Unknown` cell from the set of true variables.
///
/// Unknowns whose variable is true become `Trap`, all others `Gem`.
/// Clues, known cells and opaque symbols are copied unchanged.
pub fn project(grid: &Grid, variables: &VariableAllocator, true_vars: &HashSet<VarId>) -> Grid {
    let cells = grid
        .iter()
        .map(|(coord, cell)| match cell {
            Cell::Unknown => match variables.get(coord) {
                Some(var) if true_vars.contains(&var) => Cell::Trap,
                _ => Cell::Gem,
            },
            other => other.clone(),
        })
        .collect();

    Grid {
        rows: grid.rows,
        cols: grid.cols,
        cells,
    }
}
