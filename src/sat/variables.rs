//! Variable management for SAT encoding

use crate::puzzle::Coord;
use std::collections::HashMap;

/// SAT variable identifier (positive, DIMACS style)
pub type VarId = i32;

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// "This cell holds a trap"
    Cell { row: usize, col: usize },
    /// Auxiliary variable introduced by a cardinality encoding
    Auxiliary(usize),
}

/// Maps grid cells (and auxiliaries) to SAT variable ids for one encode pass
#[derive(Debug, Default)]
pub struct VariableAllocator {
    cell_map: HashMap<Coord, VarId>,
    /// Reverse lookup, indexed by `id - 1`
    variables: Vec<VariableType>,
}

impl VariableAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the variable id for a cell
    pub fn id_for(&mut self, coord: Coord) -> VarId {
        if let Some(&id) = self.cell_map.get(&coord) {
            return id;
        }

        let id = self.push(VariableType::Cell { row: coord.0, col: coord.1 });
        self.cell_map.insert(coord, id);
        id
    }

    /// Look up a cell's variable without allocating
    pub fn get(&self, coord: Coord) -> Option<VarId> {
        self.cell_map.get(&coord).copied()
    }

    /// Allocate a fresh auxiliary variable
    pub fn fresh(&mut self) -> VarId {
        let n = self.variables.len() - self.cell_map.len();
        self.push(VariableType::Auxiliary(n))
    }

    /// What a variable id stands for
    pub fn describe(&self, id: VarId) -> Option<VariableType> {
        if id <= 0 {
            return None;
        }
        self.variables.get(id as usize - 1).copied()
    }

    fn push(&mut self, var_type: VariableType) -> VarId {
        self.variables.push(var_type);
        // SAT variables start from 1
        self.variables.len() as VarId
    }

    /// Get the total number of variables created
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn cell_variable_count(&self) -> usize {
        self.cell_map.len()
    }

    /// Iterate over cell mappings, in allocation order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, VarId)> + '_ {
        self.variables.iter().enumerate().filter_map(|(i, var)| match var {
            VariableType::Cell { row, col } => Some(((*row, *col), i as VarId + 1)),
            VariableType::Auxiliary(_) => None,
        })
    }

    /// Get statistics about variable usage
    pub fn statistics(&self) -> VariableStatistics {
        VariableStatistics {
            total_variables: self.variable_count(),
            cell_variables: self.cell_variable_count(),
            auxiliary_variables: self.variable_count() - self.cell_variable_count(),
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub cell_variables: usize,
    pub auxiliary_variables: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Cell variables: {}", self.cell_variables)?;
        writeln!(f, "  Auxiliary variables: {}", self.auxiliary_variables)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_variable_creation() {
        let mut vars = VariableAllocator::new();

        let var1 = vars.id_for((0, 0));
        let var2 = vars.id_for((1, 1));

        assert_eq!(var1, 1);
        assert_eq!(var2, 2);

        // Same coordinate returns the same id
        assert_eq!(vars.id_for((0, 0)), var1);
        assert_eq!(vars.variable_count(), 2);
    }

    #[test]
    fn test_lookup_does_not_allocate() {
        let mut vars = VariableAllocator::new();
        assert_eq!(vars.get((3, 4)), None);
        assert_eq!(vars.variable_count(), 0);

        let id = vars.id_for((3, 4));
        assert_eq!(vars.get((3, 4)), Some(id));
    }

    #[test]
    fn test_injective_over_grid() {
        let mut vars = VariableAllocator::new();
        let mut seen = HashSet::new();

        for row in 0..6 {
            for col in 0..7 {
                assert!(seen.insert(vars.id_for((row, col))));
            }
        }
        assert_eq!(seen.len(), 42);
        assert!(seen.iter().all(|&id| id > 0));
    }

    #[test]
    fn test_auxiliaries_do_not_collide() {
        let mut vars = VariableAllocator::new();

        let a = vars.id_for((0, 0));
        let aux = vars.fresh();
        let b = vars.id_for((0, 1));

        assert_eq!((a, aux, b), (1, 2, 3));
        assert_eq!(vars.describe(aux), Some(VariableType::Auxiliary(0)));
        assert_eq!(vars.describe(b), Some(VariableType::Cell { row: 0, col: 1 }));
        assert_eq!(vars.describe(0), None);
        assert_eq!(vars.cells().collect::<Vec<_>>(), vec![((0, 0), 1), ((0, 1), 3)]);
    }

    #[test]
    fn test_statistics() {
        let mut vars = VariableAllocator::new();

        vars.id_for((0, 0));
        vars.id_for((1, 1));
        vars.fresh();

        let stats = vars.statistics();
        assert_eq!(stats.total_variables, 3);
        assert_eq!(stats.cell_variables, 2);
        assert_eq!(stats.auxiliary_variables, 1);
    }
}
