//! SAT solver backends

use super::clause::ClauseSet;
use super::variables::VarId;
use log::{debug, trace};
use std::collections::HashSet;
use std::time::Instant;
use thiserror::Error;

/// Failures of the solving step itself. Unsatisfiability is not one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("solver stopped without a verdict")]
    Interrupted,
    #[error("instance has {count} variables, backend limit is {limit}")]
    TooManyVariables { count: usize, limit: usize },
}

/// A satisfying assignment for every variable the clause set mentions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// `values[v - 1]` is the value of variable `v`
    values: Vec<bool>,
}

impl Model {
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Value of a variable, `None` if the model does not cover it
    pub fn value(&self, var: VarId) -> Option<bool> {
        if var <= 0 {
            return None;
        }
        self.values.get(var as usize - 1).copied()
    }

    pub fn true_variables(&self) -> HashSet<VarId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &value)| value)
            .map(|(i, _)| i as VarId + 1)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Verdict of a single solve call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SolveOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SolveOutcome::Satisfiable(model) => Some(model),
            SolveOutcome::Unsatisfiable => None,
        }
    }
}

/// Anything that can decide a CNF instance and return one model
pub trait SatBackend {
    fn name(&self) -> &'static str;

    /// Decide `clauses`. Blocks until the engine answers.
    fn solve(&mut self, clauses: &ClauseSet) -> Result<SolveOutcome, SolverError>;
}

/// SAT solver wrapper for CaDiCaL
#[derive(Debug, Default)]
pub struct CadicalSolver;

impl CadicalSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SatBackend for CadicalSolver {
    fn name(&self) -> &'static str {
        "cadical"
    }

    fn solve(&mut self, clauses: &ClauseSet) -> Result<SolveOutcome, SolverError> {
        if clauses.has_empty_clause() {
            return Ok(SolveOutcome::Unsatisfiable);
        }

        let start_time = Instant::now();
        let mut solver: cadical::Solver = cadical::Solver::new();
        for clause in clauses {
            solver.add_clause(clause.literals().iter().copied());
        }

        let result = solver.solve();
        debug!("cadical finished in {:.3}s: {:?}", start_time.elapsed().as_secs_f64(), result);

        match result {
            Some(true) => {
                let values = (1..=clauses.max_variable())
                    .map(|var| solver.value(var).unwrap_or(false))
                    .collect();
                Ok(SolveOutcome::Satisfiable(Model::new(values)))
            }
            Some(false) => Ok(SolveOutcome::Unsatisfiable),
            None => Err(SolverError::Interrupted),
        }
    }
}

/// Small DPLL search with unit propagation and chronological backtracking
#[derive(Debug, Clone)]
pub struct DpllSolver {
    max_variables: usize,
}

impl Default for DpllSolver {
    fn default() -> Self {
        Self { max_variables: 4096 }
    }
}

impl DpllSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_variables: usize) -> Self {
        Self { max_variables }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Assignment {
    True,
    False,
    Undecided,
}

struct SearchState<'a> {
    clauses: Vec<&'a [i32]>,
    assignment: Vec<Assignment>,
    trail: Vec<usize>,
}

impl<'a> SearchState<'a> {
    fn literal_value(&self, lit: i32) -> Assignment {
        match (self.assignment[lit.unsigned_abs() as usize], lit > 0) {
            (Assignment::Undecided, _) => Assignment::Undecided,
            (Assignment::True, true) | (Assignment::False, false) => Assignment::True,
            _ => Assignment::False,
        }
    }

    fn assign(&mut self, lit: i32) {
        let var = lit.unsigned_abs() as usize;
        self.assignment[var] = if lit > 0 { Assignment::True } else { Assignment::False };
        self.trail.push(var);
    }

    fn undo_to(&mut self, len: usize) {
        for var in self.trail.split_off(len) {
            self.assignment[var] = Assignment::Undecided;
        }
    }

    /// Returns false on conflict
    fn propagate(&mut self) -> bool {
        loop {
            let mut changed = false;
            for i in 0..self.clauses.len() {
                let clause = self.clauses[i];
                let mut unassigned = None;
                let mut open = 0;
                let mut satisfied = false;

                for &lit in clause {
                    match self.literal_value(lit) {
                        Assignment::True => {
                            satisfied = true;
                            break;
                        }
                        Assignment::Undecided => {
                            open += 1;
                            unassigned = Some(lit);
                        }
                        Assignment::False => {}
                    }
                }

                if satisfied {
                    continue;
                }
                match (open, unassigned) {
                    (0, _) => return false,
                    (1, Some(lit)) => {
                        trace!("implied {}", lit);
                        self.assign(lit);
                        changed = true;
                    }
                    _ => {}
                }
            }
            if !changed {
                return true;
            }
        }
    }

    fn search(&mut self) -> bool {
        if !self.propagate() {
            return false;
        }

        let next = (1..self.assignment.len()).find(|&v| self.assignment[v] == Assignment::Undecided);
        let Some(var) = next else { return true };

        let mark = self.trail.len();
        for lit in [var as i32, -(var as i32)] {
            trace!("decide {}", lit);
            self.assign(lit);
            if self.search() {
                return true;
            }
            self.undo_to(mark);
        }
        false
    }
}

impl SatBackend for DpllSolver {
    fn name(&self) -> &'static str {
        "dpll"
    }

    fn solve(&mut self, clauses: &ClauseSet) -> Result<SolveOutcome, SolverError> {
        if clauses.has_empty_clause() {
            return Ok(SolveOutcome::Unsatisfiable);
        }

        let num_variables = clauses.max_variable() as usize;
        if num_variables > self.max_variables {
            return Err(SolverError::TooManyVariables { count: num_variables, limit: self.max_variables });
        }

        let mut state = SearchState {
            clauses: clauses.iter().map(|c| c.literals()).collect(),
            assignment: vec![Assignment::Undecided; num_variables + 1],
            trail: Vec::new(),
        };

        if !state.search() {
            return Ok(SolveOutcome::Unsatisfiable);
        }

        let values = state.assignment[1..].iter().map(|&a| a == Assignment::True).collect();
        Ok(SolveOutcome::Satisfiable(Model::new(values)))
    }
}
