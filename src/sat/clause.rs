//! Clauses and deduplicated clause sets

use super::variables::VarId;
use std::collections::HashSet;

/// A SAT clause (disjunction of literals), kept in canonical sorted order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(mut literals: Vec<i32>) -> Self {
        literals.sort_unstable();
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Largest variable mentioned by this clause
    pub fn max_variable(&self) -> VarId {
        self.literals.iter().map(|lit| lit.abs()).max().unwrap_or(0)
    }

    /// Evaluate under an assignment given as a predicate on variables
    pub fn is_satisfied_by<F>(&self, value: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.literals.iter().any(|&lit| value(lit.abs()) == (lit > 0))
    }
}

/// A CNF instance with duplicate clauses suppressed.
/// Insertion order is kept so runs are reproducible.
#[derive(Debug, Clone, Default)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    seen: HashSet<Clause>,
    duplicates: usize,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause unless an equal one is already present.
    /// Returns whether the clause was new.
    pub fn insert(&mut self, clause: Clause) -> bool {
        if self.seen.contains(&clause) {
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(clause.clone());
        self.clauses.push(clause);
        true
    }

    /// Merge many clauses, returning how many were new
    pub fn extend<I>(&mut self, clauses: I) -> usize
    where
        I: IntoIterator<Item = Clause>,
    {
        let mut added = 0;
        for clause in clauses {
            if self.insert(clause) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.seen.contains(clause)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// How many insertions were rejected as duplicates
    pub fn duplicates_suppressed(&self) -> usize {
        self.duplicates
    }

    /// Whether the set contains the empty clause
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn max_variable(&self) -> VarId {
        self.clauses.iter().map(Clause::max_variable).max().unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }

    /// Check that every clause holds under an assignment
    pub fn is_satisfied_by<F>(&self, value: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.clauses.iter().all(|clause| clause.is_satisfied_by(&value))
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let mut set = ClauseSet::new();
        set.extend(iter);
        set
    }
}
