//! Exactly-k cardinality encodings
//!
//! A clue `k` over neighbour variables `x1..xn` becomes "exactly k of these
//! are true". Encodings implement [`CardinalityEncoder`] so the clause set
//! builder does not care which one is in use.

use super::clause::Clause;
use super::variables::{VarId, VariableAllocator};
use crate::config::CardinalityStrategy;
use itertools::Itertools;

/// Turns an exactly-k constraint into clauses
pub trait CardinalityEncoder {
    /// Short name used in statistics and logs
    fn name(&self) -> &'static str;

    /// Clauses forcing exactly `k` of `vars` to be true.
    ///
    /// `aux` hands out auxiliary variables for encodings that need them.
    /// When `k > vars.len()` the returned clauses are unsatisfiable on their own.
    fn exactly_k(&self, vars: &[VarId], k: usize, aux: &mut VariableAllocator) -> Vec<Clause>;
}

/// Build the encoder selected in configuration
pub fn encoder_for(strategy: CardinalityStrategy) -> Box<dyn CardinalityEncoder> {
    match strategy {
        CardinalityStrategy::Naive => Box::new(NaiveEncoder),
        CardinalityStrategy::SequentialCounter => Box::new(SequentialCounterEncoder),
    }
}

/// `[s]` and `[-s]` on a fresh sentinel: false under every assignment
pub fn contradiction(aux: &mut VariableAllocator) -> Vec<Clause> {
    let sentinel = aux.fresh();
    vec![Clause::unit(sentinel), Clause::unit(-sentinel)]
}

fn distinct(vars: &[VarId]) -> Vec<VarId> {
    vars.iter().copied().unique().collect()
}

/// Combinatorial encoding with no auxiliary variables.
///
/// At-most-k: every (k+1)-subset has a false member.
/// At-least-k: every (n-k+1)-subset has a true member.
/// Produces C(n, k+1) + C(n, n-k+1) clauses, fine for n <= 8.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveEncoder;

impl NaiveEncoder {
    pub fn at_most_k(vars: &[VarId], k: usize) -> Vec<Clause> {
        if k >= vars.len() {
            return Vec::new();
        }
        vars.iter()
            .combinations(k + 1)
            .map(|combo| Clause::new(combo.into_iter().map(|&v| -v).collect()))
            .collect()
    }

    pub fn at_least_k(vars: &[VarId], k: usize) -> Vec<Clause> {
        if k == 0 || k > vars.len() {
            return Vec::new();
        }
        vars.iter()
            .combinations(vars.len() - k + 1)
            .map(|combo| Clause::new(combo.into_iter().copied().collect()))
            .collect()
    }
}

impl CardinalityEncoder for NaiveEncoder {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn exactly_k(&self, vars: &[VarId], k: usize, aux: &mut VariableAllocator) -> Vec<Clause> {
        let vars = distinct(vars);
        if k > vars.len() {
            return contradiction(aux);
        }

        let mut clauses = Self::at_most_k(&vars, k);
        clauses.extend(Self::at_least_k(&vars, k));
        clauses
    }
}

/// Sinz sequential-counter encoding.
///
/// At-most-k over literals `l1..ln` uses registers `s[i][j]` meaning
/// "at least j of l1..li are true". At-least-k is at-most-(n-k) over the
/// negated literals. O(n*k) clauses and auxiliaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialCounterEncoder;

impl SequentialCounterEncoder {
    /// At most `k` of `lits` hold
    pub fn at_most_k(lits: &[i32], k: usize, aux: &mut VariableAllocator) -> Vec<Clause> {
        let n = lits.len();
        if k >= n {
            return Vec::new();
        }
        if k == 0 {
            return lits.iter().map(|&l| Clause::unit(-l)).collect();
        }

        // s[i][j] for i in 0..n-1, j in 0..k
        let s: Vec<Vec<VarId>> = (0..n - 1)
            .map(|_| (0..k).map(|_| aux.fresh()).collect())
            .collect();
        let mut clauses = Vec::new();

        clauses.push(Clause::new(vec![-lits[0], s[0][0]]));
        for j in 1..k {
            clauses.push(Clause::unit(-s[0][j]));
        }

        for i in 1..n - 1 {
            clauses.push(Clause::new(vec![-lits[i], s[i][0]]));
            clauses.push(Clause::new(vec![-s[i - 1][0], s[i][0]]));
            for j in 1..k {
                clauses.push(Clause::new(vec![-lits[i], -s[i - 1][j - 1], s[i][j]]));
                clauses.push(Clause::new(vec![-s[i - 1][j], s[i][j]]));
            }
            clauses.push(Clause::new(vec![-lits[i], -s[i - 1][k - 1]]));
        }

        clauses.push(Clause::new(vec![-lits[n - 1], -s[n - 2][k - 1]]));
        clauses
    }
}

impl CardinalityEncoder for SequentialCounterEncoder {
    fn name(&self) -> &'static str {
        "sequential_counter"
    }

    fn exactly_k(&self, vars: &[VarId], k: usize, aux: &mut VariableAllocator) -> Vec<Clause> {
        let vars = distinct(vars);
        let n = vars.len();
        if k > n {
            return contradiction(aux);
        }

        let mut clauses = Self::at_most_k(&vars, k, aux);
        let negated: Vec<i32> = vars.iter().map(|&v| -v).collect();
        clauses.extend(Self::at_most_k(&negated, n - k, aux));
        clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::ClauseSet;
    use crate::sat::solver::{DpllSolver, SatBackend};
    use proptest::prelude::*;

    fn count_true(mask: u32, n: usize) -> usize {
        (0..n).filter(|i| mask & (1 << i) != 0).count()
    }

    /// Every assignment to `1..=n` satisfies the naive clauses iff it has k trues
    fn naive_matches_truth_table(n: usize, k: usize) -> bool {
        let vars: Vec<VarId> = (1..=n as VarId).collect();
        let mut aux = VariableAllocator::new();
        let clauses: ClauseSet = NaiveEncoder.exactly_k(&vars, k, &mut aux).into_iter().collect();

        (0..1u32 << n).all(|mask| {
            let holds = clauses.is_satisfied_by(|v| mask & (1 << (v - 1)) != 0);
            holds == (count_true(mask, n) == k)
        })
    }

    /// Fix the inputs with unit clauses and ask a solver whether the
    /// auxiliaries can be completed
    fn counter_matches_truth_table(n: usize, k: usize) -> bool {
        let mut aux = VariableAllocator::new();
        let vars: Vec<VarId> = (0..n).map(|i| aux.id_for((0, i))).collect();
        let clauses = SequentialCounterEncoder.exactly_k(&vars, k, &mut aux);

        (0..1u32 << n).all(|mask| {
            let mut set: ClauseSet = clauses.iter().cloned().collect();
            for (i, &v) in vars.iter().enumerate() {
                set.insert(Clause::unit(if mask & (1 << i) != 0 { v } else { -v }));
            }
            let sat = DpllSolver::new().solve(&set).unwrap().is_satisfiable();
            sat == (count_true(mask, n) == k)
        })
    }

    #[test]
    fn test_five_choose_two_clause_counts() {
        let vars = [1, 2, 3, 4, 5];
        assert_eq!(NaiveEncoder::at_most_k(&vars, 2).len(), 10);
        assert_eq!(NaiveEncoder::at_least_k(&vars, 2).len(), 5);

        let mut aux = VariableAllocator::new();
        let clauses = NaiveEncoder.exactly_k(&vars, 2, &mut aux);
        assert_eq!(clauses.len(), 15);
        assert_eq!(aux.variable_count(), 0);

        assert!(NaiveEncoder::at_most_k(&vars, 2).iter().all(|c| c.len() == 3 && c.literals().iter().all(|&l| l < 0)));
        assert!(NaiveEncoder::at_least_k(&vars, 2).iter().all(|c| c.len() == 4 && c.literals().iter().all(|&l| l > 0)));
    }

    #[test]
    fn test_five_choose_two_truth_table() {
        let vars = [1, 2, 3, 4, 5];
        let mut aux = VariableAllocator::new();
        let clauses: ClauseSet = NaiveEncoder.exactly_k(&vars, 2, &mut aux).into_iter().collect();

        for mask in 0..32u32 {
            let holds = clauses.is_satisfied_by(|v| mask & (1 << (v - 1)) != 0);
            match count_true(mask, 5) {
                2 => assert!(holds, "mask {:05b} has two trues", mask),
                1 | 3 => assert!(!holds, "mask {:05b} should violate a clause", mask),
                _ => {}
            }
        }
    }

    #[test]
    fn test_zero_forces_all_false() {
        let mut aux = VariableAllocator::new();
        let clauses = NaiveEncoder.exactly_k(&[4, 7, 9], 0, &mut aux);
        assert_eq!(clauses, vec![Clause::unit(-4), Clause::unit(-7), Clause::unit(-9)]);
    }

    #[test]
    fn test_full_forces_all_true() {
        let mut aux = VariableAllocator::new();
        let clauses = NaiveEncoder.exactly_k(&[4, 7], 2, &mut aux);
        assert_eq!(clauses, vec![Clause::unit(4), Clause::unit(7)]);
    }

    #[test]
    fn test_empty_neighbourhood() {
        let mut aux = VariableAllocator::new();
        assert!(NaiveEncoder.exactly_k(&[], 0, &mut aux).is_empty());
        assert!(SequentialCounterEncoder.exactly_k(&[], 0, &mut aux).is_empty());
        assert_eq!(aux.variable_count(), 0);
    }

    #[test]
    fn test_impossible_cardinality_is_contradiction() {
        for encoder in [encoder_for(CardinalityStrategy::Naive), encoder_for(CardinalityStrategy::SequentialCounter)] {
            let mut aux = VariableAllocator::new();
            let vars = [aux.id_for((0, 0)), aux.id_for((0, 1))];
            let clauses: ClauseSet = encoder.exactly_k(&vars, 3, &mut aux).into_iter().collect();

            assert_eq!(clauses.len(), 2);
            assert_eq!(aux.statistics().auxiliary_variables, 1);
            for mask in 0..1u32 << 3 {
                assert!(!clauses.is_satisfied_by(|v| mask & (1 << (v - 1)) != 0));
            }
        }
    }

    #[test]
    fn test_duplicate_inputs_are_ignored() {
        let mut aux = VariableAllocator::new();
        let clauses = NaiveEncoder.exactly_k(&[1, 1, 2], 2, &mut aux);
        assert_eq!(clauses, vec![Clause::unit(1), Clause::unit(2)]);
    }

    #[test]
    fn test_encoder_names() {
        assert_eq!(encoder_for(CardinalityStrategy::Naive).name(), "naive");
        assert_eq!(encoder_for(CardinalityStrategy::SequentialCounter).name(), "sequential_counter");
    }

    #[test]
    fn test_naive_exhaustive_up_to_eight() {
        for n in 0..=8 {
            for k in 0..=n {
                assert!(naive_matches_truth_table(n, k), "n={} k={}", n, k);
            }
        }
    }

    proptest! {
        #[test]
        fn proptest_sequential_counter((n, k) in (0usize..=5).prop_flat_map(|n| (Just(n), 0..=n))) {
            prop_assert!(counter_matches_truth_table(n, k));
        }
    }
}
