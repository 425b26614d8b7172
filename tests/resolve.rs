//! End-to-end resolution tests across every backend and cardinality encoding

use std::collections::HashSet;
use trap_grid_solver::config::{CardinalityStrategy, Settings, SolverBackend};
use trap_grid_solver::puzzle::{parse_grid, Cell, Grid, GridError};
use trap_grid_solver::resolve::{ResolutionValidator, Resolution};
use trap_grid_solver::sat::cardinality::encoder_for;
use trap_grid_solver::sat::ClauseSetBuilder;
use trap_grid_solver::solve_grid;

const BACKENDS: [SolverBackend; 2] = [SolverBackend::Cadical, SolverBackend::Dpll];
const STRATEGIES: [CardinalityStrategy; 2] =
    [CardinalityStrategy::Naive, CardinalityStrategy::SequentialCounter];

fn all_settings() -> Vec<Settings> {
    let mut out = Vec::new();
    for backend in BACKENDS {
        for strategy in STRATEGIES {
            let mut settings = Settings::default();
            settings.solver.backend = backend;
            settings.encoding.cardinality = strategy;
            out.push(settings);
        }
    }
    out
}

fn resolve_everywhere(text: &str) -> Vec<Resolution> {
    let grid = parse_grid(text).unwrap();
    all_settings()
        .into_iter()
        .map(|settings| solve_grid(settings, grid.clone()).unwrap())
        .collect()
}

fn resolved_grid(resolution: &Resolution) -> &Grid {
    &resolution.solved().expect("expected a solution").resolved
}

#[test]
fn test_zero_clue_makes_ring_gems() {
    for resolution in resolve_everywhere("_, _, _\n_, 0, _\n_, _, _\n") {
        assert_eq!(resolved_grid(&resolution).to_string(), "G, G, G\nG, 0, G\nG, G, G\n");
    }
}

#[test]
fn test_single_candidate_is_trap() {
    for resolution in resolve_everywhere("1, _") {
        assert_eq!(resolved_grid(&resolution).to_string(), "1, T\n");
    }
}

#[test]
fn test_contradicting_clues_have_no_solution() {
    for resolution in resolve_everywhere("0, _, 1") {
        assert!(!resolution.is_solved());
    }
}

#[test]
fn test_impossible_clue_has_no_solution() {
    for resolution in resolve_everywhere("3, _\n") {
        assert!(!resolution.is_solved());
        assert_eq!(resolution.statistics().impossible_clues, 1);
    }
}

#[test]
fn test_classic_puzzle_has_forced_resolution() {
    let expected = "3, T, 2, G\nT, T, 2, G\nT, 3, 1, G\n";
    for resolution in resolve_everywhere("3, _, 2, _\n_, _, 2, _\n_, 3, 1, _\n") {
        assert_eq!(resolved_grid(&resolution).to_string(), expected);
    }
}

#[test]
fn test_resolutions_satisfy_every_clue() {
    let puzzles = [
        "_, 1, _\n_, _, _\n_, 2, _\n",
        "_, _, _, _\n_, 2, 3, _\n_, _, _, _\n",
        "1, _, _, 1\n_, _, _, _\n",
        "_, 1\n_, 1\n",
        "2, _, x, _\n_, T, _, 1\n",
    ];
    let validator = ResolutionValidator::new();

    for text in puzzles {
        let original = parse_grid(text).unwrap();
        for resolution in resolve_everywhere(text) {
            let resolved = resolved_grid(&resolution);
            assert!(resolved.is_resolved());
            let report = validator.validate(&original, resolved);
            assert!(report.is_valid, "{}\n{}", text, report);
        }
    }
}

#[test]
fn test_fully_known_grid_is_unchanged() {
    let text = "1, T, 1\nG, G, G\n";
    let grid = parse_grid(text).unwrap();
    for resolution in resolve_everywhere(text) {
        assert_eq!(resolved_grid(&resolution), &grid);
    }
}

#[test]
fn test_pre_resolved_cells_are_kept() {
    for resolution in resolve_everywhere("G, _\n_, 1\n") {
        let resolved = resolved_grid(&resolution);
        assert_eq!(resolved.get(0, 0), Some(&Cell::Gem));
        assert_eq!(resolved.count(&Cell::Trap), 1);
    }
}

#[test]
fn test_cell_variables_are_injective() {
    let grid = parse_grid("_, _, _\n_, 4, _\n_, _, T\n").unwrap();
    let encoding = ClauseSetBuilder::default().build(&grid);

    let cells: Vec<_> = encoding.variables.cells().collect();
    let ids: HashSet<_> = cells.iter().map(|(_, id)| *id).collect();
    let coords: HashSet<_> = cells.iter().map(|(coord, _)| *coord).collect();

    assert_eq!(cells.len(), 8);
    assert_eq!(ids.len(), cells.len());
    assert_eq!(coords.len(), cells.len());
    assert!(ids.iter().all(|&id| id >= 1));
}

#[test]
fn test_shared_neighbourhood_clauses_are_deduplicated() {
    let grid = parse_grid("_, 1\n_, 1\n").unwrap();
    let stats = ClauseSetBuilder::default().build(&grid).statistics;

    assert_eq!(stats.total_clauses, 2);
    assert_eq!(stats.duplicates_suppressed, 2);
}

#[test]
fn test_five_neighbours_exactly_two_clause_count() {
    let grid = parse_grid("_, _, _\n_, 2, _\n").unwrap();
    let stats = ClauseSetBuilder::default().build(&grid).statistics;

    assert_eq!(stats.cell_variables, 5);
    assert_eq!(stats.total_clauses, 10 + 5);
    assert_eq!(stats.auxiliary_variables, 0);
}

#[test]
fn test_sequential_counter_uses_auxiliary_variables() {
    let grid = parse_grid("_, _, _\n_, 2, _\n").unwrap();
    let builder = ClauseSetBuilder::new(encoder_for(CardinalityStrategy::SequentialCounter));
    let stats = builder.build(&grid).statistics;

    assert_eq!(stats.strategy, builder.strategy());
    assert_eq!(stats.cell_variables, 5);
    assert!(stats.auxiliary_variables > 0);
}

#[test]
fn test_malformed_grid_is_a_structural_error() {
    let cases = [
        (
            Grid { rows: 2, cols: 2, cells: vec![Cell::Clue(200)] },
            GridError::CellCount { rows: 2, cols: 2, cells: 1 },
        ),
        (
            Grid { rows: 1, cols: 0, cells: vec![Cell::Unknown] },
            GridError::EmptyRow { row: 0 },
        ),
        (
            Grid { rows: 1, cols: 2, cells: vec![Cell::Unknown, Cell::Clue(9)] },
            GridError::ClueOutOfRange { row: 0, col: 1, value: "9".to_string() },
        ),
    ];

    for (grid, expected) in cases {
        let err = solve_grid(Settings::default(), grid).unwrap_err();
        assert_eq!(err.downcast_ref::<GridError>(), Some(&expected));
    }
}
