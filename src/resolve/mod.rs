//! Model projection, validation and solved-puzzle records

pub mod projector;
pub mod problem;
pub mod solution;
pub mod validator;

pub use projector::project;
pub use problem::PuzzleProblem;
pub use solution::{Resolution, ResolutionSummary, SolvedPuzzle};
pub use validator::{ResolutionValidator, ValidationReport, Violation};
