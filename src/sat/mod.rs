//! SAT encoding and solving for trap/gem puzzles

pub mod variables;
pub mod clause;
pub mod cardinality;
pub mod builder;
pub mod solver;
pub mod solver_factory;
pub mod encoder;

pub use variables::{VarId, VariableAllocator};
pub use clause::{Clause, ClauseSet};
pub use cardinality::{CardinalityEncoder, NaiveEncoder, SequentialCounterEncoder};
pub use builder::{ClauseSetBuilder, Encoding, EncodingStatistics};
pub use solver::{CadicalSolver, DpllSolver, Model, SatBackend, SolveOutcome, SolverError};
pub use solver_factory::UnifiedSatSolver;
pub use encoder::{PuzzleEncoder, SolveReport};
