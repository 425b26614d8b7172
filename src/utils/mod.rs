//! Console formatting and output helpers

pub mod display;

pub use display::{PuzzleFormatter, ColorOutput, Color};
