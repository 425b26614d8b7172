//! Puzzle grid model, adjacency and text format

pub mod grid;
pub mod topology;
pub mod io;

pub use grid::{Cell, Coord, Grid, GridError, MAX_CLUE};
pub use topology::neighbors;
pub use io::{load_grid_from_file, save_grid_to_file, parse_grid, grid_to_string, create_example_puzzles};
