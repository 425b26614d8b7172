//! File I/O operations for puzzle grids

use super::grid::{Cell, Grid, GridError, MAX_CLUE};
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
/// Format: one row per line, cells separated by commas.
/// Digits are clues, `_` is unknown, `T` a trap, `G` a gem.
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

fn is_clue_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Parse a single comma-separated token
pub fn parse_cell(token: &str) -> Cell {
    match token {
        "_" => Cell::Unknown,
        "T" => Cell::Trap,
        "G" => Cell::Gem,
        // Saturates; out-of-range clues are rejected by `Grid::from_rows`
        t if is_clue_token(t) => Cell::Clue(t.parse::<u8>().unwrap_or(u8::MAX)),
        other => Cell::Opaque(other.to_string()),
    }
}

/// Parse a grid from its text representation.
///
/// Blank lines are skipped but still counted, so the `row` of an error is the
/// zero-based line it was found on.
pub fn parse_grid(content: &str) -> Result<Grid, GridError> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut cells = Vec::new();
        for (col, token) in line.split(',').map(str::trim).enumerate() {
            if is_clue_token(token) && clue_exceeds_max(token) {
                return Err(GridError::ClueOutOfRange { row: line_no, col, value: token.to_string() });
            }
            cells.push(parse_cell(token));
        }

        if let Some(first) = rows.first() {
            if cells.len() != first.len() {
                return Err(GridError::RaggedRow { row: line_no, len: cells.len(), expected: first.len() });
            }
        }
        rows.push(cells);
    }

    Grid::from_rows(rows)
}

/// Compare a digit string against `MAX_CLUE` without overflowing
fn clue_exceeds_max(token: &str) -> bool {
    let digits = token.trim_start_matches('0');
    digits.len() > 1 || digits.parse::<u8>().map_or(false, |k| k > MAX_CLUE)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    grid.to_string()
}

/// Create example puzzle files for testing
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("zero_ring.txt", "_, _, _\n_, 0, _\n_, _, _\n"),
        ("corridor.txt", "1, _\n"),
        ("contradiction.txt", "0, _, 1\n"),
        ("classic.txt", "3, _, 2, _\n_, _, 2, _\n_, 3, 1, _\n"),
        ("with_hints.txt", "_, 1, _, T\n1, _, 2, _\n_, G, _, 1\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
