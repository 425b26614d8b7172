//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzle::{grid_to_string, Cell, Grid};
use crate::resolve::SolvedPuzzle;
use anyhow::{Context, Result};
use std::path::Path;

/// Format puzzles and resolutions for display
pub struct PuzzleFormatter;

impl PuzzleFormatter {
    /// Format a solved puzzle for console output
    pub fn format_resolution(solved: &SolvedPuzzle) -> String {
        let mut output = String::new();

        output.push_str("=== Resolution ===\n");
        output.push_str(&format!("Solve Time: {:.3}s\n", solved.solve_time.as_secs_f64()));
        output.push_str(&format!(
            "Resolved: {} traps, {} gems\n",
            solved.summary.traps_found, solved.summary.gems_found
        ));
        output.push_str(&format!(
            "Totals: {} traps, {} gems\n",
            solved.summary.total_traps, solved.summary.total_gems
        ));
        output.push('\n');
        output.push_str(&Self::format_grid_highlighted(&solved.original, &solved.resolved));

        output
    }

    /// Format a grid with row and column numbers
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let width = grid
            .cells
            .iter()
            .map(|cell| cell.to_string().chars().count())
            .max()
            .unwrap_or(1)
            .max(2);

        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols {
            output.push_str(&format!(" {:>width$}", col % 100, width = width));
        }
        output.push('\n');

        for (row, cells) in grid.row_slices().enumerate() {
            output.push_str(&format!("{:>2} ", row));
            for cell in cells {
                output.push_str(&format!(" {:>width$}", cell.to_string(), width = width));
            }
            output.push('\n');
        }

        output
    }

    /// Format a resolved grid, colouring the cells the solver decided
    pub fn format_grid_highlighted(original: &Grid, resolved: &Grid) -> String {
        let mut output = String::new();

        for (row, cells) in resolved.row_slices().enumerate() {
            let line: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let text = cell.to_string();
                    match (original.get(row, col), cell) {
                        (Some(Cell::Unknown), Cell::Trap) => ColorOutput::trap(&text),
                        (Some(Cell::Unknown), Cell::Gem) => ColorOutput::gem(&text),
                        _ => text,
                    }
                })
                .collect();
            output.push_str(&line.join(", "));
            output.push('\n');
        }

        output
    }

    /// Save a solved puzzle in the configured output format
    pub fn save_resolution<P: AsRef<Path>>(
        solved: &SolvedPuzzle,
        path: P,
        format: OutputFormat,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        match format {
            OutputFormat::Text => std::fs::write(path, grid_to_string(&solved.resolved))
                .with_context(|| format!("Failed to write {}", path.display()))?,
            OutputFormat::Json => solved
                .save_to_file(path)
                .with_context(|| format!("Failed to write {}", path.display()))?,
        }

        Ok(())
    }
}

/// ANSI styling for console output. Plain text when `NO_COLOR` is set or
/// the terminal is `dumb`.
pub struct ColorOutput;

impl ColorOutput {
    /// A cell the solver resolved to a trap
    pub fn trap(text: &str) -> String {
        Self::paint(text, Color::Red)
    }

    /// A cell the solver resolved to a gem
    pub fn gem(text: &str) -> String {
        Self::paint(text, Color::Green)
    }

    pub fn success(text: &str) -> String {
        Self::paint(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::paint(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::paint(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::paint(text, Color::Blue)
    }

    pub fn paint(text: &str, color: Color) -> String {
        if Self::enabled() {
            format!("\x1b[{}m{}\x1b[0m", color as u8, text)
        } else {
            text.to_string()
        }
    }

    fn enabled() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }
}

/// Foreground colours, valued by their ANSI SGR code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
}
