//! Main CLI application for the trap grid solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use trap_grid_solver::{
    config::{CardinalityStrategy, CliOverrides, OutputFormat, Settings, SolverBackend},
    puzzle::{create_example_puzzles, load_grid_from_file},
    resolve::{PuzzleProblem, Resolution, ResolutionValidator},
    utils::{ColorOutput, PuzzleFormatter},
};

#[derive(Parser)]
#[command(name = "trap_grid_solver")]
#[command(about = "Trap/Gem grid SAT solver")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every unknown cell of a puzzle
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the resolved grid (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// SAT backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<SolverBackend>,

        /// Cardinality encoding (overrides config)
        #[arg(short, long, value_enum)]
        encoding: Option<CardinalityStrategy>,

        /// Print encoding statistics
        #[arg(long)]
        stats: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a resolved grid against its clues
    Check {
        /// Resolved grid file
        #[arg(short, long)]
        resolved: PathBuf,

        /// Original puzzle; when given, unchanged cells are checked too
        #[arg(short, long)]
        puzzle: Option<PathBuf>,
    },

    /// Show encoding size and a complexity estimate without solving
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Cardinality encoding (overrides config)
        #[arg(short, long, value_enum)]
        encoding: Option<CardinalityStrategy>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve { config, input, output, format, backend, encoding, stats } => {
            let overrides = CliOverrides {
                puzzle_file: input,
                output_file: output,
                format,
                backend,
                cardinality: encoding,
            };
            solve_command(config, overrides, stats)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Check { resolved, puzzle } => check_command(resolved, puzzle),
        Commands::Analyze { config, input, encoding } => {
            let overrides = CliOverrides {
                puzzle_file: input,
                cardinality: encoding,
                ..Default::default()
            };
            analyze_command(config, overrides)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = Settings::from_file_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides, show_stats: bool) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;
    log::debug!("settings: {:?}", settings);

    let start_time = Instant::now();
    let mut problem = PuzzleProblem::new(settings.clone())
        .context("Failed to create puzzle problem")?;

    println!("{}", ColorOutput::info("Generating SAT constraints and solving..."));
    let resolution = problem.solve().context("Failed to solve puzzle")?;
    let total_time = start_time.elapsed();

    if show_stats {
        println!("{}", resolution.statistics());
    }

    let solved = match resolution {
        Resolution::Solved(solved) => solved,
        Resolution::NoSolution(statistics) => {
            println!("{}", ColorOutput::warning("No solution: the clues contradict each other"));
            if statistics.impossible_clues > 0 {
                println!("{} clue(s) ask for more traps than they have neighbours", statistics.impossible_clues);
            }
            return Ok(());
        }
    };

    println!("{}", ColorOutput::success(&format!("Solved in {:.3}s", total_time.as_secs_f64())));

    match settings.output.format {
        OutputFormat::Text => println!("\n{}", PuzzleFormatter::format_resolution(&solved)),
        OutputFormat::Json => println!("{}", solved.to_json()?),
    }

    if let Some(output_file) = &settings.output.output_file {
        PuzzleFormatter::save_resolution(&solved, output_file, settings.output.format)
            .context("Failed to save resolution")?;
        println!("{}", ColorOutput::success(&format!("Resolution saved to {}", output_file.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir)
        .context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    let mut counter_config = Settings::default();
    counter_config.encoding.cardinality = CardinalityStrategy::SequentialCounter;
    counter_config.output.output_file = Some(PathBuf::from("output/classic.txt"));
    counter_config.to_file(config_dir.join("sequential_counter.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Add puzzles to {}", input_dir.display());
    println!("2. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn check_command(resolved_path: PathBuf, puzzle_path: Option<PathBuf>) -> Result<()> {
    println!("{}", ColorOutput::info("Checking resolution..."));

    let resolved = load_grid_from_file(&resolved_path)
        .with_context(|| format!("Failed to load resolved grid from {}", resolved_path.display()))?;

    let validator = ResolutionValidator::new();
    let report = match puzzle_path {
        Some(path) => {
            let original = load_grid_from_file(&path)
                .with_context(|| format!("Failed to load puzzle from {}", path.display()))?;
            validator.validate(&original, &resolved)
        }
        None => validator.check_clues(&resolved),
    };

    println!("{}", report);

    if report.is_valid {
        println!("{}", ColorOutput::success("Resolution is valid"));
    } else {
        println!("{}", ColorOutput::error("Resolution is invalid"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing puzzle..."));

    let settings = load_settings(&config_path, &overrides)?;
    let problem = PuzzleProblem::new(settings).context("Failed to create puzzle problem")?;
    let grid = problem.grid();

    println!("Puzzle Grid ({}x{}):", grid.rows, grid.cols);
    println!("{}", PuzzleFormatter::format_grid_with_coords(grid));
    println!("{}", problem.estimate_complexity());
    println!("{}", problem.encoding_statistics());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "trap_grid_solver",
            "solve",
            "--config", "test.yaml",
            "--encoding", "sequential-counter",
            "--backend", "dpll",
            "-v",
        ]);

        let cli = cli.unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Solve {
                encoding: Some(CardinalityStrategy::SequentialCounter),
                backend: Some(SolverBackend::Dpll),
                ..
            }
        ));
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/sequential_counter.yaml").exists());
        assert!(temp_dir.path().join("input/puzzles/classic.txt").exists());
    }

    #[test]
    fn test_solve_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        let puzzle = temp_dir.path().join("p.txt");
        let output = temp_dir.path().join("out/p.txt");
        std::fs::write(&puzzle, "1, _\n").unwrap();

        let overrides = CliOverrides {
            puzzle_file: Some(puzzle),
            output_file: Some(output.clone()),
            ..Default::default()
        };
        solve_command(temp_dir.path().join("missing.yaml"), overrides, true).unwrap();

        assert_eq!(std::fs::read_to_string(output).unwrap(), "1, T\n");
    }
}
