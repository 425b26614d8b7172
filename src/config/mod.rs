//! Configuration management for the trap grid solver

pub mod settings;

pub use settings::{
    Settings, SolverConfig, EncodingConfig, InputConfig, OutputConfig,
    SolverBackend, CardinalityStrategy, OutputFormat, CliOverrides
};
