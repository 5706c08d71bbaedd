//! Command-line argument definitions for the Hydronet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity, and overrides for the projection settings.

use clap::Parser;

use hydronet::config::GroupBy;

/// Command-line arguments for the Hydronet network viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the solver output file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output scene file (JSON)
    #[arg(short, long, default_value = "scene.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Node grouping (by_type, by_elevation_range, none)
    #[arg(long)]
    pub group_by: Option<GroupBy>,

    /// Multiplier for node marker sizes
    #[arg(long)]
    pub node_size_factor: Option<f64>,

    /// Multiplier for edge widths
    #[arg(long)]
    pub edge_width_factor: Option<f64>,

    /// Multiplier for the elevation axis
    #[arg(long)]
    pub elevation_scale_factor: Option<f64>,
}

impl Args {
    /// Arguments for `input` and `output` with every other option at its
    /// default.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: None,
            log_level: "info".to_string(),
            group_by: None,
            node_size_factor: None,
            edge_width_factor: None,
            elevation_scale_factor: None,
        }
    }
}
