//! Hydronet CLI library
//!
//! This module contains the core CLI logic for the Hydronet network viewer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use hydronet::{HydronetError, NetworkBuilder};

use error_adapter::{diagnostic_reportables, render};

/// Run the Hydronet CLI application
///
/// This function processes the input file through the Hydronet pipeline
/// and writes the resulting scene as JSON to the output file. Recovered
/// problems are logged as warnings and do not stop the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `HydronetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid projection factors
/// - Export errors
pub fn run(args: &Args) -> Result<(), HydronetError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing network"
    );

    // Load configuration and apply command-line overrides
    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args)?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process network using NetworkBuilder API
    let builder = NetworkBuilder::new(app_config);
    let parsed = builder.parse(&source);
    let graph = builder.build(&parsed);
    info!(summary:% = graph.summary(); "Network summary");

    let scene = builder.project(&graph)?;

    let diagnostics = parsed
        .diagnostics()
        .iter()
        .chain(graph.diagnostics())
        .chain(scene.diagnostics())
        .cloned()
        .collect::<Vec<_>>();
    for reportable in diagnostic_reportables(&diagnostics, &source) {
        warn!("{}", render(&reportable));
    }

    let json = builder.render_json(&scene)?;

    // Write output file
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Scene exported successfully");

    Ok(())
}
