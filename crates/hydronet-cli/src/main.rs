//! `hydronet` binary.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use hydronet_cli::{
    Args,
    error_adapter::{render, to_reportables},
};

/// Installs `env_logger`, falling back to `warn` for an unknown level name.
fn init_logger(level: &str) -> LevelFilter {
    let filter = level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .format_timestamp(None)
        .init();

    filter
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logger(&args.log_level);
    debug!(log_level:?, args:?; "Hydronet starting");

    match hydronet_cli::run(&args) {
        Ok(()) => {
            info!(output = args.output; "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            to_reportables(&err)
                .iter()
                .for_each(|reportable| error!("{}", render(reportable)));
            ExitCode::FAILURE
        }
    }
}
