//! TOML configuration discovery and command-line overrides.
//!
//! A configuration file is optional. When `--config` is not given the first
//! existing file among [`candidate_paths`] is used, and the defaults apply if
//! there is none.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use hydronet::{HydronetError, config::AppConfig};

use crate::Args;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("configuration file {0} does not exist")]
    NotFound(PathBuf),

    #[error("invalid style in {path}: {message}")]
    Style { path: PathBuf, message: String },
}

impl From<ConfigError> for HydronetError {
    fn from(err: ConfigError) -> Self {
        HydronetError::Config(err.to_string())
    }
}

/// Implicit configuration locations, most specific first.
///
/// `./hydronet/config.toml` comes before the per-user directory reported by
/// [`ProjectDirs`].
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("hydronet").join(CONFIG_FILE)];
    match ProjectDirs::from("com", "hydronet", "hydronet") {
        Some(dirs) => paths.push(dirs.config_dir().join(CONFIG_FILE)),
        None => debug!("No per-user configuration directory on this platform"),
    }
    paths
}

/// Resolves the application configuration.
///
/// # Errors
///
/// Fails when `explicit_path` names a missing file, or when the chosen file
/// is not valid TOML or holds an unparsable background color.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, HydronetError> {
    if let Some(path) = explicit_path {
        return load_config_file(path.as_ref());
    }

    match candidate_paths().into_iter().find(|path| path.is_file()) {
        Some(path) => load_config_file(&path),
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Applies the projection flags from `args` on top of `config`.
///
/// # Errors
///
/// Returns [`HydronetError::InvalidConfiguration`] if the resulting
/// projection settings hold a negative or non-finite factor.
pub fn apply_overrides(config: AppConfig, args: &Args) -> Result<AppConfig, HydronetError> {
    let mut projection = *config.projection();
    if let Some(group_by) = args.group_by {
        projection = projection.with_group_by(group_by);
    }
    if let Some(factor) = args.node_size_factor {
        projection = projection.with_node_size_factor(factor);
    }
    if let Some(factor) = args.edge_width_factor {
        projection = projection.with_edge_width_factor(factor);
    }
    if let Some(factor) = args.elevation_scale_factor {
        projection = projection.with_elevation_scale_factor(factor);
    }
    projection.validate()?;

    debug!(projection:? = projection; "Projection settings resolved");
    Ok(config.with_projection(projection))
}

fn load_config_file(path: &Path) -> Result<AppConfig, HydronetError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }
    info!(path:% = path.display(); "Reading configuration");

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Err(message) = config.style().background_color() {
        return Err(ConfigError::Style {
            path: path.to_path_buf(),
            message,
        }
        .into());
    }

    Ok(config)
}
