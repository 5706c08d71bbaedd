//! Configuration types for graph building and scene projection.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every field has a default and may be omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Iteration count and seed of the spring layout.
//! - [`ProjectionConfig`] - Size, width and elevation factors and the
//!   [`GroupBy`] strategy.
//! - [`StyleConfig`] - Renderer hints such as background color.
//!
//! # Example
//!
//! ```
//! # use hydronet::config::{AppConfig, GroupBy};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().seed(), 42);
//! assert_eq!(config.projection().group_by(), GroupBy::ByType);
//! assert!(config.projection().validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use hydronet_core::color::Color;

use crate::HydronetError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Projection configuration section.
    #[serde(default)]
    projection: ProjectionConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, projection: ProjectionConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            projection,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the projection configuration.
    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replaces the projection section.
    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }
}

/// Spring layout parameters.
///
/// Both values are fixed for a run; the layout never stops early, so equal
/// input and equal configuration always give equal positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    iterations: usize,
    seed: u64,
}

impl LayoutConfig {
    pub fn new(iterations: usize, seed: u64) -> Self {
        Self { iterations, seed }
    }

    /// Number of simulation steps.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Seed for the initial positions.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            seed: 42,
        }
    }
}

/// How scene vertices are colored and which legend markers are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Color by vertex type, one legend marker per type present.
    #[default]
    ByType,
    /// Color by one of five equal-width elevation buckets, one legend marker
    /// per bucket.
    ByElevationRange,
    /// Keep the type colors assigned when the graph was built, no legend
    /// markers.
    None,
}

impl GroupBy {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupBy::ByType => "by_type",
            GroupBy::ByElevationRange => "by_elevation_range",
            GroupBy::None => "none",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "by_type" => Ok(GroupBy::ByType),
            "by_elevation_range" => Ok(GroupBy::ByElevationRange),
            "none" => Ok(GroupBy::None),
            other => Err(format!(
                "unknown grouping `{other}`, expected one of: by_type, by_elevation_range, none"
            )),
        }
    }
}

/// Scene projection parameters.
///
/// Factors are plain multipliers. They are not clamped; use
/// [`ProjectionConfig::validate`] to reject negative or non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    node_size_factor: f64,
    edge_width_factor: f64,
    elevation_scale_factor: f64,
    group_by: GroupBy,
}

impl ProjectionConfig {
    pub fn node_size_factor(&self) -> f64 {
        self.node_size_factor
    }

    pub fn edge_width_factor(&self) -> f64 {
        self.edge_width_factor
    }

    pub fn elevation_scale_factor(&self) -> f64 {
        self.elevation_scale_factor
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn with_node_size_factor(mut self, factor: f64) -> Self {
        self.node_size_factor = factor;
        self
    }

    pub fn with_edge_width_factor(mut self, factor: f64) -> Self {
        self.edge_width_factor = factor;
        self
    }

    pub fn with_elevation_scale_factor(mut self, factor: f64) -> Self {
        self.elevation_scale_factor = factor;
        self
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Checks that every factor is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`HydronetError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), HydronetError> {
        let factors = [
            ("node_size_factor", self.node_size_factor),
            ("edge_width_factor", self.edge_width_factor),
            ("elevation_scale_factor", self.elevation_scale_factor),
        ];
        for (field, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(HydronetError::InvalidConfiguration { field, value });
            }
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            node_size_factor: 20.0,
            edge_width_factor: 3.0,
            elevation_scale_factor: 1.0,
            group_by: GroupBy::ByType,
        }
    }
}

/// Renderer hints carried into the scene metadata.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color, as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
