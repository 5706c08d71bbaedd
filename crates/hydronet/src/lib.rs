//! Hydronet - 3-D views of hydraulic networks described by transient-flow
//! solver output.
//!
//! The pipeline has three stages, each a plain function:
//!
//! 1. [`parse`] reads the solver's network description into elements, nodes
//!    and connections.
//! 2. [`build_graph`] turns them into a laid-out [`graph::NetworkGraph`].
//! 3. [`project`] maps the graph into a renderer-neutral [`scene::Scene`].
//!
//! [`NetworkBuilder`] runs the same stages bound to an [`AppConfig`].

pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod scene;

mod error;
mod project;

pub use hydronet_core::{color, geometry, identifier, palette, semantic};
pub use hydronet_parser::{Diagnostic, ErrorCode, Parsed, Severity, Span, classify, parse};

pub use error::HydronetError;
pub use graph::build_graph;
pub use project::project;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, JsonExporter};
use graph::NetworkGraph;
use scene::Scene;

/// Builder for parsing and projecting hydraulic networks.
///
/// This provides an API for processing solver output through parsing, graph
/// building, projection and export, with every stage configured from one
/// [`AppConfig`].
///
/// # Examples
///
/// ```rust
/// use hydronet::{NetworkBuilder, config::AppConfig};
///
/// let source = "SYSTEM CONNECTIVITY\nELEM C1 LINK 1 2\nNODE 1 ELEV 10.0";
///
/// let builder = NetworkBuilder::new(AppConfig::default());
/// let parsed = builder.parse(source);
/// let graph = builder.build(&parsed);
/// let scene = builder.project(&graph).expect("Failed to project");
/// let json = builder.render_json(&scene).expect("Failed to render");
///
/// assert_eq!(scene.nodes().len(), 2);
/// assert!(json.contains("\"element_id\": \"C1\""));
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    config: AppConfig,
}

impl NetworkBuilder {
    /// Create a new network builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout, projection
    ///   and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a network description.
    ///
    /// Parsing never fails; skipped lines are listed in
    /// [`Parsed::diagnostics`].
    ///
    /// # Arguments
    ///
    /// * `source` - Solver output text
    pub fn parse(&self, source: &str) -> Parsed {
        let parsed = parse(source);
        trace!(parsed:?; "Parsed network");
        parsed
    }

    /// Build the laid-out graph for a parsed network.
    ///
    /// The layout uses the iteration count and seed from the `[layout]`
    /// configuration section.
    pub fn build(&self, parsed: &Parsed) -> NetworkGraph {
        graph::build_graph_with(
            parsed.elements(),
            parsed.nodes(),
            parsed.connections(),
            self.config.layout(),
        )
    }

    /// Project a graph into a scene and attach the configured background.
    ///
    /// # Errors
    ///
    /// Returns [`HydronetError::InvalidConfiguration`] for a negative or
    /// non-finite projection factor, or [`HydronetError::Config`] if the
    /// background color cannot be parsed.
    pub fn project(&self, graph: &NetworkGraph) -> Result<Scene, HydronetError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(HydronetError::Config)?;

        let mut scene = project(graph, self.config.projection())?;
        scene.set_background(background);
        debug!(background:? = background; "Scene metadata applied");
        Ok(scene)
    }

    /// Render a scene as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HydronetError::Export`] if serialization fails.
    pub fn render_json(&self, scene: &Scene) -> Result<String, HydronetError> {
        let json = JsonExporter::new().render(scene)?;
        info!(bytes = json.len(); "Scene exported");
        Ok(json)
    }
}
