//! Export functionality for projected scenes.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a [`Scene`] into an output format. It is the final stage in
//! the Hydronet processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Solver Output Text
//!     ↓ parse
//! Elements, Nodes, Connections
//!     ↓ build_graph
//! Laid-out Network Graph
//!     ↓ project
//! Scene
//!     ↓ export (this module)
//! Output Document
//! ```
//!
//! # Available Backends
//!
//! - [`JsonExporter`] - pretty-printed JSON for external 3-D renderers
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`HydronetError::Export`] at the crate boundary.
//!
//! [`HydronetError::Export`]: crate::HydronetError::Export

use log::debug;
use thiserror::Error;

use crate::scene::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Renders a scene to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the scene cannot be encoded.
    fn render(&self, scene: &Scene) -> Result<String, Error>;
}

/// Errors that can occur during scene export.
#[derive(Debug, Error)]
pub enum Error {
    /// The scene could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes scenes as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn render(&self, scene: &Scene) -> Result<String, Error> {
        let json = serde_json::to_string_pretty(scene)?;
        debug!(bytes = json.len(); "Scene rendered as JSON");
        Ok(json)
    }
}
