//! Backend-agnostic scene description.
//!
//! A [`Scene`] is everything a 3-D renderer needs to draw a projected
//! network: markers for vertices, segments for edges, legend-only markers,
//! and display metadata. Every type here serializes with serde; see
//! [`crate::export`] for the JSON hand-off.

use serde::Serialize;

use hydronet_core::{
    color::Color,
    geometry::Point3,
    identifier::NodeId,
    semantic::{ElementKind, NodeKind},
};
use hydronet_parser::Diagnostic;

use crate::config::GroupBy;

const TITLE: &str = "Hydraulic System Network";
const Z_AXIS_TITLE: &str = "Elevation (scaled)";
const LEGEND_TITLE: &str = "Element Types";

/// A projected network, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    metadata: SceneMetadata,
    nodes: Vec<SceneNode>,
    edges: Vec<SceneEdge>,
    legend: Vec<LegendMarker>,
    #[serde(skip)]
    diagnostics: Vec<Diagnostic>,
}

impl Scene {
    pub(crate) fn new(
        metadata: SceneMetadata,
        nodes: Vec<SceneNode>,
        edges: Vec<SceneEdge>,
        legend: Vec<LegendMarker>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            metadata,
            nodes,
            edges,
            legend,
            diagnostics,
        }
    }

    pub fn metadata(&self) -> &SceneMetadata {
        &self.metadata
    }

    /// Vertex markers, in graph vertex order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Edge segments, in connection declaration order.
    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    /// Legend-only markers. They are hidden data points that exist so the
    /// legend lists every group.
    pub fn legend(&self) -> &[LegendMarker] {
        &self.legend
    }

    /// Conditions recovered during projection.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Sets the renderer background color.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.metadata.background = color;
    }
}

/// A vertex marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub(crate) id: NodeId,
    pub(crate) label: String,
    pub(crate) kind: NodeKind,
    pub(crate) position: Point3,
    pub(crate) size: f64,
    pub(crate) color: Color,
    pub(crate) hover: Vec<String>,
}

impl SceneNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Position with `z` multiplied by the elevation scale factor.
    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Hover text, one entry per line.
    pub fn hover(&self) -> &[String] {
        &self.hover
    }
}

/// An edge segment between two vertex positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
    pub(crate) element_id: String,
    pub(crate) kind: ElementKind,
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub(crate) start: Point3,
    pub(crate) end: Point3,
    pub(crate) width: f64,
    pub(crate) color: Color,
    pub(crate) hover: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) legend: Option<String>,
}

impl SceneEdge {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn start(&self) -> Point3 {
        self.start
    }

    pub fn end(&self) -> Point3 {
        self.end
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn hover(&self) -> &[String] {
        &self.hover
    }

    /// Legend entry name. Only the first edge of each type has one.
    pub fn legend(&self) -> Option<&str> {
        self.legend.as_deref()
    }

    pub fn shows_in_legend(&self) -> bool {
        self.legend.is_some()
    }
}

/// A marker that appears only in the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendMarker {
    pub(crate) name: String,
    pub(crate) color: Color,
    pub(crate) position: Point3,
    pub(crate) size: f64,
}

impl LegendMarker {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

/// Shared styling for vertex markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    opacity: f64,
    outline_width: f64,
    outline_color: Color,
}

impl MarkerStyle {
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn outline_width(&self) -> f64 {
        self.outline_width
    }

    pub fn outline_color(&self) -> Color {
        self.outline_color
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            outline_width: 1.0,
            outline_color: Color::from_rgba(0, 0, 0, 128),
        }
    }
}

/// Titles and renderer hints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneMetadata {
    title: &'static str,
    z_axis_title: &'static str,
    legend_title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<Color>,
    node_style: MarkerStyle,
    group_by: GroupBy,
}

impl SceneMetadata {
    pub(crate) fn new(group_by: GroupBy) -> Self {
        Self {
            title: TITLE,
            z_axis_title: Z_AXIS_TITLE,
            legend_title: LEGEND_TITLE,
            background: None,
            node_style: MarkerStyle::default(),
            group_by,
        }
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn z_axis_title(&self) -> &str {
        self.z_axis_title
    }

    pub fn legend_title(&self) -> &str {
        self.legend_title
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn node_style(&self) -> MarkerStyle {
        self.node_style
    }

    /// Grouping the scene was projected with.
    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }
}
