//! Projection of a laid-out graph into a renderable scene.
//!
//! [`project`] reads a [`NetworkGraph`] and a [`ProjectionConfig`] and
//! returns a [`Scene`]. The graph is only borrowed, so one graph can be
//! projected again for every configuration change.
//!
//! # Grouping
//!
//! - [`GroupBy::ByType`] colors vertices by type and adds one legend marker
//!   per type present, in first-appearance order.
//! - [`GroupBy::ByElevationRange`] splits the elevation range into five
//!   equal buckets, colors vertices by bucket, and adds one legend marker per
//!   bucket. When every vertex sits at the same elevation, all of them land
//!   in the first bucket and a warning diagnostic is attached to the scene.
//! - [`GroupBy::None`] keeps the type colors from graph building and adds no
//!   legend markers.

use std::collections::HashSet;

use log::{debug, info, warn};

use hydronet_core::{
    color::Color,
    geometry::Point3,
    palette,
    semantic::{ElementKind, capitalize},
};
use hydronet_parser::{Diagnostic, ErrorCode};

use crate::{
    HydronetError,
    config::{GroupBy, ProjectionConfig},
    graph::{EdgeData, NetworkGraph, Vertex},
    scene::{LegendMarker, Scene, SceneEdge, SceneMetadata, SceneNode},
};

/// Number of elevation buckets.
const ELEVATION_GROUPS: usize = 5;

/// Base size of legend-only markers.
const LEGEND_MARKER_SIZE: f64 = 10.0;

/// Property keys already shown on their own edge hover line.
const SHOWN_PROPERTIES: [&str; 3] = ["leng", "diam", "fric"];

/// Projects `graph` into a scene.
///
/// # Errors
///
/// Returns [`HydronetError::InvalidConfiguration`] if any factor in `config`
/// is negative or not finite. Nothing is projected in that case.
pub fn project(graph: &NetworkGraph, config: &ProjectionConfig) -> Result<Scene, HydronetError> {
    config.validate()?;

    let mut diagnostics = Vec::new();
    let mut nodes: Vec<SceneNode> = graph
        .vertices()
        .map(|vertex| project_vertex(vertex, config))
        .collect();
    let edges: Vec<SceneEdge> = project_edges(graph, config);

    let anchor = nodes.first().map(SceneNode::position);
    let legend = match config.group_by() {
        GroupBy::ByType => group_by_type(&mut nodes, anchor),
        GroupBy::ByElevationRange => {
            group_by_elevation(graph, &mut nodes, anchor, &mut diagnostics)
        }
        GroupBy::None => Vec::new(),
    };

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        legend_markers = legend.len(),
        group_by:% = config.group_by();
        "Scene projected"
    );

    Ok(Scene::new(
        SceneMetadata::new(config.group_by()),
        nodes,
        edges,
        legend,
        diagnostics,
    ))
}

fn project_vertex(vertex: &Vertex, config: &ProjectionConfig) -> SceneNode {
    let kind = vertex.kind();

    let mut hover = vec![
        format!("ID: {}", vertex.id()),
        format!("Type: {}", capitalize(kind.as_str())),
    ];
    match vertex.elevation() {
        Some(elevation) => hover.push(format!("Elevation: {elevation:.2}")),
        None => hover.push("Elevation: Unknown".to_string()),
    }
    if let Some(element) = vertex.element() {
        hover.push(format!("Element: {element}"));
    }
    hover.push(format!("Connections: {}", vertex.degree()));

    SceneNode {
        id: vertex.id(),
        label: vertex.label().to_string(),
        kind,
        position: vertex
            .position()
            .scale_z(config.elevation_scale_factor()),
        size: vertex.size() * config.node_size_factor() / 10.0,
        color: vertex.color(),
        hover,
    }
}

/// Projects edges in declaration order. The first edge of each type is the
/// legend entry for that type.
fn project_edges(graph: &NetworkGraph, config: &ProjectionConfig) -> Vec<SceneEdge> {
    let mut seen_types: HashSet<ElementKind> = HashSet::new();
    let scale = config.elevation_scale_factor();

    graph
        .edges()
        .map(|(source, target, edge)| {
            let legend = seen_types
                .insert(edge.kind())
                .then(|| capitalize(edge.kind().as_str()));

            SceneEdge {
                element_id: edge.element_id().to_string(),
                kind: edge.kind(),
                source: source.id(),
                target: target.id(),
                start: source.position().scale_z(scale),
                end: target.position().scale_z(scale),
                width: edge_width(edge.diameter(), config.edge_width_factor()),
                color: edge.color(),
                hover: edge_hover(edge),
                legend,
            }
        })
        .collect()
}

/// `log(1 + diameter) * factor` whenever a diameter is recorded, zero
/// included, else `factor`. Negative diameters count as missing.
fn edge_width(diameter: Option<f64>, factor: f64) -> f64 {
    match diameter {
        Some(diameter) if diameter >= 0.0 => diameter.ln_1p() * factor,
        _ => factor,
    }
}

fn edge_hover(edge: &EdgeData) -> Vec<String> {
    let mut hover = vec![
        format!("ID: {}", edge.element_id()),
        format!("Type: {}", capitalize(edge.kind().as_str())),
    ];
    if let Some(length) = edge.length() {
        hover.push(format!("Length: {length:.2}"));
    }
    if let Some(diameter) = edge.diameter() {
        hover.push(format!("Diameter: {diameter:.2}"));
    }
    if let Some(friction) = edge.friction() {
        hover.push(format!("Friction: {friction:.5}"));
    }
    for (key, value) in edge.properties() {
        if SHOWN_PROPERTIES.contains(&key.as_str()) {
            continue;
        }
        hover.push(format!("{}: {value:?}", capitalize(key)));
    }
    hover
}

fn legend_marker(name: String, color: Color, anchor: Point3) -> LegendMarker {
    LegendMarker {
        name,
        color,
        position: anchor,
        size: LEGEND_MARKER_SIZE,
    }
}

fn group_by_type(nodes: &mut [SceneNode], anchor: Option<Point3>) -> Vec<LegendMarker> {
    let mut types: Vec<&'static str> = Vec::new();
    for node in nodes.iter_mut() {
        let kind = node.kind.as_str();
        node.color = palette::color_for_type(kind);
        if !types.contains(&kind) {
            types.push(kind);
        }
    }

    let Some(anchor) = anchor else {
        return Vec::new();
    };
    types
        .into_iter()
        .map(|kind| legend_marker(capitalize(kind), palette::color_for_type(kind), anchor))
        .collect()
}

fn group_by_elevation(
    graph: &NetworkGraph,
    nodes: &mut [SceneNode],
    anchor: Option<Point3>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<LegendMarker> {
    // Unknown elevations count as zero for bucketing only.
    let elevations: Vec<f64> = graph
        .vertices()
        .map(|vertex| vertex.elevation().unwrap_or(0.0))
        .collect();
    let Some(anchor) = anchor else {
        return Vec::new();
    };

    let min = elevations.iter().copied().fold(f64::INFINITY, f64::min);
    let max = elevations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let degenerate = max == min;
    let range = if degenerate {
        warn!(elevation = min; "All vertices share one elevation, using a single group");
        diagnostics.push(
            Diagnostic::advice(format!("every node is at elevation {min:.2}"))
                .with_code(ErrorCode::H300)
                .with_help("all nodes were placed in the first elevation group"),
        );
        1.0
    } else {
        max - min
    };
    let group_size = range / ELEVATION_GROUPS as f64;

    let colors = palette::group_colors(ELEVATION_GROUPS);
    for (node, elevation) in nodes.iter_mut().zip(&elevations) {
        let group = if degenerate {
            0
        } else {
            (((elevation - min) / group_size) as usize).min(ELEVATION_GROUPS - 1)
        };
        node.color = colors[group];
    }

    debug!(min = min, max = max, group_size = group_size; "Elevation groups computed");

    colors
        .into_iter()
        .enumerate()
        .map(|(i, color)| {
            let low = min + i as f64 * group_size;
            let high = min + (i + 1) as f64 * group_size;
            legend_marker(format!("Elev: {low:.1}-{high:.1}"), color, anchor)
        })
        .collect()
}
