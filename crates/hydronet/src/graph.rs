//! Graph construction for parsed hydraulic networks.
//!
//! [`build_graph`] turns the parser's three collections into a
//! [`NetworkGraph`]: one vertex per node, one edge per connection, a seeded
//! spring layout for the plane, and node elevation for height.
//!
//! Building never fails. A connection whose endpoint was never declared as a
//! node gets a default junction vertex and a warning [`Diagnostic`].

use std::fmt;

use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use petgraph::graph::{NodeIndex, UnGraph};

use hydronet_core::{
    color::Color,
    geometry::Point3,
    identifier::NodeId,
    palette,
    semantic::{
        Connection, ElementKind, Elements, Node, NodeKind, Nodes, PropertyBag, capitalize,
    },
};
use hydronet_parser::{Diagnostic, ErrorCode};

use crate::{config::LayoutConfig, layout::spring};

/// Divisor applied to elevation to obtain the height coordinate.
const ELEVATION_DIVISOR: f64 = 1000.0;

/// Base render size of a vertex with no incident edges.
const BASE_VERTEX_SIZE: f64 = 5.0;

/// Render size added per incident edge.
const SIZE_PER_EDGE: f64 = 2.0;

/// A graph vertex: one network node with its render attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: NodeId,
    kind: NodeKind,
    label: String,
    element: Option<String>,
    elevation: Option<f64>,
    position: Point3,
    size: f64,
    color: Color,
    degree: usize,
}

impl Vertex {
    fn new(node: &Node) -> Self {
        let label = match node.element() {
            Some(element) => element.to_string(),
            None => format!("{} {}", capitalize(node.kind().as_str()), node.id()),
        };

        Self {
            id: node.id(),
            kind: node.kind(),
            label,
            element: node.element().map(str::to_string),
            elevation: node.elevation(),
            position: Point3::default(),
            size: BASE_VERTEX_SIZE,
            color: palette::color_for_type(node.kind().as_str()),
            degree: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display label: the owning element id, or the capitalized type and id.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Id of the single-node element sitting on this vertex, if any.
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Declared elevation. `None` means the elevation is unknown, which is
    /// distinct from an elevation of zero.
    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Layout position; `z` is elevation divided by 1000, or 0 when unknown.
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Render size before any projection scaling: `5 + 2 * degree`.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Type color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of incident edges. A self-loop counts twice.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Data carried by a graph edge: one link element.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    element_id: String,
    kind: ElementKind,
    weight: f64,
    length: Option<f64>,
    diameter: Option<f64>,
    friction: Option<f64>,
    properties: PropertyBag,
    color: Color,
}

impl EdgeData {
    fn new(connection: &Connection, properties: PropertyBag) -> Self {
        let length = properties.get("leng").copied();
        let diameter = properties
            .get("diam")
            .or_else(|| properties.get("diameter"))
            .copied();
        let friction = properties.get("fric").copied();

        Self {
            element_id: connection.element_id().to_string(),
            kind: connection.kind(),
            weight: length.unwrap_or(1.0),
            length,
            diameter,
            friction,
            properties,
            color: palette::color_for_type(connection.kind().as_str()),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Spring weight used by the layout: the `leng` property, else 1.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// The `diam` property, falling back to `diameter`.
    pub fn diameter(&self) -> Option<f64> {
        self.diameter
    }

    pub fn friction(&self) -> Option<f64> {
        self.friction
    }

    /// The element's full property bag; empty if the element is unknown.
    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Vertex and edge counts of a [`NetworkGraph`], overall and per type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSummary {
    vertex_count: usize,
    edge_count: usize,
    vertex_kinds: IndexMap<&'static str, usize>,
    edge_kinds: IndexMap<&'static str, usize>,
}

impl NetworkSummary {
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Vertex count per type name, in first-appearance order.
    pub fn vertex_kinds(&self) -> &IndexMap<&'static str, usize> {
        &self.vertex_kinds
    }

    /// Edge count per type name, in first-appearance order.
    pub fn edge_kinds(&self) -> &IndexMap<&'static str, usize> {
        &self.edge_kinds
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes", self.vertex_count)?;
        write_kinds(f, &self.vertex_kinds)?;
        write!(f, ", {} links", self.edge_count)?;
        write_kinds(f, &self.edge_kinds)
    }
}

fn write_kinds(f: &mut fmt::Formatter<'_>, kinds: &IndexMap<&'static str, usize>) -> fmt::Result {
    if kinds.is_empty() {
        return Ok(());
    }
    f.write_str(" (")?;
    for (i, (kind, count)) in kinds.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{kind}: {count}")?;
    }
    f.write_str(")")
}

/// An undirected, laid-out network graph.
///
/// Vertices iterate in node order (declared nodes first, then junctions
/// created for missing endpoints) and edges in connection declaration order.
/// The graph is not changed by projection and can be projected any number
/// of times.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    graph: UnGraph<Vertex, EdgeData>,
    index: IndexMap<NodeId, NodeIndex>,
    diagnostics: Vec<Diagnostic>,
}

impl NetworkGraph {
    /// Returns an iterator over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.graph.node_weights()
    }

    /// Returns an iterator over all edges with their endpoint vertices.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex, &EdgeData)> {
        self.graph.edge_indices().filter_map(|edge| {
            let (source, target) = self.graph.edge_endpoints(edge)?;
            Some((
                &self.graph[source],
                &self.graph[target],
                &self.graph[edge],
            ))
        })
    }

    /// Returns the vertex for a node id.
    pub fn vertex(&self, id: NodeId) -> Option<&Vertex> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Warnings for endpoints that had to be created.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Counts vertices and edges by type.
    pub fn summary(&self) -> NetworkSummary {
        let mut summary = NetworkSummary {
            vertex_count: self.vertex_count(),
            edge_count: self.edge_count(),
            ..NetworkSummary::default()
        };
        for vertex in self.vertices() {
            *summary.vertex_kinds.entry(vertex.kind.as_str()).or_default() += 1;
        }
        for edge in self.graph.edge_weights() {
            *summary.edge_kinds.entry(edge.kind.as_str()).or_default() += 1;
        }
        summary
    }

    fn add_vertex(&mut self, vertex: Vertex) -> NodeIndex {
        let id = vertex.id;
        let idx = self.graph.add_node(vertex);
        self.index.insert(id, idx);
        idx
    }

    /// Returns the vertex index for `id`, creating a junction if needed.
    fn endpoint(&mut self, id: NodeId, connection: &Connection) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }

        warn!(
            node_id:% = id,
            element_id = connection.element_id();
            "Link references an undeclared node, creating a junction"
        );
        self.diagnostics.push(
            Diagnostic::warning(format!(
                "element `{}` references undeclared node {id}",
                connection.element_id()
            ))
            .with_code(ErrorCode::H200)
            .with_help("a default junction was created for this node"),
        );

        self.add_vertex(Vertex::new(&Node::new(id, NodeKind::Junction)))
    }
}

/// Builds a graph using the default [`LayoutConfig`].
///
/// Nodes whose ids are missing from `nodes` but appear in `connections` are
/// created as junctions.
///
/// # Examples
///
/// ```
/// # use hydronet::build_graph;
/// let (elements, nodes, connections) = hydronet::parse(
///     "SYSTEM CONNECTIVITY\nELEM C1 LINK 1 2\nNODE 1 ELEV 10.0\nNODE 2 ELEV 5.0",
/// )
/// .into_parts();
///
/// let graph = build_graph(&elements, &nodes, &connections);
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub fn build_graph(
    elements: &Elements,
    nodes: &Nodes,
    connections: &[Connection],
) -> NetworkGraph {
    build_graph_with(elements, nodes, connections, &LayoutConfig::default())
}

/// Builds a graph with explicit layout settings.
pub fn build_graph_with(
    elements: &Elements,
    nodes: &Nodes,
    connections: &[Connection],
    layout: &LayoutConfig,
) -> NetworkGraph {
    let mut network = NetworkGraph::default();

    for node in nodes.values() {
        let idx = network.add_vertex(Vertex::new(node));
        trace!(node_id:% = node.id(), index = idx.index(); "Added vertex");
    }

    for connection in connections {
        let source = network.endpoint(connection.source(), connection);
        let target = network.endpoint(connection.target(), connection);

        let properties = match elements.get(connection.element_id()) {
            Some(element) => element.properties().clone(),
            None => {
                debug!(
                    element_id = connection.element_id();
                    "Link element has no declaration, using empty properties"
                );
                PropertyBag::new()
            }
        };

        network
            .graph
            .add_edge(source, target, EdgeData::new(connection, properties));
        network.graph[source].degree += 1;
        network.graph[target].degree += 1;
    }

    let positions = spring::Engine::new()
        .set_iterations(layout.iterations())
        .set_seed(layout.seed())
        .calculate(&network.graph, EdgeData::weight);

    for (vertex, point) in network.graph.node_weights_mut().zip(positions) {
        let z = vertex.elevation.unwrap_or(0.0) / ELEVATION_DIVISOR;
        vertex.position = point.with_z(z);
        vertex.size = BASE_VERTEX_SIZE + SIZE_PER_EDGE * vertex.degree as f64;
    }

    info!(
        vertices = network.vertex_count(),
        edges = network.edge_count(),
        created_junctions = network.diagnostics.len();
        "Graph built"
    );
    network
}
