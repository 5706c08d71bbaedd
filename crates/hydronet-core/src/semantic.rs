//! Semantic model of a parsed hydraulic network.
//!
//! These are the three collections produced by the parser and consumed by
//! the graph builder:
//!
//! - [`Elements`] - named network components keyed by their identifier
//! - [`Nodes`] - numbered topology points keyed by [`NodeId`]
//! - a `Vec<Connection>` - link elements in declaration order
//!
//! Both maps preserve first-declaration order, which keeps every downstream
//! stage deterministic for identical input text.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::identifier::NodeId;

/// Numeric properties of an element, keyed by lower-cased property name.
pub type PropertyBag = IndexMap<String, f64>;

/// All elements of a network in declaration order.
pub type Elements = IndexMap<String, Element>;

/// All nodes of a network in first-reference order.
pub type Nodes = IndexMap<NodeId, Node>;

/// Semantic type of a network element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Conduit,
    Dummy,
    Reservoir,
    FlowBalancing,
    Storage,
    Unknown,
}

impl ElementKind {
    /// Returns the lower-case type name used for color lookup and legends.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Conduit => "conduit",
            ElementKind::Dummy => "dummy",
            ElementKind::Reservoir => "reservoir",
            ElementKind::FlowBalancing => "flowbalancing",
            ElementKind::Storage => "storage",
            ElementKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a topology node.
///
/// A node starts as [`NodeKind::Node`] when only its elevation is declared,
/// becomes a [`NodeKind::Junction`] when a link or `JUNCTION` declaration
/// touches it first, and takes the type of a single-node element attached to
/// it when that element is what introduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Node,
    Junction,
    Element(ElementKind),
}

impl NodeKind {
    /// Returns the lower-case type name used for color lookup and legends.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Node => "node",
            NodeKind::Junction => "junction",
            NodeKind::Element(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How an element attaches to the network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Topology {
    /// Element sits on a single node (reservoirs, storages, ...).
    Attached { node: NodeId },
    /// Element links two nodes (conduits, dummies, ...).
    Link { source: NodeId, target: NodeId },
}

/// A named network component with a type and numeric property bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    id: String,
    kind: ElementKind,
    topology: Topology,
    properties: PropertyBag,
}

impl Element {
    /// Creates an element with an empty property bag.
    pub fn new(id: impl Into<String>, kind: ElementKind, topology: Topology) -> Self {
        Self {
            id: id.into(),
            kind,
            topology,
            properties: PropertyBag::new(),
        }
    }

    /// Returns the element with the given properties merged in.
    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.merge_properties(properties);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Looks up a single numeric property.
    pub fn property(&self, key: &str) -> Option<f64> {
        self.properties.get(key).copied()
    }

    /// Overrides the element type, as a committed property block does.
    pub fn set_kind(&mut self, kind: ElementKind) {
        self.kind = kind;
    }

    /// Merges properties into the bag; later values replace earlier ones.
    pub fn merge_properties(&mut self, properties: impl IntoIterator<Item = (String, f64)>) {
        self.properties.extend(properties);
    }
}

/// A numbered topology point.
///
/// `elevation` is `None` until a declaration provides one. Zero is a valid,
/// distinct elevation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    elevation: Option<f64>,
    element: Option<String>,
    neighbors: Vec<NodeId>,
}

impl Node {
    /// Creates a node with no elevation, no owning element and no neighbors.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            elevation: None,
            element: None,
            neighbors: Vec::new(),
        }
    }

    /// Returns the node owned by the given element.
    pub fn with_element(mut self, element_id: impl Into<String>) -> Self {
        self.element = Some(element_id.into());
        self
    }

    /// Returns the node with the given elevation.
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Identifier of the single-node element that introduced this node.
    pub fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    /// Neighbor ids in link declaration order. Parallel links repeat a neighbor.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn set_elevation(&mut self, elevation: f64) {
        self.elevation = Some(elevation);
    }

    pub fn push_neighbor(&mut self, neighbor: NodeId) {
        self.neighbors.push(neighbor);
    }
}

/// A link element between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    element_id: String,
    source: NodeId,
    target: NodeId,
    kind: ElementKind,
}

impl Connection {
    pub fn new(
        element_id: impl Into<String>,
        source: NodeId,
        target: NodeId,
        kind: ElementKind,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            source,
            target,
            kind,
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Element type as classified when the link was declared.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

/// Upper-cases the first character and lower-cases the rest.
///
/// Used for type names in labels and legends (`"flowbalancing"` becomes
/// `"Flowbalancing"`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
