//! Section-aware scanner over solver network descriptions.
//!
//! The scanner is a small state machine: the current [`Section`] crossed with
//! an optional open [`PropertyContext`]. Lines are processed in a single pass
//! and every recovered problem becomes a [`Diagnostic`].

use hydronet_core::{
    identifier::NodeId,
    semantic::{
        Connection, Element, ElementKind, Elements, Node, NodeKind, Nodes, PropertyBag,
        Topology,
    },
};
use log::{debug, trace, warn};

use crate::{
    Parsed,
    classify::classify,
    error::{Diagnostic, ErrorCode},
    line::{self, Line, MalformedLine},
};

const CONNECTIVITY_MARKER: &str = "SYSTEM CONNECTIVITY";
const PROPERTIES_MARKER: &str = "ELEMENT PROPERTIES";
const FINISH_MARKER: &str = "FINISH";

/// The part of the description a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Connectivity,
    Properties,
}

/// An anonymous element block in the properties section.
///
/// Opened by `RESERVOIR`, filled by the lines that follow and committed onto
/// a named element by `ID`.
#[derive(Debug, Clone, PartialEq)]
struct PropertyContext {
    kind: ElementKind,
    properties: PropertyBag,
}

impl PropertyContext {
    fn reservoir() -> Self {
        Self {
            kind: ElementKind::Reservoir,
            properties: PropertyBag::new(),
        }
    }
}

/// Accumulates the semantic model while lines are scanned.
pub(crate) struct TextModelParser {
    section: Section,
    context: Option<PropertyContext>,
    elements: Elements,
    nodes: Nodes,
    connections: Vec<Connection>,
    diagnostics: Vec<Diagnostic>,
}

impl TextModelParser {
    pub(crate) fn new() -> Self {
        Self {
            section: Section::None,
            context: None,
            elements: Elements::new(),
            nodes: Nodes::new(),
            connections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scans the whole source text.
    pub(crate) fn parse(mut self, source: &str) -> Parsed {
        let mut offset = 0;
        for (index, raw) in source.split_inclusive('\n').enumerate() {
            let trimmed = raw.trim_start();
            let start = offset + (raw.len() - trimmed.len());
            self.line(trimmed.trim_end(), start, index + 1);
            offset += raw.len();
        }

        if let Some(context) = &self.context {
            debug!(kind = context.kind.as_str(); "Input ended with an uncommitted property block");
        }

        Parsed {
            elements: self.elements,
            nodes: self.nodes,
            connections: self.connections,
            diagnostics: self.diagnostics,
        }
    }

    /// Processes one trimmed line starting at byte `start` of the source.
    fn line(&mut self, text: &str, start: usize, line_number: usize) {
        if text.is_empty() {
            return;
        }

        if text.contains(CONNECTIVITY_MARKER) {
            debug!(line = line_number; "Entering connectivity section");
            self.section = Section::Connectivity;
            return;
        }

        if text.contains(PROPERTIES_MARKER) {
            debug!(line = line_number; "Entering element properties section");
            self.section = Section::Properties;
            return;
        }

        if text.contains(FINISH_MARKER) && self.context.is_some() {
            debug!(line = line_number; "Property block closed without commit");
            self.context = None;
            return;
        }

        let recognized = match self.section {
            Section::None => return,
            Section::Connectivity => line::connectivity_line(text),
            Section::Properties => line::properties_line(text),
        };

        match recognized {
            Ok(Some(line)) => self.apply(line, line_number),
            Ok(None) => trace!(line = line_number, text = text; "Ignoring unrecognized line"),
            Err(err) => self.malformed(err, start, line_number),
        }
    }

    fn apply(&mut self, line: Line<'_>, line_number: usize) {
        match line {
            Line::ElemAt { id, node } => self.attach_element(id, node, line_number),
            Line::ElemLink { id, source, target } => {
                self.link_element(id, source, target, line_number)
            }
            Line::JunctionAt { node } => {
                self.nodes
                    .entry(node)
                    .and_modify(|existing| existing.set_kind(NodeKind::Junction))
                    .or_insert_with(|| Node::new(node, NodeKind::Junction));
                debug!(line = line_number, node_id:% = node; "Declared junction");
            }
            Line::NodeElev { node, elevation } => {
                self.nodes
                    .entry(node)
                    .and_modify(|existing| existing.set_elevation(elevation))
                    .or_insert_with(|| Node::new(node, NodeKind::Node).with_elevation(elevation));
                debug!(line = line_number, node_id:% = node, elevation = elevation; "Set node elevation");
            }
            Line::Reservoir => {
                if self.context.is_some() {
                    debug!(line = line_number; "Discarding uncommitted property block");
                }
                self.context = Some(PropertyContext::reservoir());
                debug!(line = line_number; "Opened reservoir property block");
            }
            Line::Conduit { id, properties } => match self.elements.get_mut(id) {
                Some(element) => {
                    debug!(line = line_number, element_id = id, count = properties.len(); "Merged conduit properties");
                    element.merge_properties(properties);
                }
                None => {
                    warn!(line = line_number, element_id = id; "Conduit properties for undeclared element ignored");
                }
            },
            Line::Id { id } => self.commit_context(id, line_number),
            Line::Elev { elevation } => {
                self.with_context(line_number, |context| {
                    context
                        .properties
                        .insert("elevation".to_string(), elevation);
                });
            }
            Line::Dummy => {
                self.with_context(line_number, |context| context.kind = ElementKind::Dummy);
            }
            Line::Property { key, value } => {
                self.with_context(line_number, |context| {
                    context.properties.insert(key.to_string(), value);
                });
            }
        }
    }

    fn attach_element(&mut self, id: &str, node: NodeId, line_number: usize) {
        let kind = classify(id);
        self.insert_element(Element::new(id, kind, Topology::Attached { node }), line_number);

        if !self.nodes.contains_key(&node) {
            self.nodes.insert(
                node,
                Node::new(node, NodeKind::Element(kind)).with_element(id),
            );
            debug!(line = line_number, node_id:% = node, element_id = id; "Created node for attached element");
        }
    }

    fn link_element(&mut self, id: &str, source: NodeId, target: NodeId, line_number: usize) {
        let kind = classify(id);
        self.insert_element(
            Element::new(id, kind, Topology::Link { source, target }),
            line_number,
        );
        self.connections
            .push(Connection::new(id, source, target, kind));

        for node in [source, target] {
            self.nodes
                .entry(node)
                .or_insert_with(|| Node::new(node, NodeKind::Junction));
        }
        if let Some(node) = self.nodes.get_mut(&source) {
            node.push_neighbor(target);
        }
        if let Some(node) = self.nodes.get_mut(&target) {
            node.push_neighbor(source);
        }
        debug!(line = line_number, element_id = id, source:% = source, target:% = target; "Linked nodes");
    }

    /// Declares an element; a repeated declaration replaces the earlier one.
    fn insert_element(&mut self, element: Element, line_number: usize) {
        let id = element.id().to_string();
        if self.elements.insert(id.clone(), element).is_some() {
            warn!(line = line_number, element_id = id; "Element declared again, replacing earlier declaration");
        }
    }

    /// Applies an `ID` line: moves the open block onto the named element.
    fn commit_context(&mut self, id: &str, line_number: usize) {
        let Some(context) = self.context.take() else {
            trace!(line = line_number, element_id = id; "Ignoring ID outside a property block");
            return;
        };

        match self.elements.get_mut(id) {
            Some(element) => {
                element.set_kind(context.kind);
                element.merge_properties(context.properties);
                debug!(line = line_number, element_id = id, kind = context.kind.as_str(); "Committed property block");
            }
            None => {
                warn!(line = line_number, element_id = id; "Property block committed to undeclared element, discarded");
            }
        }
    }

    fn with_context(&mut self, line_number: usize, update: impl FnOnce(&mut PropertyContext)) {
        match self.context.as_mut() {
            Some(context) => update(context),
            None => trace!(line = line_number; "Ignoring property line outside a property block"),
        }
    }

    fn malformed(&mut self, err: MalformedLine, start: usize, line_number: usize) {
        warn!(line = line_number, reason:% = err; "Skipping malformed line");

        let mut diagnostic = Diagnostic::warning(err.message)
            .with_code(ErrorCode::H100)
            .with_label(err.span.offset_by(start), err.label)
            .with_line(line_number);
        if let Some(help) = err.help {
            diagnostic = diagnostic.with_help(help);
        }
        self.diagnostics.push(diagnostic);
    }
}
