//! # Hydronet Parser
//!
//! Parser for the network descriptions written by one-dimensional
//! transient-flow solvers. The description is line oriented and split into
//! two sections:
//!
//! - `SYSTEM CONNECTIVITY` declares elements, the nodes they sit on or link,
//!   junctions, and node elevations.
//! - `ELEMENT PROPERTIES` attaches numeric properties to declared elements,
//!   either inline (`CONDUIT ID ...`) or through anonymous blocks committed
//!   with `ID <element>`.
//!
//! Parsing never fails. Lines that do not match a declaration are ignored;
//! declarations with unusable operands are skipped and reported as
//! diagnostics.
//!
//! ## Usage
//!
//! ```
//! # use hydronet_parser::parse;
//! let source = "\
//! SYSTEM CONNECTIVITY
//! ELEM C1 LINK 1 2
//! NODE 1 ELEV 10.0
//! NODE 2 ELEV 5.0
//! ";
//!
//! let parsed = parse(source);
//! assert_eq!(parsed.nodes().len(), 2);
//! assert_eq!(parsed.connections()[0].element_id(), "C1");
//! ```

mod classify;
pub mod error;
mod line;
mod parser;
mod span;

pub use classify::classify;
pub use error::{Diagnostic, ErrorCode, Severity};
pub use span::Span;

use hydronet_core::semantic::{Connection, Elements, Nodes};
use log::info;

use parser::TextModelParser;

/// The semantic model read from a description, plus recovered problems.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    elements: Elements,
    nodes: Nodes,
    connections: Vec<Connection>,
    diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    /// Elements in declaration order.
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// Nodes in first-reference order.
    pub fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    /// Link elements in declaration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Warnings for lines that were skipped.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits the result into the three model collections.
    pub fn into_parts(self) -> (Elements, Nodes, Vec<Connection>) {
        (self.elements, self.nodes, self.connections)
    }
}

/// Parses a network description.
///
/// This is the first stage of the pipeline. It is total: every input,
/// including the empty string, produces a [`Parsed`] value.
pub fn parse(source: &str) -> Parsed {
    info!(bytes = source.len(); "Parsing network description");

    let parsed = TextModelParser::new().parse(source);

    info!(
        elements = parsed.elements.len(),
        nodes = parsed.nodes.len(),
        connections = parsed.connections.len(),
        skipped = parsed.diagnostics.len();
        "Parsed network description"
    );
    parsed
}
