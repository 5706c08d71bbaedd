//! Line grammar for solver network descriptions.
//!
//! Each declaration occupies one line. The grammar recognizes the shape of a
//! line (keywords in fixed positions, whitespace-separated operands) with
//! winnow, then converts the operands into typed values. A line whose shape
//! matches no declaration is not an error; a line whose shape matches but
//! whose operands do not convert is a [`MalformedLine`].
//!
//! Keywords are case-sensitive and must be whole tokens: `ELEMENT` is not an
//! `ELEM` line. Anything after the last operand of a form is ignored.

use hydronet_core::identifier::NodeId;
use thiserror::Error;
use winnow::{
    Parser as _,
    ascii::space1,
    combinator::{alt, eof, preceded, repeat, terminated},
    error::ModalResult,
    stream::LocatingSlice,
    token::{literal, take_till},
};

use crate::span::Span;

type Input<'a> = LocatingSlice<&'a str>;

/// A recognized declaration with typed operands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Line<'a> {
    /// `ELEM <id> AT <node>`
    ElemAt { id: &'a str, node: NodeId },
    /// `ELEM <id> LINK <n1> <n2>`
    ElemLink {
        id: &'a str,
        source: NodeId,
        target: NodeId,
    },
    /// `JUNCTION AT <node>`
    JunctionAt { node: NodeId },
    /// `NODE <node> ELEV <float>`
    NodeElev { node: NodeId, elevation: f64 },
    /// `RESERVOIR`
    Reservoir,
    /// `CONDUIT ID <id> [<KEY> <value>]*`, keys lower-cased
    Conduit {
        id: &'a str,
        properties: Vec<(String, f64)>,
    },
    /// `ID <id>`
    Id { id: &'a str },
    /// `ELEV <float>`
    Elev { elevation: f64 },
    /// Any line containing `DUMMY`
    Dummy,
    /// `DIAMETER`, `CPLUS` or `CMINUS` followed by a float
    Property { key: &'static str, value: f64 },
}

/// A line with a recognized shape and an operand that does not convert.
///
/// The span is relative to the start of the line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub(crate) struct MalformedLine {
    pub message: String,
    pub label: &'static str,
    pub span: Span,
    pub help: Option<&'static str>,
}

/// A whitespace-delimited token and its position in the line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Operand<'a> {
    text: &'a str,
    span: Span,
}

/// A line whose shape matched, before operand conversion.
#[derive(Debug, Clone)]
enum RawLine<'a> {
    ElemAt {
        id: Operand<'a>,
        node: Operand<'a>,
    },
    ElemLink {
        id: Operand<'a>,
        source: Operand<'a>,
        target: Operand<'a>,
    },
    JunctionAt {
        node: Operand<'a>,
    },
    NodeElev {
        node: Operand<'a>,
        elevation: Operand<'a>,
    },
    Reservoir,
    Conduit {
        id: Operand<'a>,
        rest: Vec<Operand<'a>>,
    },
    Id {
        id: Operand<'a>,
    },
    Elev {
        elevation: Operand<'a>,
    },
    Property {
        key: &'static str,
        value: Operand<'a>,
    },
}

/// Recognizes a line of the `SYSTEM CONNECTIVITY` section.
///
/// Forms are tried in priority order: `ELEM .. AT`, `ELEM .. LINK`,
/// `JUNCTION AT`, `NODE .. ELEV`.
pub(crate) fn connectivity_line(line: &str) -> Result<Option<Line<'_>>, MalformedLine> {
    let mut input = LocatingSlice::new(line);
    match alt((elem_at, elem_link, junction_at, node_elev)).parse_next(&mut input) {
        Ok(raw) => raw.resolve().map(Some),
        Err(_) => Ok(None),
    }
}

/// Recognizes a line of the `ELEMENT PROPERTIES` section.
///
/// Forms are tried in priority order: `RESERVOIR`, `CONDUIT ID`, `ID`,
/// `ELEV`, a `DUMMY` marker anywhere in the line, then `DIAMETER`, `CPLUS`
/// and `CMINUS`.
pub(crate) fn properties_line(line: &str) -> Result<Option<Line<'_>>, MalformedLine> {
    let mut input = LocatingSlice::new(line);
    if let Ok(raw) = alt((reservoir, conduit, id_line, elev_line)).parse_next(&mut input) {
        return raw.resolve().map(Some);
    }

    if line.contains("DUMMY") {
        return Ok(Some(Line::Dummy));
    }

    let mut input = LocatingSlice::new(line);
    match scalar_property.parse_next(&mut input) {
        Ok(raw) => raw.resolve().map(Some),
        Err(_) => Ok(None),
    }
}

/// A keyword token followed by whitespace or the end of the line.
fn keyword<'a>(kw: &'static str) -> impl FnMut(&mut Input<'a>) -> ModalResult<()> {
    move |input: &mut Input<'a>| {
        terminated(literal(kw), alt((space1, eof)))
            .void()
            .parse_next(input)
    }
}

fn operand<'a>(input: &mut Input<'a>) -> ModalResult<Operand<'a>> {
    take_till(1.., char::is_whitespace)
        .with_span()
        .map(|(text, range)| Operand {
            text,
            span: Span::new(range),
        })
        .parse_next(input)
}

fn elem_at<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    (keyword("ELEM"), operand, space1, keyword("AT"), operand)
        .map(|(_, id, _, _, node)| RawLine::ElemAt { id, node })
        .parse_next(input)
}

fn elem_link<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    (
        keyword("ELEM"),
        operand,
        space1,
        keyword("LINK"),
        operand,
        space1,
        operand,
    )
        .map(|(_, id, _, _, source, _, target)| RawLine::ElemLink { id, source, target })
        .parse_next(input)
}

fn junction_at<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    preceded((keyword("JUNCTION"), keyword("AT")), operand)
        .map(|node| RawLine::JunctionAt { node })
        .parse_next(input)
}

fn node_elev<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    (keyword("NODE"), operand, space1, keyword("ELEV"), operand)
        .map(|(_, node, _, _, elevation)| RawLine::NodeElev { node, elevation })
        .parse_next(input)
}

fn reservoir<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    keyword("RESERVOIR")
        .value(RawLine::Reservoir)
        .parse_next(input)
}

fn conduit<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    let id = preceded((keyword("CONDUIT"), keyword("ID")), operand).parse_next(input)?;
    let rest: Vec<Operand<'a>> = repeat(0.., preceded(space1, operand)).parse_next(input)?;
    Ok(RawLine::Conduit { id, rest })
}

fn id_line<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    preceded(keyword("ID"), operand)
        .map(|id| RawLine::Id { id })
        .parse_next(input)
}

fn elev_line<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    preceded(keyword("ELEV"), operand)
        .map(|elevation| RawLine::Elev { elevation })
        .parse_next(input)
}

fn scalar_property<'a>(input: &mut Input<'a>) -> ModalResult<RawLine<'a>> {
    (
        alt((
            keyword("DIAMETER").value("diameter"),
            keyword("CPLUS").value("cplus"),
            keyword("CMINUS").value("cminus"),
        )),
        operand,
    )
        .map(|(key, value)| RawLine::Property { key, value })
        .parse_next(input)
}

impl<'a> RawLine<'a> {
    fn resolve(self) -> Result<Line<'a>, MalformedLine> {
        Ok(match self {
            RawLine::ElemAt { id, node } => Line::ElemAt {
                id: identifier(id)?,
                node: node_id(node)?,
            },
            RawLine::ElemLink { id, source, target } => Line::ElemLink {
                id: identifier(id)?,
                source: node_id(source)?,
                target: node_id(target)?,
            },
            RawLine::JunctionAt { node } => Line::JunctionAt {
                node: node_id(node)?,
            },
            RawLine::NodeElev { node, elevation } => Line::NodeElev {
                node: node_id(node)?,
                elevation: number(elevation, "elevation")?,
            },
            RawLine::Reservoir => Line::Reservoir,
            RawLine::Conduit { id, rest } => Line::Conduit {
                id: identifier(id)?,
                properties: property_pairs(&rest)?,
            },
            RawLine::Id { id } => Line::Id {
                id: identifier(id)?,
            },
            RawLine::Elev { elevation } => Line::Elev {
                elevation: number(elevation, "elevation")?,
            },
            RawLine::Property { key, value } => Line::Property {
                key,
                value: number(value, key)?,
            },
        })
    }
}

/// Collects `<KEY> <value>` pairs from the operands after a conduit id.
///
/// The scan slides one operand at a time until it finds a key followed by
/// something shaped like a number, consumes both, and continues after them.
/// Keys start with a letter and are lower-cased.
fn property_pairs(rest: &[Operand<'_>]) -> Result<Vec<(String, f64)>, MalformedLine> {
    let mut properties = Vec::new();
    let mut i = 0;
    while i + 1 < rest.len() {
        let (key, value) = (rest[i], rest[i + 1]);
        if is_property_key(key.text) && looks_numeric(value.text) {
            properties.push((key.text.to_lowercase(), number(value, "property value")?));
            i += 2;
        } else {
            i += 1;
        }
    }
    Ok(properties)
}

fn is_property_key(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_alphabetic) && is_word(text)
}

fn looks_numeric(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
}

fn is_word(text: &str) -> bool {
    text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn identifier(op: Operand<'_>) -> Result<&str, MalformedLine> {
    if is_word(op.text) {
        Ok(op.text)
    } else {
        Err(MalformedLine {
            message: format!("invalid element identifier `{}`", op.text),
            label: "expected letters, digits or underscores",
            span: op.span,
            help: None,
        })
    }
}

fn node_id(op: Operand<'_>) -> Result<NodeId, MalformedLine> {
    op.text.parse::<NodeId>().map_err(|err| MalformedLine {
        message: format!("invalid node id `{}`: {err}", op.text),
        label: "expected a node number",
        span: op.span,
        help: Some("node ids are unsigned integers such as `12`"),
    })
}

fn number(op: Operand<'_>, what: &str) -> Result<f64, MalformedLine> {
    match op.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MalformedLine {
            message: format!("invalid {what} `{}`", op.text),
            label: "expected a number",
            span: op.span,
            help: Some("values are finite decimal numbers such as `12.5`"),
        }),
    }
}
