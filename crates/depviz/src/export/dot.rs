//! Graphviz DOT writer.
//!
//! Output is fully determined by the graph and its decisions: nodes follow
//! the graph's object order, edges its connection order, and attributes the
//! order of the style they come from.
//!
//! ```text
//! digraph "scene.fbx" {
//!     graph [rankdir="LR"]
//!     100 [label="Cube"]
//!     200 [label="Geometry:Mesh"]
//!     200 -> 100
//!     300 -> 200 [label="DiffuseColor"]
//! }
//! ```

use std::io::{self, Write};

use indexmap::IndexMap;
use log::{debug, info};

use depviz_core::{Connection, Object};

use super::Exporter;
use crate::{
    filter::{Decision, RenderDecisions, Style},
    structure::Graph,
};

/// Writes DOT documents into any [`Write`] sink.
#[derive(Debug)]
pub struct DotExporter<W: Write> {
    out: W,
}

impl<W: Write> DotExporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Exporter for DotExporter<W> {
    fn export_graph(&mut self, graph: &Graph, decisions: &RenderDecisions) -> io::Result<()> {
        info!(graph = graph.name(); "Writing DOT document");
        emit(graph, decisions, &mut self.out)?;
        self.out.flush()
    }
}

/// Renders the DOT document into a string.
pub fn render(graph: &Graph, decisions: &RenderDecisions) -> String {
    let mut out = Vec::new();
    emit(graph, decisions, &mut out).expect("writing into a Vec cannot fail");
    String::from_utf8_lossy(&out).into_owned()
}

/// Writes `value` as a double-quoted DOT string.
fn write_quoted(out: &mut impl Write, value: &str) -> io::Result<()> {
    out.write_all(b"\"")?;
    for c in value.chars() {
        match c {
            '"' => out.write_all(b"\\\"")?,
            '\\' => out.write_all(b"\\\\")?,
            '\n' => out.write_all(b"\\n")?,
            '\r' => out.write_all(b"\\r")?,
            c => write!(out, "{c}")?,
        }
    }
    out.write_all(b"\"")
}

/// DOT keywords, matched case-insensitively.
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Writes an attribute name, quoting it unless it is a plain identifier.
fn write_name(out: &mut impl Write, name: &str) -> io::Result<()> {
    let is_plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(name));
    if is_plain {
        out.write_all(name.as_bytes())
    } else {
        write_quoted(out, name)
    }
}

/// Writes ` [a="x", b="y"]`, or nothing for an empty list.
fn write_attributes<'a>(
    out: &mut impl Write,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> io::Result<()> {
    let mut attributes = attributes.into_iter().peekable();
    if attributes.peek().is_none() {
        return Ok(());
    }

    out.write_all(b" [")?;
    for (index, (name, value)) in attributes.enumerate() {
        if index > 0 {
            out.write_all(b", ")?;
        }
        write_name(out, name)?;
        out.write_all(b"=")?;
        write_quoted(out, value)?;
    }
    out.write_all(b"]")
}

/// Attributes of a statement: the generated ones first, then the style.
///
/// A style attribute with a generated name replaces the generated value in place.
fn merge<'a>(generated: Option<(&'a str, &'a str)>, style: &'a Style) -> IndexMap<&'a str, &'a str> {
    let mut attributes: IndexMap<&str, &str> = generated.into_iter().collect();
    attributes.extend(style.iter());
    attributes
}

fn node_label(object: &Object) -> String {
    if object.name().is_empty() {
        format!("{}:{}", object.class(), object.subclass())
    } else {
        object.name().to_string()
    }
}

fn write_defaults(out: &mut impl Write, keyword: &str, style: &Style) -> io::Result<()> {
    if style.is_empty() {
        return Ok(());
    }
    write!(out, "\t{keyword}")?;
    write_attributes(out, style.iter())?;
    writeln!(out)
}

fn write_node(out: &mut impl Write, object: &Object, style: &Style) -> io::Result<()> {
    let label = node_label(object);
    write!(out, "\t{}", object.id())?;
    write_attributes(out, merge(Some(("label", label.as_str())), style))?;
    writeln!(out)
}

fn write_edge(out: &mut impl Write, connection: &Connection, style: &Style) -> io::Result<()> {
    let label = connection.property_name().map(|name| ("label", name));
    write!(out, "\t{} -> {}", connection.from_id(), connection.to_id())?;
    write_attributes(out, merge(label, style))?;
    writeln!(out)
}

/// Writes the DOT document for the visible part of `graph`.
///
/// # Errors
///
/// Returns the sink's I/O error unchanged.
pub fn emit(graph: &Graph, decisions: &RenderDecisions, out: &mut impl Write) -> io::Result<()> {
    write!(out, "digraph ")?;
    write_quoted(out, graph.name())?;
    writeln!(out, " {{")?;

    write_defaults(out, "graph", decisions.graph_style())?;
    write_defaults(out, "node", decisions.node_style())?;
    write_defaults(out, "edge", decisions.edge_style())?;

    let mut nodes = 0;
    for object in graph.objects() {
        if let Some(Decision::Visible(style)) = decisions.node(object.id()) {
            write_node(out, object, style)?;
            nodes += 1;
        }
    }

    let mut edges = 0;
    for (index, connection) in graph.connections().iter().enumerate() {
        if let Some(Decision::Visible(style)) = decisions.edge(index) {
            write_edge(out, connection, style)?;
            edges += 1;
        }
    }

    writeln!(out, "}}")?;
    debug!(nodes, edges; "DOT document written");
    Ok(())
}
