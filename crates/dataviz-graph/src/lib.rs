//! Edge-list and Graphviz export for dataviz.
//!
//! Containers describe their shape as a [`DotGraph`]: one labelled node per
//! element plus the parent→child edges between them. Rendering to an image is
//! left to the external Graphviz `dot` binary.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// A node identifier in a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fill and font colors of a rendered node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub color: String,
    pub font_color: String,
}

impl NodeStyle {
    /// A node filled with `color` and labelled in white.
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            font_color: "white".to_string(),
        }
    }
}

/// A labelled node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotNode {
    pub id: NodeId,
    pub label: String,
    pub style: NodeStyle,
}

/// A directed edge from parent to child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
}

impl Edge {
    /// Create a new edge from source to target.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

/// A directed graph describing the shape of a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotGraph {
    background: String,
    nodes: Vec<DotNode>,
    edges: Vec<Edge>,
}

impl Default for DotGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DotGraph {
    /// Create a new empty graph on a white background.
    pub fn new() -> Self {
        Self {
            background: "white".to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// A sequence of nodes where each one points at the next.
    pub fn chain<I, S>(labels: I, style: NodeStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (i, label) in labels.into_iter().enumerate() {
            graph.add_node(NodeId(i), label, style.clone());
            if i > 0 {
                graph.add_edge(Edge::new(NodeId(i - 1), NodeId(i)));
            }
        }
        graph
    }

    /// Add a node to the graph.
    pub fn add_node(&mut self, id: NodeId, label: impl Into<String>, style: NodeStyle) {
        self.nodes.push(DotNode {
            id,
            label: label.into(),
            style,
        });
    }

    /// Add an edge to the graph.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Check if a node exists in the graph.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&DotNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &DotNode> {
        self.nodes.iter()
    }

    /// Get all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Targets of the edges leaving `id`.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .map(|e| e.target)
            .collect()
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if there's an edge from source to target.
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Plain-text description: one `id [label]` line per node, then one
    /// `source -> target` line per edge.
    pub fn edge_list(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&format!("{} [{}]\n", node.id, node.label));
        }
        for edge in &self.edges {
            out.push_str(&format!("{} -> {}\n", edge.source, edge.target));
        }
        out
    }

    /// Graphviz dot source for the graph.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph graphname {{")?;
        writeln!(f, "  bgcolor={};", self.background)?;
        for edge in &self.edges {
            writeln!(f, "  {} -> {};", edge.source, edge.target)?;
        }
        for node in &self.nodes {
            writeln!(
                f,
                "  {} [color={c}, style=filled, fillcolor={c}, fontcolor={}, label=\"{}\"];",
                node.id,
                node.style.font_color,
                escape_label(&node.label),
                c = node.style.color,
            )?;
        }
        write!(f, "}}")
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Output format passed to Graphviz as `-T<format>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Svg => write!(f, "svg"),
            ImageFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// How to invoke Graphviz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Graphviz executable, looked up on `PATH` when not absolute
    #[serde(default = "default_binary")]
    pub binary: String,
    #[serde(default)]
    pub format: ImageFormat,
}

fn default_binary() -> String {
    "dot".to_string()
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            format: ImageFormat::default(),
        }
    }
}

/// Renders `dot` source into an image file at `path` using Graphviz.
pub fn write_image(dot: &str, path: &Path, options: &RenderOptions) -> anyhow::Result<()> {
    let mut child = Command::new(&options.binary)
        .arg(format!("-T{}", options.format))
        .arg("-o")
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to launch graphviz binary `{}`", options.binary))?;

    child
        .stdin
        .take()
        .context("graphviz stdin was not captured")?
        .write_all(dot.as_bytes())
        .context("failed to write dot source to graphviz")?;

    let output = child
        .wait_with_output()
        .context("failed to wait for graphviz")?;
    if !output.status.success() {
        anyhow::bail!(
            "graphviz exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
