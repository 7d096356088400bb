//! In-memory issue dependency graph.
//!
//! Nodes are keyed by issue key and never duplicated. At most one edge exists per
//! ordered (source, target) pair; a second edge between the same pair is ignored
//! regardless of its kind.

pub mod annotate;
pub mod style;
pub mod walker;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

pub use annotate::{color_by_status, expand_epic, is_epic, mark_epic_shapes};
pub use style::{EdgeKind, NodeShape, StatusColor};
pub use walker::{walk, LinkWalker, WalkOptions, WalkStats};

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub key: String,
    pub summary: Option<String>,
    pub fill_color: Option<StatusColor>,
    pub shape: NodeShape,
}

impl GraphNode {
    pub fn new(key: &str, summary: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            summary: summary.filter(|s| !s.is_empty()).map(str::to_string),
            fill_color: None,
            shape: NodeShape::Default,
        }
    }

    /// Display label: the key, followed by the summary on its own line when known.
    pub fn label(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{}\n{}", self.key, summary),
            None => self.key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub kind: EdgeKind,
}

/// A borrowed view of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub kind: &'a EdgeKind,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    title: String,
    graph: DiGraph<GraphNode, GraphEdge>,
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Empty graph titled after `start_key`, with the start node already present.
    pub fn with_start(start_key: &str) -> Self {
        let mut graph = Self::new(&format!("Dependency Graph for {}", start_key));
        graph.ensure_node(start_key, None);
        graph
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Create the node if absent. An existing node only gains a summary it was missing.
    /// Returns true when a node was created.
    pub fn ensure_node(&mut self, key: &str, summary: Option<&str>) -> bool {
        if let Some(&idx) = self.index.get(key) {
            let node = &mut self.graph[idx];
            if node.summary.is_none() {
                node.summary = summary.filter(|s| !s.is_empty()).map(str::to_string);
            }
            return false;
        }

        let idx = self.graph.add_node(GraphNode::new(key, summary));
        self.index.insert(key.to_string(), idx);
        true
    }

    /// Add `from -> to` unless an edge for that ordered pair already exists.
    /// Missing endpoints are created. Returns true when the edge was added.
    pub fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) -> bool {
        if self.has_edge(from, to) {
            return false;
        }

        self.ensure_node(from, None);
        self.ensure_node(to, None);
        let (a, b) = (self.index[from], self.index[to]);
        self.graph.add_edge(a, b, GraphEdge { kind });
        true
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&GraphNode> {
        self.index.get(key).map(|&idx| &self.graph[idx])
    }

    pub fn node_mut(&mut self, key: &str) -> Option<&mut GraphNode> {
        self.index.get(key).map(|&idx| &mut self.graph[idx])
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeKind> {
        let (&a, &b) = (self.index.get(from)?, self.index.get(to)?);
        self.graph.find_edge(a, b).map(|e| &self.graph[e].kind)
    }

    /// Node keys in insertion order.
    pub fn node_keys(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].key.clone())
            .collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(move |e| EdgeView {
            source: &self.graph[e.source()].key,
            target: &self.graph[e.target()].key,
            kind: &e.weight().kind,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
