//! Core types for the flowchart graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};

/// Shape of a flowchart node.
///
/// The set is closed. When deserializing, any unrecognized type name falls
/// back to [`NodeType::State`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NodeType {
    /// Rounded node, written `id((label))`
    #[default]
    State,
    /// Rectangular node, written `id[label]`
    Action,
    /// Diamond node, written `id{label}`
    Choice,
}

impl NodeType {
    /// All node types, in shape-inference precedence order.
    pub const ALL: [NodeType; 3] = [NodeType::State, NodeType::Action, NodeType::Choice];

    /// Parse a node type from its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "state" => Some(Self::State),
            "action" => Some(Self::Action),
            "choice" => Some(Self::Choice),
            _ => None,
        }
    }

    /// Lowercase name used in JSON and in default labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Action => "action",
            Self::Choice => "choice",
        }
    }

    /// Opening and closing delimiters used by the DSL for this shape.
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            Self::State => ("((", "))"),
            Self::Action => ("[", "]"),
            Self::Choice => ("{", "}"),
        }
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or_default()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planar coordinate of a node. Only meaningful for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node in the flowchart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the graph
    pub id: String,
    /// Node shape
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    /// Display text
    pub label: String,
    /// Canvas coordinate
    #[serde(default)]
    pub position: Position,
}

impl Node {
    /// Create a node whose label defaults to its id.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type,
            position: Position::default(),
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the canvas position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// A directed, optionally labeled connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique id within the graph
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Connector text; empty when the edge is unlabeled
    #[serde(default)]
    pub label: String,
}

impl Edge {
    /// Create an unlabeled edge.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: String::new(),
        }
    }

    /// Set the connector text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Whether the edge carries non-empty connector text.
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Derived edge id for the `index`-th edge between `source` and `target`.
pub fn edge_id(index: usize, source: &str, target: &str) -> String {
    format!("e{}-{}-{}", index, source, target)
}

/// A flowchart: nodes and edges in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether a node with this id exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Ids of the direct successors of `id`, in edge order.
    pub fn successors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id)
            .map(|e| e.target.as_str())
    }

    /// Add a node with a fresh id and a default label such as `"action 3"`.
    ///
    /// Returns the new node's id.
    pub fn add_node(&mut self, node_type: NodeType, position: Position) -> String {
        let count = self.nodes.len() + 1;
        let mut n = count;
        let mut id = format!("node_{}", n);
        while self.contains_node(&id) {
            n += 1;
            id = format!("node_{}", n);
        }

        self.nodes.push(
            Node::new(id.clone(), node_type)
                .with_label(format!("{} {}", node_type, count))
                .with_position(position),
        );
        id
    }

    /// Connect two existing nodes.
    ///
    /// Fails with [`FlowError::UnknownNode`] if either endpoint is missing, so a
    /// graph edited only through this method never holds a dangling edge.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        label: impl Into<String>,
    ) -> Result<&Edge> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(FlowError::unknown_node(endpoint));
            }
        }

        let mut index = self.edges.len();
        let mut id = edge_id(index, source, target);
        while self.edges.iter().any(|e| e.id == id) {
            index += 1;
            id = edge_id(index, source, target);
        }

        let label: String = label.into();
        self.edges
            .push(Edge::new(id, source, target).with_label(label.trim()));
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Check the graph invariants. See [`validate_graph`](super::validate_graph).
    pub fn validate(&self) -> Result<()> {
        super::validate_graph(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_json_names() {
        let json = serde_json::to_string(&NodeType::Choice).unwrap();
        assert_eq!(json, "\"choice\"");

        let back: NodeType = serde_json::from_str("\"action\"").unwrap();
        assert_eq!(back, NodeType::Action);
    }

    #[test]
    fn test_unknown_node_type_falls_back_to_state() {
        let back: NodeType = serde_json::from_str("\"hexagon\"").unwrap();
        assert_eq!(back, NodeType::State);
    }

    #[test]
    fn test_node_json_shape() {
        let node = Node::new("X", NodeType::Action)
            .with_label("Do it")
            .with_position(Position::new(1.0, 2.0));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "X",
                "type": "action",
                "label": "Do it",
                "position": {"x": 1.0, "y": 2.0}
            })
        );
    }

    #[test]
    fn test_edge_label_defaults_to_empty_string() {
        let edge: Edge = serde_json::from_str(r#"{"id":"e","source":"A","target":"B"}"#).unwrap();
        assert_eq!(edge.label, "");
        assert!(!edge.has_label());
    }

    #[test]
    fn test_add_node_naming() {
        let mut graph = Graph::new();
        let first = graph.add_node(NodeType::Action, Position::new(10.0, 20.0));
        let second = graph.add_node(NodeType::Choice, Position::default());

        assert_eq!(first, "node_1");
        assert_eq!(second, "node_2");
        assert_eq!(graph.node("node_1").unwrap().label, "action 1");
        assert_eq!(graph.node("node_2").unwrap().label, "choice 2");
    }

    #[test]
    fn test_add_node_skips_taken_ids() {
        let mut graph = Graph::new();
        graph.nodes.push(Node::new("node_2", NodeType::State));
        let id = graph.add_node(NodeType::State, Position::default());
        assert_eq!(id, "node_3");
    }

    #[test]
    fn test_connect_requires_endpoints() {
        let mut graph = Graph::new();
        graph.nodes.push(Node::new("A", NodeType::State));

        let err = graph.connect("A", "B", "").unwrap_err();
        assert!(matches!(err, FlowError::UnknownNode { ref id } if id == "B"));
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_connect_assigns_unique_ids() {
        let mut graph = Graph::new();
        graph.nodes.push(Node::new("A", NodeType::State));
        graph.nodes.push(Node::new("B", NodeType::State));

        let first = graph.connect("A", "B", " yes ").unwrap().clone();
        let second = graph.connect("A", "B", "").unwrap().clone();

        assert_eq!(first.label, "yes");
        assert_ne!(first.id, second.id);
        assert_eq!(graph.successors("A").collect::<Vec<_>>(), vec!["B", "B"]);
    }
}
