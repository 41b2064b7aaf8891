//! DSL writer: renders a [`Graph`] back into flowchart text.

use crate::graph::{Edge, Graph, Node};

/// Configuration for DSL output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Direction written after the `graph` header keyword.
    pub direction: String,
    /// Prefix for every line after the header.
    pub indent: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            direction: "TD".to_string(),
            indent: String::new(),
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header direction (`TD`, `LR`, ...).
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Indent body lines by `width` spaces.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }
}

/// Render a node declaration, e.g. `X((Start))`.
///
/// Labels are written verbatim. Shape inference tries `((` first, so an
/// `action` or `choice` whose label contains `((...))` reads back as a
/// `state`: `A[f((x))]` is a state node.
pub fn write_node(node: &Node) -> String {
    let (open, close) = node.node_type.delimiters();
    format!("{}{}{}{}", node.id, open, node.label, close)
}

/// Render an edge, e.g. `A --> |yes| B` or `A --> B`.
pub fn write_edge(edge: &Edge) -> String {
    if edge.has_label() {
        format!("{} --> |{}| {}", edge.source, edge.label, edge.target)
    } else {
        format!("{} --> {}", edge.source, edge.target)
    }
}

/// Render a whole graph: a header line, then nodes, then edges, each in
/// iteration order. Every line ends with a newline.
pub fn write_graph(graph: &Graph, config: &GenerateConfig) -> String {
    let mut out = format!("graph {}\n", config.direction);

    let body = graph
        .nodes
        .iter()
        .map(write_node)
        .chain(graph.edges.iter().map(write_edge));
    for line in body {
        out.push_str(&config.indent);
        out.push_str(&line);
        out.push('\n');
    }

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "generated flowchart text"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeType;

    #[test]
    fn test_write_node_shapes() {
        assert_eq!(write_node(&Node::new("X", NodeType::State).with_label("Start")), "X((Start))");
        assert_eq!(write_node(&Node::new("Y", NodeType::Action).with_label("Run")), "Y[Run]");
        assert_eq!(write_node(&Node::new("Z", NodeType::Choice).with_label("Ok?")), "Z{Ok?}");
    }

    #[test]
    fn test_double_parens_in_label_read_back_as_state() {
        use crate::dsl::extract_shape;

        for node_type in [NodeType::Action, NodeType::Choice] {
            let node = Node::new("A", node_type).with_label("f((x))");
            assert_eq!(extract_shape(&write_node(&node)), NodeType::State);
        }
    }

    #[test]
    fn test_write_edge() {
        assert_eq!(write_edge(&Edge::new("e", "A", "B")), "A --> B");
        assert_eq!(write_edge(&Edge::new("e", "A", "B").with_label("yes")), "A --> |yes| B");
    }

    #[test]
    fn test_single_node_graph() {
        let graph = Graph {
            nodes: vec![Node::new("X", NodeType::State).with_label("Start")],
            edges: vec![],
        };
        let text = write_graph(&graph, &GenerateConfig::default());
        assert_eq!(text, "graph TD\nX((Start))\n");
        assert!(!text.contains("-->"));
    }

    #[test]
    fn test_indent_and_direction() {
        let graph = Graph {
            nodes: vec![Node::new("A", NodeType::Action)],
            edges: vec![Edge::new("e", "A", "A")],
        };
        let config = GenerateConfig::new().with_direction("LR").with_indent(2);
        assert_eq!(write_graph(&graph, &config), "graph LR\n  A[A]\n  A --> A\n");
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(write_graph(&Graph::new(), &GenerateConfig::default()), "graph TD\n");
    }
}
