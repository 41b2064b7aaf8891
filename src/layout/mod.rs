//! Layered layout for parsed flowcharts.
//!
//! Layout runs in three steps over a [`LayoutGraph`]:
//!
//! 1. Depth: each node gets a layer from its distance to a root
//! 2. Column: nodes sharing a layer are numbered in insertion order
//! 3. Position: `(depth, column)` is mapped onto a fixed grid, plus jitter
//!
//! Depth and column are transient. Only the final [`Position`]s end up on
//! the graph's nodes.

mod column;
mod depth;
mod position;

use std::collections::HashMap;

pub use column::assign_columns;
pub use depth::{first_visit_depths, longest_path_depths, DepthAssignment};
pub use position::{synthesize_positions, Jitter};

use crate::graph::{Graph, Position};

/// Horizontal distance between columns.
pub const CELL_WIDTH: f64 = 300.0;

/// Vertical distance between depth bands.
pub const CELL_HEIGHT: f64 = 200.0;

/// Maximum jitter applied to each coordinate.
pub const JITTER: f64 = 25.0;

/// How node depths are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthPolicy {
    /// Single depth-first pass; a node's depth is fixed on first visit.
    #[default]
    FirstVisit,
    /// True longest path in topological order. Cyclic input falls back to
    /// [`DepthPolicy::FirstVisit`].
    LongestPath,
}

/// Configuration for the layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal grid spacing.
    pub cell_width: f64,
    /// Vertical grid spacing.
    pub cell_height: f64,
    /// Jitter amplitude; zero disables jitter.
    pub jitter: f64,
    /// Seed for reproducible jitter.
    pub seed: Option<u64>,
    /// Depth assignment policy.
    pub depth_policy: DepthPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            jitter: JITTER,
            seed: None,
            depth_policy: DepthPolicy::FirstVisit,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid cell size.
    pub fn with_cell_size(mut self, width: f64, height: f64) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Set the jitter amplitude.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Seed the jitter generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the depth assignment policy.
    pub fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }
}

/// Index-based adjacency used by the layout pass.
///
/// Node indices follow insertion order. Successor lists keep edge order and
/// may hold duplicates.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    ids: Vec<String>,
    successors: Vec<Vec<usize>>,
}

impl LayoutGraph {
    /// Create a graph with the given nodes and no edges.
    pub fn with_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let ids: Vec<String> = ids.into_iter().collect();
        let successors = vec![Vec::new(); ids.len()];
        Self { ids, successors }
    }

    /// Build the adjacency of an existing graph. Edges with a missing
    /// endpoint are skipped.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut layout = Self::with_ids(graph.nodes.iter().map(|n| n.id.clone()));
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        for edge in &graph.edges {
            let source = index.get(edge.source.as_str());
            let target = index.get(edge.target.as_str());
            if let (Some(&from), Some(&to)) = (source, target) {
                layout.add_edge(from, to);
            }
        }
        layout
    }

    /// Add a node, returning its index.
    pub fn add_node(&mut self, id: impl Into<String>) -> usize {
        self.ids.push(id.into());
        self.successors.push(Vec::new());
        self.ids.len() - 1
    }

    /// Append `to` to the successors of `from`.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.successors[from].push(to);
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the node at `index`.
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    /// Successors of the node at `index`, in edge order.
    pub fn successors(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }
}

/// Layout of every node, by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub depths: Vec<usize>,
    pub columns: Vec<usize>,
    pub positions: Vec<Position>,
}

/// Run depth, column and position assignment.
pub fn compute_layout(graph: &LayoutGraph, config: &LayoutConfig) -> Layout {
    let depths = assign_depths(graph, config.depth_policy);
    let columns = assign_columns(&depths);
    let positions = synthesize_positions(&depths, &columns, config);
    Layout {
        depths,
        columns,
        positions,
    }
}

/// Depths under the given policy. Never fails: cycles are logged and, for
/// [`DepthPolicy::LongestPath`], trigger the first-visit fallback.
pub fn assign_depths(graph: &LayoutGraph, policy: DepthPolicy) -> Vec<usize> {
    if policy == DepthPolicy::LongestPath {
        match longest_path_depths(graph) {
            Ok(depths) => return depths,
            Err(e) => {
                tracing::warn!(error = %e, "longest-path layering failed, using first-visit depths")
            }
        }
    }

    let assignment = first_visit_depths(graph);
    for &(from, to) in &assignment.back_edges {
        tracing::warn!(
            from = graph.id(from),
            to = graph.id(to),
            "cycle in flowchart; depth of nodes on the cycle is approximate"
        );
    }
    assignment.depths
}

/// Return a copy of `graph` with every node re-positioned by the layout pass.
pub fn arrange(graph: &Graph, config: &LayoutConfig) -> Graph {
    let layout = compute_layout(&LayoutGraph::from_graph(graph), config);
    let mut arranged = graph.clone();
    for (node, position) in arranged.nodes.iter_mut().zip(layout.positions) {
        node.position = position;
    }
    arranged
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::graph::{Edge, Node, NodeType};

    #[test]
    fn test_compute_layout_fan_out() {
        let mut g = LayoutGraph::default();
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        g.add_edge(a, b);
        g.add_edge(a, c);

        let layout = compute_layout(&g, &LayoutConfig::new().with_jitter(0.0));
        assert_eq!(layout.depths, vec![0, 1, 1]);
        assert_eq!(layout.columns, vec![0, 0, 1]);
        assert_relative_eq!(layout.positions[2].x, 300.0);
        assert_relative_eq!(layout.positions[2].y, 200.0);
    }

    #[test]
    fn test_longest_path_policy() {
        let mut g = LayoutGraph::with_ids(["A", "B", "C", "D"].map(String::from));
        g.add_edge(0, 3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);

        assert_eq!(assign_depths(&g, DepthPolicy::FirstVisit), vec![0, 1, 2, 1]);
        assert_eq!(assign_depths(&g, DepthPolicy::LongestPath), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_longest_path_policy_falls_back_on_cycle() {
        let mut g = LayoutGraph::with_ids(["A", "B"].map(String::from));
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        assert_eq!(assign_depths(&g, DepthPolicy::LongestPath), vec![0, 1]);
    }

    #[test]
    fn test_from_graph_skips_dangling_edges() {
        let graph = Graph {
            nodes: vec![Node::new("A", NodeType::State), Node::new("B", NodeType::State)],
            edges: vec![Edge::new("e0", "A", "B"), Edge::new("e1", "B", "Z")],
        };
        let layout = LayoutGraph::from_graph(&graph);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.successors(0), &[1]);
        assert!(layout.successors(1).is_empty());
    }

    #[test]
    fn test_arrange_keeps_topology() {
        let graph = Graph {
            nodes: vec![
                Node::new("B", NodeType::Action),
                Node::new("A", NodeType::State).with_position(Position::new(999.0, 999.0)),
            ],
            edges: vec![Edge::new("e0", "A", "B")],
        };
        let arranged = arrange(&graph, &LayoutConfig::new().with_jitter(0.0));

        assert_eq!(arranged.edges, graph.edges);
        assert_eq!(arranged.nodes[0].id, "B");
        // B is walked first as a root, so both land in band 0.
        assert_relative_eq!(arranged.nodes[1].position.x, 300.0);
        assert_relative_eq!(arranged.nodes[1].position.y, 0.0);
    }
}
