//! Graph builder: accumulates parsed statements into a laid-out [`Graph`].

use std::collections::HashMap;

use super::ast::{EdgeRef, NodeRef, Statement};
use crate::graph::{edge_id, Edge, Graph, Node, NodeType};
use crate::layout::{compute_layout, LayoutConfig, LayoutGraph};

/// A node as first recorded by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub node_type: NodeType,
    pub label: String,
}

#[derive(Debug, Clone)]
struct PendingEdge {
    source: usize,
    target: usize,
    label: String,
}

/// Single-pass accumulator over statements in document order.
///
/// The first reference to an id fixes its shape and label; later references
/// never overwrite them. Edge endpoints that were never declared are created
/// on the spot, so every edge resolves once building finishes.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    index: HashMap<String, usize>,
    records: Vec<NodeRecord>,
    adjacency: LayoutGraph,
    edges: Vec<PendingEdge>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one statement.
    pub fn push(&mut self, statement: Statement) {
        match statement {
            Statement::Declaration(node) => {
                self.register(node);
            }
            Statement::Edge(edge) => self.push_edge(edge),
        }
    }

    fn push_edge(&mut self, edge: EdgeRef) {
        for endpoint in [&edge.source, &edge.target] {
            if !self.index.contains_key(&endpoint.id) {
                tracing::debug!(id = %endpoint.id, "creating node from edge endpoint");
            }
        }
        let source = self.register(edge.source);
        let target = self.register(edge.target);
        self.adjacency.add_edge(source, target);
        self.edges.push(PendingEdge {
            source,
            target,
            label: edge.label,
        });
    }

    /// Record a node reference, returning its index. First occurrence wins.
    fn register(&mut self, node: NodeRef) -> usize {
        if let Some(&idx) = self.index.get(&node.id) {
            let existing = &self.records[idx];
            if existing.node_type != node.node_type || existing.label != node.label {
                tracing::debug!(id = %node.id, "node already declared, keeping first declaration");
            }
            return idx;
        }

        let idx = self.adjacency.add_node(node.id.clone());
        self.index.insert(node.id, idx);
        self.records.push(NodeRecord {
            node_type: node.node_type,
            label: node.label,
        });
        idx
    }

    /// Node table in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| (self.adjacency.id(idx), record))
    }

    /// Ordered successor ids of `id`. Repeated edges appear repeatedly.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&idx| {
                self.adjacency
                    .successors(idx)
                    .iter()
                    .map(|&s| self.adjacency.id(s))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lay out the accumulated nodes and produce the graph.
    pub fn build(self, config: &LayoutConfig) -> Graph {
        let layout = compute_layout(&self.adjacency, config);

        let nodes: Vec<Node> = self
            .records
            .into_iter()
            .zip(layout.positions)
            .enumerate()
            .map(|(idx, (record, position))| Node {
                id: self.adjacency.id(idx).to_string(),
                node_type: record.node_type,
                label: record.label,
                position,
            })
            .collect();

        let edges: Vec<Edge> = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, edge)| {
                let source = self.adjacency.id(edge.source);
                let target = self.adjacency.id(edge.target);
                Edge::new(edge_id(i, source, target), source, target).with_label(edge.label)
            })
            .collect();

        tracing::debug!(nodes = nodes.len(), edges = edges.len(), "built flowchart graph");
        Graph { nodes, edges }
    }
}

impl Extend<Statement> for GraphBuilder {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        for statement in iter {
            self.push(statement);
        }
    }
}
