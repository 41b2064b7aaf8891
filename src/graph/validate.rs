//! Graph validation.

use std::collections::HashSet;

use crate::error::{FlowError, Result};

use super::Graph;

/// Validate a graph received from outside the converter.
///
/// Checks:
/// - Node ids are unique
/// - Edge ids are unique
/// - Every edge endpoint resolves to a node
pub fn validate_graph(graph: &Graph) -> Result<()> {
    let mut node_ids = HashSet::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(FlowError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }

    let mut edge_ids = HashSet::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(FlowError::DuplicateEdge {
                id: edge.id.clone(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                return Err(FlowError::dangling(&edge.id, endpoint));
            }
        }
    }

    Ok(())
}
