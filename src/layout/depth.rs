//! Depth (layer) assignment.
//!
//! Two policies are available. [`first_visit_depths`] is a single depth-first
//! pass in which a node's depth is frozen the first time the walk reaches it.
//! [`longest_path_depths`] computes true longest-path layers in topological
//! order and rejects cyclic input.

use std::collections::VecDeque;

use super::LayoutGraph;
use crate::error::{FlowError, Result};

/// Result of the first-visit walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthAssignment {
    /// Depth per node index
    pub depths: Vec<usize>,
    /// Edges `(from, to)` that closed a cycle and were not followed
    pub back_edges: Vec<(usize, usize)>,
}

enum Frame {
    Enter { node: usize, depth: usize },
    Exit(usize),
}

/// Nodes already reached by some walk. Owned by the caller and threaded
/// through each walk in turn.
#[derive(Debug)]
struct Visited {
    seen: Vec<bool>,
    on_path: Vec<bool>,
}

/// Assign depths with a single first-visit depth-first walk per root.
///
/// Roots are tried in node insertion order. Children are explored in edge
/// order, each at `parent + 1`. A node reached a second time keeps the depth
/// of its first visit, so nodes on paths of different lengths may end up
/// shallower than their longest path. Cycles end the walk at the revisited
/// node and are reported in [`DepthAssignment::back_edges`].
pub fn first_visit_depths(graph: &LayoutGraph) -> DepthAssignment {
    let n = graph.len();
    let mut depths = vec![0usize; n];
    let mut back_edges = Vec::new();
    let mut visited = Visited {
        seen: vec![false; n],
        on_path: vec![false; n],
    };

    for root in 0..n {
        if !visited.seen[root] {
            visited = walk(graph, root, visited, &mut depths, &mut back_edges);
        }
    }

    DepthAssignment { depths, back_edges }
}

fn walk(
    graph: &LayoutGraph,
    root: usize,
    mut visited: Visited,
    depths: &mut [usize],
    back_edges: &mut Vec<(usize, usize)>,
) -> Visited {
    // (parent, frame); the parent is only needed to name a back edge.
    let mut stack = vec![(None, Frame::Enter { node: root, depth: 0 })];

    while let Some((parent, frame)) = stack.pop() {
        match frame {
            Frame::Enter { node, depth } => {
                if visited.seen[node] {
                    if let (true, Some(from)) = (visited.on_path[node], parent) {
                        back_edges.push((from, node));
                    }
                    continue;
                }
                visited.seen[node] = true;
                visited.on_path[node] = true;
                depths[node] = depths[node].max(depth);

                stack.push((None, Frame::Exit(node)));
                for &child in graph.successors(node).iter().rev() {
                    stack.push((
                        Some(node),
                        Frame::Enter {
                            node: child,
                            depth: depths[node] + 1,
                        },
                    ));
                }
            }
            Frame::Exit(node) => visited.on_path[node] = false,
        }
    }

    visited
}

/// Assign each node its longest distance from any source node.
///
/// Nodes are processed in topological order (Kahn's algorithm, ties broken by
/// insertion order). Fails with [`FlowError::CyclicGraph`] naming the first
/// node, in insertion order, that sits on or behind a cycle.
pub fn longest_path_depths(graph: &LayoutGraph) -> Result<Vec<usize>> {
    let n = graph.len();
    let mut in_degree = vec![0usize; n];
    for node in 0..n {
        for &child in graph.successors(node) {
            in_degree[child] += 1;
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut depths = vec![0usize; n];
    let mut processed = 0usize;

    while let Some(node) = queue.pop_front() {
        processed += 1;
        for &child in graph.successors(node) {
            depths[child] = depths[child].max(depths[node] + 1);
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    if processed < n {
        let stuck = (0..n).find(|&v| in_degree[v] > 0).unwrap_or(0);
        return Err(FlowError::CyclicGraph {
            node: graph.id(stuck).to_string(),
        });
    }

    Ok(depths)
}
