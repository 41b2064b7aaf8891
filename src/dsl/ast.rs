//! Syntax types for the flowchart DSL.

use crate::graph::NodeType;

/// A reference to a node, as written in a declaration or at one end of an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    /// Node identifier
    pub id: String,
    /// Shape inferred from the delimiters
    pub node_type: NodeType,
    /// Text inside the delimiters, or the id when there is none
    pub label: String,
}

impl NodeRef {
    /// A bare reference with no delimiters: default shape, label equal to id.
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            node_type: NodeType::default(),
        }
    }
}

/// A decomposed edge line: `source --> |label| target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRef {
    pub source: NodeRef,
    pub target: NodeRef,
    /// Trimmed connector text; empty when absent
    pub label: String,
}

/// One meaningful line of DSL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A standalone node reference
    Declaration(NodeRef),
    /// A directed edge between two node references
    Edge(EdgeRef),
}

/// Maps a delimiter pair to the shape it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRule {
    pub open: &'static str,
    pub close: &'static str,
    pub node_type: NodeType,
}

/// Shape inference rules, evaluated in order. The first rule whose delimiter
/// pair is present in a fragment decides the shape.
pub const SHAPE_RULES: [ShapeRule; 3] = [
    ShapeRule {
        open: "((",
        close: "))",
        node_type: NodeType::State,
    },
    ShapeRule {
        open: "[",
        close: "]",
        node_type: NodeType::Action,
    },
    ShapeRule {
        open: "{",
        close: "}",
        node_type: NodeType::Choice,
    },
];

/// Characters that end a node identifier besides whitespace.
pub const IDENT_TERMINATORS: [char; 3] = ['(', '[', '{'];

/// Every character that opens or closes a node shape.
pub const SHAPE_DELIMITERS: [char; 6] = ['(', ')', '[', ']', '{', '}'];

/// Directed edge marker.
pub const EDGE_MARKER: &str = "-->";

/// Edge label delimiter.
pub const LABEL_DELIMITER: char = '|';

/// Header keywords recognized by default.
pub const DEFAULT_HEADER_KEYWORDS: [&str; 2] = ["graph", "flowchart"];
