//! Error types for the flowchart converter.
//!
//! Parsing and generating DSL text never fail: malformed input degrades to a
//! best-effort graph. [`FlowError`] covers everything around that core, such as
//! graph validation, strict layering, JSON exchange, and the persistence port.

use thiserror::Error;

/// Result type alias using [`FlowError`].
pub type Result<T> = std::result::Result<T, FlowError>;

/// Unified error type for all fallible flowchart operations.
#[derive(Error, Debug)]
pub enum FlowError {
    // ============ Graph Invariant Errors ============
    /// Edge endpoint does not resolve to a node in the graph
    #[error("Edge '{edge}' references missing node '{endpoint}'")]
    DanglingEdge { edge: String, endpoint: String },

    /// Two nodes share the same id
    #[error("Duplicate node id '{id}'")]
    DuplicateNode { id: String },

    /// Two edges share the same id
    #[error("Duplicate edge id '{id}'")]
    DuplicateEdge { id: String },

    /// Operation referenced a node that is not in the graph
    #[error("Node '{id}' not found in graph")]
    UnknownNode { id: String },

    // ============ Layout Errors ============
    /// Strict layering found a cycle
    #[error("Graph contains a cycle through node '{node}'")]
    CyclicGraph { node: String },

    // ============ I/O Errors ============
    /// Error reading an input or state file
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a state file
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed graph or flow JSON
    #[error("Invalid graph JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl FlowError {
    /// Create a dangling edge error
    pub fn dangling(edge: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::DanglingEdge {
            edge: edge.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an unknown node error
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a file write error
    pub fn file_write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            source,
        }
    }
}
