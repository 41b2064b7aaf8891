//! Flowchart DSL: parsing text into a [`Graph`] and writing it back.
//!
//! The DSL is a small, line-oriented subset of Mermaid flowchart notation.
//!
//! # Grammar Overview
//!
//! ```text
//! diagram     = header_line { decl_line | edge_line | empty }
//! header_line = ("graph" | "flowchart") direction     ; direction is ignored
//! decl_line   = node_ref
//! edge_line   = node_ref "-->" [ "|" label "|" ] node_ref
//! node_ref    = ident
//!             | ident "((" label "))"                 ; state
//!             | ident "[" label "]"                   ; action
//!             | ident "{" label "}"                   ; choice
//! ```
//!
//! # Node Shapes
//!
//! | Type | Syntax | Meaning |
//! |------|--------|---------|
//! | state  | `id((label))` | Rounded start/end or status node |
//! | action | `id[label]`   | Step to perform |
//! | choice | `id{label}`   | Decision point |
//!
//! A reference without delimiters is a `state` whose label is its id.
//!
//! # Example
//!
//! ```text
//! graph TD
//! start((Begin))
//! start --> check{Ready?}
//! check -->|yes| run[Run job]
//! check -->|no| start
//! ```
//!
//! Parsing never fails. Lines that do not fit the grammar become bare node
//! declarations, repeated declarations keep the first one, and edge endpoints
//! that were never declared are created implicitly.

mod ast;
mod builder;
mod lexer;
mod parser;
mod writer;

pub use ast::*;
pub use builder::{GraphBuilder, NodeRecord};
pub use lexer::{classify_line, Lexer, Line, LineKind};
pub use parser::{
    extract_identifier, extract_label, extract_shape, parse_edge_line, parse_line, parse_node_ref,
    split_edge_label, Parser,
};
pub use writer::{write_edge, write_graph, write_node, GenerateConfig};

use crate::graph::Graph;
use crate::layout::LayoutConfig;

/// Configuration for parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseConfig {
    /// Keywords that open a header line.
    pub header_keywords: Vec<String>,
    /// Layout applied to the parsed graph.
    pub layout: LayoutConfig,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            header_keywords: DEFAULT_HEADER_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ParseConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the header keywords.
    pub fn with_header_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Parse flowchart text into a laid-out graph with default settings.
pub fn parse(input: &str) -> Graph {
    parse_with(input, &ParseConfig::default())
}

/// Parse flowchart text into a laid-out graph.
pub fn parse_with(input: &str, config: &ParseConfig) -> Graph {
    let keywords: Vec<&str> = config.header_keywords.iter().map(String::as_str).collect();
    let parser = Parser::new(Lexer::with_header_keywords(input, &keywords));

    let mut builder = GraphBuilder::new();
    builder.extend(parser);
    builder.build(&config.layout)
}

/// Render a graph as flowchart text with default settings.
pub fn generate(graph: &Graph) -> String {
    write_graph(graph, &GenerateConfig::default())
}

/// Render a graph as flowchart text.
pub fn generate_with(graph: &Graph, config: &GenerateConfig) -> String {
    write_graph(graph, config)
}

/// Parse a flowchart DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path, config: &ParseConfig) -> crate::error::Result<Graph> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::FlowError::file_read(path, e))?;
    Ok(parse_with(&content, config))
}
