//! # Flowchart Core
//!
//! A bidirectional converter between a small flowchart text DSL and a
//! laid-out node graph.
//!
//! This library provides:
//! - A parser for a Mermaid-style flowchart subset with three node shapes
//! - Layered automatic layout (depth bands, columns, grid coordinates)
//! - A writer that renders any graph back into the same DSL
//! - A save/load port for editors that persist their state
//!
//! ## Architecture
//!
//! - [`dsl`] - Line classifier, node/edge parser, graph builder and writer
//! - [`layout`] - Depth, column and position assignment
//! - [`graph`] - The node/edge model exchanged with callers
//! - [`store`] - Persistence port and backends
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! flowchart parse diagram.mmd > diagram.json
//! flowchart generate diagram.json
//! ```
//!
//! ### Library
//!
//! ```rust
//! let graph = flowchart_core::parse("graph TD\nA[Do thing]-->|yes| B{Check}");
//! assert_eq!(graph.nodes.len(), 2);
//!
//! let text = flowchart_core::generate(&graph);
//! assert!(text.contains("A --> |yes| B"));
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import init, { parse_flowchart, generate_flowchart } from 'flowchart_core';
//!
//! const graph = JSON.parse(parse_flowchart(text));
//! const text = generate_flowchart(JSON.stringify(graph));
//! ```
//!
//! `parse` and `generate` are total functions. They hold no state between
//! calls, so concurrent use only requires that each call gets its own input.

pub mod dsl;
pub mod error;
pub mod graph;
pub mod layout;
pub mod store;

// Re-export main types for convenience
pub use dsl::{generate, generate_with, parse, parse_with, GenerateConfig, ParseConfig};
pub use error::{FlowError, Result};
pub use graph::{Edge, Graph, Node, NodeType, Position};
pub use layout::{DepthPolicy, LayoutConfig};
pub use store::{FileStore, Flow, FlowStore, MemoryStore, Viewport};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{generate_flowchart, parse_flowchart, parse_flowchart_seeded};
