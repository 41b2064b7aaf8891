//! WASM bindings for Flowchart Core.
//!
//! Graphs cross the boundary as JSON strings in the same shape the library
//! serializes: `{nodes: [{id, type, label, position}], edges: [{id, source, target, label}]}`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { parse_flowchart, generate_flowchart } from 'flowchart_core';
//!
//! await init();
//!
//! const { nodes, edges } = JSON.parse(parse_flowchart(`
//!   graph TD
//!   A[Do thing] -->|yes| B{Check}
//! `));
//!
//! // ... user edits nodes and edges on the canvas ...
//!
//! const text = generate_flowchart(JSON.stringify({ nodes, edges }));
//! ```

use wasm_bindgen::prelude::*;

use crate::dsl::{self, ParseConfig};
use crate::error::FlowError;
use crate::layout::LayoutConfig;
use crate::store::Flow;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: FlowError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn graph_json(text: &str, config: &ParseConfig) -> Result<String, JsValue> {
    let graph = dsl::parse_with(text, config);
    serde_json::to_string(&graph).map_err(|e| to_js(e.into()))
}

/// Parse flowchart text and return the laid-out graph as JSON.
#[wasm_bindgen]
pub fn parse_flowchart(text: &str) -> Result<String, JsValue> {
    graph_json(text, &ParseConfig::default())
}

/// Parse flowchart text with reproducible layout jitter.
///
/// # Arguments
/// * `text` - The flowchart DSL
/// * `seed` - Jitter seed; the same seed yields the same coordinates
#[wasm_bindgen]
pub fn parse_flowchart_seeded(text: &str, seed: u64) -> Result<String, JsValue> {
    let config = ParseConfig::new().with_layout(LayoutConfig::new().with_seed(seed));
    graph_json(text, &config)
}

/// Render a graph (or a saved flow with a viewport) given as JSON into
/// flowchart text.
///
/// Fails only when the JSON does not describe a graph.
#[wasm_bindgen]
pub fn generate_flowchart(json: &str) -> Result<String, JsValue> {
    let flow: Flow = serde_json::from_str(json).map_err(|e| to_js(e.into()))?;
    Ok(dsl::generate(&flow.into_graph()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
