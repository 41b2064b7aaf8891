//! Save/load port for flowchart state.
//!
//! The converter itself is stateless. Whoever owns the editing session
//! (a canvas, the CLI, a test) decides when to persist a [`Flow`] and passes
//! it explicitly to a [`FlowStore`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};
use crate::graph::{Edge, Graph, Node};

/// Default file name for [`FileStore`].
pub const DEFAULT_STATE_FILE: &str = "flowchart-state.json";

/// Canvas viewport saved alongside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Persisted editing state: the graph plus an optional viewport.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flow {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl Flow {
    /// Wrap a graph with no viewport.
    pub fn from_graph(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
            viewport: None,
        }
    }

    /// Set the viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// The graph part of the flow.
    pub fn into_graph(self) -> Graph {
        Graph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

impl From<Graph> for Flow {
    fn from(graph: Graph) -> Self {
        Self::from_graph(graph)
    }
}

/// Storage backend for flowchart state.
pub trait FlowStore {
    /// Persist a flow, replacing any previous one.
    fn save(&mut self, flow: &Flow) -> Result<()>;

    /// Load the last saved flow, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Flow>>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<Flow>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlowStore for MemoryStore {
    fn save(&mut self, flow: &Flow) -> Result<()> {
        self.saved = Some(flow.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Flow>> {
        Ok(self.saved.clone())
    }
}

/// Store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store state in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store state in [`DEFAULT_STATE_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_STATE_FILE))
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlowStore for FileStore {
    fn save(&mut self, flow: &Flow) -> Result<()> {
        let json = serde_json::to_string_pretty(flow)?;
        std::fs::write(&self.path, json).map_err(|e| FlowError::file_write(&self.path, e))?;
        tracing::info!(
            path = %self.path.display(),
            nodes = flow.nodes.len(),
            edges = flow.edges.len(),
            "saved flowchart state"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<Flow>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FlowError::file_read(&self.path, e)),
        };
        let flow: Flow = serde_json::from_str(&content)?;
        tracing::info!(
            path = %self.path.display(),
            nodes = flow.nodes.len(),
            "loaded flowchart state"
        );
        Ok(Some(flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use crate::layout::LayoutConfig;

    fn sample() -> Flow {
        let config = dsl::ParseConfig::new().with_layout(LayoutConfig::new().with_jitter(0.0));
        Flow::from_graph(dsl::parse_with("graph TD\nA[Go]-->|ok| B{Done?}", &config))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn test_file_store_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path());
        let flow = sample().with_viewport(Viewport {
            x: 10.0,
            y: -5.0,
            zoom: 1.5,
        });

        store.save(&flow).unwrap();
        assert!(store.path().ends_with(DEFAULT_STATE_FILE));
        assert_eq!(store.load().unwrap(), Some(flow));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nothing.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, FlowError::Json { .. }));
    }

    #[test]
    fn test_flow_without_viewport_omits_field() {
        let json = serde_json::to_value(Flow::default()).unwrap();
        assert!(json.get("viewport").is_none());
        assert_eq!(json["nodes"], serde_json::json!([]));
    }

    #[test]
    fn test_flow_graph_conversion() {
        let graph = sample().into_graph();
        let flow: Flow = graph.clone().into();
        assert_eq!(flow.into_graph(), graph);
    }
}
