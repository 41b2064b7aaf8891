//! Flowchart graph model.
//!
//! This module holds the value exchanged between the converter and its
//! collaborators (canvas, storage, clipboard). A [`Graph`] is a plain list of
//! typed [`Node`]s and labeled [`Edge`]s; it carries no layout metadata beyond
//! each node's final position.

mod types;
mod validate;

pub use types::*;
pub use validate::validate_graph;
