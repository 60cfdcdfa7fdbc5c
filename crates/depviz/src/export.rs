//! Export of filtered graphs.
//!
//! This module provides the [`Exporter`] trait, the final stage of the
//! depviz pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! FBX Source Text
//!     ↓ decode
//! Object / Connection Records
//!     ↓ structure
//! Graph
//!     ↓ filter
//! Render Decisions
//!     ↓ export (this module)
//! DOT Document
//! ```
//!
//! # Available Backends
//!
//! - [`dot`]: Graphviz DOT output via [`dot::DotExporter`]

/// Graphviz DOT export backend.
pub mod dot;

use std::io;

use crate::{filter::RenderDecisions, structure::Graph};

/// Abstraction for graph export backends.
pub trait Exporter {
    /// Writes the visible part of `graph` as decided by `decisions`.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error unchanged. Output already written is not
    /// rolled back.
    fn export_graph(&mut self, graph: &Graph, decisions: &RenderDecisions) -> io::Result<()>;
}
