//! Depviz - FBX object dependency graphs rendered as Graphviz DOT.
//!
//! The pipeline decodes an FBX ASCII document into object and connection
//! records, builds a [`Graph`](structure::Graph) with implicit objects for
//! dangling references, evaluates a [`Filter`](filter::Filter) into render
//! decisions and writes a deterministic DOT document.

pub mod config;
pub mod export;
pub mod filter;
pub mod structure;

mod error;

pub use depviz_core::{connection, identifier, object, property};
pub use depviz_fbx::{DecodeError, DecodeOptions};

pub use error::DepvizError;

use std::io::Write;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, dot::DotExporter};
use filter::{Filter, RenderDecisions};
use structure::{BuildError, Graph};

/// Builder for decoding, filtering and rendering FBX dependency graphs.
///
/// The filter configuration is compiled when the builder is created, so an
/// invalid configuration is reported before any document is read.
///
/// # Examples
///
/// ```
/// use depviz::{DepvizBuilder, config::AppConfig};
///
/// let source = r#"
/// Objects:  {
///     Model: 1, "Model::Cube", "Mesh" {
///     }
///     Geometry: 2, "Geometry::Cube", "Mesh" {
///     }
/// }
/// Connections:  {
///     C: "OO",2,1
/// }
/// "#;
///
/// let builder = DepvizBuilder::new(AppConfig::default()).expect("valid config");
/// let graph = builder.decode("cube.fbx", source).expect("Failed to decode");
/// let dot = builder.render_dot(&graph);
/// assert!(dot.contains("2 -> 1"));
/// ```
#[derive(Debug, Clone)]
pub struct DepvizBuilder {
    config: AppConfig,
    filter: Filter,
}

impl DepvizBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DepvizError::Filter`] if a pattern or style predicate of the
    /// filter configuration is invalid.
    pub fn new(config: AppConfig) -> Result<Self, DepvizError> {
        let filter = Filter::compile(config.filter())?;
        debug!(
            rules = config.filter().style_rules().len();
            "Filter configuration compiled"
        );
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the compiled filter.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            pose_links: self.config.decode().pose_links(),
        }
    }

    /// Decode FBX ASCII text and build its object graph.
    ///
    /// # Arguments
    ///
    /// * `name` - Document name, used as the DOT graph name
    /// * `source` - FBX ASCII text
    ///
    /// # Errors
    ///
    /// Returns [`DepvizError::Decode`] for malformed documents and
    /// [`DepvizError::Graph`] for conflicting object declarations.
    pub fn decode(&self, name: &str, source: &str) -> Result<Graph, DepvizError> {
        info!(name; "Decoding FBX document");

        let document = depviz_fbx::parse(source)
            .map_err(|err| DepvizError::new_decode_error(err, source))?;

        let graph = structure::build(
            name,
            document.object_records(),
            document.connections(self.decode_options()),
        )
        .map_err(|err| match err {
            BuildError::Decode(err) => DepvizError::new_decode_error(err, source),
            BuildError::DuplicateObject(err) => DepvizError::Graph(err),
        })?;

        info!(
            objects = graph.object_count(),
            connections = graph.connection_count();
            "Document decoded"
        );
        trace!(graph:?; "Decoded graph");
        Ok(graph)
    }

    /// Decode raw file content, rejecting binary FBX and non-UTF-8 input.
    ///
    /// # Errors
    ///
    /// See [`decode`](Self::decode).
    pub fn decode_bytes(&self, name: &str, bytes: &[u8]) -> Result<Graph, DepvizError> {
        let source = depviz_fbx::decode_text(bytes).map_err(|err| {
            DepvizError::new_decode_error(err, String::from_utf8_lossy(bytes))
        })?;
        self.decode(name, source)
    }

    /// Evaluate the configured filter against `graph`.
    pub fn evaluate(&self, graph: &Graph) -> RenderDecisions {
        self.filter.evaluate(graph)
    }

    /// Render the filtered graph as a DOT document.
    pub fn render_dot(&self, graph: &Graph) -> String {
        export::dot::render(graph, &self.evaluate(graph))
    }

    /// Write the filtered graph as a DOT document into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`DepvizError::Emit`] if writing to the sink fails.
    pub fn write_dot<W: Write>(&self, graph: &Graph, sink: W) -> Result<(), DepvizError> {
        let decisions = self.evaluate(graph);
        DotExporter::new(sink)
            .export_graph(graph, &decisions)
            .map_err(DepvizError::Emit)?;
        info!("DOT document written");
        Ok(())
    }
}
