//! CLI logic for the `fbx-depviz` tool.
//!
//! Reads an FBX ASCII scene, builds and filters its object dependency
//! graph and writes the result as a Graphviz DOT document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::ConfigError;

use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::Path,
};

use log::info;

use depviz::{DepvizBuilder, DepvizError};

/// Run the `fbx-depviz` application
///
/// Loads the configuration, decodes the input scene and writes the DOT
/// document to the output file, or to standard output when none is given.
///
/// # Errors
///
/// Returns `DepvizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid filter configuration
/// - Decoding errors
/// - Conflicting object declarations
/// - Output write errors
pub fn run(args: &Args) -> Result<(), DepvizError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DepvizBuilder::new(app_config)?;

    let bytes = fs::read(&args.input)?;
    let name = graph_name(&args.input);
    let graph = builder.decode_bytes(&name, &bytes)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            builder.write_dot(&graph, BufWriter::new(file))?;
            info!(output_file = path; "DOT document written");
        }
        None => {
            builder.write_dot(&graph, io::stdout().lock())?;
            info!("DOT document written to standard output");
        }
    }

    Ok(())
}

/// The graph is named after the input's file name.
fn graph_name(input: &str) -> String {
    Path::new(input)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_name_uses_file_name() {
        assert_eq!(graph_name("scenes/cube.fbx"), "cube.fbx");
        assert_eq!(graph_name("cube.fbx"), "cube.fbx");
        assert_eq!(graph_name(".."), "..");
    }
}
