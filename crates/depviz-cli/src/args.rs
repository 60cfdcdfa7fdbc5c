//! Command-line argument definitions for `fbx-depviz`.
//!
//! Arguments select the input scene, where the DOT document goes, which
//! configuration file to load and how verbose logging is.

use clap::Parser;

/// Render the object dependency graph of an FBX ASCII scene as Graphviz DOT
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input FBX file
    #[arg(help = "Path to the input FBX file")]
    pub input: String,

    /// Path to the output DOT file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML, or JSON with a `.json` extension)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
