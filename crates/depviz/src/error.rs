//! Error types for depviz operations.
//!
//! This module provides the main error type [`DepvizError`] which wraps the
//! error conditions of every pipeline stage.

use std::{io, path::PathBuf};

use thiserror::Error;

use depviz_fbx::DecodeError;

use crate::{filter::FilterError, structure::DuplicateObjectError};

/// The main error type for depviz operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant keeps the source text next to the decoder's
/// diagnostics so callers can render labeled source snippets.
#[derive(Debug, Error)]
pub enum DepvizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Decode { err: DecodeError, src: String },

    #[error(transparent)]
    Graph(#[from] DuplicateObjectError),

    #[error("invalid filter configuration: {0}")]
    Filter(#[from] FilterError),

    /// A configuration document that does not describe a valid filter.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to write output: {0}")]
    Emit(#[source] io::Error),
}

impl DepvizError {
    /// Create a new `Decode` error with the associated source text.
    pub fn new_decode_error(err: DecodeError, src: impl Into<String>) -> Self {
        Self::Decode {
            err,
            src: src.into(),
        }
    }
}
