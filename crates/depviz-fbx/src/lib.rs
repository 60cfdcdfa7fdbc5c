//! # Depviz FBX
//!
//! Decoder for FBX 7.x ASCII documents. It turns source text into the object
//! and connection records consumed by the depviz graph builder.
//!
//! ## Usage
//!
//! ```
//! # use depviz_fbx::{parse, DecodeError, DecodeOptions};
//!
//! fn main() -> Result<(), DecodeError> {
//!     let source = r#"
//!         Objects:  {
//!             Model: 100, "Model::Cube", "Mesh" {
//!             }
//!             Geometry: 200, "Geometry::Cube", "Mesh" {
//!             }
//!         }
//!         Connections:  {
//!             C: "OO",200,100
//!         }
//!     "#;
//!
//!     let document = parse(source)?;
//!     let records = document.object_records().collect::<Result<Vec<_>, _>>()?;
//!     let connections = document
//!         .connections(DecodeOptions::default())
//!         .collect::<Result<Vec<_>, _>>()?;
//!     assert_eq!(records.len(), 2);
//!     assert_eq!(connections.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
mod extract;
mod lexer;
mod parser;
mod span;
mod tokens;

pub use document::{Attribute, AttributeValue, Document, FbxNode};
pub use error::DecodeError;
pub use extract::DecodeOptions;
pub use span::Span;

use error::{Diagnostic, ErrorCode};

/// Leading bytes of a binary FBX document.
pub const BINARY_MAGIC: &[u8] = b"Kaydara FBX Binary  \0";

/// Parse FBX ASCII source text into a document tree.
///
/// This orchestrates the decoding pipeline:
///
/// 1. **Tokenize** - Convert source text to tokens, collecting every lexical error
/// 2. **Parse** - Build the node tree, stopping at the first syntax error
///
/// Records are extracted lazily afterwards with [`Document::object_records`]
/// and [`Document::connections`].
///
/// # Errors
///
/// Returns [`DecodeError`] containing one or more diagnostics if the text is
/// not a well-formed FBX ASCII document.
pub fn parse(source: &str) -> Result<Document, DecodeError> {
    log::debug!(len = source.len(); "Tokenizing FBX source");
    let tokens = lexer::tokenize(source)?;
    log::trace!(tokens = tokens.len(); "Tokenized");

    let document = parser::build_document(&tokens)?;
    log::debug!(nodes = document.nodes().len(); "Parsed top-level nodes");
    Ok(document)
}

/// Check raw file content and return it as ASCII FBX text.
///
/// A leading UTF-8 byte order mark is dropped.
///
/// # Errors
///
/// Returns a [`DecodeError`] with code `E010` for binary FBX documents and
/// for content that is not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<&str, DecodeError> {
    if bytes.starts_with(BINARY_MAGIC) {
        return Err(Diagnostic::error("binary FBX documents are not supported")
            .with_code(ErrorCode::E010)
            .with_help("export the scene as FBX ASCII")
            .into());
    }

    let text = std::str::from_utf8(bytes).map_err(|err| {
        let start = err.valid_up_to();
        Diagnostic::error(format!("input is not valid UTF-8 text: {err}"))
            .with_code(ErrorCode::E010)
            .with_label(Span::new(start..start + 1), ErrorCode::E010.description())
            .with_help("FBX ASCII documents are UTF-8 text")
    })?;

    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports_lexer_errors_before_parsing() {
        let err = parse("A: \"open\nB: @").unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
        assert_eq!(codes, vec![ErrorCode::E001, ErrorCode::E002]);
    }

    #[test]
    fn test_decode_text_rejects_binary() {
        let mut bytes = BINARY_MAGIC.to_vec();
        bytes.extend_from_slice(&[0x1a, 0x00, 0xe8, 0x1c]);
        let err = decode_text(&bytes).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E010));
    }

    #[test]
    fn test_decode_text_rejects_invalid_utf8() {
        let err = decode_text(b"Objects: {\xff}").unwrap_err();
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E010));
        assert_eq!(diag.labels()[0].span(), Span::new(10..11));
    }

    #[test]
    fn test_decode_text_strips_bom() {
        assert_eq!(decode_text("\u{feff}Version: 1".as_bytes()).unwrap(), "Version: 1");
    }
}
