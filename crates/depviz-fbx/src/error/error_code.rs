//! Stable codes for decoder diagnostics.
//!
//! The hundreds digit names the phase: `E0xx` encoding and lexing, `E1xx`
//! parsing, `E2xx` record extraction.

use std::fmt;

/// A diagnostic code. Displays as the variant name, e.g. `E203`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Encoding and lexing
    /// A string was opened with a quote but never closed on the same line.
    E001,

    /// A character was encountered that cannot start any FBX token.
    E002,

    /// A numeric token is neither a 64-bit integer nor a float.
    E003,

    /// An array marker `*` is not followed by a non-negative integer.
    E004,

    /// The input is a binary FBX document or is not valid UTF-8 text.
    E010,

    // Parsing
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// The input ended before the `}` closing a node's children.
    E101,

    /// A `}` appeared at top level with no open block.
    E102,

    // Record extraction
    /// An entry of the `Objects` block does not start with an integer id and
    /// a `Class::Name` string.
    E200,

    /// An object declaration resolves to an empty class.
    E201,

    /// A `C:` entry is missing its type code or one of its integer ids.
    E202,

    /// A `C:` entry uses a type code other than `OO`, `OP`, `PO` or `PP`.
    E203,

    /// A `PoseNode` entry has no integer `Node` id.
    E204,
}

impl ErrorCode {
    /// Short description, used as the primary label text.
    pub fn description(&self) -> &'static str {
        match self {
            Self::E001 => "unterminated string literal",
            Self::E002 => "unexpected character",
            Self::E003 => "invalid number literal",
            Self::E004 => "invalid array length",
            Self::E010 => "unsupported document encoding",
            Self::E100 => "unexpected token",
            Self::E101 => "unclosed block",
            Self::E102 => "unmatched closing brace",
            Self::E200 => "malformed object declaration",
            Self::E201 => "empty object class",
            Self::E202 => "malformed connection",
            Self::E203 => "unknown connection type",
            Self::E204 => "malformed pose node",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names are the codes.
        fmt::Debug::fmt(self, f)
    }
}
