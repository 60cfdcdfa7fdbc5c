//! Decoder errors.
//!
//! Every failure is a [`Diagnostic`] carrying an [`ErrorCode`], one or more
//! labeled [`Span`](crate::Span)s into the source text and an optional help
//! line. A [`DecodeError`] bundles the diagnostics of one decode: the lexer
//! reports all of its errors at once, later phases stop at the first.
//!
//! ```
//! # use depviz_fbx::error::{Diagnostic, ErrorCode};
//! # use depviz_fbx::Span;
//! let diag = Diagnostic::error("connection references a non-integer id")
//!     .with_code(ErrorCode::E202)
//!     .with_label(Span::new(100..120), "expected an object id")
//!     .with_help("connection entries look like `C: \"OO\",child,parent`");
//! assert_eq!(diag.code(), Some(ErrorCode::E202));
//! ```

mod decode_error;
mod diagnostic;
mod error_code;

pub use decode_error::DecodeError;
pub use diagnostic::{Diagnostic, Label, LabelStyle};
pub use error_code::ErrorCode;
