//! Decoder diagnostics: a message, an optional [`ErrorCode`], source
//! labels and a help line.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// Whether a label marks the offending text or surrounding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

/// A message attached to a span of the decoded document.
#[derive(Debug, Clone)]
pub struct Label {
    style: LabelStyle,
    span: Span,
    message: String,
}

impl Label {
    pub fn new(style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        Self {
            style,
            span,
            message: message.into(),
        }
    }

    pub fn style(&self) -> LabelStyle {
        self.style
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.style == LabelStyle::Primary
    }
}

/// One decoding error.
///
/// Rendered by the CLI roughly as:
///
/// ```text
/// error[E203]: unknown connection type `XO`
///   --> scene.fbx:41:5
///    |
/// 41 |     C: "XO",140000,150000
///    |        ^^^^ expected `OO`, `OP`, `PO` or `PP`
///    |
///    = help: connection entries look like `C: "OO",child,parent`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    code: Option<ErrorCode>,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Start a diagnostic with the given headline.
    ///
    /// ```
    /// # use depviz_fbx::error::{Diagnostic, ErrorCode};
    /// # use depviz_fbx::Span;
    /// let diag = Diagnostic::error("unclosed block")
    ///     .with_code(ErrorCode::E101)
    ///     .with_label(Span::new(0..8), "opened here")
    ///     .with_help("add the missing `}`");
    /// assert_eq!(diag.labels().len(), 1);
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Labels in the order they were attached; the first is usually primary.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn with_code(self, code: ErrorCode) -> Self {
        Self {
            code: Some(code),
            ..self
        }
    }

    /// Point at the offending text.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labeled(LabelStyle::Primary, span, message)
    }

    /// Point at related context, such as the block an error sits in.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labeled(LabelStyle::Secondary, span, message)
    }

    pub fn with_help(self, help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..self
        }
    }

    fn labeled(mut self, style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(style, span, message));
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "error[{code}]: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
