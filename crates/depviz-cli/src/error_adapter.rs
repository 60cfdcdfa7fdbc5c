//! Rendering of [`DepvizError`] through miette.
//!
//! A decode failure becomes one report per decoder diagnostic, each with
//! labeled snippets of the input. Every other error becomes a single report
//! without source code.

use std::{error::Error, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use depviz::DepvizError;
use depviz_fbx::{Span, error::Diagnostic};

/// One renderable report.
#[derive(Debug)]
pub struct Reportable<'a> {
    message: String,
    code: Option<String>,
    help: Option<String>,
    src: Option<&'a str>,
    labels: Vec<LabeledSpan>,
    cause: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Reportable<'a> {
    /// Report a decoder diagnostic against the document it came from.
    pub fn from_diagnostic(diag: &Diagnostic, src: &'a str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let message = Some(label.message().to_string());
                let span = to_source_span(label.span());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            help: diag.help().map(str::to_string),
            src: Some(src),
            labels,
            cause: None,
        }
    }

    /// Report an error that has no position in the input.
    pub fn from_error(err: &'a DepvizError) -> Self {
        let (code, help) = match err {
            DepvizError::Io(_) => ("depviz::io", None),
            DepvizError::Decode { .. } => ("depviz::decode", None),
            DepvizError::Graph(_) => (
                "depviz::graph",
                Some("every object id must be declared once with one class"),
            ),
            DepvizError::Filter(_) => (
                "depviz::filter",
                Some("patterns use Rust regex syntax and must match whole values"),
            ),
            DepvizError::Config { .. } => (
                "depviz::filter",
                Some("check the option names and the values of each `when` predicate"),
            ),
            DepvizError::Emit(_) => ("depviz::emit", None),
        };

        Self {
            message: err.to_string(),
            code: Some(code.to_string()),
            help: help.map(str::to_string),
            src: None,
            labels: Vec::new(),
            cause: err.source(),
        }
    }

    /// Whether the report shows snippets of the input.
    pub fn has_source(&self) -> bool {
        self.src.is_some()
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_ref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.iter().cloned()))
        }
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split an error into the reports to render, in order.
pub fn to_reportables(err: &DepvizError) -> Vec<Reportable<'_>> {
    match err {
        DepvizError::Decode { err: decode, src } => decode
            .diagnostics()
            .iter()
            .map(|diag| Reportable::from_diagnostic(diag, src))
            .collect(),
        _ => vec![Reportable::from_error(err)],
    }
}
