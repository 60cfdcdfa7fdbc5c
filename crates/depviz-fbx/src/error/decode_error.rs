//! [`DecodeError`], the error returned by every decoding entry point.

use std::fmt;

use crate::error::Diagnostic;

/// One or more diagnostics from lexing, parsing or record extraction.
///
/// Never empty when produced by this crate.
#[derive(Debug, Clone)]
pub struct DecodeError {
    diagnostics: Vec<Diagnostic>,
}

impl DecodeError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `Ok(())` when nothing was reported.
    pub(crate) fn check(diagnostics: Vec<Diagnostic>) -> Result<(), Self> {
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(Self::new(diagnostics))
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.diagnostics.split_first() else {
            return f.write_str("decoding failed");
        };
        write!(f, "{first}")?;
        if !rest.is_empty() {
            write!(f, " (+{} more)", rest.len())?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

impl From<Diagnostic> for DecodeError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for DecodeError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_single_diagnostic_display() {
        let err = DecodeError::from(Diagnostic::error("unclosed block").with_code(ErrorCode::E101));

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.to_string(), "error[E101]: unclosed block");
    }

    #[test]
    fn test_counts_remaining_diagnostics() {
        let err = DecodeError::from(vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ]);

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }

    #[test]
    fn test_check() {
        assert!(DecodeError::check(Vec::new()).is_ok());

        let err = DecodeError::check(vec![Diagnostic::error("bad")]).unwrap_err();
        assert_eq!(err.diagnostics()[0].message(), "bad");
    }
}
