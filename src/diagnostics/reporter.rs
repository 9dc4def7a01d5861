//! Diagnostic reporter that collects and manages diagnostics.

use super::{Diagnostic, DiagnosticLevel};
use crate::parser::Span;

/// Collects diagnostics during compilation, in emission order.
///
/// The reporter is injected into every compilation stage so that tests can
/// capture the diagnostic stream deterministically instead of scraping
/// stderr.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a fatal compilation error at the given source position.
    pub fn fatal(&mut self, span: Span, message: impl Into<String>) {
        self.had_error = true;
        self.diagnostics.push(Diagnostic::error(span, message));
    }

    /// Report a warning at the given source position.
    pub fn warn(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(span, message));
    }

    /// Check if any fatal error has been reported
    pub fn has_errors(&self) -> bool {
        self.had_error
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }

    /// Consume and return all diagnostics
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get reference to diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
