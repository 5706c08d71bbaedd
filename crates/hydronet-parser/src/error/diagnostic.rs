//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single recovered condition with an optional
//! code, an optional labeled source span, the 1-based line it refers to, and
//! help text.

use std::fmt;

use crate::{
    error::{ErrorCode, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// warning[H100]: invalid elevation `1.2.3`
///    |
/// 14 | NODE 7 ELEV 1.2.3
///    |             ^^^^^ expected a number
///    |
///    = help: elevations are decimal numbers such as `12.5`
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    span: Option<Span>,
    label: Option<String>,
    line: Option<usize>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an advice diagnostic.
    pub fn advice(message: impl Into<String>) -> Self {
        Self::new(Severity::Advice, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use hydronet_parser::error::{Diagnostic, ErrorCode};
    /// # use hydronet_parser::Span;
    ///
    /// let diag = Diagnostic::warning("invalid node id `x1`")
    ///     .with_code(ErrorCode::H100)
    ///     .with_label(Span::new(9..11), "expected digits")
    ///     .with_line(3);
    /// assert_eq!(diag.to_string(), "warning[H100]: invalid node id `x1`");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source span, if any.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Get the label attached to the span, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the 1-based source line, if any.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a labeled source span.
    pub fn with_label(mut self, span: Span, label: impl Into<String>) -> Self {
        self.span = Some(span);
        self.label = Some(label.into());
        self
    }

    /// Set the 1-based source line.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            span: None,
            label: None,
            line: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[H100]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::warning("test warning");

        assert!(diag.severity().is_warning());
        assert!(!diag.severity().is_advice());
        assert_eq!(diag.message(), "test warning");
        assert!(diag.code().is_none());
        assert!(diag.span().is_none());
        assert!(diag.line().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("invalid elevation `abc`")
            .with_code(ErrorCode::H100)
            .with_label(Span::new(12..15), "expected a number")
            .with_line(4)
            .with_help("elevations are decimal numbers");

        assert_eq!(diag.code(), Some(ErrorCode::H100));
        assert_eq!(diag.span(), Some(Span::new(12..15)));
        assert_eq!(diag.label(), Some("expected a number"));
        assert_eq!(diag.line(), Some(4));
        assert_eq!(diag.help(), Some("elevations are decimal numbers"));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::warning("connection `C9` references undeclared node 4")
            .with_code(ErrorCode::H200);

        assert_eq!(
            diag.to_string(),
            "warning[H200]: connection `C9` references undeclared node 4"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::advice("every node is at elevation 3.00");

        assert_eq!(diag.to_string(), "advice: every node is at elevation 3.00");
    }
}
