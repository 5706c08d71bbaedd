//! Error adapter for converting Hydronet errors and diagnostics to miette
//! reports.
//!
//! This module provides the bridge between the library's error and
//! diagnostic types and miette's rich diagnostic formatting used in the CLI.
//!
//! Recovered problems (skipped lines, created junctions, degenerate
//! elevation ranges) arrive as a list of [`Diagnostic`]s; each one is
//! rendered independently against the input text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use hydronet::HydronetError;
use hydronet_parser::{Diagnostic, Severity, Span};

/// Adapter for a single hydronet diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diag.line() {
            Some(line) => write!(f, "line {line}: {}", self.diag.message()),
            None => write!(f, "{}", self.diag.message()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Advice => MietteSeverity::Advice,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.diag.span()?;
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.diag.span()?;
        let message = self.diag.label().map(str::to_string);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(message, span_to_miette(span)),
        )))
    }
}

/// Adapter for [`HydronetError`] values.
///
/// Fatal errors carry no source location, so only the code and message are
/// rendered.
pub struct ErrorAdapter<'a>(pub &'a HydronetError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if let Some(code) = self.0.code() {
            return Some(Box::new(code));
        }
        let code = match &self.0 {
            HydronetError::Io(_) => "hydronet::io",
            HydronetError::InvalidConfiguration { .. } | HydronetError::Config(_) => {
                "hydronet::config"
            }
            HydronetError::Export(_) => "hydronet::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            HydronetError::InvalidConfiguration { .. } => Some(Box::new(
                "size, width and elevation factors must be zero or positive",
            )),
            _ => None,
        }
    }
}

/// A reportable problem that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a fatal error, providing a
/// uniform interface for rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A diagnostic, with source location when it has one.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A fatal error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a hydronet [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Wrap a [`HydronetError`] for rendering.
pub fn to_reportables(err: &HydronetError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Wrap each diagnostic for rendering against `src`.
pub fn diagnostic_reportables<'a>(diagnostics: &'a [Diagnostic], src: &'a str) -> Vec<Reportable<'a>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
        .collect()
}

/// Render a reportable with miette's graphical handler.
pub fn render(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    let reporter = miette::GraphicalReportHandler::new();
    if reporter.render_report(&mut writer, reportable).is_err() {
        // Fall back to the plain message
        writer = reportable.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use hydronet_parser::ErrorCode;

    use super::*;

    #[test]
    fn test_diagnostic_with_span() {
        let src = "SYSTEM CONNECTIVITY\nNODE 3 ELEV 1.2.3\n";
        let diag = Diagnostic::warning("invalid elevation `1.2.3`")
            .with_code(ErrorCode::H100)
            .with_label(Span::new(32..37), "expected a number")
            .with_line(2)
            .with_help("elevations are decimal numbers");

        let reportables = diagnostic_reportables(std::slice::from_ref(&diag), src);
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert_eq!(reportable.to_string(), "line 2: invalid elevation `1.2.3`");
        assert_eq!(reportable.severity(), Some(MietteSeverity::Warning));
        assert_eq!(reportable.code().map(|c| c.to_string()), Some("H100".to_string()));

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("expected a number"));
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 32);
        assert_eq!(labels[0].len(), 5);
    }

    #[test]
    fn test_diagnostic_without_span() {
        let diag = Diagnostic::warning("element `C1` references undeclared node 9")
            .with_code(ErrorCode::H200);
        let adapter = DiagnosticAdapter::new(&diag, "");

        assert!(adapter.labels().is_none());
        assert!(adapter.source_code().is_none());
        assert_eq!(adapter.to_string(), "element `C1` references undeclared node 9");
    }

    #[test]
    fn test_error_codes() {
        let err = HydronetError::InvalidConfiguration {
            field: "node_size_factor",
            value: -1.0,
        };
        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("H400".to_string())
        );
        assert!(reportables[0].help().is_some());

        let err = HydronetError::Config("bad".to_string());
        match &to_reportables(&err)[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad");
                assert_eq!(
                    e.code().map(|c| c.to_string()),
                    Some("hydronet::config".to_string())
                );
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_render_includes_message() {
        let diag = Diagnostic::advice("every node is at elevation 12.00")
            .with_code(ErrorCode::H300);
        let reportables = diagnostic_reportables(std::slice::from_ref(&diag), "");
        assert_eq!(reportables[0].severity(), Some(MietteSeverity::Advice));
        let rendered = render(&reportables[0]);
        assert!(rendered.contains("every node is at elevation 12.00"));
    }
}
