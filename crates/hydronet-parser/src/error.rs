//! Diagnostic system shared by every pipeline stage.
//!
//! Parsing and graph building never fail. Conditions they recover from are
//! reported as [`Diagnostic`] values, each tagged with an [`ErrorCode`] so
//! that tools can filter or document them. Skipped or repaired input is a
//! [`Severity::Warning`]; a setting that could not be honored is
//! [`Severity::Advice`].
//!
//! # Example
//!
//! ```
//! # use hydronet_parser::error::{Diagnostic, ErrorCode};
//! # use hydronet_parser::Span;
//!
//! let diag = Diagnostic::warning("invalid elevation `1.2.3`")
//!     .with_code(ErrorCode::H100)
//!     .with_label(Span::new(12..17), "expected a number")
//!     .with_line(14)
//!     .with_help("elevations are decimal numbers such as `12.5`");
//! assert!(diag.severity().is_warning());
//! ```

mod diagnostic;
mod error_code;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
