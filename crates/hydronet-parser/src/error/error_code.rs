//! Diagnostic codes for the hydronet pipeline.
//!
//! Codes are organized by stage:
//! - `H1xx` - Parsing
//! - `H2xx` - Graph building
//! - `H3xx` - Projection
//! - `H4xx` - Configuration

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Parsing (H1xx)
    // =========================================================================
    /// Malformed line.
    ///
    /// A line had the shape of a known declaration but one of its operands
    /// was not a valid node id, identifier or number. The line is skipped.
    H100,

    // =========================================================================
    // Graph building (H2xx)
    // =========================================================================
    /// Missing node reference.
    ///
    /// A connection endpoint has no node record. A junction node is created
    /// in its place.
    H200,

    // =========================================================================
    // Projection (H3xx)
    // =========================================================================
    /// Degenerate elevation range.
    ///
    /// Every vertex has the same elevation, so elevation buckets have zero
    /// width. All vertices are placed in the first bucket.
    H300,

    // =========================================================================
    // Configuration (H4xx)
    // =========================================================================
    /// Invalid configuration value.
    ///
    /// A projection factor was negative or not finite.
    H400,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "H100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::H100 => "H100",
            ErrorCode::H200 => "H200",
            ErrorCode::H300 => "H300",
            ErrorCode::H400 => "H400",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::H100 => "malformed line",
            ErrorCode::H200 => "missing node reference",
            ErrorCode::H300 => "degenerate elevation range",
            ErrorCode::H400 => "invalid configuration",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
