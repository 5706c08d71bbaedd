//! Error types for Hydronet operations.
//!
//! This module provides the main error type [`HydronetError`]. Recoverable
//! conditions found while parsing or building the graph are not errors; they
//! are reported as [`Diagnostic`](hydronet_parser::Diagnostic) values next to
//! the result.

use std::io;

use thiserror::Error;

use hydronet_parser::ErrorCode;

/// The main error type for Hydronet operations.
#[derive(Debug, Error)]
pub enum HydronetError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A projection factor is negative or not finite.
    #[error("invalid configuration: `{field}` must be a finite non-negative number, got {value}")]
    InvalidConfiguration { field: &'static str, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for HydronetError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl HydronetError {
    /// Returns the diagnostic code of this error, if it has one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::InvalidConfiguration { .. } => Some(ErrorCode::H400),
            _ => None,
        }
    }
}
