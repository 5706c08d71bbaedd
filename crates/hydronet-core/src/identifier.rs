//! Node identifiers.
//!
//! Solver output numbers its topology points with plain non-negative
//! integers. [`NodeId`] wraps that number so it cannot be confused with
//! counts, indices, or degrees elsewhere in the pipeline.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Identifier of a topology node, unique within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node identifier from its numeric value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this identifier.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a token is not a valid node number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNodeIdError {
    #[error("node id '{0}' must contain only ASCII digits")]
    NotDigits(String),

    #[error("node id '{0}' does not fit in 32 bits")]
    OutOfRange(String),
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    /// Parses a node number. Only ASCII digits are accepted; a leading sign
    /// is rejected even though `u32::from_str` would take `+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseNodeIdError::NotDigits(s.to_string()));
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| ParseNodeIdError::OutOfRange(s.to_string()))
    }
}
