//! Error types for Mason layout operations.
//!
//! Packing and scheduling are total over admitted elements, so the only
//! errors the engine reports are admission failures and invalid
//! configuration values.

use std::fmt;

use thiserror::Error;

use mason_core::identifier::ElementId;

/// Why an element was refused at the admission boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidChildReason {
    /// The host reported a NaN or infinite dimension.
    NonFiniteSize,
    /// The host reported a width or height below zero.
    NegativeSize,
    /// The element is already part of the layout, or was offered twice.
    Duplicate,
}

impl fmt::Display for InvalidChildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NonFiniteSize => "size is not finite",
            Self::NegativeSize => "size is negative",
            Self::Duplicate => "element is already in the layout",
        };
        f.write_str(msg)
    }
}

/// The main error type for Mason operations.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Invalid child `{id}`: {reason}")]
    InvalidChild {
        id: ElementId,
        reason: InvalidChildReason,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LayoutError {
    /// Create a new `InvalidChild` error.
    pub fn invalid_child(id: ElementId, reason: InvalidChildReason) -> Self {
        Self::InvalidChild { id, reason }
    }
}
