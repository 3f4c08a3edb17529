//! Error types for expression navigation.
//!
//! Navigation is almost entirely infallible: wrong-kind accessors return empty
//! views and type lookup misses resolve to `dyn`. The one real failure is a
//! literal payload that cannot be converted into a runtime value, which means
//! the input tree was not well-formed.
//!
//! ## Design
//!
//! - **Converter errors**: `ConversionError` is what a [`LiteralConverter`]
//!   reports for a payload it cannot handle
//! - **Navigation errors**: `NavError` wraps converter errors with the id of
//!   the offending node
//!
//! [`LiteralConverter`]: crate::convert::LiteralConverter

use thiserror::Error;

/// Failure to convert a constant literal into a runtime value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The constant kind has no runtime value representation.
    #[error("unsupported constant kind: {kind}")]
    UnsupportedConstant { kind: &'static str },

    /// The payload is well-typed but its contents are invalid.
    #[error("malformed constant: {message}")]
    Malformed { message: String },
}

/// Navigation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// A literal node's payload could not be converted.
    #[error("literal conversion failed for expression {id}: {source}")]
    LiteralConversion {
        id: i64,
        #[source]
        source: ConversionError,
    },
}

impl ConversionError {
    /// Create a malformed-constant error.
    pub fn malformed(message: impl Into<String>) -> Self {
        ConversionError::Malformed {
            message: message.into(),
        }
    }
}

impl NavError {
    /// Id of the expression that triggered the error.
    pub fn expr_id(&self) -> i64 {
        match self {
            NavError::LiteralConversion { id, .. } => *id,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
