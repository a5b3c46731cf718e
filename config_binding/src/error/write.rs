//! Recoverable failures reported by entry mutators.

use thiserror::Error;

use crate::shape::TypeShape;

/// Reasons a write through an entry was rejected.
///
/// A rejected write never modifies the backing property.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum WriteError {
    /// A numeric value falls outside the configured range.
    #[error("value {value} is outside the range {min}..={max}")]
    OutOfRange {
        /// Rejected value, widened to `f64`.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// A string does not fully match the configured pattern.
    #[error("value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch {
        /// Rejected string.
        value: String,
        /// Pattern source text.
        pattern: String,
    },

    /// The value cannot be converted into the property's type.
    #[error("expected a value of type {expected}")]
    TypeMismatch {
        /// Rendered name of the expected type.
        expected: String,
    },

    /// The property has no writer.
    #[error("entry is read-only")]
    ReadOnly,

    /// The backing instance is borrowed elsewhere.
    #[error("the backing instance is borrowed elsewhere")]
    Busy,
}

impl WriteError {
    /// Builds a [`WriteError::TypeMismatch`] naming `shape`.
    #[must_use]
    pub fn type_mismatch(shape: &TypeShape) -> Self {
        Self::TypeMismatch {
            expected: shape.to_string(),
        }
    }
}
