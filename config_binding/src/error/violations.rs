//! Rule violations collected for a single property before failing.

use std::fmt;

use thiserror::Error;

use crate::kind::EntryKind;

/// A single structural rule broken by a property declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Violation {
    /// The property's mutability does not match its kind.
    #[error("Property {property} must be {expected}")]
    Mutability {
        /// Declared property name.
        property: &'static str,
        /// `val` for read-only, `var` for read-write.
        expected: &'static str,
    },

    /// The declared type is nullable.
    #[error("Property {property} must not be nullable")]
    Nullable {
        /// Declared property name.
        property: &'static str,
    },

    /// The declared type does not satisfy the inferred kind.
    #[error("Property {property} is not of type {kind}!")]
    TypeMismatch {
        /// Declared property name.
        property: &'static str,
        /// Kind the property was inferred as.
        kind: EntryKind,
    },

    /// The property is an array of a kind that may not appear in arrays.
    #[error("Entry {property} is an array but its type is not allowed in arrays")]
    ArrayNotAllowed {
        /// Declared property name.
        property: &'static str,
    },

    /// The entry id contains the path separator.
    #[error("Entry {property} has an invalid id '{id}'! Ids must not contain '.'")]
    InvalidId {
        /// Declared property name.
        property: &'static str,
        /// The rejected id.
        id: String,
    },

    /// The pattern annotation is not a valid regular expression.
    #[error("Entry {property} has an invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Declared property name.
        property: &'static str,
        /// Pattern source text.
        pattern: String,
        /// Compiler message.
        message: String,
    },
}

/// Every [`Violation`] found for one property.
///
/// The collection renders as one indented, numbered line per violation so a
/// single failure reports all broken rules at once.
///
/// # Examples
///
/// ```
/// use config_binding::{Violation, Violations};
///
/// let mut violations = Violations::default();
/// violations.push(Violation::Nullable { property: "volume" });
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations.to_string(), "\n\t1: Property volume must not be nullable");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Records a violation.
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Iterate over the recorded violations.
    #[must_use = "iterators should be consumed to inspect violations"]
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Number of recorded violations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when a violation equal to `violation` was recorded.
    #[must_use]
    pub fn contains(&self, violation: &Violation) -> bool {
        self.0.contains(violation)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            write!(f, "\n\t{}: {violation}", i + 1)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
