//! Primary error enum for declaration-time failures.

use thiserror::Error;

use super::violations::Violations;

/// Result alias used throughout the binding.
pub type BindingResult<T> = Result<T, BindingError>;

/// Errors raised while turning declarations into a configuration tree.
///
/// Every variant describes a defect in the declaring code rather than in
/// user input, so a failed parse is never retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindingError {
    /// A required marker annotation is absent from a type.
    #[error("{annotation} annotation not found on type {owner}")]
    MissingAnnotation {
        /// Name of the missing annotation.
        annotation: &'static str,
        /// Type that should have carried it.
        owner: &'static str,
    },

    /// A property failed one or more entry rules.
    #[error("Entry {property} in {owner} is invalid!{violations}")]
    InvalidEntry {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
        /// Every rule the property violates.
        violations: Violations,
    },

    /// A button property has an unsupported shape.
    #[error("Button {property} in {owner} is invalid: {reason}")]
    InvalidButton {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// No entry kind matches the property's type.
    #[error("Could not infer entry type for {type_name} (property {property} in {owner})")]
    UnknownType {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
        /// Rendered name of the offending type.
        type_name: String,
    },

    /// An observable cell claims the object kind.
    #[error("Entry {property} in {owner} cannot be both observable and an object")]
    ObservableObject {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
    },

    /// An object entry contains another object entry.
    #[error("Entry {property} in {owner} cannot be an object!")]
    NestedObject {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
    },

    /// An object entry declares a button.
    #[error("Button {property} in {owner} cannot be declared inside an object entry")]
    NestedButton {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
    },

    /// An object entry member has no value to restore on reset.
    #[error("Entry {property} in {owner} has a null default value!")]
    MissingDefault {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
    },

    /// An object-kind property has no nested instance to walk.
    #[error("Entry {property} in {owner} has no nested instance")]
    MissingObject {
        /// Declared property name.
        property: &'static str,
        /// Type declaring the property.
        owner: &'static str,
    },

    /// Two entries of one scope share an id and duplicates are rejected.
    #[error("Entry id '{id}' is declared more than once in {owner}")]
    DuplicateId {
        /// The repeated id.
        id: String,
        /// Type declaring the scope.
        owner: &'static str,
    },

    /// A declared category has no live instance and skipping is disabled.
    #[error("Category {owner} has no live instance")]
    MissingInstance {
        /// Category type.
        owner: &'static str,
    },

    /// The instance was mutably borrowed while its schema was being bound.
    #[error("Instance of {owner} is already mutably borrowed")]
    InstanceBorrowed {
        /// Type of the borrowed instance.
        owner: &'static str,
    },
}

impl BindingError {
    /// Returns the property name the error refers to, if any.
    #[must_use]
    pub const fn property(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEntry { property, .. }
            | Self::InvalidButton { property, .. }
            | Self::UnknownType { property, .. }
            | Self::ObservableObject { property, .. }
            | Self::NestedObject { property, .. }
            | Self::NestedButton { property, .. }
            | Self::MissingDefault { property, .. }
            | Self::MissingObject { property, .. } => Some(property),
            Self::MissingAnnotation { .. }
            | Self::DuplicateId { .. }
            | Self::MissingInstance { .. }
            | Self::InstanceBorrowed { .. } => None,
        }
    }
}
