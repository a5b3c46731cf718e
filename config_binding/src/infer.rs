//! Kind inference.
//!
//! Structural inference wins whenever the shape is one of the fixed scalar,
//! string, enum or object shapes. A metadata kind override is consulted only
//! for shapes nothing else recognises. Observable cells are looked through
//! to the held shape and arrays are unwrapped to their element shape.

use thiserror::Error;

use crate::{kind::EntryKind, shape::TypeShape};

/// Result of inferring a property's entry kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    kind: EntryKind,
    array: bool,
    component: TypeShape,
}

impl Inference {
    /// Inferred kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the property is an array of [`Inference::component`].
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array
    }

    /// Element shape after observable substitution and array unwrapping.
    #[must_use]
    pub const fn component(&self) -> &TypeShape {
        &self.component
    }
}

/// No entry kind matches a shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not infer entry type for {type_name}")]
pub struct InferenceError {
    type_name: String,
}

impl InferenceError {
    /// Rendered name of the offending type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn into_type_name(self) -> String {
        self.type_name
    }
}

/// Infers the entry kind for a declared shape.
///
/// `observed` is the held shape of an observable cell and is only consulted
/// when `declared` is [`TypeShape::Observable`]. `override_kind` comes from
/// [`ConfigEntry::with_kind`](crate::ConfigEntry::with_kind).
///
/// # Errors
///
/// Returns [`InferenceError`] when the shape is unrecognised and no override
/// is supplied, or when an observable's held shape is unknown.
///
/// # Examples
///
/// ```
/// use config_binding::{EntryKind, TypeShape, infer};
///
/// let shape = TypeShape::Array(Box::new(TypeShape::Short));
/// let inference = infer::entry_kind(&shape, None, Some(EntryKind::Long))?;
/// assert_eq!(inference.kind(), EntryKind::Short);
/// assert!(inference.is_array());
/// # Ok::<(), infer::InferenceError>(())
/// ```
pub fn entry_kind(
    declared: &TypeShape,
    observed: Option<&TypeShape>,
    override_kind: Option<EntryKind>,
) -> Result<Inference, InferenceError> {
    match declared.strip_nullable() {
        TypeShape::Observable => {
            let held = observed.ok_or_else(|| InferenceError {
                type_name: String::from("Observable with an undetermined held type"),
            })?;
            entry_kind(held, None, override_kind)
        }
        TypeShape::Array(element) => {
            let component = element.strip_nullable();
            Ok(Inference {
                kind: classify(component, override_kind)?,
                array: true,
                component: component.clone(),
            })
        }
        other => Ok(Inference {
            kind: classify(other, override_kind)?,
            array: false,
            component: other.clone(),
        }),
    }
}

fn classify(shape: &TypeShape, override_kind: Option<EntryKind>) -> Result<EntryKind, InferenceError> {
    let kind = match shape {
        TypeShape::Object { .. } => EntryKind::Object,
        TypeShape::Long => EntryKind::Long,
        TypeShape::Integer => EntryKind::Integer,
        TypeShape::Short => EntryKind::Short,
        TypeShape::Byte => EntryKind::Byte,
        TypeShape::Double => EntryKind::Double,
        TypeShape::Float => EntryKind::Float,
        TypeShape::Boolean => EntryKind::Boolean,
        TypeShape::String => EntryKind::String,
        TypeShape::Enum { .. } => EntryKind::Enum,
        TypeShape::Array(_)
        | TypeShape::Nullable(_)
        | TypeShape::Observable
        | TypeShape::Callable
        | TypeShape::Opaque { .. } => {
            let fallback = override_kind.ok_or_else(|| InferenceError {
                type_name: shape.to_string(),
            })?;
            tracing::trace!(%shape, kind = %fallback, "using declared kind override");
            return Ok(fallback);
        }
    };
    Ok(kind)
}
