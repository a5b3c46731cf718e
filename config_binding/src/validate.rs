//! Structural rules for entry and button properties.
//!
//! Entry validation collects every broken rule before failing so one error
//! lists all of a property's defects.

use std::rc::Rc;

use crate::{
    annotations::{Comment, ConfigEntry, Pattern, Range, Separator, Slider},
    entry::{CompiledPattern, EntryData},
    error::{BindingError, BindingResult, Violation, Violations},
    infer::Inference,
    schema::{BoundProperty, Slot},
};

/// Checks an entry property and gathers its metadata.
///
/// # Errors
///
/// Returns [`BindingError::InvalidEntry`] listing every violated rule.
pub(crate) fn entry(
    property: &BoundProperty,
    declared: &ConfigEntry,
    inference: &Inference,
) -> BindingResult<EntryData> {
    let name = property.name();
    let mut violations = Violations::default();

    if let Some(expected) = mutability_violation(property, inference) {
        violations.push(Violation::Mutability {
            property: name,
            expected,
        });
    }
    let held_nullable = property
        .observed_shape()
        .is_some_and(|held| held.is_nullable());
    if property.is_nullable() || held_nullable {
        violations.push(Violation::Nullable { property: name });
    }
    if !inference.kind().accepts(inference.component()) {
        violations.push(Violation::TypeMismatch {
            property: name,
            kind: inference.kind(),
        });
    }
    if inference.is_array() && !inference.kind().allowed_in_arrays() {
        violations.push(Violation::ArrayNotAllowed { property: name });
    }
    if declared.id().contains('.') {
        violations.push(Violation::InvalidId {
            property: name,
            id: declared.id().to_owned(),
        });
    }
    let pattern = property.resolve::<Pattern>().and_then(|pattern| {
        CompiledPattern::compile(pattern.source())
            .map_err(|err| {
                violations.push(Violation::InvalidPattern {
                    property: name,
                    pattern: pattern.source().to_owned(),
                    message: err.to_string(),
                });
            })
            .ok()
    });

    if !violations.is_empty() {
        return Err(BindingError::InvalidEntry {
            property: name,
            owner: property.owner(),
            violations,
        });
    }

    Ok(EntryData::new(
        declared.id().to_owned(),
        declared.translation().map(str::to_owned),
    )
    .with_comment(property.resolve::<Comment>().cloned())
    .with_range(property.resolve::<Range>().copied())
    .with_pattern(pattern)
    .with_slider(property.resolve::<Slider>().is_some())
    .with_separator(property.resolve::<Separator>().cloned()))
}

/// Observable cells and final kinds are read-only; everything else is
/// read-write.
fn mutability_violation(property: &BoundProperty, inference: &Inference) -> Option<&'static str> {
    let must_be_val = property.is_observable() || inference.kind().must_be_final();
    match (must_be_val, property.is_mutable()) {
        (true, true) => Some("val"),
        (false, false) => Some("var"),
        _ => None,
    }
}

/// Checks a button property and returns its action.
///
/// # Errors
///
/// Returns [`BindingError::InvalidButton`] when the property is mutable,
/// nullable, or not a zero-argument callable.
pub(crate) fn button(property: &BoundProperty) -> BindingResult<Rc<dyn Fn()>> {
    let invalid = |reason: &str| BindingError::InvalidButton {
        property: property.name(),
        owner: property.owner(),
        reason: reason.to_owned(),
    };
    if property.is_mutable() {
        return Err(invalid("must be val"));
    }
    if property.is_nullable() {
        return Err(invalid("must not be nullable"));
    }
    match property.slot() {
        Slot::Callable(action) => Ok(Rc::clone(action)),
        Slot::Plain(_) | Slot::Observable(_) | Slot::Object(_) => {
            Err(invalid("is not a zero-argument callable"))
        }
    }
}
