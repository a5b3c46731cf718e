//! Builds the concrete entry for a validated property.

use std::rc::Rc;

use crate::{
    entry::{Entry, EntryData, EntryMap, NestedObjectEntry, ObservableEntry, PropertyEntry},
    error::{BindingError, BindingResult},
    infer::Inference,
    kind::EntryKind,
    schema::{BoundProperty, NestedInstance, Slot},
};

/// Whether object-kind properties may appear in the scope being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Objects {
    Allowed,
    Forbidden,
}

/// Creates exactly one entry for `property`.
///
/// `populate` builds the member entries of an object-kind property.
pub(crate) fn create(
    property: &BoundProperty,
    data: EntryData,
    inference: Inference,
    objects: Objects,
    populate: impl FnOnce(&NestedInstance) -> BindingResult<EntryMap>,
) -> BindingResult<Box<dyn Entry>> {
    let name = property.name();
    let owner = property.owner();
    let is_object = inference.kind() == EntryKind::Object;

    if is_object && property.is_observable() {
        return Err(BindingError::ObservableObject { property: name, owner });
    }
    if is_object && objects == Objects::Forbidden {
        return Err(BindingError::NestedObject { property: name, owner });
    }

    match property.slot() {
        Slot::Object(nested) if is_object => {
            let members = populate(nested)?;
            Ok(Box::new(NestedObjectEntry::new(data, members)))
        }
        Slot::Observable(cell) => Ok(Box::new(ObservableEntry::new(
            data,
            inference,
            Rc::clone(cell),
        ))),
        Slot::Plain(_) if is_object => Err(BindingError::MissingObject { property: name, owner }),
        Slot::Plain(access) => Ok(Box::new(PropertyEntry::new(data, inference, access.clone()))),
        Slot::Object(_) | Slot::Callable(_) => Err(BindingError::UnknownType {
            property: name,
            owner,
            type_name: property.shape().to_string(),
        }),
    }
}
