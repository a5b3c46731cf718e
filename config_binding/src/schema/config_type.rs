//! Type handles used to name roots, categories, and nested objects.

use std::{
    any::{TypeId, type_name},
    fmt,
};

use super::{BoundInstance, Configurable};
use crate::{
    annotations::{Annotations, ConfigObject},
    error::BindingResult,
    shape::TypeShape,
};

/// Handle to a [`Configurable`] type: its name, annotations, and singleton.
///
/// Roots list their categories as `ConfigType`s, and [`parse`](fn@crate::parse)
/// takes one as its candidate.
#[derive(Clone, Copy)]
pub struct ConfigType {
    id: TypeId,
    name: &'static str,
    annotations: fn() -> Annotations,
    bind: fn() -> BindingResult<Option<BoundInstance>>,
}

impl ConfigType {
    /// Handle for `T`.
    #[must_use]
    pub fn of<T: Configurable>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_name::<T>(),
            annotations: T::annotations,
            bind: bind_singleton::<T>,
        }
    }

    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Type-level annotations.
    #[must_use]
    pub fn annotations(&self) -> Annotations {
        (self.annotations)()
    }

    /// Binds the live singleton, or `None` when the type has none.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InstanceBorrowed`](crate::BindingError::InstanceBorrowed)
    /// when the singleton is mutably borrowed.
    pub fn instance(&self) -> BindingResult<Option<BoundInstance>> {
        (self.bind)()
    }

    pub(crate) fn object_shape(&self) -> TypeShape {
        if self.annotations().contains::<ConfigObject>() {
            TypeShape::Object { name: self.name }
        } else {
            TypeShape::Opaque {
                name: self.name,
                represents: &[],
            }
        }
    }
}

impl fmt::Debug for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigType").field(&self.name).finish()
    }
}

fn bind_singleton<T: Configurable>() -> BindingResult<Option<BoundInstance>> {
    T::instance()
        .map(|instance| BoundInstance::bind(&instance))
        .transpose()
}

fn short_name<T>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
