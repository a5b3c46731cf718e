//! Schemas bound to live instances.
//!
//! Binding turns the typed [`Property`](super::Property) declarations of a
//! [`Configurable`] type into type-erased [`BoundProperty`] values that hold
//! handles into one concrete instance.

use std::{any::TypeId, fmt, rc::Rc};

use super::{ConfigType, Configurable, Schema, Shared};
use crate::{
    annotations::{Annotation, Carriers},
    error::{BindingResult, WriteError},
    observable::ObservableCell,
    shape::{Declared, TypeShape, Value},
};

/// Every property of one instance, in declaration order.
#[derive(Debug)]
pub struct BoundInstance {
    type_id: TypeId,
    owner: &'static str,
    properties: Vec<BoundProperty>,
}

impl BoundInstance {
    /// Binds the schema of `T` to `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InstanceBorrowed`](crate::BindingError::InstanceBorrowed)
    /// when `instance` is mutably borrowed.
    pub fn bind<T: Configurable>(instance: &Shared<T>) -> BindingResult<Self> {
        let properties = Schema::<T>::collect()
            .into_properties()
            .into_iter()
            .enumerate()
            .map(|(index, property)| property.bind(index, instance))
            .collect::<BindingResult<Vec<_>>>()?;
        let config_type = ConfigType::of::<T>();
        Ok(Self {
            type_id: config_type.type_id(),
            owner: config_type.name(),
            properties,
        })
    }

    /// Name of the bound type.
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    pub(crate) const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Bound properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[BoundProperty] {
        &self.properties
    }
}

/// A property declaration bound to a live instance.
#[derive(Debug)]
pub struct BoundProperty {
    name: &'static str,
    owner: &'static str,
    index: usize,
    shape: TypeShape,
    mutable: bool,
    carriers: Carriers,
    slot: Slot,
}

impl BoundProperty {
    pub(super) const fn new(
        name: &'static str,
        owner: &'static str,
        index: usize,
        shape: TypeShape,
        mutable: bool,
        carriers: Carriers,
        slot: Slot,
    ) -> Self {
        Self {
            name,
            owner,
            index,
            shape,
            mutable,
            carriers,
            slot,
        }
    }

    /// Declared name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the declaring type.
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// Position among the owner's declarations.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Static shape of the declared type.
    #[must_use]
    pub const fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Whether the property is read-write.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Whether the declared type is `Option<_>`.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.shape.is_nullable()
    }

    /// Whether the declared type is an observable cell.
    #[must_use]
    pub fn is_observable(&self) -> bool {
        self.shape.is_observable()
    }

    /// Resolves annotation `A` across the property's carriers.
    #[must_use]
    pub fn resolve<A: Annotation>(&self) -> Option<&A> {
        self.carriers.resolve::<A>(self.mutable)
    }

    /// Shape of the value held by an observable property's cell.
    #[must_use]
    pub fn observed_shape(&self) -> Option<TypeShape> {
        match &self.slot {
            Slot::Observable(cell) => Some(cell.held_shape()),
            Slot::Plain(_) | Slot::Object(_) | Slot::Callable(_) => None,
        }
    }

    pub(crate) const fn slot(&self) -> &Slot {
        &self.slot
    }
}

/// What a bound property gives access to.
#[derive(Clone)]
pub(crate) enum Slot {
    Plain(ValueAccess),
    Observable(Rc<dyn ObservableCell>),
    Object(NestedInstance),
    Callable(Rc<dyn Fn()>),
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(access) => f.debug_tuple("Plain").field(access).finish(),
            Self::Observable(cell) => f.debug_tuple("Observable").field(cell).finish(),
            Self::Object(nested) => f.debug_tuple("Object").field(nested).finish(),
            Self::Callable(_) => f.write_str("Callable"),
        }
    }
}

type Reader = Rc<dyn Fn() -> Option<Value>>;
type Writer = Rc<dyn Fn(Value) -> Result<(), WriteError>>;

/// Type-erased reader and writer for one field of a shared instance.
#[derive(Clone)]
pub(crate) struct ValueAccess {
    read: Reader,
    write: Option<Writer>,
}

impl ValueAccess {
    pub(crate) fn field<T: 'static, V: Declared>(
        instance: Shared<T>,
        getter: fn(&T) -> &V,
        setter: Option<fn(&mut T) -> &mut V>,
    ) -> Self {
        let reader = Rc::clone(&instance);
        let read: Reader = Rc::new(move || -> Option<Value> {
            let guard = reader.try_borrow().ok()?;
            getter(&*guard).to_value()
        });
        let write = setter.map(|assign| -> Writer {
            Rc::new(move |value: Value| -> Result<(), WriteError> {
                let next = V::from_value(value).ok_or_else(|| WriteError::type_mismatch(&V::shape()))?;
                let mut guard = instance.try_borrow_mut().map_err(|_| WriteError::Busy)?;
                *assign(&mut *guard) = next;
                Ok(())
            })
        });
        Self { read, write }
    }

    pub(crate) fn read(&self) -> Option<Value> {
        (self.read)()
    }

    pub(crate) fn write(&self, value: Value) -> Result<(), WriteError> {
        self.write
            .as_ref()
            .map_or(Err(WriteError::ReadOnly), |write| write(value))
    }
}

impl fmt::Debug for ValueAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueAccess")
            .field("writable", &self.write.is_some())
            .finish_non_exhaustive()
    }
}

/// A nested instance reachable from an object-kind property.
///
/// Binding is deferred until the object entry is built, so cyclic instance
/// graphs are only walked as deep as the declarations go.
#[derive(Clone)]
pub struct NestedInstance {
    config_type: ConfigType,
    bind: Rc<dyn Fn() -> BindingResult<BoundInstance>>,
}

impl NestedInstance {
    /// Wraps a shared nested instance.
    #[must_use]
    pub fn new<N: Configurable>(instance: Shared<N>) -> Self {
        Self {
            config_type: ConfigType::of::<N>(),
            bind: Rc::new(move || BoundInstance::bind(&instance)),
        }
    }

    /// Handle of the nested type.
    #[must_use]
    pub const fn config_type(&self) -> ConfigType {
        self.config_type
    }

    /// Binds the nested instance's schema.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InstanceBorrowed`](crate::BindingError::InstanceBorrowed)
    /// when the nested instance is mutably borrowed.
    pub fn bind(&self) -> BindingResult<BoundInstance> {
        (self.bind)()
    }
}

impl fmt::Debug for NestedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedInstance")
            .field(&self.config_type)
            .finish()
    }
}
