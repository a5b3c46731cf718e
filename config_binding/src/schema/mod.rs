//! Explicit, ordered property schemas.
//!
//! A [`Configurable`] type registers its properties with a [`Schema`] in
//! declaration order. Each registration names the property, gives typed
//! accessors into the instance, and attaches annotations to one of the four
//! [`Carrier`](crate::Carrier)s. Registering only a reader declares a
//! read-only (`val`) property; registering a writer too declares a
//! read-write (`var`) one.
//!
//! ```
//! use config_binding::{Configurable, ConfigEntry, Range, Schema};
//!
//! #[derive(Default)]
//! struct Audio {
//!     volume: i32,
//! }
//!
//! impl Configurable for Audio {
//!     fn declare(schema: &mut Schema<Self>) {
//!         schema
//!             .var("volume", |audio| &audio.volume, |audio| &mut audio.volume)
//!             .annotate(ConfigEntry::new("volume"))
//!             .annotate(Range::new(0.0, 100.0));
//!     }
//! }
//!
//! assert_eq!(Schema::<Audio>::collect().names(), vec!["volume"]);
//! ```

mod bound;
mod config_type;

use std::{cell::RefCell, fmt, rc::Rc};

pub use bound::{BoundInstance, BoundProperty, NestedInstance};
pub(crate) use bound::{Slot, ValueAccess};
pub use config_type::ConfigType;

use crate::{
    annotations::{Annotation, Annotations, Carrier, Carriers},
    error::{BindingError, BindingResult},
    shape::{Capture, Declared, TypeShape},
};

/// Shared, interiorly mutable handle to a configuration instance.
///
/// Entries keep clones of these handles, so the tree reads and writes the
/// live instance.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps `value` in a [`Shared`] handle.
#[must_use]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// A type whose properties form a configuration scope.
pub trait Configurable: Sized + 'static {
    /// Registers the type's properties in declaration order.
    fn declare(schema: &mut Schema<Self>);

    /// Type-level annotations such as [`Config`](crate::Config),
    /// [`Category`](crate::Category) or [`ConfigObject`](crate::ConfigObject).
    #[must_use]
    fn annotations() -> Annotations {
        Annotations::new()
    }

    /// The live singleton instance, if the type has one.
    #[must_use]
    fn instance() -> Option<Shared<Self>> {
        None
    }
}

/// Ordered property declarations of a [`Configurable`] type.
pub struct Schema<T> {
    properties: Vec<Property<T>>,
}

impl<T: Configurable> Schema<T> {
    /// Collects the schema declared by `T`.
    #[must_use]
    pub fn collect() -> Self {
        let mut schema = Self {
            properties: Vec::new(),
        };
        T::declare(&mut schema);
        schema
    }

    /// Declares a read-only property.
    pub fn val<V: Declared>(&mut self, name: &'static str, read: fn(&T) -> &V) -> &mut Property<T> {
        self.push(Property::new(name, FieldAccess { read, write: None }))
    }

    /// Declares a read-write property.
    pub fn var<V: Declared>(
        &mut self,
        name: &'static str,
        read: fn(&T) -> &V,
        write: fn(&mut T) -> &mut V,
    ) -> &mut Property<T> {
        self.push(Property::new(
            name,
            FieldAccess {
                read,
                write: Some(write),
            },
        ))
    }

    /// Property names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.properties.iter().map(Property::name).collect()
    }

    /// Number of declared properties.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` when nothing was declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "the property was pushed on the previous line"
    )]
    fn push(&mut self, property: Property<T>) -> &mut Property<T> {
        let slot = self.properties.len();
        self.properties.push(property);
        &mut self.properties[slot]
    }

    pub(crate) fn into_properties(self) -> Vec<Property<T>> {
        self.properties
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.properties).finish()
    }
}

/// One declared property of `T`.
pub struct Property<T> {
    name: &'static str,
    shape: TypeShape,
    carriers: Carriers,
    access: Box<dyn Accessor<T>>,
}

impl<T: Configurable> Property<T> {
    fn new<V: Declared>(name: &'static str, access: FieldAccess<T, V>) -> Self {
        Self {
            name,
            shape: V::shape(),
            carriers: Carriers::default(),
            access: Box::new(access),
        }
    }

    /// Attaches `annotation` to the declaration carrier.
    pub fn annotate<A: Annotation>(&mut self, annotation: A) -> &mut Self {
        self.annotate_on(Carrier::Declaration, annotation)
    }

    /// Attaches `annotation` to the given carrier.
    pub fn annotate_on<A: Annotation>(&mut self, carrier: Carrier, annotation: A) -> &mut Self {
        self.carriers.carrier_mut(carrier).insert(annotation);
        self
    }

    pub(crate) fn bind(self, index: usize, instance: &Shared<T>) -> BindingResult<BoundProperty> {
        let slot = self.access.bind(instance)?;
        Ok(BoundProperty::new(
            self.name,
            ConfigType::of::<T>().name(),
            index,
            self.shape,
            self.access.is_mutable(),
            self.carriers,
            slot,
        ))
    }
}

impl<T> Property<T> {
    /// Declared name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Static shape of the declared type.
    #[must_use]
    pub const fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Whether a writer was registered.
    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.access.is_mutable()
    }

    /// The property's annotation carriers.
    #[must_use]
    pub const fn carriers(&self) -> &Carriers {
        &self.carriers
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("mutable", &self.access.is_mutable())
            .field("carriers", &self.carriers)
            .finish()
    }
}

trait Accessor<T> {
    fn is_mutable(&self) -> bool;
    fn bind(&self, instance: &Shared<T>) -> BindingResult<Slot>;
}

struct FieldAccess<T, V> {
    read: fn(&T) -> &V,
    write: Option<fn(&mut T) -> &mut V>,
}

impl<T: Configurable, V: Declared> Accessor<T> for FieldAccess<T, V> {
    fn is_mutable(&self) -> bool {
        self.write.is_some()
    }

    fn bind(&self, instance: &Shared<T>) -> BindingResult<Slot> {
        let capture = {
            let guard = instance
                .try_borrow()
                .map_err(|_| BindingError::InstanceBorrowed {
                    owner: ConfigType::of::<T>().name(),
                })?;
            (self.read)(&*guard).capture()
        };
        Ok(match capture {
            Capture::Plain => Slot::Plain(ValueAccess::field(
                Rc::clone(instance),
                self.read,
                self.write,
            )),
            Capture::Observable(cell) => Slot::Observable(cell),
            Capture::Object(nested) => Slot::Object(nested),
            Capture::Callable(action) => Slot::Callable(action),
        })
    }
}
