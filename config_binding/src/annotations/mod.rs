//! Annotation storage and the carrier-ordered resolver.
//!
//! A property's annotations may sit on any of four carriers: the declaration
//! itself, its reader, its writer, or its backing storage. [`Carriers::resolve`]
//! walks them in that order and returns the first match, identifying
//! annotations by their Rust type.

mod markers;

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
};

pub use markers::{
    Category, Comment, Config, ConfigButton, ConfigEntry, ConfigInfo, ConfigObject, Pattern,
    Range, Separator, Slider,
};

/// Marker for types that can be attached to declarations.
pub trait Annotation: Any + fmt::Debug {}

/// Annotations attached to one carrier, at most one per annotation type.
///
/// # Examples
///
/// ```
/// use config_binding::{Annotations, Comment, ConfigObject};
///
/// let annotations = Annotations::new()
///     .with(ConfigObject)
///     .with(Comment::new("Audio settings"));
/// assert!(annotations.contains::<ConfigObject>());
/// assert_eq!(annotations.get::<Comment>().map(Comment::value), Some("Audio settings"));
/// ```
#[derive(Default)]
pub struct Annotations {
    entries: HashMap<TypeId, Box<dyn Annotation>>,
}

impl Annotations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `annotation`, replacing any earlier one of the same type.
    #[must_use]
    pub fn with<A: Annotation>(mut self, annotation: A) -> Self {
        self.insert(annotation);
        self
    }

    /// Adds `annotation`, replacing any earlier one of the same type.
    pub fn insert<A: Annotation>(&mut self, annotation: A) {
        self.entries.insert(TypeId::of::<A>(), Box::new(annotation));
    }

    /// Returns the annotation of type `A`, if present.
    #[must_use]
    pub fn get<A: Annotation>(&self) -> Option<&A> {
        let stored: &dyn Annotation = &**self.entries.get(&TypeId::of::<A>())?;
        let erased: &dyn Any = stored;
        erased.downcast_ref::<A>()
    }

    /// Returns `true` if an annotation of type `A` is present.
    #[must_use]
    pub fn contains<A: Annotation>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<A>())
    }

    /// Number of stored annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.values()).finish()
    }
}

/// Physical location an annotation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    /// The property declaration.
    Declaration,
    /// The property's reader.
    Reader,
    /// The property's writer; only searched for read-write properties.
    Writer,
    /// The storage slot backing the property.
    Storage,
}

impl Carrier {
    /// Precedence used by [`Carriers::resolve`].
    pub const SEARCH_ORDER: [Self; 4] = [Self::Declaration, Self::Reader, Self::Writer, Self::Storage];
}

/// The four annotation carriers of one property.
#[derive(Debug, Default)]
pub struct Carriers {
    declaration: Annotations,
    reader: Annotations,
    writer: Annotations,
    storage: Annotations,
}

impl Carriers {
    /// Annotations attached to `carrier`.
    #[must_use]
    pub const fn carrier(&self, carrier: Carrier) -> &Annotations {
        match carrier {
            Carrier::Declaration => &self.declaration,
            Carrier::Reader => &self.reader,
            Carrier::Writer => &self.writer,
            Carrier::Storage => &self.storage,
        }
    }

    /// Mutable access to the annotations attached to `carrier`.
    pub const fn carrier_mut(&mut self, carrier: Carrier) -> &mut Annotations {
        match carrier {
            Carrier::Declaration => &mut self.declaration,
            Carrier::Reader => &mut self.reader,
            Carrier::Writer => &mut self.writer,
            Carrier::Storage => &mut self.storage,
        }
    }

    /// Finds the first `A` in [`Carrier::SEARCH_ORDER`].
    ///
    /// The writer is skipped unless `mutable` is set, since read-only
    /// properties have no writer to carry annotations.
    #[must_use]
    pub fn resolve<A: Annotation>(&self, mutable: bool) -> Option<&A> {
        let found = Carrier::SEARCH_ORDER
            .into_iter()
            .filter(|carrier| mutable || *carrier != Carrier::Writer)
            .find_map(|carrier| {
                self.carrier(carrier)
                    .get::<A>()
                    .map(|annotation| (carrier, annotation))
            });
        if let Some((carrier, _)) = found {
            tracing::trace!(annotation = type_name::<A>(), ?carrier, "resolved annotation");
        }
        found.map(|(_, annotation)| annotation)
    }
}
