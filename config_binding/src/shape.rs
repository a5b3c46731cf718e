//! Static type descriptions, dynamic values, and the [`Declared`] trait that
//! connects Rust field types to both.

use std::{fmt, rc::Rc};

use serde::Serialize;

use crate::{
    kind::EntryKind,
    observable::{Observable, ObservableCell},
    schema::{ConfigType, Configurable, NestedInstance, Shared},
};

/// Declared type of a property, as seen by kind inference and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeShape {
    /// `i64`.
    Long,
    /// `i32`.
    Integer,
    /// `i16`.
    Short,
    /// `i8`.
    Byte,
    /// `f64`.
    Double,
    /// `f32`.
    Float,
    /// `bool`.
    Boolean,
    /// `String`.
    String,
    /// Fieldless enum declared with [`config_enum!`](crate::config_enum).
    Enum {
        /// Enum type name.
        name: &'static str,
        /// Variant names in declaration order.
        variants: &'static [&'static str],
    },
    /// Shared handle to a type carrying the [`ConfigObject`](crate::ConfigObject) marker.
    Object {
        /// Object type name.
        name: &'static str,
    },
    /// `Vec<T>`.
    Array(Box<TypeShape>),
    /// `Option<T>`.
    Nullable(Box<TypeShape>),
    /// An [`Observable`] cell; the held type is only known from the cell itself.
    Observable,
    /// A zero-argument callable.
    Callable,
    /// Any other type.
    Opaque {
        /// Type name.
        name: &'static str,
        /// Kinds a metadata override may assign to this type.
        represents: &'static [EntryKind],
    },
}

impl TypeShape {
    /// Shape of a [`ConfigEnum`].
    #[must_use]
    pub const fn of_enum<E: ConfigEnum>() -> Self {
        Self::Enum {
            name: E::NAME,
            variants: E::NAMES,
        }
    }

    /// Returns `true` for `Option<T>` shapes.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Removes every `Option` layer.
    #[must_use]
    pub fn strip_nullable(&self) -> &Self {
        match self {
            Self::Nullable(inner) => inner.strip_nullable(),
            other => other,
        }
    }

    /// Returns `true` when the shape, ignoring nullability, is an observable cell.
    #[must_use]
    pub fn is_observable(&self) -> bool {
        matches!(self.strip_nullable(), Self::Observable)
    }

    /// Returns `true` when the shape, ignoring nullability, is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.strip_nullable(), Self::Array(_))
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => f.write_str("i64"),
            Self::Integer => f.write_str("i32"),
            Self::Short => f.write_str("i16"),
            Self::Byte => f.write_str("i8"),
            Self::Double => f.write_str("f64"),
            Self::Float => f.write_str("f32"),
            Self::Boolean => f.write_str("bool"),
            Self::String => f.write_str("String"),
            Self::Enum { name, .. } | Self::Object { name } | Self::Opaque { name, .. } => {
                f.write_str(name)
            }
            Self::Array(inner) => write!(f, "Vec<{inner}>"),
            Self::Nullable(inner) => write!(f, "Option<{inner}>"),
            Self::Observable => f.write_str("Observable"),
            Self::Callable => f.write_str("Fn()"),
        }
    }
}

/// Dynamically typed configuration value exchanged with the backing property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `i64` value.
    Long(i64),
    /// `i32` value.
    Integer(i32),
    /// `i16` value.
    Short(i16),
    /// `i8` value.
    Byte(i8),
    /// `f64` value.
    Double(f64),
    /// `f32` value.
    Float(f32),
    /// `bool` value.
    Boolean(bool),
    /// `String` value.
    String(String),
    /// Enum variant.
    Enum(EnumValue),
    /// Array elements.
    Array(Vec<Value>),
}

impl Value {
    /// Widens a numeric value for range checks.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[expect(
                clippy::cast_precision_loss,
                reason = "range bounds are declared as f64"
            )]
            Self::Long(value) => Some(*value as f64),
            Self::Integer(value) => Some(f64::from(*value)),
            Self::Short(value) => Some(f64::from(*value)),
            Self::Byte(value) => Some(f64::from(*value)),
            Self::Double(value) => Some(*value),
            Self::Float(value) => Some(f64::from(*value)),
            Self::Boolean(_) | Self::String(_) | Self::Enum(_) | Self::Array(_) => None,
        }
    }

    /// Kind of a scalar value; `None` for arrays.
    #[must_use]
    pub const fn kind(&self) -> Option<EntryKind> {
        match self {
            Self::Long(_) => Some(EntryKind::Long),
            Self::Integer(_) => Some(EntryKind::Integer),
            Self::Short(_) => Some(EntryKind::Short),
            Self::Byte(_) => Some(EntryKind::Byte),
            Self::Double(_) => Some(EntryKind::Double),
            Self::Float(_) => Some(EntryKind::Float),
            Self::Boolean(_) => Some(EntryKind::Boolean),
            Self::String(_) => Some(EntryKind::String),
            Self::Enum(_) => Some(EntryKind::Enum),
            Self::Array(_) => None,
        }
    }
}

/// A variant of a [`ConfigEnum`] in type-erased form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    #[serde(rename = "enum")]
    type_name: &'static str,
    variant: &'static str,
    #[serde(skip)]
    ordinal: usize,
}

impl EnumValue {
    /// Erases a typed variant.
    #[must_use]
    pub fn of<E: ConfigEnum>(value: E) -> Self {
        let ordinal = E::VARIANTS
            .iter()
            .position(|candidate| *candidate == value)
            .unwrap_or_default();
        Self {
            type_name: E::NAME,
            variant: E::NAMES.get(ordinal).copied().unwrap_or_default(),
            ordinal,
        }
    }

    /// Looks a variant up by name within an enum shape.
    #[must_use]
    pub fn named(shape: &TypeShape, variant: &str) -> Option<Self> {
        let TypeShape::Enum { name, variants } = shape else {
            return None;
        };
        variants
            .iter()
            .enumerate()
            .find(|(_, candidate)| **candidate == variant)
            .map(|(ordinal, candidate)| Self {
                type_name: *name,
                variant: *candidate,
                ordinal,
            })
    }

    /// Recovers the typed variant, if `value` holds one of `E`.
    #[must_use]
    pub fn variant_of<E: ConfigEnum>(value: &Value) -> Option<E> {
        match value {
            Value::Enum(erased) if erased.type_name == E::NAME => {
                E::VARIANTS.get(erased.ordinal).copied()
            }
            _ => None,
        }
    }

    /// Name of the enum type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Name of the variant.
    #[must_use]
    pub const fn variant(&self) -> &'static str {
        self.variant
    }

    /// Zero-based position of the variant.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Fieldless enum usable as an entry value.
///
/// Implement it with [`config_enum!`](crate::config_enum) rather than by hand.
pub trait ConfigEnum: Copy + PartialEq + 'static {
    /// Enum type name.
    const NAME: &'static str;
    /// Every variant in declaration order.
    const VARIANTS: &'static [Self];
    /// Variant names matching [`ConfigEnum::VARIANTS`].
    const NAMES: &'static [&'static str];
}

/// What a property's current value exposes to the binding beyond plain data.
#[derive(Clone)]
#[non_exhaustive]
pub enum Capture {
    /// Data read and written through the property's accessors.
    Plain,
    /// An observable cell shared with the instance.
    Observable(Rc<dyn ObservableCell>),
    /// A nested instance to walk as an object entry.
    Object(NestedInstance),
    /// A zero-argument action.
    Callable(Rc<dyn Fn()>),
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Observable(cell) => f.debug_tuple("Observable").field(cell).finish(),
            Self::Object(nested) => f.debug_tuple("Object").field(nested).finish(),
            Self::Callable(_) => f.write_str("Callable"),
        }
    }
}

/// A Rust type that may appear as a declared property.
///
/// Implementations describe the static [`TypeShape`] and convert between the
/// type and [`Value`]. Types that should only be usable through a metadata
/// kind override return [`TypeShape::Opaque`] listing the kinds they can
/// represent.
pub trait Declared: Sized + 'static {
    /// Static shape of the type.
    fn shape() -> TypeShape;

    /// Converts the current value; `None` when it has no value form.
    fn to_value(&self) -> Option<Value> {
        None
    }

    /// Converts back from a value; `None` on a type mismatch.
    fn from_value(value: Value) -> Option<Self> {
        let _unused = value;
        None
    }

    /// Exposes cells, nested instances, or callables held by the value.
    fn capture(&self) -> Capture {
        Capture::Plain
    }
}

macro_rules! declared_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Declared for $ty {
                fn shape() -> TypeShape {
                    TypeShape::$variant
                }

                fn to_value(&self) -> Option<Value> {
                    Some(Value::$variant(self.clone()))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

declared_scalar!(
    i64 => Long,
    i32 => Integer,
    i16 => Short,
    i8 => Byte,
    f64 => Double,
    f32 => Float,
    bool => Boolean,
    String => String,
);

impl<T: Declared> Declared for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Nullable(Box::new(T::shape()))
    }

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(Declared::to_value)
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }

    fn capture(&self) -> Capture {
        self.as_ref().map_or(Capture::Plain, Declared::capture)
    }
}

impl<T: Declared> Declared for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::Array(Box::new(T::shape()))
    }

    fn to_value(&self) -> Option<Value> {
        self.iter()
            .map(Declared::to_value)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<V: Declared + Clone> Declared for Observable<V> {
    fn shape() -> TypeShape {
        TypeShape::Observable
    }

    fn capture(&self) -> Capture {
        Capture::Observable(Rc::new(self.clone()))
    }
}

impl<N: Configurable> Declared for Shared<N> {
    fn shape() -> TypeShape {
        ConfigType::of::<N>().object_shape()
    }

    fn capture(&self) -> Capture {
        Capture::Object(NestedInstance::new(Rc::clone(self)))
    }
}

impl<R: 'static> Declared for Rc<dyn Fn() -> R> {
    fn shape() -> TypeShape {
        TypeShape::Callable
    }

    fn capture(&self) -> Capture {
        let function = Rc::clone(self);
        Capture::Callable(Rc::new(move || {
            function();
        }))
    }
}

impl<R: 'static> Declared for fn() -> R {
    fn shape() -> TypeShape {
        TypeShape::Callable
    }

    fn capture(&self) -> Capture {
        let function = *self;
        Capture::Callable(Rc::new(move || {
            function();
        }))
    }
}

/// Declares a fieldless enum usable as an entry value.
///
/// The macro emits the enum with `Debug`, `Clone`, `Copy`, `PartialEq` and
/// `Eq` derived, and implements [`ConfigEnum`] and [`Declared`] for it.
///
/// # Examples
///
/// ```
/// use config_binding::{config_enum, ConfigEnum, Declared, TypeShape};
///
/// config_enum! {
///     /// Output verbosity.
///     pub enum Verbosity { Quiet, Normal, Loud }
/// }
///
/// assert_eq!(Verbosity::NAMES, &["Quiet", "Normal", "Loud"]);
/// assert!(matches!(Verbosity::shape(), TypeShape::Enum { name: "Verbosity", .. }));
/// ```
#[macro_export]
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $crate::ConfigEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$( Self::$variant ),+];
            const NAMES: &'static [&'static str] = &[$( stringify!($variant) ),+];
        }

        impl $crate::Declared for $name {
            fn shape() -> $crate::TypeShape {
                $crate::TypeShape::of_enum::<Self>()
            }

            fn to_value(&self) -> ::core::option::Option<$crate::Value> {
                ::core::option::Option::Some($crate::Value::Enum($crate::EnumValue::of(*self)))
            }

            fn from_value(value: $crate::Value) -> ::core::option::Option<Self> {
                $crate::EnumValue::variant_of::<Self>(&value)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Declared, EnumValue, Value};

    crate::config_enum! {
        enum Mode { Off, On }
    }

    #[rstest]
    fn option_of_array_renders_nested_shape() {
        let shape = <Option<Vec<i32>>>::shape();
        assert_eq!(shape.to_string(), "Option<Vec<i32>>");
        assert!(shape.is_nullable());
        assert!(shape.is_array());
    }

    #[rstest]
    fn arrays_convert_element_wise() {
        let value = vec![1_i16, 2, 3].to_value();
        assert_eq!(
            value,
            Some(Value::Array(vec![Value::Short(1), Value::Short(2), Value::Short(3)]))
        );
        let back = value.and_then(<Vec<i16>>::from_value);
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[rstest]
    fn mismatched_values_do_not_convert() {
        assert_eq!(i32::from_value(Value::Long(4)), None);
        assert_eq!(<Vec<bool>>::from_value(Value::Boolean(true)), None);
    }

    #[rstest]
    fn enum_values_round_through_names() {
        let erased = EnumValue::of(Mode::On);
        assert_eq!(erased.variant(), "On");
        assert_eq!(erased.ordinal(), 1);
        let named = EnumValue::named(&Mode::shape(), "Off");
        assert_eq!(named.map(|value| value.ordinal()), Some(0));
        assert_eq!(
            Mode::from_value(Value::Enum(erased)),
            Some(Mode::On)
        );
    }

    #[rstest]
    fn widening_covers_every_numeric_kind() {
        assert_eq!(Value::Byte(-3).as_f64(), Some(-3.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Boolean(true).as_f64(), None);
    }
}
