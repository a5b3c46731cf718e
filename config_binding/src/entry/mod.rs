//! Live configuration entries.
//!
//! Every entry exposes its [`EntryData`] and can be reset. Value entries
//! additionally read and write the bound property, enforcing the declared
//! range and pattern on every write. Object entries group the entries of a
//! nested instance.

mod button;
mod data;
mod object;
mod value;

use std::fmt;

use indexmap::IndexMap;

pub use button::{Button, ButtonPosition};
pub(crate) use data::CompiledPattern;
pub use data::EntryData;
pub use object::NestedObjectEntry;
pub use value::{ObservableEntry, PropertyEntry};

use crate::{
    error::WriteError,
    kind::EntryKind,
    shape::{EnumValue, TypeShape, Value},
};

/// Entries of one scope keyed by id, in declaration order.
pub type EntryMap = IndexMap<String, Box<dyn Entry>>;

/// A node of the configuration tree.
pub trait Entry: fmt::Debug {
    /// Kind the entry was inferred as.
    fn kind(&self) -> EntryKind;

    /// Identity and constraint metadata.
    fn data(&self) -> &EntryData;

    /// Entry id; shorthand for `self.data().id()`.
    fn id(&self) -> &str {
        self.data().id()
    }

    /// Restores the value captured when the entry was built.
    ///
    /// The default is written without range or pattern checks. Object
    /// entries reset every member.
    fn reset(&self);

    /// Views the entry as a value entry.
    fn as_value(&self) -> Option<&dyn ValueEntry> {
        None
    }

    /// Views the entry as an object entry.
    fn as_object(&self) -> Option<&dyn ObjectEntry> {
        None
    }
}

macro_rules! typed_accessors {
    ($($get:ident / $set:ident: $ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            #[doc = concat!("Reads the value as ", $name, "; `None` on a kind mismatch.")]
            fn $get(&self) -> Option<$ty> {
                match self.get()? {
                    Value::$variant(value) => Some(value),
                    _ => None,
                }
            }

            #[doc = concat!("Writes ", $name, "; `false` when the write is rejected.")]
            fn $set(&self, value: $ty) -> bool {
                self.set(Value::$variant(value))
            }
        )*
    };
}

/// An entry backed by a scalar or array property.
pub trait ValueEntry: Entry {
    /// Element shape; array entries hold a sequence of it.
    fn shape(&self) -> &TypeShape;

    /// Whether the entry holds an array.
    fn is_array(&self) -> bool;

    /// Whether the backing property is an observable cell.
    fn is_observable(&self) -> bool;

    /// Value captured when the entry was built.
    fn default_value(&self) -> Option<&Value>;

    /// Current value of the backing property.
    fn get(&self) -> Option<Value>;

    /// Writes `value` after checking its kind, range and pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] and leaves the property untouched when the
    /// value is rejected.
    fn try_set(&self, value: Value) -> Result<(), WriteError>;

    /// Writes `value`, reporting whether it was accepted.
    fn set(&self, value: Value) -> bool {
        self.try_set(value)
            .inspect_err(|err| tracing::debug!(id = self.id(), error = %err, "write rejected"))
            .is_ok()
    }

    typed_accessors! {
        get_long / set_long: i64 => Long, "a `LONG`";
        get_integer / set_integer: i32 => Integer, "an `INTEGER`";
        get_short / set_short: i16 => Short, "a `SHORT`";
        get_byte / set_byte: i8 => Byte, "a `BYTE`";
        get_double / set_double: f64 => Double, "a `DOUBLE`";
        get_float / set_float: f32 => Float, "a `FLOAT`";
        get_boolean / set_boolean: bool => Boolean, "a `BOOLEAN`";
        get_enum / set_enum: EnumValue => Enum, "an `ENUM` variant";
        get_array / set_array: Vec<Value> => Array, "array elements";
    }

    /// Reads the value as a `STRING`; `None` on a kind mismatch.
    fn get_string(&self) -> Option<String> {
        match self.get()? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Writes a `STRING`; `false` when the write is rejected.
    fn set_string(&self, value: &str) -> bool {
        self.set(Value::String(value.to_owned()))
    }

    /// Writes the enum variant called `variant`.
    ///
    /// Returns `false` when the entry is not an enum or has no such variant.
    fn set_enum_variant(&self, variant: &str) -> bool {
        EnumValue::named(self.shape(), variant).is_some_and(|value| self.set_enum(value))
    }
}

/// An entry grouping the entries of a nested instance.
pub trait ObjectEntry: Entry {
    /// Member entries in declaration order.
    fn entries(&self) -> &EntryMap;

    /// Looks a member up by id.
    fn entry(&self, id: &str) -> Option<&dyn Entry> {
        self.entries().get(id).map(Box::as_ref)
    }
}

#[cfg(test)]
mod tests;
