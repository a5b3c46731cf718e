//! Value entries bound to plain properties and observable cells.

use std::{fmt, rc::Rc};

use super::{Entry, EntryData, ValueEntry};
use crate::{
    error::WriteError,
    infer::Inference,
    kind::EntryKind,
    observable::ObservableCell,
    schema::ValueAccess,
    shape::{TypeShape, Value},
};

/// Where a value entry reads from and writes to.
trait Backing: fmt::Debug {
    fn read(&self) -> Option<Value>;
    fn write(&self, value: Value) -> Result<(), WriteError>;
}

impl Backing for ValueAccess {
    fn read(&self) -> Option<Value> {
        Self::read(self)
    }

    fn write(&self, value: Value) -> Result<(), WriteError> {
        Self::write(self, value)
    }
}

impl Backing for Rc<dyn ObservableCell> {
    fn read(&self) -> Option<Value> {
        self.get_value()
    }

    fn write(&self, value: Value) -> Result<(), WriteError> {
        self.set_value(value)
    }
}

#[derive(Debug)]
struct Binding<B> {
    data: EntryData,
    inference: Inference,
    default: Option<Value>,
    backing: B,
}

impl<B: Backing> Binding<B> {
    fn new(data: EntryData, inference: Inference, backing: B) -> Self {
        let default = backing.read();
        Self {
            data,
            inference,
            default,
            backing,
        }
    }

    fn conforms(&self, value: &Value) -> bool {
        let kind = Some(self.inference.kind());
        match (value, self.inference.is_array()) {
            (Value::Array(items), true) => items.iter().all(|item| item.kind() == kind),
            (scalar, false) => scalar.kind() == kind,
            (_, true) => false,
        }
    }

    fn expected_shape(&self) -> TypeShape {
        let component = self.inference.component().clone();
        if self.inference.is_array() {
            TypeShape::Array(Box::new(component))
        } else {
            component
        }
    }

    fn try_set(&self, value: Value) -> Result<(), WriteError> {
        if !self.conforms(&value) {
            return Err(WriteError::type_mismatch(&self.expected_shape()));
        }
        self.data.check(&value)?;
        self.backing.write(value)
    }

    fn reset(&self) {
        let Some(default) = &self.default else {
            return;
        };
        if let Err(err) = self.backing.write(default.clone()) {
            tracing::warn!(id = self.data.id(), error = %err, "could not restore default value");
        }
    }
}

macro_rules! value_entry {
    ($(#[$meta:meta])* $name:ident($backing:ty), observable: $observable:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(Binding<$backing>);

        impl $name {
            pub(crate) fn new(data: EntryData, inference: Inference, backing: $backing) -> Self {
                Self(Binding::new(data, inference, backing))
            }
        }

        impl Entry for $name {
            fn kind(&self) -> EntryKind {
                self.0.inference.kind()
            }

            fn data(&self) -> &EntryData {
                &self.0.data
            }

            fn reset(&self) {
                self.0.reset();
            }

            fn as_value(&self) -> Option<&dyn ValueEntry> {
                Some(self)
            }
        }

        impl ValueEntry for $name {
            fn shape(&self) -> &TypeShape {
                self.0.inference.component()
            }

            fn is_array(&self) -> bool {
                self.0.inference.is_array()
            }

            fn is_observable(&self) -> bool {
                $observable
            }

            fn default_value(&self) -> Option<&Value> {
                self.0.default.as_ref()
            }

            fn get(&self) -> Option<Value> {
                self.0.backing.read()
            }

            fn try_set(&self, value: Value) -> Result<(), WriteError> {
                self.0.try_set(value)
            }
        }
    };
}

value_entry!(
    /// Entry reading and writing a plain field of the owning instance.
    PropertyEntry(ValueAccess),
    observable: false
);

value_entry!(
    /// Entry reading and writing the value held by an observable cell.
    ///
    /// Writes notify the cell's subscribers.
    ObservableEntry(Rc<dyn ObservableCell>),
    observable: true
);
