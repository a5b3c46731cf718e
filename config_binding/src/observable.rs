//! Observable cells: shared holders whose changes are pushed to subscribers.

use std::{
    cell::RefCell,
    fmt,
    rc::Rc,
};

use crate::{
    error::WriteError,
    shape::{Declared, TypeShape, Value},
};

type Listener<V> = Rc<dyn Fn(&V)>;

struct Inner<V> {
    value: RefCell<V>,
    listeners: RefCell<Vec<Listener<V>>>,
}

/// A shared, externally observable value holder.
///
/// Clones share the same cell. Declare observable properties read-only: the
/// value changes through the cell, never by reassigning the property.
///
/// # Examples
///
/// ```
/// use std::{cell::Cell, rc::Rc};
/// use config_binding::Observable;
///
/// let cell = Observable::new(3_i32);
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// cell.subscribe(move |value| sink.set(*value));
/// cell.set(7);
/// assert_eq!(cell.get(), 7);
/// assert_eq!(seen.get(), 7);
/// ```
pub struct Observable<V> {
    inner: Rc<Inner<V>>,
}

impl<V: Clone + 'static> Observable<V> {
    /// Creates a cell holding `value`.
    #[must_use]
    pub fn new(value: V) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Returns a copy of the held value.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a listener while a write is in progress
    /// on the same cell through [`Observable::with_mut`].
    #[must_use]
    pub fn get(&self) -> V {
        self.inner.value.borrow().clone()
    }

    /// Replaces the held value and notifies subscribers.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently borrowed through [`Observable::with`].
    pub fn set(&self, value: V) {
        self.inner.value.replace(value.clone());
        self.notify(&value);
    }

    /// Replaces the held value unless it is borrowed elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Busy`] when the cell is borrowed.
    pub fn try_set(&self, value: V) -> Result<(), WriteError> {
        {
            let mut slot = self
                .inner
                .value
                .try_borrow_mut()
                .map_err(|_| WriteError::Busy)?;
            *slot = value.clone();
        }
        self.notify(&value);
        Ok(())
    }

    /// Runs `f` against the held value without cloning it.
    ///
    /// # Panics
    ///
    /// Panics if a write is in progress on the same cell.
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&*self.inner.value.borrow())
    }

    /// Mutates the held value in place and notifies subscribers.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently borrowed through [`Observable::with`].
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        let (result, snapshot) = {
            let mut slot = self.inner.value.borrow_mut();
            let result = f(&mut *slot);
            (result, slot.clone())
        };
        self.notify(&snapshot);
        result
    }

    /// Registers a listener called with the new value after every change.
    pub fn subscribe(&self, listener: impl Fn(&V) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self, value: &V) {
        let listeners: Vec<Listener<V>> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(value);
        }
    }
}

impl<V> Clone for Observable<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for Observable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Type-erased access to an observable cell.
pub trait ObservableCell: fmt::Debug {
    /// Current value, or `None` when it has no value form or is borrowed.
    fn get_value(&self) -> Option<Value>;

    /// Stores `value` and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] when the value has the wrong type or the
    /// cell is borrowed.
    fn set_value(&self, value: Value) -> Result<(), WriteError>;

    /// Shape of the held value.
    fn held_shape(&self) -> TypeShape;
}

impl<V: Declared + Clone> ObservableCell for Observable<V> {
    fn get_value(&self) -> Option<Value> {
        self.inner.value.try_borrow().ok()?.to_value()
    }

    fn set_value(&self, value: Value) -> Result<(), WriteError> {
        let next = V::from_value(value).ok_or_else(|| WriteError::type_mismatch(&V::shape()))?;
        self.try_set(next)
    }

    fn held_shape(&self) -> TypeShape {
        V::shape()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rstest::rstest;

    use super::{Observable, ObservableCell};
    use crate::{
        error::WriteError,
        shape::{TypeShape, Value},
    };

    #[rstest]
    fn clones_share_the_cell() {
        let cell = Observable::new(String::from("a"));
        let other = cell.clone();
        other.set(String::from("b"));
        assert_eq!(cell.get(), "b");
    }

    #[rstest]
    fn erased_writes_notify_and_type_check() {
        let cell = Observable::new(1.5_f64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        cell.subscribe(move |value| sink.borrow_mut().push(*value));

        assert_eq!(cell.set_value(Value::Double(2.5)), Ok(()));
        assert!(matches!(
            cell.set_value(Value::Float(1.0)),
            Err(WriteError::TypeMismatch { .. })
        ));
        assert_eq!(cell.get_value(), Some(Value::Double(2.5)));
        assert_eq!(*seen.borrow(), vec![2.5]);
        assert_eq!(cell.held_shape(), TypeShape::Double);
    }

    #[rstest]
    fn with_mut_notifies_once() {
        let cell = Observable::new(vec![1_i32]);
        let calls = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&calls);
        cell.subscribe(move |_| *counter.borrow_mut() += 1);
        cell.with_mut(|items| items.push(2));
        assert_eq!(cell.get(), vec![1, 2]);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(cell.listener_count(), 1);
    }
}
