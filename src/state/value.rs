//! Type-erased values stored in the state.
//!
//! A [`Value`] is a shared cell holding a value of any `Send + Sync` type.
//! The runtime type is checked on every typed read, so reading a cell as the
//! wrong type yields `None` instead of failing.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// Equality witness captured when a cell is created.
type Equality = fn(&dyn Any, &dyn Any) -> bool;

/// A cheaply clonable, type-erased value cell.
///
/// Cells built with [`Value::new`] compare by the contained value. Cells built
/// with [`Value::opaque`] only compare equal to clones of themselves.
///
/// # Examples
///
/// ```rust
/// use stateflow::state::Value;
///
/// let value = Value::new(42_i32);
/// assert_eq!(value.downcast::<i32>(), Some(42));
/// assert_eq!(value.downcast::<String>(), None);
/// assert_eq!(value, Value::new(42_i32));
/// ```
#[derive(Clone)]
pub struct Value {
    cell: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    equality: Option<Equality>,
}

fn compare_as<T: PartialEq + 'static>(left: &dyn Any, right: &dyn Any) -> bool {
    match (left.downcast_ref::<T>(), right.downcast_ref::<T>()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

impl Value {
    /// Wraps a comparable value.
    pub fn new<T>(value: T) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(value),
            type_name: type_name::<T>(),
            equality: Some(compare_as::<T>),
        }
    }

    /// Wraps a value that has no notion of equality, such as a handle or a
    /// channel. Such a cell is only equal to itself and its clones.
    pub fn opaque<T>(value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(value),
            type_name: type_name::<T>(),
            equality: None,
        }
    }

    /// Returns a clone of the stored value if it is a `T`.
    pub fn downcast<T>(&self) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.downcast_ref::<T>().cloned()
    }

    /// Returns a reference to the stored value if it is a `T`.
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: 'static,
    {
        self.cell.downcast_ref::<T>()
    }

    /// Returns `true` if the stored value is a `T`.
    pub fn is<T>(&self) -> bool
    where
        T: 'static,
    {
        self.cell.is::<T>()
    }

    /// The name of the stored type, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if both values share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl PartialEq for Value {
    /// Two cells are equal when they are the same cell, or when both were
    /// built with [`Value::new`] and hold equal values of the same type.
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.equality, other.equality) {
            (Some(equality), Some(_)) => equality(&*self.cell, &*other.cell),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Value")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}
