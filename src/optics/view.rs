//! Views focusing on a value that may be absent.
//!
//! A [`View`] reads an owned `Option<A>` out of a source and writes an
//! `Option<A>` back: writing `None` removes the focused value, writing
//! `Some` inserts or overwrites it.
//!
//! # Laws
//!
//! 1. **GetSet Law**: Writing back what was read yields the original. For a
//!    [`TypedView`] this holds when the focused value is absent or a `T`: a
//!    value of another type reads as `None`, and writing `None` removes it.
//!    ```text
//!    view.set(source.clone(), view.get(&source)) == source
//!    ```
//!
//! 2. **SetGet Law**: Reading after a write yields the written value.
//!    ```text
//!    view.get(&view.set(source, value.clone())) == value
//!    ```
//!
//! # Examples
//!
//! ```
//! use stateflow::optics::{SlotView, View};
//! use stateflow::state::Slots;
//!
//! let view = SlotView::new("token".to_string()).typed::<String>();
//! let slots: Slots<String> = view.set(Slots::new(), Some("abc".to_string()));
//!
//! assert_eq!(view.get(&slots), Some("abc".to_string()));
//! assert_eq!(view.get(&view.set(slots, None)), None);
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::Lens;
use crate::state::{Slots, Value};

/// A bidirectional accessor to an optional value inside `S`.
pub trait View<S, A> {
    /// Reads the focused value, if present.
    fn get(&self, source: &S) -> Option<A>;

    /// Writes the focused value, returning a new source.
    fn set(&self, source: S, value: Option<A>) -> S;

    /// Rewrites the focused value with `function`.
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(Option<A>) -> Option<A>,
    {
        let current = self.get(&source);
        self.set(source, function(current))
    }

    /// Narrows a view over type-erased [`Value`]s to values of type `T`.
    ///
    /// Reading yields `None` when the stored value is not a `T`.
    fn typed<T>(self) -> TypedView<Self, T>
    where
        Self: Sized,
    {
        TypedView::new(self)
    }
}

/// A view on the slot stored under one key of a [`Slots`] map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView<K> {
    key: K,
}

impl<K> SlotView<K> {
    /// Creates a view on `key`.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// The focused key.
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<K> View<Slots<K>, Value> for SlotView<K>
where
    K: Clone + Eq + Hash,
{
    fn get(&self, source: &Slots<K>) -> Option<Value> {
        source.get(&self.key).cloned()
    }

    fn set(&self, source: Slots<K>, value: Option<Value>) -> Slots<K> {
        match value {
            Some(value) => source.insert(self.key.clone(), value),
            None => source.remove(&self.key),
        }
    }
}

/// A view over [`Value`]s narrowed to a concrete type.
pub struct TypedView<V, T> {
    inner: V,
    _marker: PhantomData<fn() -> T>,
}

impl<V, T> TypedView<V, T> {
    /// Wraps a view over type-erased values.
    #[must_use]
    pub const fn new(inner: V) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// The untyped view this one narrows.
    pub const fn inner(&self) -> &V {
        &self.inner
    }
}

impl<S, V, T> View<S, T> for TypedView<V, T>
where
    V: View<S, Value>,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn get(&self, source: &S) -> Option<T> {
        self.inner.get(source).and_then(|value| value.downcast::<T>())
    }

    fn set(&self, source: S, value: Option<T>) -> S {
        self.inner.set(source, value.map(Value::new))
    }
}

impl<V: Clone, T> Clone for TypedView<V, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<V: fmt::Debug, T> fmt::Debug for TypedView<V, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TypedView")
            .field("inner", &self.inner)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// A lens followed by a view on the lens target.
///
/// # Type Parameters
///
/// - `L`: The lens from the source to the intermediate structure
/// - `V`: The view on the intermediate structure
/// - `A`: The intermediate type
pub struct LensView<L, V, A> {
    lens: L,
    view: V,
    _marker: PhantomData<fn() -> A>,
}

impl<L, V, A> LensView<L, V, A> {
    /// Creates the composition of `lens` and `view`.
    #[must_use]
    pub const fn new(lens: L, view: V) -> Self {
        Self {
            lens,
            view,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L, V> View<S, B> for LensView<L, V, A>
where
    L: Lens<S, A>,
    V: View<A, B>,
    A: Clone,
{
    fn get(&self, source: &S) -> Option<B> {
        self.view.get(self.lens.get(source))
    }

    fn set(&self, source: S, value: Option<B>) -> S {
        let intermediate = self.lens.get(&source).clone();
        self.lens.set(source, self.view.set(intermediate, value))
    }
}

impl<L: Clone, V: Clone, A> Clone for LensView<L, V, A> {
    fn clone(&self) -> Self {
        Self::new(self.lens.clone(), self.view.clone())
    }
}

impl<L: fmt::Debug, V: fmt::Debug, A> fmt::Debug for LensView<L, V, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LensView")
            .field("lens", &self.lens)
            .field("view", &self.view)
            .finish()
    }
}
