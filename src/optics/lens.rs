//! Lenses: optics onto a part of a structure that always exists.
//!
//! The state has two such parts, its environment and its bookkeeping block,
//! and the bookkeeping block has one, the memo cache. Lenses onto them are
//! the first leg of every typed view.
//!
//! # Laws
//!
//! For a lens `l`, a structure `s` and parts `a`, `b`:
//!
//! 1. **Get after set**: `l.get(&l.set(s, a.clone())) == &a`
//! 2. **Set what was got**: `l.set(s.clone(), l.get(&s).clone()) == s`
//! 3. **Last set wins**: `l.set(l.set(s.clone(), a), b.clone()) == l.set(s, b)`

use std::fmt;
use std::marker::PhantomData;

use super::view::{LensView, View};

/// Reads and replaces the part `A` of a structure `S`.
pub trait Lens<S, A> {
    /// Borrows the focused part.
    fn get<'a>(&self, source: &'a S) -> &'a A;

    /// Replaces the focused part, consuming and returning the structure.
    fn set(&self, source: S, value: A) -> S;

    /// Replaces the focused part with `function` applied to a copy of it.
    ///
    /// # Example
    ///
    /// ```
    /// use stateflow::optics::{Lens, environment_view};
    /// use stateflow::state::State;
    ///
    /// let state = environment_view().modify(State::default(), |environment| {
    ///     environment.with("user", "alice".to_string())
    /// });
    /// assert!(state.environment().contains_key("user"));
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
        A: Clone,
    {
        let part = self.get(&source).clone();
        self.set(source, function(part))
    }

    /// Continues into a part of the focused part.
    fn compose<B, L>(self, inner: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, inner)
    }

    /// Continues into a possibly absent value of the focused part.
    fn compose_view<B, V>(self, view: V) -> LensView<Self, V, A>
    where
        Self: Sized,
        V: View<A, B>,
    {
        LensView::new(self, view)
    }
}

/// `outer` followed by `inner`, passing through the part `A`.
pub struct ComposedLens<L1, L2, A> {
    outer: L1,
    inner: L2,
    _through: PhantomData<fn() -> A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Chains `outer` and `inner`.
    #[must_use]
    pub const fn new(outer: L1, inner: L2) -> Self {
        Self {
            outer,
            inner,
            _through: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
    A: Clone + 'static,
{
    fn get<'a>(&self, source: &'a S) -> &'a B {
        self.inner.get(self.outer.get(source))
    }

    fn set(&self, source: S, value: B) -> S {
        let part = self.inner.set(self.outer.get(&source).clone(), value);
        self.outer.set(source, part)
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self::new(self.outer.clone(), self.inner.clone())
    }
}

impl<L1: fmt::Debug, L2: fmt::Debug, A> fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .finish()
    }
}
