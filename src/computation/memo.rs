//! Per-request memoization.
//!
//! [`Computation::memo`] turns a computation into one that runs at most once
//! along a state lineage: the first run stores the produced value in the
//! memo cache of the state it hands back, and every later run against that
//! state (or any state threaded from it) reads the cached value instead.
//!
//! The cache lives in the state, not in the computation. Two independently
//! created states never see each other's entries, so the same memoized
//! computation can serve many requests concurrently.
//!
//! Cached values are stored opaque: the value type needs no [`PartialEq`],
//! and two states holding separately cached values never compare equal.

use futures::future::{self, FutureExt, TryFutureExt};

use super::Computation;
use crate::diagnostics;
use crate::optics::{View, memo_slot};
use crate::state::{MemoId, Value};

impl<A, E> Computation<A, E>
where
    A: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    /// Caches the value of this computation in the state.
    ///
    /// A fresh [`MemoId`] is minted here, once, and identifies the cache
    /// entry for every run of the returned computation. Calling `memo` twice
    /// gives two computations with separate entries.
    ///
    /// A failing run stores nothing; the next run tries again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let runs = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&runs);
    /// let expensive: Computation<u64> = Computation::delay(move || {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    ///     Computation::init(42)
    /// })
    /// .memo();
    ///
    /// let twice = expensive.clone().map2(expensive, |a, b| a + b);
    /// assert_eq!(twice.eval(State::default()).await.ok(), Some(84));
    /// assert_eq!(runs.load(Ordering::SeqCst), 1);
    /// # });
    /// ```
    #[must_use]
    pub fn memo(self) -> Self {
        let id = MemoId::new();
        let slot = memo_slot(id);
        let original = self.run_function;
        Self::from_step(move |state| {
            if let Some(value) = slot.get(&state).and_then(|cached| cached.downcast::<A>()) {
                diagnostics::memo_hit(id);
                return future::ready(Ok((value, state))).boxed();
            }
            diagnostics::memo_miss(id);
            let slot = slot.clone();
            (original)(state)
                .map_ok(move |(value, next)| {
                    diagnostics::memo_stored(id);
                    let next = slot.set(next, Some(Value::opaque(value.clone())));
                    (value, next)
                })
                .boxed()
        })
    }
}
