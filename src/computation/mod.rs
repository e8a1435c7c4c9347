//! Asynchronous, state-threading computations.
//!
//! A [`Computation<A, E>`] describes a step of request processing: given a
//! [`State`], it asynchronously produces a value of type `A` together with a
//! (possibly updated) state, or fails with an `E`.
//!
//! Nothing runs when a computation is built. Computations are composed with
//! the combinators in this module and executed with [`Computation::run`] at
//! the edge, once per request, with the state created for that request.
//!
//! # Overview
//!
//! - Construction: [`init`](Computation::init), [`zero`](Computation::zero),
//!   [`new`](Computation::new), [`from_async`](Computation::from_async),
//!   [`delay`](Computation::delay)
//! - Composition: [`map`](Computation::map), [`bind`](Computation::bind),
//!   [`apply`](Computation::apply), [`combine`](Computation::combine),
//!   [`map2`](Computation::map2)
//! - Memoization: [`memo`](Computation::memo)
//! - State access: [`read`](Computation::read), [`write`](Computation::write),
//!   [`update`](Computation::update), [`require`](Computation::require)
//!
//! # Monad Laws
//!
//! `Computation` satisfies the monad laws with respect to `init` and `bind`:
//!
//! 1. **Left Identity**: `init(a).bind(f) == f(a)`
//! 2. **Right Identity**: `m.bind(init) == m`
//! 3. **Associativity**: `m.bind(f).bind(g) == m.bind(|x| f(x).bind(g))`
//!
//! where two computations are equal when running them against the same
//! state yields the same value and the same final state.
//!
//! # Failures
//!
//! Combinators never catch, retry or rewrite errors. The first failure in a
//! chain is handed to the caller as-is and the rest of the chain does not
//! run. Dropping the future returned by [`run`](Computation::run) cancels the
//! chain at its current suspension point.
//!
//! # Examples
//!
//! ```rust
//! use stateflow::computation::Computation;
//! use stateflow::state::State;
//!
//! # futures::executor::block_on(async {
//! let computation: Computation<i32> = Computation::init(1).bind(|x| Computation::init(x + 1));
//!
//! let state = State::default();
//! let (value, final_state) = computation.run(state.clone()).await?;
//!
//! assert_eq!(value, 2);
//! assert_eq!(final_state, state);
//! # Ok::<(), stateflow::error::Fault>(())
//! # }).unwrap();
//! ```

mod access;
mod combinators;
mod memo;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::error::Fault;
use crate::state::State;

/// The boxed future a computation produces when run.
pub type Step<A, E> = BoxFuture<'static, Result<(A, State), E>>;

type Transition<A, E> = dyn Fn(State) -> Step<A, E> + Send + Sync;

/// A composable step of request processing.
///
/// `Computation<A, E>` wraps a function `State -> Future<Result<(A, State), E>>`.
/// It is cheap to clone and can be run any number of times; each run starts
/// from the state it is given.
///
/// # Type Parameters
///
/// - `A`: The type of the produced value
/// - `E`: The failure type, [`Fault`] by default
pub struct Computation<A, E = Fault> {
    /// The wrapped state transition.
    /// Uses Arc so that clones of a composed chain share one closure.
    run_function: Arc<Transition<A, E>>,
}

impl<A, E> Computation<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Creates a computation from an asynchronous state transition.
    ///
    /// The transition is called once per run.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// let keys: Computation<usize> =
    ///     Computation::new(|state: State| async move { Ok((state.environment().len(), state)) });
    /// # let _ = keys;
    /// ```
    pub fn new<F, Fut>(transition: F) -> Self
    where
        F: Fn(State) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(A, State), E>> + Send + 'static,
    {
        Self::from_step(move |state| transition(state).boxed())
    }

    pub(crate) fn from_step<F>(transition: F) -> Self
    where
        F: Fn(State) -> Step<A, E> + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(transition),
        }
    }

    /// Runs the computation against `state`.
    ///
    /// Returns the produced value and the final state.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by any step of the computation.
    pub fn run(&self, state: State) -> Step<A, E> {
        (self.run_function)(state)
    }

    /// Runs the computation and returns only the produced value.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by any step of the computation.
    pub async fn eval(&self, state: State) -> Result<A, E> {
        self.run(state).await.map(|(value, _)| value)
    }

    /// Runs the computation and returns only the final state.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by any step of the computation.
    pub async fn exec(&self, state: State) -> Result<State, E> {
        self.run(state).await.map(|(_, state)| state)
    }

    /// Runs every execution of this computation inside `span`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    ///
    /// let traced: Computation<u8> =
    ///     Computation::init(1).instrument(tracing::info_span!("negotiate"));
    /// # let _ = traced;
    /// ```
    #[cfg(feature = "tracing")]
    #[must_use]
    pub fn instrument(self, span: tracing::Span) -> Self {
        use tracing::Instrument as _;

        let original = self.run_function;
        Self::from_step(move |state| (original)(state).instrument(span.clone()).boxed())
    }
}

impl<A, E> Clone for Computation<A, E> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<A, E> fmt::Debug for Computation<A, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Computation")
            .field("output", &std::any::type_name::<A>())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Computation<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Computation<String, std::io::Error>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Step<i32, Fault>: Send);
