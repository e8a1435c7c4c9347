//! Monadic combinators over [`Computation`].
//!
//! Every combinator threads the state strictly left to right in the order
//! documented on it. None of them adds a suspension point of its own or
//! touches the error of a failing step.

use std::future::Future;
use std::sync::Arc;

use futures::future::{self, FutureExt, TryFutureExt};

use super::Computation;

// =============================================================================
// Constructors
// =============================================================================

impl<A, E> Computation<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Creates a computation that produces `value` and leaves the state as is.
    ///
    /// The returned future is ready immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let computation: Computation<&str> = Computation::init("hello");
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some("hello"));
    /// # });
    /// ```
    #[must_use]
    pub fn init(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::from_step(move |state| future::ready(Ok((value.clone(), state))).boxed())
    }

    /// Defers building the computation until it is run.
    ///
    /// `factory` is called on every run, so each run gets a fresh computation.
    /// This is what makes recursive definitions possible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// fn countdown(n: u32) -> Computation<u32> {
    ///     if n == 0 {
    ///         Computation::init(0)
    ///     } else {
    ///         Computation::delay(move || countdown(n - 1)).map(|rest| rest + 1)
    ///     }
    /// }
    ///
    /// # futures::executor::block_on(async {
    /// assert_eq!(countdown(5).eval(State::default()).await.ok(), Some(5));
    /// # });
    /// ```
    #[must_use]
    pub fn delay<F>(factory: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::from_step(move |state| factory().run(state))
    }

    /// Lifts an asynchronous transformation of `value` into a computation.
    ///
    /// `function(value)` is awaited on every run; the state passes through
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let computation: Computation<usize> =
    ///     Computation::from_async("payload".to_string(), |body: String| async move { Ok(body.len()) });
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some(7));
    /// # });
    /// ```
    #[must_use]
    pub fn from_async<T, F, Fut>(value: T, function: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self::from_step(move |state| {
            function(value.clone())
                .map_ok(move |result| (result, state))
                .boxed()
        })
    }
}

impl<E> Computation<(), E>
where
    E: Send + 'static,
{
    /// A computation that produces `()` and leaves the state as is.
    #[must_use]
    pub fn zero() -> Self {
        Self::init(())
    }
}

// =============================================================================
// Functor / Applicative Operations
// =============================================================================

impl<A, E> Computation<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Transforms the produced value with a pure function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let computation: Computation<i32> = Computation::init(21).map(|x| x * 2);
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some(42));
    /// # });
    /// ```
    #[must_use]
    pub fn map<B, F>(self, function: F) -> Computation<B, E>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: Send + 'static,
    {
        let original = self.run_function;
        let function = Arc::new(function);
        Computation::from_step(move |state| {
            let function = Arc::clone(&function);
            (original)(state)
                .map_ok(move |(value, next)| (function(value), next))
                .boxed()
        })
    }

    /// Applies the function produced by `function_computation` to the value
    /// produced by `self`.
    ///
    /// `function_computation` runs first, `self` runs second against the
    /// state the first one left behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let double: Computation<fn(i32) -> i32> = Computation::init(|x| x * 2);
    /// let computation = Computation::init(21).apply(double);
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some(42));
    /// # });
    /// ```
    #[must_use]
    pub fn apply<B, F>(self, function_computation: Computation<F, E>) -> Computation<B, E>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        let value_run = self.run_function;
        let function_run = function_computation.run_function;
        Computation::from_step(move |state| {
            let value_run = Arc::clone(&value_run);
            (function_run)(state)
                .and_then(move |(function, next)| {
                    (value_run)(next).map_ok(move |(value, last)| (function(value), last))
                })
                .boxed()
        })
    }

    /// Runs `self` then `other` and combines both values with `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let computation: Computation<i32> =
    ///     Computation::init(10).map2(Computation::init(20), |a, b| a + b);
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some(30));
    /// # });
    /// ```
    #[must_use]
    pub fn map2<B, C, F>(self, other: Computation<B, E>, function: F) -> Computation<C, E>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        let first = self.run_function;
        let second = other.run_function;
        let function = Arc::new(function);
        Computation::from_step(move |state| {
            let second = Arc::clone(&second);
            let function = Arc::clone(&function);
            (first)(state)
                .and_then(move |(value_a, next)| {
                    (second)(next).map_ok(move |(value_b, last)| (function(value_a, value_b), last))
                })
                .boxed()
        })
    }
}

// =============================================================================
// Monad Operations
// =============================================================================

impl<A, E> Computation<A, E>
where
    A: Send + 'static,
    E: Send + 'static,
{
    /// Runs `self`, then runs the computation `function` builds from its
    /// value against the state `self` left behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let computation: Computation<i32> = Computation::init(10).bind(|x| Computation::init(x * 2));
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some(20));
    /// # });
    /// ```
    #[must_use]
    pub fn bind<B, F>(self, function: F) -> Computation<B, E>
    where
        F: Fn(A) -> Computation<B, E> + Send + Sync + 'static,
        B: Send + 'static,
    {
        let original = self.run_function;
        let function = Arc::new(function);
        Computation::from_step(move |state| {
            let function = Arc::clone(&function);
            (original)(state)
                .and_then(move |(value, next)| function(value).run(next))
                .boxed()
        })
    }

    /// Alias for [`bind`](Self::bind).
    #[must_use]
    pub fn and_then<B, F>(self, function: F) -> Computation<B, E>
    where
        F: Fn(A) -> Computation<B, E> + Send + Sync + 'static,
        B: Send + 'static,
    {
        self.bind(function)
    }

    /// Runs `self` for its effect on the state, then runs `next`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::optics::value_view;
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let computation: Computation<Option<bool>> = Computation::write(value_view("seen"), Some(true))
    ///     .combine(Computation::read(value_view::<bool>("seen")));
    /// assert_eq!(computation.eval(State::default()).await.ok(), Some(Some(true)));
    /// # });
    /// ```
    #[must_use]
    pub fn combine<B>(self, next: Computation<B, E>) -> Computation<B, E>
    where
        B: Send + 'static,
    {
        let first = self.run_function;
        let second = next.run_function;
        Computation::from_step(move |state| {
            let second = Arc::clone(&second);
            (first)(state)
                .and_then(move |(_, next)| (second)(next))
                .boxed()
        })
    }
}
