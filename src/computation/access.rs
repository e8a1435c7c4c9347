//! Computations that read and write the state through views.

use std::any::type_name;

use futures::future::{self, FutureExt};

use super::Computation;
use crate::error::StateError;
use crate::optics::View;
use crate::state::State;

impl<E> Computation<State, E>
where
    E: Send + 'static,
{
    /// Produces the current state without changing it.
    #[must_use]
    pub fn state() -> Self {
        Self::from_step(|state: State| future::ready(Ok((state.clone(), state))).boxed())
    }
}

impl<E> Computation<(), E>
where
    E: Send + 'static,
{
    /// Replaces the state with `new_state`.
    #[must_use]
    pub fn put_state(new_state: State) -> Self {
        Self::from_step(move |_| future::ready(Ok(((), new_state.clone()))).boxed())
    }

    /// Replaces the state with the result of `modifier`.
    #[must_use]
    pub fn modify_state<F>(modifier: F) -> Self
    where
        F: Fn(State) -> State + Send + Sync + 'static,
    {
        Self::from_step(move |state| future::ready(Ok(((), modifier(state)))).boxed())
    }

    /// Writes `value` through `view`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::optics::{View, value_view};
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let login: Computation<()> = Computation::write(value_view("user"), Some("alice".to_string()));
    /// let state = login.exec(State::default()).await.unwrap();
    /// assert_eq!(value_view::<String>("user").get(&state), Some("alice".to_string()));
    /// # });
    /// ```
    #[must_use]
    pub fn write<T, V>(view: V, value: Option<T>) -> Self
    where
        V: View<State, T> + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        Self::modify_state(move |state| view.set(state, value.clone()))
    }

    /// Rewrites the value focused by `view` with `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::optics::{View, value_view};
    /// use stateflow::state::State;
    ///
    /// # futures::executor::block_on(async {
    /// let hit: Computation<()> =
    ///     Computation::update(value_view::<u32>("hits"), |hits| Some(hits.unwrap_or(0) + 1));
    /// let state = hit.clone().combine(hit).exec(State::default()).await.unwrap();
    /// assert_eq!(value_view::<u32>("hits").get(&state), Some(2));
    /// # });
    /// ```
    #[must_use]
    pub fn update<T, V, F>(view: V, function: F) -> Self
    where
        V: View<State, T> + Send + Sync + 'static,
        F: Fn(Option<T>) -> Option<T> + Send + Sync + 'static,
    {
        Self::modify_state(move |state| view.modify(state, &function))
    }
}

impl<T, E> Computation<Option<T>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Produces the value focused by `view`, leaving the state as is.
    #[must_use]
    pub fn read<V>(view: V) -> Self
    where
        V: View<State, T> + Send + Sync + 'static,
    {
        Self::from_step(move |state| {
            let value = view.get(&state);
            future::ready(Ok((value, state))).boxed()
        })
    }
}

impl<T, E> Computation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: From<StateError> + Send + 'static,
{
    /// Produces the environment value stored under `key`.
    ///
    /// Unlike reading through a view, a missing or mistyped value fails the
    /// computation with a [`StateError`].
    ///
    /// # Errors
    ///
    /// Fails with [`StateError::MissingValue`] when nothing is stored under
    /// `key`, and with [`StateError::TypeMismatch`] when the stored value is
    /// not a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stateflow::computation::Computation;
    /// use stateflow::error::StateError;
    /// use stateflow::state::{Environment, State};
    ///
    /// # futures::executor::block_on(async {
    /// let user: Computation<String, StateError> = Computation::require("user");
    ///
    /// let state = State::new(Environment::new().with("user", "alice".to_string()));
    /// assert_eq!(user.eval(state).await, Ok("alice".to_string()));
    ///
    /// assert_eq!(
    ///     user.eval(State::default()).await,
    ///     Err(StateError::MissingValue { key: "user".to_string() })
    /// );
    /// # });
    /// ```
    #[must_use]
    pub fn require(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::from_step(move |state| {
            let outcome = match state.environment().get(key.as_str()) {
                None => Err(StateError::MissingValue { key: key.clone() }),
                Some(value) => value.downcast::<T>().ok_or_else(|| StateError::TypeMismatch {
                    key: key.clone(),
                    expected: type_name::<T>(),
                    found: value.type_name(),
                }),
            };
            future::ready(outcome.map(|value| (value, state)).map_err(E::from)).boxed()
        })
    }
}
