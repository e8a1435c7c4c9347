//! The per-request state threaded through computations.
//!
//! A [`State`] has two independent halves:
//!
//! - the [`Environment`]: the request-scoped bag of values, keyed by string
//! - the [`Meta`] block: framework bookkeeping, currently the memo cache
//!
//! Both halves are persistent maps. Writing produces a new `State`; older
//! `State` values keep observing exactly what they held when they were
//! produced.
//!
//! # Examples
//!
//! ```rust
//! use stateflow::state::{Environment, State};
//!
//! let environment = Environment::new().with("path", "/users".to_string());
//! let state = State::new(environment);
//!
//! assert!(state.meta().is_empty());
//! assert_eq!(
//!     state.environment().get("path").and_then(|v| v.downcast::<String>()),
//!     Some("/users".to_string())
//! );
//! ```

mod memo_id;
mod slots;
mod value;

pub use memo_id::MemoId;
pub use slots::Slots;
pub use value::Value;

/// The request-scoped bag of values.
pub type Environment = Slots<String>;

/// Framework-internal bookkeeping carried by a [`State`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    memos: Slots<MemoId>,
}

impl Meta {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The memo cache.
    pub const fn memos(&self) -> &Slots<MemoId> {
        &self.memos
    }

    /// Creates a block around an existing memo cache.
    #[must_use]
    pub const fn from_memos(memos: Slots<MemoId>) -> Self {
        Self { memos }
    }

    /// Returns `true` if a result is cached under `id`.
    pub fn contains(&self, id: &MemoId) -> bool {
        self.memos.contains_key(id)
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.memos.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }
}

/// The state threaded through a chain of computations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    environment: Environment,
    meta: Meta,
}

impl State {
    /// Wraps `environment` with an empty [`Meta`] block.
    ///
    /// Call this once per request: the memo cache of the returned state is
    /// empty, so nothing cached for another request is visible through it.
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            meta: Meta::new(),
        }
    }

    /// The request-scoped bag of values.
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The bookkeeping block.
    pub const fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Returns a state with its environment replaced.
    #[must_use]
    pub fn with_environment(self, environment: Environment) -> Self {
        Self {
            environment,
            ..self
        }
    }

    /// Returns a state with its bookkeeping block replaced.
    #[must_use]
    pub fn with_meta(self, meta: Meta) -> Self {
        Self { meta, ..self }
    }

    /// Splits the state into its two halves.
    pub fn into_parts(self) -> (Environment, Meta) {
        (self.environment, self.meta)
    }
}

impl From<Environment> for State {
    fn from(environment: Environment) -> Self {
        Self::new(environment)
    }
}

static_assertions::assert_impl_all!(State: Send, Sync, Clone);
static_assertions::assert_impl_all!(Value: Send, Sync);
