//! # stateflow
//!
//! Asynchronous, state-threading computations for request processing.
//!
//! ## Overview
//!
//! Every request gets a [`State`](state::State): a bag of request-scoped
//! values plus a bookkeeping block. Request handling is written as
//! [`Computation`](computation::Computation)s that read and write that state
//! and are glued together with monadic combinators.
//!
//! - **State**: persistent environment and memo cache ([`state`])
//! - **Optics**: typed views into the untyped environment ([`optics`])
//! - **Computations**: `init`, `map`, `bind`, `apply`, `combine`, `delay`,
//!   `zero`, `map2`, `from_async` ([`computation`])
//! - **Memoization**: `memo` evaluates a computation at most once per request
//!
//! ## Feature Flags
//!
//! - `tracing` (default): memo diagnostics and `Computation::instrument`
//! - `serde`: serialization of [`MemoId`](state::MemoId)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use stateflow::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let user = value_view::<String>("user");
//!
//! let greeting: Computation<String> = Computation::read(user.clone())
//!     .map(|user| format!("hello, {}", user.unwrap_or_else(|| "stranger".to_string())))
//!     .memo();
//!
//! let state = State::new(Environment::new().with("user", "alice".to_string()));
//! let (first, state) = greeting.run(state).await?;
//! let (second, _) = greeting.run(state).await?;
//!
//! assert_eq!(first, "hello, alice");
//! assert_eq!(first, second);
//! # Ok::<(), Fault>(())
//! # }).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use stateflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::computation::*;
    pub use crate::error::*;
    pub use crate::optics::*;
    pub use crate::state::*;
}

pub mod computation;
pub mod error;
pub mod optics;
pub mod state;

mod diagnostics;
