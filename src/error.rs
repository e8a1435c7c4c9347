//! Error types.
//!
//! Computations never invent failures of their own: whatever error a wrapped
//! computation produces reaches the caller of the chain unchanged. The only
//! error this crate constructs is [`StateError`], and only when asked to by
//! [`Computation::require`](crate::computation::Computation::require).

/// Default error type of a [`Computation`](crate::computation::Computation).
///
/// Any `std::error::Error + Send + Sync` converts into it with `?`, so
/// collaborators with unrelated error types can share one chain.
pub type Fault = Box<dyn std::error::Error + Send + Sync>;

/// Raised when a required environment value cannot be read.
///
/// # Examples
///
/// ```rust
/// use stateflow::error::StateError;
///
/// let error = StateError::MissingValue { key: "user".to_string() };
/// assert_eq!(error.to_string(), "no value stored under key `user`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Nothing is stored under the key.
    #[error("no value stored under key `{key}`")]
    MissingValue {
        /// The key that was read.
        key: String,
    },
    /// A value of another type is stored under the key.
    #[error("value under key `{key}` is a `{found}`, expected `{expected}`")]
    TypeMismatch {
        /// The key that was read.
        key: String,
        /// The requested type.
        expected: &'static str,
        /// The stored type.
        found: &'static str,
    },
}
