//! Optics for typed access into the state.
//!
//! The environment of a [`State`](crate::state::State) is an untyped bag of
//! values. Optics give that bag a typed face without unchecked casts:
//!
//! - [`Lens`]: focus on a field that is always present (`get`/`set`)
//! - [`View`]: focus on a value that may be absent (`Option` in, `Option` out)
//!
//! Lenses compose with lenses ([`Lens::compose`]) and with views
//! ([`Lens::compose_view`]); a view over type-erased values narrows to a
//! concrete type with [`View::typed`].
//!
//! # Example
//!
//! ```
//! use stateflow::optics::{View, value_view};
//! use stateflow::state::State;
//!
//! let user = value_view::<String>("user");
//!
//! let state = user.set(State::default(), Some("alice".to_string()));
//! assert_eq!(user.get(&state), Some("alice".to_string()));
//!
//! // A value of another type reads as absent.
//! assert_eq!(value_view::<u64>("user").get(&state), None);
//! ```

mod lens;
mod state_optics;
mod view;

pub use lens::{ComposedLens, Lens};
pub use state_optics::{
    EnvironmentLens, MemoSlot, MemoView, MemosLens, MetaLens, ValueView, environment_view,
    memo_slot, memo_view, memos_view, meta_view, value_view,
};
pub use view::{LensView, SlotView, TypedView, View};
