//! Optics into the [`State`] container.
//!
//! These are the only sanctioned way for higher layers to reach typed data
//! inside a state:
//!
//! - [`environment_view`] and [`meta_view`] focus on the two halves
//! - [`value_view`] focuses on one environment entry, typed
//! - [`memo_view`] focuses on one memo cache entry, typed
//! - [`memo_slot`] focuses on one memo cache entry as a raw [`Value`](crate::state::Value)
//!
//! Every optic here is a plain key plus accessor functions. They hold no
//! request data and can be built once and shared freely.

use super::lens::{ComposedLens, Lens};
use super::view::{LensView, SlotView, TypedView};
use crate::state::{Environment, MemoId, Meta, Slots, State};

/// Lens from a [`State`] to its [`Environment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvironmentLens;

impl Lens<State, Environment> for EnvironmentLens {
    fn get<'a>(&self, source: &'a State) -> &'a Environment {
        source.environment()
    }

    fn set(&self, source: State, value: Environment) -> State {
        source.with_environment(value)
    }
}

/// Lens from a [`State`] to its [`Meta`] block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaLens;

impl Lens<State, Meta> for MetaLens {
    fn get<'a>(&self, source: &'a State) -> &'a Meta {
        source.meta()
    }

    fn set(&self, source: State, value: Meta) -> State {
        source.with_meta(value)
    }
}

/// Lens from a [`Meta`] block to its memo cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemosLens;

impl Lens<Meta, Slots<MemoId>> for MemosLens {
    fn get<'a>(&self, source: &'a Meta) -> &'a Slots<MemoId> {
        source.memos()
    }

    fn set(&self, _source: Meta, value: Slots<MemoId>) -> Meta {
        Meta::from_memos(value)
    }
}

/// Typed view on one environment entry.
pub type ValueView<T> = TypedView<LensView<EnvironmentLens, SlotView<String>, Environment>, T>;

/// Untyped view on one memo cache entry.
pub type MemoSlot = LensView<ComposedLens<MetaLens, MemosLens, Meta>, SlotView<MemoId>, Slots<MemoId>>;

/// Typed view on one memo cache entry.
pub type MemoView<T> = TypedView<MemoSlot, T>;

/// Focuses on the environment of a state.
#[must_use]
pub const fn environment_view() -> EnvironmentLens {
    EnvironmentLens
}

/// Focuses on the bookkeeping block of a state.
#[must_use]
pub const fn meta_view() -> MetaLens {
    MetaLens
}

/// Focuses on the memo cache of a bookkeeping block.
#[must_use]
pub const fn memos_view() -> MemosLens {
    MemosLens
}

/// Focuses on the environment entry under `key`, typed as `T`.
///
/// Reading yields `None` both when the key is absent and when it holds a
/// value of another type. Writing `None` removes the key; writing `Some`
/// inserts or overwrites it.
///
/// # Examples
///
/// ```
/// use stateflow::optics::{View, value_view};
/// use stateflow::state::{Environment, State};
///
/// let state = State::new(Environment::new().with("retries", 3_u32));
///
/// assert_eq!(value_view::<u32>("retries").get(&state), Some(3));
/// assert_eq!(value_view::<String>("retries").get(&state), None);
///
/// let state = value_view::<u32>("retries").set(state, None);
/// assert!(!state.environment().contains_key("retries"));
/// ```
#[must_use]
pub fn value_view<T>(key: impl Into<String>) -> ValueView<T> {
    TypedView::new(LensView::new(
        environment_view(),
        SlotView::new(key.into()),
    ))
}

/// Focuses on the memo cache entry under `id`, without a type.
///
/// Writes go in as they are given, so values without [`PartialEq`] can be
/// stored with [`Value::opaque`](crate::state::Value::opaque).
#[must_use]
pub fn memo_slot(id: MemoId) -> MemoSlot {
    LensView::new(
        ComposedLens::new(meta_view(), memos_view()),
        SlotView::new(id),
    )
}

/// Focuses on the memo cache entry under `id`, typed as `T`.
///
/// Same contract as [`value_view`].
#[must_use]
pub fn memo_view<T>(id: MemoId) -> MemoView<T> {
    TypedView::new(memo_slot(id))
}
