//! `tracing` hooks.
//!
//! With the `tracing` feature disabled every hook is an empty function.

use crate::state::MemoId;

#[cfg(feature = "tracing")]
pub(crate) fn memo_hit(id: MemoId) {
    tracing::trace!(memo_id = %id, "memo hit");
}

#[cfg(feature = "tracing")]
pub(crate) fn memo_miss(id: MemoId) {
    tracing::trace!(memo_id = %id, "memo miss");
}

#[cfg(feature = "tracing")]
pub(crate) fn memo_stored(id: MemoId) {
    tracing::trace!(memo_id = %id, "memo stored");
}

#[cfg(not(feature = "tracing"))]
pub(crate) const fn memo_hit(_id: MemoId) {}

#[cfg(not(feature = "tracing"))]
pub(crate) const fn memo_miss(_id: MemoId) {}

#[cfg(not(feature = "tracing"))]
pub(crate) const fn memo_stored(_id: MemoId) {}
