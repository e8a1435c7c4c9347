//! Identifiers of memo cache entries.

use std::fmt;

use uuid::Uuid;

/// Identity under which a memoized computation caches its result.
///
/// A fresh id is minted every time [`Computation::memo`] is called, so two
/// memoized computations never share a cache entry even when they wrap the
/// same computation.
///
/// [`Computation::memo`]: crate::computation::Computation::memo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemoId(Uuid);

impl MemoId {
    /// Mints a new, globally unique id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Same as [`MemoId::new`]: every default id is fresh.
impl Default for MemoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemoId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.hyphenated())
    }
}
