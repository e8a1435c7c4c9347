//! Persistent key/value slots.
//!
//! [`Slots`] backs both halves of the [`State`](super::State): the
//! environment (keyed by string) and the memo cache (keyed by
//! [`MemoId`](super::MemoId)). Every update returns a new map; the previous
//! map stays valid and unchanged. The underlying table is shared between
//! versions until one of them is written to.

use std::any::Any;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::Value;

/// An immutable map from keys to type-erased [`Value`]s.
///
/// # Examples
///
/// ```rust
/// use stateflow::state::Slots;
///
/// let slots: Slots<String> = Slots::new().with("count", 1_i32);
/// let updated = slots.clone().with("count", 2_i32);
///
/// assert_eq!(slots.get("count").and_then(|v| v.downcast::<i32>()), Some(1));
/// assert_eq!(updated.get("count").and_then(|v| v.downcast::<i32>()), Some(2));
/// ```
pub struct Slots<K> {
    entries: Arc<HashMap<K, Value>>,
}

impl<K> Slots<K> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(HashMap::new()),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterates over the entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Value)> {
        self.entries.iter()
    }
}

impl<K> Slots<K>
where
    K: Eq + Hash,
{
    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }
}

impl<K> Slots<K>
where
    K: Clone + Eq + Hash,
{
    /// Returns a map with `key` bound to `value`.
    #[must_use]
    pub fn insert(mut self, key: K, value: Value) -> Self {
        Arc::make_mut(&mut self.entries).insert(key, value);
        self
    }

    /// Returns a map without `key`. Removing an absent key leaves the map as
    /// it was.
    #[must_use]
    pub fn remove<Q>(mut self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        if self.entries.contains_key(key) {
            Arc::make_mut(&mut self.entries).remove(key);
        }
        self
    }

    /// Returns a map with `key` bound to a new cell holding `value`.
    #[must_use]
    pub fn with<Q, T>(self, key: Q, value: T) -> Self
    where
        Q: Into<K>,
        T: PartialEq + Send + Sync + 'static,
    {
        self.insert(key.into(), Value::new(value))
    }

    /// Like [`with`](Self::with), for values without equality.
    #[must_use]
    pub fn with_opaque<Q, T>(self, key: Q, value: T) -> Self
    where
        Q: Into<K>,
        T: Any + Send + Sync,
    {
        self.insert(key.into(), Value::opaque(value))
    }
}

impl<K> Clone for Slots<K> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K> Default for Slots<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PartialEq for Slots<K>
where
    K: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
            || (self.entries.len() == other.entries.len()
                && self
                    .entries
                    .iter()
                    .all(|(key, value)| other.entries.get(key) == Some(value)))
    }
}

impl<K> FromIterator<(K, Value)> for Slots<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iterator: I) -> Self {
        Self {
            entries: Arc::new(iterator.into_iter().collect()),
        }
    }
}

impl<K> fmt::Debug for Slots<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.entries.iter()).finish()
    }
}
