//! Key/value pair owned by exactly one map.

use crate::key::Key;

/// Immutable-key, in-place-mutable-value pair.
///
/// Maps create entries on first `put`, replace the value on overwrite,
/// and destroy them on `remove`. An entry is never shared between maps.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    key: Key,
    value: V,
}

impl<V> Entry<V> {
    pub fn new(key: Key, value: V) -> Self {
        Entry { key, value }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_pair(self) -> (Key, V) {
        (self.key, self.value)
    }

    /// Overwrite primitive: swap the stored value, handing back the old
    /// one so `put` can report it.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}
