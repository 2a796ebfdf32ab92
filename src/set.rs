//! Key-only projections of the maps. A set stores `true` under each key
//! and inherits its backing map's identity rules and failure mode
//! verbatim.

use crate::entry::Entry;
use crate::error::{IncomparableKeys, UnsupportedKey};
use crate::hash_map::{self, HashMap};
use crate::key::{Comparator, Key};
use crate::tree_map::{self, TreeMap};

/// Unordered set backed by a `HashMap`.
pub struct HashSet {
    map: HashMap<bool>,
}

impl HashSet {
    pub fn new() -> Self {
        HashSet {
            map: HashMap::new(),
        }
    }

    pub fn from_keys<I>(keys: I) -> Result<Self, UnsupportedKey>
    where
        I: IntoIterator<Item = Key>,
    {
        let mut set = Self::new();
        for key in keys {
            set.add(key)?;
        }
        Ok(set)
    }

    /// Insert; `true` when the key was not present before.
    pub fn add(&mut self, key: Key) -> Result<bool, UnsupportedKey> {
        Ok(self.map.put(key, true)?.is_none())
    }

    /// Remove; `true` when the key was present.
    pub fn remove(&mut self, key: &Key) -> Result<bool, UnsupportedKey> {
        Ok(self.map.remove(key)?.is_some())
    }

    pub fn contains(&self, key: &Key) -> Result<bool, UnsupportedKey> {
        Ok(self.map.get(key)?.is_some())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys in the backing map's bucket-then-insertion order.
    pub fn iter(&self) -> HashSetIter<'_> {
        HashSetIter {
            inner: self.map.iter(),
        }
    }
}

impl Default for HashSet {
    fn default() -> Self {
        Self::new()
    }
}

pub struct HashSetIter<'a> {
    inner: hash_map::Iter<'a, bool>,
}

impl<'a> Iterator for HashSetIter<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::key)
    }
}

impl<'a> IntoIterator for &'a HashSet {
    type Item = &'a Key;
    type IntoIter = HashSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sorted set backed by a `TreeMap`.
pub struct TreeSet {
    map: TreeMap<bool>,
}

impl TreeSet {
    pub fn new() -> Self {
        TreeSet {
            map: TreeMap::new(),
        }
    }

    pub fn with_comparator<C: Comparator + 'static>(comparator: C) -> Self {
        TreeSet {
            map: TreeMap::with_comparator(comparator),
        }
    }

    pub fn from_keys<I>(keys: I) -> Result<Self, IncomparableKeys>
    where
        I: IntoIterator<Item = Key>,
    {
        let mut set = Self::new();
        for key in keys {
            set.add(key)?;
        }
        Ok(set)
    }

    /// Insert; `true` when the key was not present before.
    pub fn add(&mut self, key: Key) -> Result<bool, IncomparableKeys> {
        Ok(self.map.put(key, true)?.is_none())
    }

    /// Remove; `true` when the key was present.
    pub fn remove(&mut self, key: &Key) -> Result<bool, IncomparableKeys> {
        Ok(self.map.remove(key)?.is_some())
    }

    pub fn contains(&self, key: &Key) -> Result<bool, IncomparableKeys> {
        Ok(self.map.get(key)?.is_some())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys in ascending resolved order.
    pub fn iter(&self) -> TreeSetIter<'_> {
        TreeSetIter {
            inner: self.map.iter(),
        }
    }
}

impl Default for TreeSet {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TreeSetIter<'a> {
    inner: tree_map::Iter<'a, bool>,
}

impl<'a> Iterator for TreeSetIter<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::key)
    }
}

impl<'a> IntoIterator for &'a TreeSet {
    type Item = &'a Key;
    type IntoIter = TreeSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
