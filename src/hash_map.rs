//! Hash-bucket map: creation-ordered buckets with an O(1) token index.

use crate::entry::Entry;
use crate::error::UnsupportedKey;
use crate::key::{HashToken, Key};
use crate::map::Map;
use crate::series::Series;
use core::slice;

/// All entries sharing one computed hash token, in insertion order.
/// At most one entry per distinct key (two-tier equality) per bucket.
#[derive(Debug)]
struct Bucket<V> {
    token: HashToken,
    entries: Vec<Entry<V>>,
}

/// Hash map over the dynamic key model.
///
/// Buckets are kept in creation order so iteration and `values()` are
/// deterministic: bucket order first, insertion order within a bucket.
/// The token index makes lookup O(bucket length); dropping an emptied
/// bucket re-numbers the index entries behind it.
pub struct HashMap<V> {
    index: hashbrown::HashMap<HashToken, usize>,
    buckets: Vec<Bucket<V>>,
    len: usize,
}

impl<V> HashMap<V> {
    pub fn new() -> Self {
        HashMap {
            index: hashbrown::HashMap::new(),
            buckets: Vec::new(),
            len: 0,
        }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, UnsupportedKey>
    where
        I: IntoIterator<Item = Entry<V>>,
    {
        let mut map = Self::new();
        for entry in entries {
            let (key, value) = entry.into_pair();
            map.put(key, value)?;
        }
        Ok(map)
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, UnsupportedKey>
    where
        I: IntoIterator<Item = (Key, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.put(key, value)?;
        }
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: &Key) -> Result<Option<&V>, UnsupportedKey> {
        let token = key.hash_token()?;
        let Some(&slot) = self.index.get(&token) else {
            return Ok(None);
        };
        Ok(self.buckets[slot]
            .entries
            .iter()
            .find(|entry| entry.key().equals(key))
            .map(Entry::value))
    }

    /// Insert or overwrite. Returns the previous value when the key was
    /// already present (matched by the two-tier equality rule).
    pub fn put(&mut self, key: Key, value: V) -> Result<Option<V>, UnsupportedKey> {
        let token = key.hash_token()?;
        match self.index.get(&token) {
            Some(&slot) => {
                let bucket = &mut self.buckets[slot];
                for entry in &mut bucket.entries {
                    if entry.key().equals(&key) {
                        return Ok(Some(entry.replace_value(value)));
                    }
                }
                bucket.entries.push(Entry::new(key, value));
                self.len += 1;
                Ok(None)
            }
            None => {
                let slot = self.buckets.len();
                self.buckets.push(Bucket {
                    token: token.clone(),
                    entries: vec![Entry::new(key, value)],
                });
                self.index.insert(token, slot);
                self.len += 1;
                Ok(None)
            }
        }
    }

    /// Detach and return the value stored under `key`, if any. An
    /// emptied bucket is dropped from both the bucket list and the index.
    pub fn remove(&mut self, key: &Key) -> Result<Option<V>, UnsupportedKey> {
        let token = key.hash_token()?;
        let Some(&slot) = self.index.get(&token) else {
            return Ok(None);
        };
        let bucket = &mut self.buckets[slot];
        let Some(position) = bucket
            .entries
            .iter()
            .position(|entry| entry.key().equals(key))
        else {
            return Ok(None);
        };
        let entry = bucket.entries.remove(position);
        self.len -= 1;
        if bucket.entries.is_empty() {
            self.buckets.remove(slot);
            self.index.remove(&token);
            for position in self.index.values_mut() {
                if *position > slot {
                    *position -= 1;
                }
            }
        }
        Ok(Some(entry.into_value()))
    }

    /// All values in bucket-then-insertion order.
    pub fn values(&self) -> Series<&V> {
        self.iter().map(Entry::value).collect()
    }

    /// Entries in bucket-then-insertion order. Restartable: each call
    /// yields a fresh cursor over the same sequence.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            entries: Default::default(),
        }
    }
}

impl<V> Default for HashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Map<V> for HashMap<V> {
    type Error = UnsupportedKey;

    fn get(&self, key: &Key) -> Result<Option<&V>, UnsupportedKey> {
        HashMap::get(self, key)
    }

    fn put(&mut self, key: Key, value: V) -> Result<Option<V>, UnsupportedKey> {
        HashMap::put(self, key, value)
    }

    fn remove(&mut self, key: &Key) -> Result<Option<V>, UnsupportedKey> {
        HashMap::remove(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn values(&self) -> Series<&V> {
        HashMap::values(self)
    }
}

/// Cursor over entries, bucket by bucket.
pub struct Iter<'a, V> {
    buckets: slice::Iter<'a, Bucket<V>>,
    entries: slice::Iter<'a, Entry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                return Some(entry);
            }
            self.entries = self.buckets.next()?.entries.iter();
        }
    }
}

impl<'a, V> IntoIterator for &'a HashMap<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_keys(map: &HashMap<i32>) -> Vec<Key> {
        map.iter().map(|entry| entry.key().clone()).collect()
    }

    #[test]
    fn emptied_bucket_is_dropped_and_index_renumbered() {
        let mut map = HashMap::new();
        map.put(Key::from(1), 10).unwrap();
        map.put(Key::from(2), 20).unwrap();
        map.put(Key::from(3), 30).unwrap();
        assert_eq!(map.buckets.len(), 3);

        assert_eq!(map.remove(&Key::from(1)).unwrap(), Some(10));
        assert_eq!(map.buckets.len(), 2);
        assert_eq!(map.index.len(), 2);

        // Remaining entries must still be reachable through the index.
        assert_eq!(map.get(&Key::from(2)).unwrap(), Some(&20));
        assert_eq!(map.get(&Key::from(3)).unwrap(), Some(&30));
        let keys = collect_keys(&map);
        assert_eq!(keys.len(), 2);
        assert!(keys[0].equals(&Key::from(2)));
        assert!(keys[1].equals(&Key::from(3)));
    }

    #[test]
    fn float_key_shares_bucket_with_truncated_int() {
        let mut map = HashMap::new();
        map.put(Key::from(3.7), 1).unwrap();
        map.put(Key::from(3), 2).unwrap();

        // Same token, distinct keys: one bucket, two entries.
        assert_eq!(map.buckets.len(), 1);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Key::from(3.7)).unwrap(), Some(&1));
        assert_eq!(map.get(&Key::from(3)).unwrap(), Some(&2));
    }

    #[test]
    fn overwrite_stays_in_place() {
        let mut map = HashMap::new();
        map.put(Key::from("a"), 1).unwrap();
        map.put(Key::from("b"), 2).unwrap();
        let previous = map.put(Key::from("a"), 3).unwrap();

        assert_eq!(previous, Some(1));
        assert_eq!(map.len(), 2);
        let keys = collect_keys(&map);
        assert!(keys[0].equals(&Key::from("a")), "overwrite must not reorder");
    }

    #[test]
    fn iteration_is_bucket_then_insertion_order() {
        let mut map = HashMap::new();
        map.put(Key::from(2.5), 1).unwrap(); // bucket for token 2
        map.put(Key::from("x"), 2).unwrap();
        map.put(Key::from(2), 3).unwrap(); // joins the first bucket

        let values: Vec<i32> = map.iter().map(|entry| *entry.value()).collect();
        assert_eq!(values, vec![1, 3, 2]);
        assert_eq!(map.values().into_vec(), vec![&1, &3, &2]);
    }
}
