// TreeMap integration suite (consolidated).
//
// The core behaviors exercised:
// - Ordering resolution chain: explicit comparator, then Comparable
//   pair, then the built-in scalar fallback.
// - Polarity: the scalar fallback compares probe-vs-stored, so default
//   iteration is ascending while naturally written Comparable and
//   Comparator implementations come out reversed.
// - Order-equal keys collapse to a single entry (value replacement).
// - first/last on an empty map is NoSuchElement; an unorderable pair
//   surfaces IncomparableKeys with both operand types.

use accumulate::{Comparable, Key, TreeMap};
use core::cmp::Ordering;
use std::any::Any;
use std::rc::Rc;

#[derive(Debug)]
struct Weight(i64);

impl Comparable for Weight {
    fn compare_to(&self, other: &dyn Comparable) -> Ordering {
        other
            .as_any()
            .downcast_ref::<Weight>()
            .map_or(Ordering::Equal, |o| self.0.cmp(&o.0))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Test: default scalar ordering iterates ascending and from_pairs picks
// the extremes accordingly.
#[test]
fn default_scalar_order_is_ascending() {
    let map = TreeMap::from_pairs([6, 1, 4].map(|k| (Key::from(k), k))).unwrap();

    assert_eq!(map.first().unwrap().key().as_int(), Some(1));
    assert_eq!(map.last().unwrap().key().as_int(), Some(6));
    let keys: Vec<i64> = map.iter().filter_map(|e| e.key().as_int()).collect();
    assert_eq!(keys, vec![1, 4, 6]);
}

// Test: string keys with distinct insertion order still come out in
// resolved order, and values() materializes that sequence.
#[test]
fn values_follow_resolved_order() {
    let mut map = TreeMap::new();
    map.put(Key::from("test"), "me").unwrap();
    map.put(Key::from("right"), "now").unwrap();

    // "right" < "test" lexicographically, so its value leads.
    assert_eq!(map.values().into_vec(), vec![&"now", &"me"]);
}

// Test: numeric strings order numerically, not lexicographically.
#[test]
fn numeric_strings_order_numerically() {
    let mut map = TreeMap::new();
    map.put(Key::from("10"), 10).unwrap();
    map.put(Key::from("9"), 9).unwrap();

    assert_eq!(map.first().unwrap().key().as_str(), Some("9"));
    assert_eq!(map.last().unwrap().key().as_str(), Some("10"));
}

// Test: a naturally written Comparable yields descending iteration
// because the resolution chain hands it stored-then-probe operands.
#[test]
fn natural_comparable_iterates_descending() {
    let mut map = TreeMap::new();
    for i in 0..3 {
        map.put(Key::comparable(Weight(i)), i).unwrap();
    }

    let values: Vec<i64> = map.iter().map(|e| *e.value()).collect();
    assert_eq!(values, vec![2, 1, 0]);
    assert_eq!(*map.first().unwrap().value(), 2);
    assert_eq!(*map.last().unwrap().value(), 0);
}

// Test: an explicit comparator overrides everything; written in the
// probe-vs-stored polarity it sorts ascending by string length, and
// length ties collapse to one entry.
#[test]
fn length_comparator_collapses_ties() {
    let by_length = |first: &Key, second: &Key| {
        let len = |k: &Key| k.as_str().map_or(0, str::len);
        len(second).cmp(&len(first))
    };
    let mut map = TreeMap::with_comparator(by_length);
    map.put(Key::from("aaa"), 1).unwrap();
    map.put(Key::from("aa"), 2).unwrap();
    map.put(Key::from("ba"), 3).unwrap(); // ties with "aa": replaces its value

    assert_eq!(map.len(), 2);
    let keys: Vec<&str> = map.iter().filter_map(|e| e.key().as_str()).collect();
    assert_eq!(keys, vec!["aa", "aaa"]);
    let values: Vec<i32> = map.iter().map(|e| *e.value()).collect();
    assert_eq!(values, vec![3, 1]);
}

// Test: first/last on an empty map error rather than panic.
#[test]
fn extremes_on_empty_map() {
    let map: TreeMap<i32> = TreeMap::new();
    assert!(map.first().is_err());
    assert!(map.last().is_err());
}

// Test: an unorderable pair surfaces IncomparableKeys naming both
// operand types, with the stored key first.
#[test]
fn incomparable_pair_names_both_types() {
    let mut map = TreeMap::new();
    map.put(Key::from("anchor"), 1).unwrap();

    let err = map.put(Key::object(Rc::new(0u8)), 2).unwrap_err();
    assert_eq!(err.first_type(), "string");
    assert_eq!(err.second_type(), "object");

    // Lookups hit the same wall as inserts.
    let err = map
        .get(&Key::object(Rc::new(String::new())))
        .unwrap_err();
    assert_eq!(err.second_type(), "object");

    // The failed operations left the map as it was.
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&Key::from("anchor")).unwrap(), Some(&1));
}

// Test: replacing the root's value does not disturb the structure.
#[test]
fn replacing_a_value_keeps_the_shape() {
    let mut map = TreeMap::new();
    map.put(Key::from(2), "old").unwrap();
    map.put(Key::from(1), "left").unwrap();
    map.put(Key::from(3), "right").unwrap();

    assert_eq!(map.put(Key::from(2), "new").unwrap(), Some("old"));
    assert_eq!(map.len(), 3);
    let values: Vec<&str> = map.iter().map(|e| *e.value()).collect();
    assert_eq!(values, vec!["left", "new", "right"]);
}

// Test: removing interior and leaf nodes keeps every other entry
// retrievable and in order.
#[test]
fn removal_retains_the_rest() {
    let mut map = TreeMap::from_pairs([3, 1, 2, 0, 5, 4, 6].map(|k| (Key::from(k), k))).unwrap();

    assert_eq!(map.remove(&Key::from(1)).unwrap(), Some(1));
    assert_eq!(map.remove(&Key::from(5)).unwrap(), Some(5));
    assert_eq!(map.remove(&Key::from(9)).unwrap(), None);

    assert_eq!(map.len(), 5);
    let keys: Vec<i64> = map.iter().filter_map(|e| e.key().as_int()).collect();
    assert_eq!(keys, vec![0, 2, 3, 4, 6]);
    for k in keys {
        assert_eq!(map.get(&Key::from(k)).unwrap(), Some(&k));
    }
}

// Test: a drained map behaves like a fresh one.
#[test]
fn drain_then_reuse() {
    let mut map = TreeMap::new();
    for k in [2, 0, 1] {
        map.put(Key::from(k), k).unwrap();
    }
    for k in [1, 0, 2] {
        assert_eq!(map.remove(&Key::from(k)).unwrap(), Some(k));
    }
    assert!(map.is_empty());
    assert!(map.first().is_err());

    map.put(Key::from(7), 7).unwrap();
    assert_eq!(map.first().unwrap().key().as_int(), Some(7));
}
