//! accumulate: a hash-bucket map and a red-black tree map behind one
//! contract, with key-only set projections and a growable `Series`
//! companion.
//!
//! Internal Design:
//!
//! Summary
//! - Keys are dynamic: `Key` is a union over scalars, object-like values
//!   and capability objects, and the maps dispatch identity through the
//!   `Hashable`/`Comparable`/`Comparator` contract instead of
//!   compile-time trait bounds.
//! - Layers:
//!   - Identity layer: the hash-token resolution ladder and two-tier
//!     equality (`key`), and ordering resolution (`ordering`); each is a
//!     single function so priority rules are never re-derived elsewhere.
//!   - `HashMap<V>`: creation-ordered buckets with an O(1) token index;
//!     collisions resolved by an equality scan within the bucket.
//!   - `TreeMap<V>`: red-black tree over a slotmap arena; parent/child
//!     links are arena ids, so rotations and splices never touch owning
//!     pointers.
//!   - Projections: `HashSet`/`TreeSet` store `true` in the backing map
//!     and expose keys only; `Series<T>` materializes `values()`.
//!
//! Constraints
//! - Single-threaded. Mutation requires `&mut self`; user code invoked
//!   during probes (`equals`, `compare`) only ever receives shared
//!   borrows and cannot reach back into the map.
//! - Failure is part of every fallible signature: `UnsupportedKey` when
//!   the hash map cannot token-ize a key, `IncomparableKeys` when the
//!   tree map cannot order a pair, `NoSuchElement` for `first`/`last` on
//!   an empty tree. An absent key is `Ok(None)`, never an error.
//! - Mutating operations are all-or-nothing; no partial structural state
//!   survives an error.
//!
//! Ordering quirk
//! - The tree map's built-in scalar comparator compares the probe key
//!   against the stored key, so the default in-order sequence is
//!   ascending while naturally written `Comparable`/`Comparator`
//!   implementations come out reversed. Preserved deliberately; supply
//!   your own comparator to pick a direction.

mod entry;
mod error;
pub mod hash_map;
mod hash_map_proptest;
mod key;
mod map;
mod ordering;
mod series;
mod set;
pub mod tree_map;
mod tree_map_proptest;

pub use entry::Entry;
pub use error::{IncomparableKeys, NoSuchElement, UnsupportedKey};
pub use hash_map::HashMap;
pub use key::{Comparable, Comparator, HashToken, Hashable, Key, ObjectKey};
pub use map::Map;
pub use series::Series;
pub use set::{HashSet, HashSetIter, TreeSet, TreeSetIter};
pub use tree_map::TreeMap;
