#![cfg(test)]

// Property tests for HashMap kept inside the crate so they can compare
// against the structural internals without feature gates.

use crate::hash_map::HashMap;
use crate::key::{HashToken, Hashable, Key};
use proptest::prelude::*;
use std::any::Any;
use std::collections::BTreeSet;
use std::collections::HashMap as StdHashMap;

// Scalar model key mirrored into both the system under test and the
// std-map model. Pool-indexed ops shrink toward earlier keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum ModelKey {
    Int(i64),
    Str(String),
}

impl ModelKey {
    fn to_key(&self) -> Key {
        match self {
            ModelKey::Int(value) => Key::Int(*value),
            ModelKey::Str(value) => Key::Str(value.clone()),
        }
    }

    fn from_key(key: &Key) -> ModelKey {
        match key {
            Key::Int(value) => ModelKey::Int(*value),
            Key::Str(value) => ModelKey::Str(value.clone()),
            other => panic!("unexpected key shape: {other:?}"),
        }
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Get(usize),
    Remove(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<ModelKey>, Vec<Op>)> {
    let model_key = prop_oneof![
        (0i64..6).prop_map(ModelKey::Int),
        "[a-c]{0,2}".prop_map(ModelKey::Str),
    ];
    proptest::collection::vec(model_key, 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            idx.clone().prop_map(Op::Get),
            idx.clone().prop_map(Op::Remove),
            Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// - `put` reports the same previous value as the model insert.
// - `get`/`remove` parity for present and absent keys.
// - Iteration yields each live entry exactly once.
// - `len`/`is_empty` parity after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: HashMap<i32> = HashMap::new();
        let mut model: StdHashMap<ModelKey, i32> = StdHashMap::new();

        for op in ops {
            match op {
                Op::Put(i, v) => {
                    let k = &pool[i];
                    let previous = sut.put(k.to_key(), v).expect("scalar keys always hash");
                    prop_assert_eq!(previous, model.insert(k.clone(), v));
                }
                Op::Get(i) => {
                    let k = &pool[i];
                    let found = sut.get(&k.to_key()).expect("scalar keys always hash");
                    prop_assert_eq!(found, model.get(k));
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    let removed = sut.remove(&k.to_key()).expect("scalar keys always hash");
                    prop_assert_eq!(removed, model.remove(k));
                }
                Op::Iterate => {
                    let sut_keys: BTreeSet<ModelKey> =
                        sut.iter().map(|e| ModelKey::from_key(e.key())).collect();
                    let model_keys: BTreeSet<ModelKey> = model.keys().cloned().collect();
                    prop_assert_eq!(sut_keys, model_keys);
                    prop_assert_eq!(sut.iter().count(), model.len());
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Collision variant: every key resolves to the same token, so all
// entries land in one bucket and correctness rests entirely on the
// equality scan.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CollidingKey(u8);

impl Hashable for CollidingKey {
    fn hash_code(&self) -> HashToken {
        HashToken::Str("collide".to_string())
    }
    fn equals(&self, other: &dyn Hashable) -> bool {
        other
            .as_any()
            .downcast_ref::<CollidingKey>()
            .is_some_and(|o| o.0 == self.0)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(ops in proptest::collection::vec(
        (0u8..6, any::<i32>(), prop_oneof![Just(0u8), Just(1), Just(2)]),
        1..60,
    )) {
        let mut sut: HashMap<i32> = HashMap::new();
        let mut model: StdHashMap<u8, i32> = StdHashMap::new();

        for (id, v, action) in ops {
            let key = Key::hashable(CollidingKey(id));
            match action {
                0 => {
                    let previous = sut.put(key, v).expect("hashable keys always hash");
                    prop_assert_eq!(previous, model.insert(id, v));
                }
                1 => {
                    let found = sut.get(&key).expect("hashable keys always hash");
                    prop_assert_eq!(found, model.get(&id));
                }
                _ => {
                    let removed = sut.remove(&key).expect("hashable keys always hash");
                    prop_assert_eq!(removed, model.remove(&id));
                }
            }
            prop_assert_eq!(sut.len(), model.len());
        }
    }
}
